//! Alphanumeric mode decoder (Mode 0010)
//! Pairs = 11 bits, single = 6 bits

use crate::encoder::segment::ALPHANUMERIC_CHARSET;
use crate::error::DecodeError;

/// Decoder for alphanumeric segment bodies
pub struct AlphanumericDecoder;

impl AlphanumericDecoder {
    /// Decode `character_count` characters; returns (bytes, bits consumed)
    pub fn decode(bits: &[bool], character_count: usize) -> Result<(Vec<u8>, usize), DecodeError> {
        let mut result = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let pair = chars_remaining >= 2;
            let bits_needed = if pair { 11 } else { 6 };
            let group = bits
                .get(bit_idx..bit_idx + bits_needed)
                .ok_or_else(|| DecodeError::Payload("alphanumeric segment truncated".into()))?;
            let value = group.iter().fold(0usize, |acc, &b| (acc << 1) | usize::from(b));

            if pair {
                result.push(Self::char_at(value / 45)?);
                result.push(Self::char_at(value % 45)?);
                chars_remaining -= 2;
            } else {
                result.push(Self::char_at(value)?);
                chars_remaining -= 1;
            }
            bit_idx += bits_needed;
        }

        Ok((result, bit_idx))
    }

    fn char_at(index: usize) -> Result<u8, DecodeError> {
        ALPHANUMERIC_CHARSET
            .get(index)
            .copied()
            .ok_or_else(|| DecodeError::Payload(format!("alphanumeric value {} out of range", index)))
    }
}
