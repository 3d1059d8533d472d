//! Numeric mode decoder (Mode 0001)
//! Groups of 3 digits = 10 bits, 2 digits = 7 bits, 1 digit = 4 bits

use crate::error::DecodeError;

/// Decoder for numeric segment bodies
pub struct NumericDecoder;

impl NumericDecoder {
    /// Decode `character_count` digits; returns (ASCII digits, bits consumed)
    pub fn decode(bits: &[bool], character_count: usize) -> Result<(Vec<u8>, usize), DecodeError> {
        let mut result = Vec::with_capacity(character_count);
        let mut bit_idx = 0;
        let mut chars_remaining = character_count;

        while chars_remaining > 0 {
            let group_size = chars_remaining.min(3);
            let bits_needed = group_size * 3 + 1;
            let group = bits
                .get(bit_idx..bit_idx + bits_needed)
                .ok_or_else(|| DecodeError::Payload("numeric segment truncated".into()))?;
            let value = group.iter().fold(0u32, |acc, &b| (acc << 1) | u32::from(b));
            if value >= 10u32.pow(group_size as u32) {
                return Err(DecodeError::Payload(format!(
                    "numeric group {} exceeds {} digits",
                    value, group_size
                )));
            }

            let digits = format!("{:0width$}", value, width = group_size);
            result.extend_from_slice(digits.as_bytes());
            bit_idx += bits_needed;
            chars_remaining -= group_size;
        }

        Ok((result, bit_idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits_of(value: u32, count: usize) -> Vec<bool> {
        (0..count).rev().map(|i| (value >> i) & 1 != 0).collect()
    }

    #[test]
    fn test_numeric_decode() {
        let mut bits = bits_of(12, 10);
        bits.extend(bits_of(7, 4));
        let (decoded, used) = NumericDecoder::decode(&bits, 4).unwrap();
        assert_eq!(decoded, b"0127");
        assert_eq!(used, 14);
    }

    #[test]
    fn test_numeric_rejects_overflow() {
        assert!(NumericDecoder::decode(&bits_of(1017, 10), 3).is_err());
    }

    #[test]
    fn test_numeric_truncated() {
        assert!(NumericDecoder::decode(&bits_of(5, 6), 2).is_err());
    }
}
