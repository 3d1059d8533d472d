//! Byte mode decoder (Mode 0100) for 8-bit data

use crate::error::DecodeError;

/// Decoder for byte segment bodies
pub struct ByteDecoder;

impl ByteDecoder {
    /// Decode `character_count` characters; returns (bytes, bits consumed)
    pub fn decode(bits: &[bool], character_count: usize) -> Result<(Vec<u8>, usize), DecodeError> {
        let needed = character_count * 8;
        let body = bits
            .get(..needed)
            .ok_or_else(|| DecodeError::Payload("byte segment truncated".into()))?;
        let bytes = body
            .chunks(8)
            .map(|c| c.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b)))
            .collect();
        Ok((bytes, needed))
    }
}
