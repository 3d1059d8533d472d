//! Data bit-stream assembly: segments, terminator and padding

use crate::encoder::segment::Segment;
use crate::encoder::tables::num_data_codewords;
use crate::error::{EncodeError, Result};
use crate::models::{ECLevel, Version};

/// Growable MSB-first bit sequence
#[derive(Debug, Clone, Default)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    /// Empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bits written
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether no bits were written
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Append the low `count` bits of `value`, most significant first
    pub fn append_bits(&mut self, value: u32, count: usize) {
        debug_assert!(count <= 31 && value >> count == 0, "value does not fit");
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 != 0);
        }
    }

    /// Pack into bytes, zero-filling the final partial byte
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &b)| acc | ((b as u8) << (7 - i)))
            })
            .collect()
    }
}

const PAD_CODEWORDS: [u8; 2] = [0xEC, 0x11];

/// Serialize `segments` into exactly the data capacity of (version, level)
pub fn encode_data_codewords(
    segments: &[Segment],
    version: Version,
    ec_level: ECLevel,
) -> Result<Vec<u8>> {
    let capacity_bits = num_data_codewords(version, ec_level)? * 8;

    let mut bb = BitBuffer::new();
    for seg in segments {
        seg.write_to(&mut bb, version);
    }
    if bb.len() > capacity_bits {
        return Err(EncodeError::CapacityExceeded {
            needed_bits: Some(bb.len()),
            capacity_bits,
        });
    }

    // Terminator, then zero bits up to a byte boundary
    let terminator = (capacity_bits - bb.len()).min(4);
    bb.append_bits(0, terminator);
    let fill = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, fill);

    let mut codewords = bb.to_bytes();
    for &pad in PAD_CODEWORDS.iter().cycle() {
        if codewords.len() * 8 >= capacity_bits {
            break;
        }
        codewords.push(pad);
    }
    if codewords.len() * 8 != capacity_bits {
        return Err(EncodeError::InternalTableInconsistency(format!(
            "{} data codewords assembled for a capacity of {} bits",
            codewords.len(),
            capacity_bits
        )));
    }
    Ok(codewords)
}
