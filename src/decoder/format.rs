//! Format information extraction from a symbol matrix

use crate::encoder::format::format_bits;
use crate::error::DecodeError;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

/// BCH(15,5) corrects up to three bit errors
const MAX_FORMAT_ERRORS: u32 = 3;

/// Error correction level and mask read from the 15 format bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Error correction level
    pub ec_level: ECLevel,
    /// Mask applied to the data modules
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    /// Read both copies and decode whichever lies closer to a valid word
    pub fn extract(matrix: &BitMatrix) -> Result<Self, DecodeError> {
        let size = matrix.width();
        if size < 21 {
            return Err(DecodeError::FormatInfo);
        }
        let primary = Self::read_top_left(matrix);
        let secondary = Self::read_split(matrix);

        let best = [primary, secondary]
            .into_iter()
            .filter_map(Self::nearest)
            .min_by_key(|&(_, distance)| distance);
        match best {
            Some((info, distance)) => {
                if distance > 0 {
                    tracing::debug!(distance, "corrected format bits");
                }
                Ok(info)
            }
            None => Err(DecodeError::FormatInfo),
        }
    }

    /// Decode a raw 15-bit word, tolerating up to three flipped bits
    pub fn decode(bits: u16) -> Option<Self> {
        Self::nearest(bits).map(|(info, _)| info)
    }

    fn nearest(bits: u16) -> Option<(Self, u32)> {
        let mut best: Option<(Self, u32)> = None;
        for ec_level in ECLevel::ALL {
            for mask_pattern in MaskPattern::ALL {
                let distance = (format_bits(ec_level, mask_pattern) ^ bits).count_ones();
                if distance <= MAX_FORMAT_ERRORS && best.is_none_or(|(_, d)| distance < d) {
                    best = Some((
                        Self {
                            ec_level,
                            mask_pattern,
                        },
                        distance,
                    ));
                }
            }
        }
        best
    }

    // Bit i of the copy wrapped around the top-left finder
    fn read_top_left(matrix: &BitMatrix) -> u16 {
        let mut bits = 0u16;
        for i in 0..15 {
            let (x, y) = match i {
                0..=5 => (8, i),
                6 => (8, 7),
                7 => (8, 8),
                8 => (7, 8),
                _ => (14 - i, 8),
            };
            bits |= u16::from(matrix.get(x, y)) << i;
        }
        bits
    }

    // Bit i of the copy split between the top-right and bottom-left finders
    fn read_split(matrix: &BitMatrix) -> u16 {
        let size = matrix.width();
        let mut bits = 0u16;
        for i in 0..15 {
            let (x, y) = if i < 8 {
                (size - 1 - i, 8)
            } else {
                (8, size - 15 + i)
            };
            bits |= u16::from(matrix.get(x, y)) << i;
        }
        bits
    }
}
