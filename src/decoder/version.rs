//! Version information extraction for versions 7-40

use crate::encoder::format::version_bits;
use crate::error::DecodeError;
use crate::models::{BitMatrix, Version};

/// BCH(18,6) corrects up to three bit errors
const MAX_VERSION_ERRORS: u32 = 3;

/// Version info is 18 bits (6 data + 12 ECC), stored twice from version 7 up
pub struct VersionInfo;

impl VersionInfo {
    /// Resolve the version of a square matrix. Below version 7 the side
    /// length decides; above it the version blocks must agree with it.
    pub fn extract(matrix: &BitMatrix) -> Result<Version, DecodeError> {
        let size = matrix.width();
        let by_size = Version::from_size(size).ok_or(DecodeError::InvalidDimension {
            width: matrix.width(),
            height: matrix.height(),
        })?;
        if by_size.number() < 7 {
            return Ok(by_size);
        }

        let top_right = Self::read_top_right(matrix);
        let bottom_left = Self::read_bottom_left(matrix);
        let decoded = [top_right, bottom_left]
            .into_iter()
            .filter_map(Self::nearest)
            .min_by_key(|&(_, distance)| distance)
            .map(|(version, _)| version);

        match decoded {
            Some(version) if version == by_size => Ok(version),
            _ => Err(DecodeError::VersionInfo),
        }
    }

    /// Decode a raw 18-bit word, tolerating up to three flipped bits
    pub fn decode(bits: u32) -> Option<Version> {
        Self::nearest(bits).map(|(version, _)| version)
    }

    fn nearest(bits: u32) -> Option<(Version, u32)> {
        Version::all()
            .filter(|v| v.number() >= 7)
            .map(|v| (v, (version_bits(v) ^ bits).count_ones()))
            .filter(|&(_, distance)| distance <= MAX_VERSION_ERRORS)
            .min_by_key(|&(_, distance)| distance)
    }

    // 6x3 block left of the top-right finder, bit i at (size - 11 + i % 3, i / 3)
    fn read_top_right(matrix: &BitMatrix) -> u32 {
        let size = matrix.width();
        (0..18).fold(0u32, |bits, i| {
            bits | u32::from(matrix.get(size - 11 + i % 3, i / 3)) << i
        })
    }

    fn read_bottom_left(matrix: &BitMatrix) -> u32 {
        let size = matrix.width();
        (0..18).fold(0u32, |bits, i| {
            bits | u32::from(matrix.get(i / 3, size - 11 + i % 3)) << i
        })
    }
}
