//! Symbol readback
//!
//! Reads a clean, axis-aligned module grid back into its payload:
//! - Format and version information (BCH nearest-codeword correction)
//! - Unmasking and zig-zag codeword extraction
//! - De-interleaving and Reed-Solomon correction
//! - Segment parsing (numeric, alphanumeric, byte, ECI)

/// Codeword extraction and block de-interleaving
pub mod bitstream;
/// Format information extraction (mask pattern, EC level)
pub mod format;
/// Segment body decoders (numeric, alphanumeric, byte)
pub mod modes;
/// Segment parsing of corrected data codewords
pub mod payload;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Version information extraction (versions 7-40)
pub mod version;

use crate::encoder::function_patterns::FunctionPatterns;
use crate::encoder::mask::apply_mask;
use crate::encoder::segment::Mode;
use crate::encoder::tables::ec_block_info;
use crate::error::DecodeError;
use crate::models::{BitMatrix, ECLevel, MaskPattern, Symbol, Version};
use format::FormatInfo;
use reed_solomon::ReedSolomonDecoder;
use version::VersionInfo;

/// Result of reading a symbol back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Version read from the size and version information
    pub version: Version,
    /// Error correction level from the format information
    pub ec_level: ECLevel,
    /// Mask removed before reading codewords
    pub mask_pattern: MaskPattern,
    /// Concatenated segment bytes
    pub payload: Vec<u8>,
    /// Segment modes in stream order
    pub modes: Vec<Mode>,
    /// ECI assignment, if the stream carried one
    pub eci: Option<u32>,
    /// Codewords repaired by Reed-Solomon across all blocks
    pub corrected_codewords: usize,
}

impl Decoded {
    /// Payload as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// Read an encoded symbol back
pub fn read_symbol(symbol: &Symbol) -> Result<Decoded, DecodeError> {
    read_matrix(symbol.matrix())
}

/// Read a square module grid (dark = `true`) back into its payload
pub fn read_matrix(matrix: &BitMatrix) -> Result<Decoded, DecodeError> {
    if matrix.width() != matrix.height() {
        return Err(DecodeError::InvalidDimension {
            width: matrix.width(),
            height: matrix.height(),
        });
    }
    let version = VersionInfo::extract(matrix)?;
    let format = FormatInfo::extract(matrix)?;

    let patterns = FunctionPatterns::new(version);
    let mut unmasked = matrix.clone();
    apply_mask(&mut unmasked, format.mask_pattern, &patterns);

    let codewords = bitstream::extract_codewords(&unmasked, &patterns);
    let info = ec_block_info(version, format.ec_level).map_err(|_| DecodeError::VersionInfo)?;
    let mut blocks = bitstream::deinterleave(&codewords, &info)?;

    let rs = ReedSolomonDecoder::new(info.ecc_per_block);
    let mut corrected_codewords = 0;
    let mut data = Vec::with_capacity(info.data_codewords());
    for (b, block) in blocks.iter_mut().enumerate() {
        corrected_codewords += rs
            .decode(block)
            .map_err(|_| DecodeError::Uncorrectable { block: b })?;
        data.extend_from_slice(&block[..info.data_len_of(b)]);
    }

    let parsed = payload::parse(&data, version)?;
    tracing::debug!(
        version = version.number(),
        ec_level = ?format.ec_level,
        mask = format.mask_pattern.id(),
        corrected_codewords,
        "read symbol"
    );

    Ok(Decoded {
        version,
        ec_level: format.ec_level,
        mask_pattern: format.mask_pattern,
        payload: parsed.bytes,
        modes: parsed.modes,
        eci: parsed.eci,
        corrected_codewords,
    })
}
