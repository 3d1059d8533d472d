use thiserror::Error;

use crate::encoder::segment::Mode;

/// Errors raised while building a symbol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The payload does not fit at any allowed version for the requested level.
    /// `needed_bits` is `None` when a segment overflows its character count field.
    #[error("payload needs {} bits but only {capacity_bits} are available", display_bits(.needed_bits))]
    CapacityExceeded {
        /// Bits the segments need, header and counts included
        needed_bits: Option<usize>,
        /// Data bits available at the largest version tried
        capacity_bits: usize,
    },

    /// Version outside 1-40, level outside 0-3 or an ECI assignment above 999999
    #[error("invalid version or error correction level: {0}")]
    InvalidVersionOrLevel(String),

    /// A byte outside the alphabet of an explicitly requested mode
    #[error("byte 0x{byte:02X} cannot be represented in {mode:?} mode")]
    UnsupportedCharacter {
        /// Requested segment mode
        mode: Mode,
        /// Offending byte
        byte: u8,
    },

    /// Codeword counts disagree with the capacity tables
    #[error("internal table inconsistency: {0}")]
    InternalTableInconsistency(String),
}

fn display_bits(bits: &Option<usize>) -> String {
    match bits {
        Some(n) => n.to_string(),
        None => "more".to_string(),
    }
}

/// Errors raised while reading a symbol matrix back
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The matrix is not square or its side is not 21-177 in steps of 4
    #[error("matrix of {width}x{height} modules is not a valid symbol size")]
    InvalidDimension {
        /// Columns in the matrix
        width: usize,
        /// Rows in the matrix
        height: usize,
    },

    /// Neither format copy lies within three bits of a valid word
    #[error("format information is unreadable")]
    FormatInfo,

    /// Version information is uncorrectable or names a different size
    #[error("version information is unreadable or disagrees with the symbol size")]
    VersionInfo,

    /// Reed-Solomon decoding failed
    #[error("block {block} has more errors than its error correction can repair")]
    Uncorrectable {
        /// Index of the failing block
        block: usize,
    },

    /// The corrected data stream does not parse
    #[error("malformed data segment: {0}")]
    Payload(String),
}

/// Result alias for encoding operations
pub type Result<T> = std::result::Result<T, EncodeError>;
