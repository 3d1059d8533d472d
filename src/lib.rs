//! qrmatrix - QR code symbol encoder
//!
//! Turns a byte payload into a QR Code Model 2 module matrix (versions 1-40,
//! error correction levels L/M/Q/H). Every module carries a region tag and a
//! styling component so a presentation layer can draw finders, timing and
//! data modules differently.
//!
//! ```
//! use qrmatrix::{EncodeOptions, ECLevel, encode};
//!
//! let symbol = encode(b"HELLO WORLD", &EncodeOptions::new(ECLevel::Q)).unwrap();
//! assert_eq!(symbol.side_length(), 21);
//! let decoded = qrmatrix::decoder::read_symbol(&symbol).unwrap();
//! assert_eq!(decoded.payload, b"HELLO WORLD");
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

mod config;
/// Symbol readback (format/version decoding, Reed-Solomon correction, segment parsing)
pub mod decoder;
/// Symbol encoding (segmentation, error correction, placement, masking)
pub mod encoder;
/// Error types for encoding and readback
pub mod error;
/// Core data structures (Symbol, BitMatrix, Version, etc.)
pub mod models;
/// GF(256) arithmetic
pub mod utils;

pub use encoder::segment::{Mode, Segment};
pub use encoder::{EncodeOptions, encode, encode_segments, encode_text};
pub use error::{DecodeError, EncodeError};
pub use models::{BitMatrix, Component, ECLevel, MaskPattern, Module, RegionTag, Symbol, Version};
