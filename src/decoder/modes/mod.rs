//! Segment body decoders
//!
//! - Numeric: three digits per 10 bits
//! - Alphanumeric: two characters per 11 bits
//! - Byte: raw 8-bit values

/// Alphanumeric segments, 11 bits per character pair
pub mod alphanumeric;
/// Byte segments, 8 bits per byte
pub mod byte;
/// Numeric segments, 10 bits per digit triple
pub mod numeric;
