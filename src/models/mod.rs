//! Core data types

/// Dense bit grid
pub mod matrix;
/// Version, error correction level and mask pattern
pub mod qr_code;
/// Finished symbol with per-module region tags
pub mod symbol;

pub use matrix::BitMatrix;
pub use qr_code::{ECLevel, MaskPattern, Version};
pub use symbol::{Component, Module, RegionTag, Symbol};
