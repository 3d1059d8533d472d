//! Format information (BCH(15,5)) and version information (BCH(18,6))

use crate::models::{BitMatrix, ECLevel, MaskPattern, Version};

/// Format generator: x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0x537;
/// XOR mask applied so the format bits are never all zero
pub const FORMAT_MASK: u32 = 0x5412;
/// Version generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_GENERATOR: u32 = 0x1F25;

/// Remainder of `data << degree` modulo `generator` (degree = bit length - 1)
fn bch_remainder(data: u32, generator: u32) -> u32 {
    let degree = 31 - generator.leading_zeros();
    let mut rem = data << degree;
    let top = 32 - rem.leading_zeros();
    for shift in (degree..top.max(degree)).rev() {
        if rem & (1 << shift) != 0 {
            rem ^= generator << (shift - degree);
        }
    }
    rem
}

/// 15-bit masked format word for (level, mask)
pub fn format_bits(ec_level: ECLevel, mask: MaskPattern) -> u16 {
    let data = (u32::from(ec_level.format_bits()) << 3) | u32::from(mask.id());
    (((data << 10) | bch_remainder(data, FORMAT_GENERATOR)) ^ FORMAT_MASK) as u16
}

/// 18-bit version word (versions 7+)
pub fn version_bits(version: Version) -> u32 {
    let data = u32::from(version.number());
    (data << 12) | bch_remainder(data, VERSION_GENERATOR)
}

/// Write both copies of the format information
pub fn draw_format_bits(matrix: &mut BitMatrix, ec_level: ECLevel, mask: MaskPattern) {
    let bits = format_bits(ec_level, mask);
    let bit = |i: usize| (bits >> i) & 1 != 0;
    let size = matrix.width();

    // Around the top-left finder
    for i in 0..6 {
        matrix.set(8, i, bit(i));
    }
    matrix.set(8, 7, bit(6));
    matrix.set(8, 8, bit(7));
    matrix.set(7, 8, bit(8));
    for i in 9..15 {
        matrix.set(14 - i, 8, bit(i));
    }

    // Split between the top-right and bottom-left finders
    for i in 0..8 {
        matrix.set(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        matrix.set(8, size - 15 + i, bit(i));
    }
    matrix.set(8, size - 8, true);
}

/// Write both copies of the version information (no-op below version 7)
pub fn draw_version_bits(matrix: &mut BitMatrix, version: Version) {
    if version.number() < 7 {
        return;
    }
    let bits = version_bits(version);
    let size = matrix.width();
    for i in 0..18 {
        let dark = (bits >> i) & 1 != 0;
        let a = size - 11 + i % 3;
        let b = i / 3;
        matrix.set(a, b, dark);
        matrix.set(b, a, dark);
    }
}
