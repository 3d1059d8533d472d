use crate::error::{EncodeError, Result};
use crate::models::{ECLevel, Version};

/// Block structure for one (version, level) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcBlockInfo {
    /// Data + EC codewords in the whole symbol
    pub total_codewords: usize,
    /// Number of error correction blocks
    pub num_blocks: usize,
    /// EC codewords in every block
    pub ecc_per_block: usize,
    /// Blocks carrying `short_data_len` data codewords; the rest carry one more
    pub num_short_blocks: usize,
    /// Data codewords in a short block
    pub short_data_len: usize,
}

impl EcBlockInfo {
    /// Blocks carrying one extra data codeword
    pub fn num_long_blocks(&self) -> usize {
        self.num_blocks - self.num_short_blocks
    }

    /// Data codewords in a long block
    pub fn long_data_len(&self) -> usize {
        self.short_data_len + 1
    }

    /// Data codewords across all blocks
    pub fn data_codewords(&self) -> usize {
        self.total_codewords - self.num_blocks * self.ecc_per_block
    }

    /// Data codeword count of block `index`
    pub fn data_len_of(&self, index: usize) -> usize {
        if index < self.num_short_blocks {
            self.short_data_len
        } else {
            self.long_data_len()
        }
    }
}

// ISO/IEC 18004 Model 2 tables.
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Modules available for data + EC bits (including remainder bits)
pub fn num_raw_data_modules(version: Version) -> usize {
    let v = version.number() as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Block structure of `version` at `ec_level`
pub fn ec_block_info(version: Version, ec_level: ECLevel) -> Result<EcBlockInfo> {
    let v = version.number() as usize;
    if !(1..=40).contains(&v) {
        return Err(EncodeError::InvalidVersionOrLevel(format!("version {}", v)));
    }
    let idx = ec_level.ordinal();
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][v];
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][v];
    if ecc <= 0 || blocks <= 0 {
        return Err(EncodeError::InternalTableInconsistency(format!(
            "missing block entry for version {} level {:?}",
            v, ec_level
        )));
    }
    let (ecc, blocks) = (ecc as usize, blocks as usize);
    let total = num_raw_data_modules(version) / 8;
    let short_block_len = total / blocks;
    if short_block_len <= ecc {
        return Err(EncodeError::InternalTableInconsistency(format!(
            "version {} level {:?}: block of {} codewords cannot hold {} EC codewords",
            v, ec_level, short_block_len, ecc
        )));
    }
    Ok(EcBlockInfo {
        total_codewords: total,
        num_blocks: blocks,
        ecc_per_block: ecc,
        num_short_blocks: blocks - total % blocks,
        short_data_len: short_block_len - ecc,
    })
}

/// Data codewords available at (version, level)
pub fn num_data_codewords(version: Version, ec_level: ECLevel) -> Result<usize> {
    Ok(ec_block_info(version, ec_level)?.data_codewords())
}

/// Largest payload that fits in a single byte-mode segment
pub fn max_byte_payload(version: Version, ec_level: ECLevel) -> Result<usize> {
    let capacity_bits = num_data_codewords(version, ec_level)? * 8;
    let count_bits = if version.number() <= 9 { 8 } else { 16 };
    Ok(capacity_bits.saturating_sub(4 + count_bits) / 8)
}
