use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::tables::ec_block_info;
use crate::error::{EncodeError, Result};
use crate::models::{ECLevel, Version};

/// One data block and its error correction codewords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Data codewords
    pub data: Vec<u8>,
    /// Reed-Solomon codewords over `data`
    pub ecc: Vec<u8>,
}

/// Split padded data codewords into blocks and compute their EC codewords
pub fn split_into_blocks(data: &[u8], version: Version, ec_level: ECLevel) -> Result<Vec<Block>> {
    let info = ec_block_info(version, ec_level)?;
    if data.len() != info.data_codewords() {
        return Err(EncodeError::InternalTableInconsistency(format!(
            "version {} level {:?} expects {} data codewords, got {}",
            version.number(),
            ec_level,
            info.data_codewords(),
            data.len()
        )));
    }

    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let mut blocks = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for b in 0..info.num_blocks {
        let len = info.data_len_of(b);
        let chunk = &data[offset..offset + len];
        offset += len;
        blocks.push(Block {
            data: chunk.to_vec(),
            ecc: rs.remainder(chunk),
        });
    }
    Ok(blocks)
}

/// Final codeword order: data column-major across blocks, then EC likewise
pub fn interleave(blocks: &[Block]) -> Vec<u8> {
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    let ecc_len = blocks.first().map_or(0, |b| b.ecc.len());
    let total: usize = blocks.iter().map(|b| b.data.len() + b.ecc.len()).sum();

    let mut out = Vec::with_capacity(total);
    for i in 0..max_data {
        for block in blocks {
            if let Some(&cw) = block.data.get(i) {
                out.push(cw);
            }
        }
    }
    for i in 0..ecc_len {
        for block in blocks {
            out.push(block.ecc[i]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_split_5q() {
        let v5 = Version::new(5).unwrap();
        let data: Vec<u8> = (0..62u8).collect();
        let blocks = split_into_blocks(&data, v5, ECLevel::Q).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[0].data.len(), 15);
        assert_eq!(blocks[2].data.len(), 16);
        assert_eq!(blocks[2].data[0], 30);
        assert!(blocks.iter().all(|b| b.ecc.len() == 18));
    }

    #[test]
    fn test_interleave_order() {
        let blocks = vec![
            Block {
                data: vec![1, 2],
                ecc: vec![10, 11],
            },
            Block {
                data: vec![3, 4, 5],
                ecc: vec![12, 13],
            },
        ];
        assert_eq!(interleave(&blocks), vec![1, 3, 2, 4, 5, 10, 12, 11, 13]);
    }

    #[test]
    fn test_length_mismatch_is_internal_error() {
        let v1 = Version::new(1).unwrap();
        assert!(matches!(
            split_into_blocks(&[0u8; 18], v1, ECLevel::L),
            Err(EncodeError::InternalTableInconsistency(_))
        ));
    }
}
