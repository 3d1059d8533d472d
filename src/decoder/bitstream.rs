//! Codeword extraction from an unmasked matrix and block de-interleaving

use crate::encoder::function_patterns::FunctionPatterns;
use crate::encoder::placement::data_module_order;
use crate::encoder::tables::EcBlockInfo;
use crate::error::DecodeError;
use crate::models::BitMatrix;

/// Read every whole codeword in placement order; remainder bits are dropped
pub fn extract_codewords(matrix: &BitMatrix, patterns: &FunctionPatterns) -> Vec<u8> {
    let order = data_module_order(patterns);
    order
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |byte, &(x, y)| (byte << 1) | u8::from(matrix.get(x, y)))
        })
        .collect()
}

/// Undo interleaving: each returned block holds its data then its EC codewords
pub fn deinterleave(codewords: &[u8], info: &EcBlockInfo) -> Result<Vec<Vec<u8>>, DecodeError> {
    if codewords.len() < info.total_codewords {
        return Err(DecodeError::Payload(format!(
            "{} codewords read, {} expected",
            codewords.len(),
            info.total_codewords
        )));
    }

    let mut blocks: Vec<Vec<u8>> = (0..info.num_blocks)
        .map(|b| Vec::with_capacity(info.data_len_of(b) + info.ecc_per_block))
        .collect();
    let mut stream = codewords.iter().copied();

    for i in 0..info.long_data_len() {
        for (b, block) in blocks.iter_mut().enumerate() {
            if i < info.data_len_of(b) {
                block.extend(stream.next());
            }
        }
    }
    for _ in 0..info.ecc_per_block {
        for block in blocks.iter_mut() {
            block.extend(stream.next());
        }
    }
    Ok(blocks)
}
