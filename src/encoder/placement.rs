//! Zig-zag placement of codewords into the data modules

use crate::encoder::function_patterns::FunctionPatterns;
use crate::error::{EncodeError, Result};
use crate::models::BitMatrix;

/// Data module coordinates (x, y) in placement order.
///
/// Column pairs run right to left, skipping the vertical timing column;
/// direction alternates starting upward from the bottom-right corner.
pub fn data_module_order(patterns: &FunctionPatterns) -> Vec<(usize, usize)> {
    let size = patterns.size();
    let mut order = Vec::with_capacity(patterns.data_modules_count());
    let mut right = size as isize - 1;
    let mut upward = true;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for x in [right as usize, right as usize - 1] {
                if !patterns.is_function(x, y) {
                    order.push((x, y));
                }
            }
        }
        upward = !upward;
        right -= 2;
    }
    order
}

/// Write `codewords` MSB first into every data module; remainder bits stay light
pub fn place_codewords(
    matrix: &mut BitMatrix,
    patterns: &FunctionPatterns,
    codewords: &[u8],
) -> Result<()> {
    let order = data_module_order(patterns);
    let total_bits = codewords.len() * 8;
    if total_bits > order.len() || order.len() - total_bits >= 8 {
        return Err(EncodeError::InternalTableInconsistency(format!(
            "{} codewords for {} data modules",
            codewords.len(),
            order.len()
        )));
    }
    for (i, &(x, y)) in order.iter().enumerate() {
        let dark = i < total_bits && (codewords[i >> 3] >> (7 - (i & 7))) & 1 != 0;
        matrix.set(x, y, dark);
    }
    Ok(())
}
