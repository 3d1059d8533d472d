//! Mask application, penalty scoring and mask selection.

use rayon::prelude::*;

use crate::encoder::format::draw_format_bits;
use crate::encoder::function_patterns::FunctionPatterns;
use crate::models::{BitMatrix, ECLevel, MaskPattern};

const PENALTY_N1: u32 = 3;
const PENALTY_N2: u32 = 3;
const PENALTY_N3: u32 = 40;
const PENALTY_N4: u32 = 10;

/// XOR `mask` onto every data module. Applying it twice restores the matrix.
pub fn apply_mask(matrix: &mut BitMatrix, mask: MaskPattern, patterns: &FunctionPatterns) {
    let size = matrix.width();
    for y in 0..size {
        for x in 0..size {
            if !patterns.is_function(x, y) && mask.is_masked(y, x) {
                matrix.toggle(x, y);
            }
        }
    }
}

/// Total penalty of a finished matrix under the four scoring rules
pub fn penalty_score(matrix: &BitMatrix) -> u32 {
    let size = matrix.width();
    let mut result = 0;

    // Runs and finder-like patterns, rows then columns
    for line in 0..size {
        result += line_penalty(size, |i| matrix.get(i, line));
        result += line_penalty(size, |i| matrix.get(line, i));
    }

    // 2x2 blocks of one color
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let color = matrix.get(x, y);
            if color == matrix.get(x + 1, y)
                && color == matrix.get(x, y + 1)
                && color == matrix.get(x + 1, y + 1)
            {
                result += PENALTY_N2;
            }
        }
    }

    // Dark/light balance: N4 for every full 5% step away from 50%
    let dark = matrix.count_ones() as i64;
    let total = (size * size) as i64;
    let k = ((dark * 20 - total * 10).abs() + total - 1) / total - 1;
    result + k as u32 * PENALTY_N4
}

fn line_penalty(size: usize, module: impl Fn(usize) -> bool) -> u32 {
    let mut result = 0;
    let mut history = RunHistory::new(size);
    let mut run_color = false;
    let mut run_len = 0;
    for i in 0..size {
        if module(i) == run_color {
            run_len += 1;
            if run_len == 5 {
                result += PENALTY_N1;
            } else if run_len > 5 {
                result += 1;
            }
        } else {
            history.push(run_len);
            if !run_color {
                result += history.count_patterns() * PENALTY_N3;
            }
            run_color = module(i);
            run_len = 1;
        }
    }
    result + history.terminate(run_color, run_len) * PENALTY_N3
}

/// Last seven run lengths of a line, newest first, with the light border
/// outside the symbol counted as part of the first and last light runs.
struct RunHistory {
    size: usize,
    runs: [usize; 7],
}

impl RunHistory {
    fn new(size: usize) -> Self {
        Self { size, runs: [0; 7] }
    }

    fn push(&mut self, mut run_len: usize) {
        if self.runs[0] == 0 {
            run_len += self.size;
        }
        self.runs.copy_within(0..6, 1);
        self.runs[0] = run_len;
    }

    /// 1:1:3:1:1 dark-light pattern with four light modules on either side
    fn count_patterns(&self) -> u32 {
        let r = &self.runs;
        let n = r[1];
        let core = n > 0 && r[2] == n && r[3] == n * 3 && r[4] == n && r[5] == n;
        u32::from(core && r[0] >= n * 4 && r[6] >= n) + u32::from(core && r[6] >= n * 4 && r[0] >= n)
    }

    fn terminate(&mut self, run_color: bool, mut run_len: usize) -> u32 {
        if run_color {
            self.push(run_len);
            run_len = 0;
        }
        run_len += self.size;
        self.push(run_len);
        self.count_patterns()
    }
}

/// Outcome of scoring all candidate masks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskSelection {
    /// Mask with the lowest penalty, lowest id on ties
    pub chosen: MaskPattern,
    /// Penalty of each candidate, indexed by mask id
    pub penalties: [u32; 8],
}

/// Score every mask on `matrix` (data placed, unmasked) and pick the lowest
/// penalty, ties going to the lowest id. Format bits are drawn per candidate
/// before scoring.
pub fn select_mask(
    matrix: &BitMatrix,
    patterns: &FunctionPatterns,
    ec_level: ECLevel,
    parallel: bool,
) -> MaskSelection {
    let score = |mask: MaskPattern| {
        let mut candidate = matrix.clone();
        apply_mask(&mut candidate, mask, patterns);
        draw_format_bits(&mut candidate, ec_level, mask);
        let penalty = penalty_score(&candidate);
        tracing::trace!(mask = mask.id(), penalty, "scored mask candidate");
        (penalty, mask)
    };

    let scored: Vec<(u32, MaskPattern)> = if parallel {
        MaskPattern::ALL.par_iter().map(|&m| score(m)).collect()
    } else {
        MaskPattern::ALL.iter().map(|&m| score(m)).collect()
    };

    let mut penalties = [0u32; 8];
    for &(penalty, mask) in &scored {
        penalties[mask.id() as usize] = penalty;
    }
    // (penalty, id) ordering makes the reduction independent of evaluation order
    let chosen = scored
        .iter()
        .min()
        .map_or(MaskPattern::Pattern0, |&(_, mask)| mask);
    MaskSelection { chosen, penalties }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;

    #[test]
    fn test_apply_mask_twice_restores() {
        let patterns = FunctionPatterns::new(Version::new(2).unwrap());
        let original = patterns.modules().clone();
        for mask in MaskPattern::ALL {
            let mut m = original.clone();
            apply_mask(&mut m, mask, &patterns);
            assert_ne!(m, original);
            apply_mask(&mut m, mask, &patterns);
            assert_eq!(m, original);
        }
    }

    #[test]
    fn test_mask_skips_function_modules() {
        let patterns = FunctionPatterns::new(Version::new(1).unwrap());
        let mut m = patterns.modules().clone();
        apply_mask(&mut m, MaskPattern::Pattern1, &patterns);
        for y in 0..21 {
            for x in 0..21 {
                if patterns.is_function(x, y) {
                    assert_eq!(m.get(x, y), patterns.modules().get(x, y));
                }
            }
        }
    }

    #[test]
    fn test_penalty_all_light() {
        // 21 rows + 21 columns of one 21-run: (3 + 16) each
        // 400 2x2 blocks * 3; balance 0% dark -> k = 9
        // Finder-like rule never fires without dark modules
        let m = BitMatrix::new(21, 21);
        assert_eq!(penalty_score(&m), 42 * 19 + 400 * 3 + 9 * 10);
    }

    #[test]
    fn test_penalty_checkerboard() {
        // No runs, no blocks, exactly 221/441 dark -> balance k = 0
        let m = BitMatrix::from_fn(21, 21, |x, y| (x + y) % 2 == 0);
        assert_eq!(penalty_score(&m), 0);
    }

    #[test]
    fn test_finder_like_pattern_detected() {
        // Row 0: 1011101 then light tail; exactly one finder-like hit
        let mut m = BitMatrix::from_fn(21, 21, |x, y| (x + y) % 2 == 1 && y > 0);
        for x in [0, 2, 3, 4, 6] {
            m.set(x, 0, true);
        }
        let mut row = RunHistory::new(21);
        let mut score = 0;
        let mut color = false;
        let mut len = 0;
        for x in 0..21 {
            if m.get(x, 0) == color {
                len += 1;
            } else {
                row.push(len);
                if !color {
                    score += row.count_patterns();
                }
                color = m.get(x, 0);
                len = 1;
            }
        }
        score += row.terminate(color, len);
        assert_eq!(score, 2);
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let patterns = FunctionPatterns::new(Version::new(5).unwrap());
        let mut matrix = patterns.modules().clone();
        let order = crate::encoder::placement::data_module_order(&patterns);
        for (i, &(x, y)) in order.iter().enumerate() {
            matrix.set(x, y, (i * 7 + i / 3) % 5 < 2);
        }
        let a = select_mask(&matrix, &patterns, ECLevel::Q, true);
        let b = select_mask(&matrix, &patterns, ECLevel::Q, false);
        assert_eq!(a, b);
        let min = *a.penalties.iter().min().unwrap();
        assert_eq!(a.penalties[a.chosen.id() as usize], min);
        assert!(a.penalties[..a.chosen.id() as usize].iter().all(|&p| p > min));
    }
}
