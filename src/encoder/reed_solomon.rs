//! Reed-Solomon error correction codeword generation
//! Generator polynomial has roots alpha^0 .. alpha^(degree-1) over GF(256)

use crate::utils::gf256::Gf256;

/// Reed-Solomon encoder for a fixed number of EC codewords
pub struct ReedSolomonEncoder {
    /// Generator coefficients, highest power first, leading 1 omitted
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Build the generator polynomial of `degree` (1-255)
    pub fn new(degree: usize) -> Self {
        assert!((1..=255).contains(&degree), "degree out of range");
        let mut divisor = vec![0u8; degree];
        divisor[degree - 1] = 1;

        // Multiply by (x - alpha^i) for each root
        let mut root = 1u8;
        for _ in 0..degree {
            for j in 0..degree {
                divisor[j] = Gf256::mul(divisor[j], root);
                if j + 1 < degree {
                    divisor[j] ^= divisor[j + 1];
                }
            }
            root = Gf256::mul(root, 0x02);
        }
        Self { divisor }
    }

    /// Number of EC codewords produced per block
    pub fn degree(&self) -> usize {
        self.divisor.len()
    }

    /// EC codewords: remainder of data * x^degree divided by the generator
    pub fn remainder(&self, data: &[u8]) -> Vec<u8> {
        let degree = self.divisor.len();
        let mut result = vec![0u8; degree];
        for &b in data {
            let factor = b ^ result[0];
            result.copy_within(1.., 0);
            result[degree - 1] = 0;
            for (r, &d) in result.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(d, factor);
            }
        }
        result
    }
}
