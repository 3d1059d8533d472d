//! Reed-Solomon error correction for QR codeword blocks
//! Codewords are polynomial coefficients in descending order over GF(256)

use crate::utils::gf256::Gf256;

/// Reed-Solomon decoder for one block layout
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` EC codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` (data followed by EC codewords) in place.
    /// Returns the number of corrected codewords.
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        // Berlekamp-Massey
        let sigma = self.find_error_locator(&syndrome);
        if sigma.len() - 1 > self.num_ecc_codewords / 2 {
            return Err("Too many errors");
        }

        // Chien search
        let error_positions = self.find_error_positions(&sigma, received.len())?;

        // Forney
        let error_values =
            self.find_error_values(&sigma, &syndrome, &error_positions, received.len())?;

        for (&pos, &value) in error_positions.iter().zip(&error_values) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err("Uncorrectable error");
        }

        Ok(error_positions.len())
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        let n = received.len();
        (0..self.num_ecc_codewords)
            .map(|i| {
                received.iter().enumerate().fold(0u8, |sum, (j, &c)| {
                    // c[0] is the coefficient of x^(n-1)
                    sum ^ Gf256::mul(c, Gf256::exp(i * (n - 1 - j)))
                })
            })
            .collect()
    }

    fn find_error_locator(&self, syndrome: &[u8]) -> Vec<u8> {
        let mut sigma = vec![1u8];
        let mut b = vec![1u8];
        let mut delta_b: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..syndrome.len() {
            let mut delta = syndrome[i];
            for j in 1..=l {
                if j < sigma.len() && i >= j {
                    delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
                }
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let previous = sigma.clone();
            let d = Gf256::div(delta, delta_b);
            if sigma.len() < b.len() + m {
                sigma.resize(b.len() + m, 0);
            }
            // sigma -= d * x^m * b
            for (j, &bj) in b.iter().enumerate() {
                sigma[j + m] ^= Gf256::mul(d, bj);
            }

            if 2 * l <= i {
                b = previous;
                delta_b = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&0) {
            sigma.pop();
        }
        sigma
    }

    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, &'static str> {
        // sigma(x) = prod(1 - X_k x) with X_k = alpha^(n-1-pos)
        let positions: Vec<usize> = (0..n)
            .filter(|&i| {
                let x_inv = Gf256::exp(255 - (n - 1 - i) % 255);
                let sum = sigma
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (j, &coeff)| acc ^ Gf256::mul(coeff, Gf256::pow_usize(x_inv, j)));
                sum == 0
            })
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err("Wrong number of error positions found");
        }
        Ok(positions)
    }

    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        error_positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, &'static str> {
        // omega = syndrome * sigma mod x^(2t)
        let mut omega = vec![0u8; syndrome.len()];
        for (i, slot) in omega.iter_mut().enumerate() {
            for (j, &s) in sigma.iter().enumerate().take(i + 1) {
                *slot ^= Gf256::mul(s, syndrome[i - j]);
            }
        }

        let mut values = Vec::with_capacity(error_positions.len());
        for &pos in error_positions {
            let exp = (n - 1 - pos) % 255;
            let x_inv = Gf256::exp(255 - exp);

            let omega_val = omega
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &c)| acc ^ Gf256::mul(c, Gf256::pow_usize(x_inv, i)));

            // Formal derivative keeps only odd powers
            let sigma_prime_val = sigma
                .iter()
                .enumerate()
                .skip(1)
                .step_by(2)
                .fold(0u8, |acc, (i, &c)| acc ^ Gf256::mul(c, Gf256::pow_usize(x_inv, i - 1)));

            if sigma_prime_val == 0 {
                return Err("Sigma derivative is zero");
            }

            // e_k = X_k * omega(X_k^-1) / sigma'(X_k^-1)
            values.push(Gf256::mul(Gf256::exp(exp), Gf256::div(omega_val, sigma_prime_val)));
        }

        Ok(values)
    }
}
