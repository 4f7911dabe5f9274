use num_complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::trace;

use crate::error::{LinkError, Result, Stage};
use crate::vector_ops::db_to_linear;

/// Noise power for a given SNR against a fixed noise floor:
/// `10^((noise_floor_db - snr_db) / 10)`
///
/// Saturates at `f64::MAX` for absurdly low SNR so the noise stays finite.
pub fn noise_power(noise_floor_db: f64, snr_db: f64) -> f64 {
    db_to_linear(noise_floor_db - snr_db).min(f64::MAX)
}

/// Additive White Gaussian Noise (AWGN) channel
///
/// For complex AWGN, each component (I and Q) is independently N(0, sigma)
/// where sigma = sqrt(noise_power/2) to achieve total power = noise_power.
/// There is no noiseless setting; reproducibility comes from seeding the RNG.
pub struct AWGN {
    noise_floor_db: f64,
}

impl AWGN {
    pub fn new(noise_floor_db: f64) -> Self {
        AWGN { noise_floor_db }
    }

    pub fn noise_floor_db(&self) -> f64 {
        self.noise_floor_db
    }

    /// Generate a block of complex Gaussian noise samples with total power `noise_power`
    pub fn generate_block<R: Rng + ?Sized>(
        &self,
        block_size: usize,
        noise_power: f64,
        rng: &mut R,
    ) -> Vec<Complex64> {
        // Total power = I^2 + Q^2 = 2*sigma^2 = noise_power
        let std_dev = (noise_power / 2.0).sqrt();

        (0..block_size)
            .map(|_| {
                let i: f64 = StandardNormal.sample(rng);
                let q: f64 = StandardNormal.sample(rng);
                Complex64::new(i * std_dev, q * std_dev)
            })
            .collect()
    }

    /// Add noise scaled to `snr_db` to every sample of the signal
    pub fn apply<R: Rng + ?Sized>(
        &self,
        signal: &[Complex64],
        snr_db: f64,
        rng: &mut R,
    ) -> Result<Vec<Complex64>> {
        if !snr_db.is_finite() {
            return Err(LinkError::invalid_input(
                Stage::Noise,
                format!("SNR must be finite, got {} dB", snr_db),
            ));
        }

        let power = noise_power(self.noise_floor_db, snr_db);
        trace!(snr_db, noise_power = power, samples = signal.len(), "adding AWGN");

        let noise = self.generate_block(signal.len(), power, rng);
        Ok(signal.iter().zip(noise.iter()).map(|(s, n)| s + n).collect())
    }
}
