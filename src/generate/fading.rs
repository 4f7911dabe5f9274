//! Flat Rayleigh fading
//!
//! One complex gain g = N(0,1) + j*N(0,1) is drawn per block and every sample in
//! the block is multiplied by it. |g| is Rayleigh distributed and arg(g) uniform.

use num_complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use tracing::trace;

pub struct RayleighFading;

impl RayleighFading {
    pub fn new() -> Self {
        RayleighFading
    }

    /// Draw a fresh channel gain for one block
    pub fn draw_gain<R: Rng + ?Sized>(&self, rng: &mut R) -> Complex64 {
        let re: f64 = StandardNormal.sample(rng);
        let im: f64 = StandardNormal.sample(rng);
        Complex64::new(re, im)
    }

    /// Apply a freshly drawn gain to the whole block
    ///
    /// Returns the faded block together with the gain that was applied.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        signal: &[Complex64],
        rng: &mut R,
    ) -> (Vec<Complex64>, Complex64) {
        let gain = self.draw_gain(rng);
        trace!(gain_re = gain.re, gain_im = gain.im, gain_mag = gain.norm(), "fading gain drawn");
        (apply_gain(signal, gain), gain)
    }
}

impl Default for RayleighFading {
    fn default() -> Self {
        Self::new()
    }
}

pub fn apply_gain(signal: &[Complex64], gain: Complex64) -> Vec<Complex64> {
    signal.iter().map(|&s| gain * s).collect()
}
