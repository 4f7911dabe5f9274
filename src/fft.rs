use num_complex::Complex64;
use rustfft::FftPlanner;

/// Forward/inverse DFT pair over whole symbol blocks
///
/// The forward transform is unnormalized; the inverse applies the 1/N factor, so
/// `forward(inverse(x)) == x` up to rounding. Any block length is accepted, the
/// planner picks a mixed-radix or Bluestein algorithm as needed.
pub struct SpectralTransform {
    planner: FftPlanner<f64>,
}

impl SpectralTransform {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
        }
    }

    pub fn forward(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = input.to_vec();
        if buffer.is_empty() {
            return buffer;
        }
        let fft_forward = self.planner.plan_fft_forward(buffer.len());
        fft_forward.process(&mut buffer);
        buffer
    }

    pub fn inverse(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = input.to_vec();
        if buffer.is_empty() {
            return buffer;
        }
        let fft_inverse = self.planner.plan_fft_inverse(buffer.len());
        fft_inverse.process(&mut buffer);
        scale(&mut buffer);
        buffer
    }
}

impl Default for SpectralTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Divide every sample by the block length
pub fn scale(input: &mut [Complex64]) {
    let nfft = input.len() as f64;
    input.iter_mut().for_each(|x| *x = *x / nfft);
}
