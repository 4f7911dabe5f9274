use num_complex::Complex64;
use num_traits::Float;

/// Convert a power level in dB to linear units
pub fn db_to_linear<T: Float>(db: T) -> T {
    let ten = T::from(10.0).unwrap();
    ten.powf(db / ten)
}

pub fn linear_to_db<T: Float>(linear: T) -> T {
    let ten = T::from(10.0).unwrap();
    ten * linear.log10()
}

// Returns real vector of sqrt(r^2 + i^2)
pub fn magnitudes(samples: &[Complex64]) -> Vec<f64> {
    samples.iter().map(|s| s.norm()).collect()
}

/// Mean of |x|^2 over the block; zero for an empty block
pub fn mean_power(samples: &[Complex64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.norm_sqr()).sum::<f64>() / samples.len() as f64
}
