use rand::distributions::{Bernoulli, Distribution};
use rand::Rng;

use crate::error::{LinkError, Result, Stage};
use crate::Bit;

/// Source of independent Bernoulli(0.5) bits
///
/// Holds no generator of its own: the caller passes the run's RNG so a seeded
/// run reproduces the same bits.
pub struct RandomBitGenerator {
    dist: Bernoulli,
}

impl RandomBitGenerator {
    pub fn new() -> Self {
        Self {
            dist: Bernoulli::new(0.5).unwrap(),
        }
    }

    // Generate a single random bit
    pub fn gen_bit<R: Rng + ?Sized>(&self, rng: &mut R) -> Bit {
        self.dist.sample(rng) as Bit
    }

    /// Generate `n` random bits in transmission order
    pub fn generate_bits<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<Bit> {
        (0..n).map(|_| self.gen_bit(rng)).collect()
    }

    /// Same as [`generate_bits`](Self::generate_bits) but for a signed count,
    /// rejecting negative values instead of clamping them
    pub fn generate_checked<R: Rng + ?Sized>(&self, n: i64, rng: &mut R) -> Result<Vec<Bit>> {
        let n = usize::try_from(n).map_err(|_| {
            LinkError::invalid_input(Stage::BitSource, format!("bit count {} is negative", n))
        })?;
        Ok(self.generate_bits(n, rng))
    }
}

impl Default for RandomBitGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn gen_bits_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(0);
        let bit_gen = RandomBitGenerator::new();
        for n in [0usize, 1, 7, 64, 1000] {
            let bits = bit_gen.generate_bits(n, &mut rng);
            assert_eq!(bits.len(), n);
            assert!(bits.iter().all(|&b| b == 0 || b == 1));
        }
    }

    #[test]
    fn gen_bits_from_seed_is_reproducible() {
        let bit_gen = RandomBitGenerator::new();
        let a = bit_gen.generate_bits(256, &mut StdRng::seed_from_u64(42));
        let b = bit_gen.generate_bits(256, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);

        let c = bit_gen.generate_bits(256, &mut StdRng::seed_from_u64(43));
        assert_ne!(a, c);
    }

    #[test]
    fn gen_bits_roughly_balanced() {
        let mut rng = StdRng::seed_from_u64(7);
        let bits = RandomBitGenerator::new().generate_bits(100_000, &mut rng);
        let ones = bits.iter().filter(|&&b| b == 1).count() as f64;
        let fraction = ones / bits.len() as f64;
        assert!((fraction - 0.5).abs() < 0.01, "fraction of ones = {}", fraction);
    }

    #[test]
    fn negative_count_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = RandomBitGenerator::new()
            .generate_checked(-1, &mut rng)
            .unwrap_err();
        assert!(matches!(
            err,
            LinkError::InvalidInput {
                stage: Stage::BitSource,
                ..
            }
        ));
    }

    #[test]
    fn zero_count_is_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        let bits = RandomBitGenerator::new().generate_checked(0, &mut rng).unwrap();
        assert!(bits.is_empty());
    }
}
