//! End-to-end BPSK/OFDM link
//!
//! Transmit: bits -> BPSK symbols -> inverse DFT -> Rayleigh gain -> AWGN.
//! Receive: forward DFT -> hard-decision BPSK -> bit error scoring.
//!
//! There is no channel estimation or equalization. Under Rayleigh fading a gain
//! with negative real part inverts every decision in the block, so block BER is
//! close to 0 or close to 1 depending on the draw.
//!
//! # Example
//! ```
//! use ofdm_link_sim::{run_simulation, ChannelModel, LinkConfig};
//!
//! let config = LinkConfig::default()
//!     .with_seed(42)
//!     .with_channel(ChannelModel::Awgn);
//! let result = run_simulation(1024, 20.0, &config).unwrap();
//! assert_eq!(result.received_signal.len(), 1024);
//! assert_eq!(result.report.bit_errors, 0);
//! ```

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::bpsk::{self, BpskDemodulator};
use crate::config::{ChannelModel, LinkConfig};
use crate::error::{ensure_same_len, LinkError, Result, Stage};
use crate::fft::SpectralTransform;
use crate::generate::{RandomBitGenerator, RayleighFading, AWGN};
use crate::scorer::{self, BitErrorReport};
use crate::vector_ops;
use crate::Bit;

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub transmitted_bits: Vec<Bit>,
    /// Time-domain samples as they leave the channel
    pub received_signal: Vec<Complex64>,
    pub decoded_bits: Vec<Bit>,
    /// Fading gain applied to the block, if the channel fades
    pub channel_gain: Option<Complex64>,
    pub report: BitErrorReport,
}

/// Aggregate BER at one SNR point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BerPoint {
    pub snr_db: f64,
    pub bit_errors: usize,
    pub total_bits: usize,
}

impl BerPoint {
    pub fn ber(&self) -> f64 {
        if self.total_bits == 0 {
            0.0
        } else {
            self.bit_errors as f64 / self.total_bits as f64
        }
    }
}

/// A simulated link owning its own RNG and transform plans
///
/// Stages draw from the RNG in a fixed order (bits, then fading gain, then
/// noise), so two links built from the same seed produce identical runs.
pub struct Link {
    config: LinkConfig,
    rng: StdRng,
    bit_source: RandomBitGenerator,
    transform: SpectralTransform,
    fading: RayleighFading,
    awgn: AWGN,
    demodulator: BpskDemodulator,
}

impl Link {
    pub fn new(config: LinkConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Link {
            rng,
            bit_source: RandomBitGenerator::new(),
            transform: SpectralTransform::new(),
            fading: RayleighFading::new(),
            awgn: AWGN::new(config.noise_floor_db),
            demodulator: BpskDemodulator::new(config.decision_bias)?,
            config,
        })
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Generate `num_bits` random bits; negative counts are rejected
    pub fn generate_bits(&mut self, num_bits: i64) -> Result<Vec<Bit>> {
        self.bit_source.generate_checked(num_bits, &mut self.rng)
    }

    /// Transmit half of the link: modulate, synthesize, and pass through the channel
    pub fn transmit(&mut self, bits: &[Bit], snr_db: f64) -> Result<Vec<Complex64>> {
        Ok(self.transmit_block(bits, snr_db)?.0)
    }

    fn transmit_block(
        &mut self,
        bits: &[Bit],
        snr_db: f64,
    ) -> Result<(Vec<Complex64>, Option<Complex64>)> {
        check_snr(snr_db)?;
        let n = bits.len();

        let symbols = bpsk::modulate(bits)?;
        ensure_same_len(Stage::Modulator, n, symbols.len())?;

        let time_domain = self.transform.inverse(&symbols);
        ensure_same_len(Stage::InverseTransform, n, time_domain.len())?;
        trace!(
            power_db = vector_ops::linear_to_db(vector_ops::mean_power(&time_domain)),
            "time-domain block synthesized"
        );

        let (faded, gain) = match self.config.channel {
            ChannelModel::RayleighAwgn => {
                let (faded, gain) = self.fading.apply(&time_domain, &mut self.rng);
                (faded, Some(gain))
            }
            ChannelModel::Awgn | ChannelModel::Ideal => (time_domain, None),
        };
        ensure_same_len(Stage::Fading, n, faded.len())?;

        let received = match self.config.channel {
            ChannelModel::Ideal => faded,
            ChannelModel::Awgn | ChannelModel::RayleighAwgn => {
                self.awgn.apply(&faded, snr_db, &mut self.rng)?
            }
        };
        ensure_same_len(Stage::Noise, n, received.len())?;

        Ok((received, gain))
    }

    /// Receive half of the link: analyze back to bins and slice to bits
    pub fn receive(&mut self, signal: &[Complex64]) -> Result<Vec<Bit>> {
        let n = signal.len();

        let bins = self.transform.forward(signal);
        ensure_same_len(Stage::ForwardTransform, n, bins.len())?;

        let bits = self.demodulator.demodulate(&bins);
        ensure_same_len(Stage::Demodulator, n, bits.len())?;

        Ok(bits)
    }

    /// One full pass through the pipeline
    pub fn run(&mut self, num_bits: i64, snr_db: f64) -> Result<SimulationResult> {
        check_snr(snr_db)?;

        let transmitted_bits = self.generate_bits(num_bits)?;
        debug!(num_bits = transmitted_bits.len(), snr_db, "bits generated");

        let (received_signal, channel_gain) = self.transmit_block(&transmitted_bits, snr_db)?;
        let decoded_bits = self.receive(&received_signal)?;
        let report = scorer::score(&transmitted_bits, &decoded_bits)?;

        debug!(
            bit_errors = report.bit_errors,
            total_bits = report.total_bits,
            ber = report.ber(),
            "run complete"
        );

        Ok(SimulationResult {
            transmitted_bits,
            received_signal,
            decoded_bits,
            channel_gain,
            report,
        })
    }

    /// Aggregate bit errors over `trials` independent runs at each SNR
    pub fn ber_sweep(
        &mut self,
        snrs_db: &[f64],
        num_bits: usize,
        trials: usize,
    ) -> Result<Vec<BerPoint>> {
        let num_bits = i64::try_from(num_bits).map_err(|_| {
            LinkError::invalid_input(Stage::BitSource, format!("bit count {} too large", num_bits))
        })?;

        let mut points = Vec::with_capacity(snrs_db.len());
        for &snr_db in snrs_db {
            let mut point = BerPoint {
                snr_db,
                bit_errors: 0,
                total_bits: 0,
            };
            for _ in 0..trials {
                let result = self.run(num_bits, snr_db)?;
                point.bit_errors += result.report.bit_errors;
                point.total_bits += result.report.total_bits;
            }
            info!(snr_db, ber = point.ber(), total_bits = point.total_bits, "BER point");
            points.push(point);
        }
        Ok(points)
    }
}

fn check_snr(snr_db: f64) -> Result<()> {
    if !snr_db.is_finite() {
        return Err(LinkError::invalid_input(
            Stage::Noise,
            format!("SNR must be finite, got {} dB", snr_db),
        ));
    }
    Ok(())
}

/// Run one simulation on a fresh link built from `config`
pub fn run_simulation(num_bits: i64, snr_db: f64, config: &LinkConfig) -> Result<SimulationResult> {
    Link::new(config.clone())?.run(num_bits, snr_db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::{Bernoulli, Distribution};

    fn seeded(seed: u64, channel: ChannelModel) -> LinkConfig {
        LinkConfig::default().with_seed(seed).with_channel(channel)
    }

    #[test]
    fn test_eight_bit_scenario() {
        let result = run_simulation(8, 20.0, &seeded(2024, ChannelModel::RayleighAwgn)).unwrap();

        // The first eight draws from the run's generator are the transmitted bits
        let mut rng = StdRng::seed_from_u64(2024);
        let dist = Bernoulli::new(0.5).unwrap();
        let expected: Vec<Bit> = (0..8).map(|_| dist.sample(&mut rng) as Bit).collect();
        assert_eq!(result.transmitted_bits, expected);

        let symbols = bpsk::modulate(&result.transmitted_bits).unwrap();
        for (bit, sym) in result.transmitted_bits.iter().zip(symbols.iter()) {
            let expected_sym = if *bit == 1 {
                Complex64::new(1.0, 0.0)
            } else {
                Complex64::new(-1.0, 0.0)
            };
            assert_eq!(*sym, expected_sym);
        }

        assert_eq!(result.received_signal.len(), 8);
        assert_eq!(result.decoded_bits.len(), 8);
        assert!(result.channel_gain.is_some());
    }

    #[test]
    fn test_ideal_channel_recovers_bits() {
        let mut link = Link::new(seeded(1, ChannelModel::Ideal)).unwrap();
        for n in [0i64, 1, 5, 64, 100, 1023] {
            let result = link.run(n, 0.0).unwrap();
            assert_eq!(result.decoded_bits, result.transmitted_bits, "n = {}", n);
            assert_eq!(result.report.bit_errors, 0);
            assert!(result.channel_gain.is_none());
        }
    }

    #[test]
    fn test_awgn_at_default_noise_floor_is_error_free() {
        let result = run_simulation(4096, 20.0, &seeded(3, ChannelModel::Awgn)).unwrap();
        assert_eq!(result.report.bit_errors, 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = seeded(77, ChannelModel::RayleighAwgn);
        let a = run_simulation(300, 5.0, &config).unwrap();
        let b = run_simulation(300, 5.0, &config).unwrap();
        assert_eq!(a.transmitted_bits, b.transmitted_bits);
        assert_eq!(a.received_signal, b.received_signal);
        assert_eq!(a.decoded_bits, b.decoded_bits);
        assert_eq!(a.channel_gain, b.channel_gain);
    }

    #[test]
    fn test_lengths_preserved() {
        let mut link = Link::new(seeded(8, ChannelModel::RayleighAwgn)).unwrap();
        let bits = link.generate_bits(129).unwrap();
        let received = link.transmit(&bits, 10.0).unwrap();
        assert_eq!(received.len(), bits.len());
        assert_eq!(link.receive(&received).unwrap().len(), bits.len());
    }

    #[test]
    fn test_higher_snr_never_worse_on_awgn() {
        // With a 0 dB noise floor the noise is strong enough to cause errors at both points.
        // A shared seed draws the same normals, so errors at 20 dB are a subset of those at 0 dB.
        let mut total_low = 0;
        let mut total_high = 0;
        for seed in 0..200 {
            let mut config = seeded(seed, ChannelModel::Awgn);
            config.noise_floor_db = 0.0;
            let low = run_simulation(64, 0.0, &config).unwrap();
            let high = run_simulation(64, 20.0, &config).unwrap();
            assert_eq!(low.transmitted_bits, high.transmitted_bits);
            assert!(high.report.bit_errors <= low.report.bit_errors, "seed {}", seed);
            total_low += low.report.bit_errors;
            total_high += high.report.bit_errors;
        }
        assert!(total_high < total_low, "{} vs {}", total_high, total_low);
    }

    #[test]
    fn test_higher_snr_never_worse_under_fading_with_positive_gain() {
        // Without equalization the ordering only holds when Re(g) > 0; a negative
        // real part inverts every decision and more noise can only help.
        let mut checked = 0;
        for seed in 0..200 {
            let mut config = seeded(seed, ChannelModel::RayleighAwgn);
            config.noise_floor_db = 0.0;
            let low = run_simulation(64, 0.0, &config).unwrap();
            let high = run_simulation(64, 20.0, &config).unwrap();
            assert_eq!(low.channel_gain, high.channel_gain);

            let gain = high.channel_gain.unwrap();
            if gain.re > 0.0 {
                assert!(high.report.bit_errors <= low.report.bit_errors, "seed {}", seed);
                checked += 1;
            }
        }
        assert!(checked > 50);
    }

    #[test]
    fn test_negative_gain_inverts_decisions() {
        let mut seed = 0;
        let result = loop {
            let result =
                run_simulation(256, 60.0, &seeded(seed, ChannelModel::RayleighAwgn)).unwrap();
            if result.channel_gain.unwrap().re < -0.1 {
                break result;
            }
            seed += 1;
        };
        assert_eq!(result.report.bit_errors, result.report.total_bits);
    }

    #[test]
    fn test_negative_bit_count_rejected() {
        let err = run_simulation(-5, 10.0, &seeded(0, ChannelModel::RayleighAwgn)).unwrap_err();
        assert!(matches!(
            err,
            LinkError::InvalidInput {
                stage: Stage::BitSource,
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_snr_rejected() {
        for snr in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = run_simulation(8, snr, &seeded(0, ChannelModel::Ideal)).unwrap_err();
            assert!(matches!(err, LinkError::InvalidInput { stage: Stage::Noise, .. }));
        }
    }

    #[test]
    fn test_transmit_rejects_non_binary_bits() {
        let mut link = Link::new(seeded(0, ChannelModel::RayleighAwgn)).unwrap();
        let err = link.transmit(&[0, 1, 3], 10.0).unwrap_err();
        assert!(matches!(err, LinkError::InvalidInput { stage: Stage::Modulator, .. }));
    }

    #[test]
    fn test_ber_sweep() {
        let mut config = seeded(10, ChannelModel::Awgn);
        config.noise_floor_db = 0.0;
        let mut link = Link::new(config).unwrap();
        let points = link.ber_sweep(&[-10.0, 10.0, 40.0], 64, 20).unwrap();

        assert_eq!(points.len(), 3);
        for point in &points {
            assert_eq!(point.total_bits, 64 * 20);
        }
        assert!(points[0].ber() > points[2].ber());
        assert_eq!(points[2].bit_errors, 0);
    }

    #[test]
    fn test_parallel_runs_with_own_links() {
        let config = seeded(5, ChannelModel::RayleighAwgn);
        let reference = run_simulation(512, 10.0, &config).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| s.spawn(|| run_simulation(512, 10.0, &config).unwrap()))
                .collect();
            for handle in handles {
                let result = handle.join().unwrap();
                assert_eq!(result.received_signal, reference.received_signal);
                assert_eq!(result.decoded_bits, reference.decoded_bits);
            }
        });
    }
}
