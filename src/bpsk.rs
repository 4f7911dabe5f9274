//! BPSK symbol mapping and hard-decision detection
//!
//! Bit 0 maps to -1 + 0j and bit 1 to +1 + 0j. The detector decides 1 when the
//! real part plus the decision bias is non-negative.

use num_complex::Complex64;

use crate::error::{LinkError, Result, Stage};
use crate::Bit;

/// Map a single bit to its antipodal symbol
pub fn map_bit(bit: Bit) -> Result<Complex64> {
    match bit {
        0 => Ok(Complex64::new(-1.0, 0.0)),
        1 => Ok(Complex64::new(1.0, 0.0)),
        other => Err(LinkError::invalid_input(
            Stage::Modulator,
            format!("bit value {} is not 0 or 1", other),
        )),
    }
}

/// Modulate a bit sequence into a block of BPSK symbols, preserving order
pub fn modulate(bits: &[Bit]) -> Result<Vec<Complex64>> {
    bits.iter()
        .enumerate()
        .map(|(i, &bit)| {
            map_bit(bit).map_err(|_| {
                LinkError::invalid_input(
                    Stage::Modulator,
                    format!("bit value {} at index {} is not 0 or 1", bit, i),
                )
            })
        })
        .collect()
}

/// Hard-decision BPSK detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpskDemodulator {
    decision_bias: f64,
}

impl BpskDemodulator {
    pub fn new(decision_bias: f64) -> Result<Self> {
        if !decision_bias.is_finite() {
            return Err(LinkError::invalid_input(
                Stage::Demodulator,
                format!("decision bias must be finite, got {}", decision_bias),
            ));
        }
        Ok(Self { decision_bias })
    }

    pub fn decision_bias(&self) -> f64 {
        self.decision_bias
    }

    pub fn decide(&self, sample: Complex64) -> Bit {
        if sample.re + self.decision_bias >= 0.0 {
            1
        } else {
            0
        }
    }

    pub fn demodulate(&self, samples: &[Complex64]) -> Vec<Bit> {
        samples.iter().map(|&s| self.decide(s)).collect()
    }
}

impl Default for BpskDemodulator {
    fn default() -> Self {
        Self { decision_bias: 0.0 }
    }
}
