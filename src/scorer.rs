use std::fmt;

use serde::Serialize;

use crate::error::{LinkError, Result, Stage};
use crate::Bit;

/// Bit error count and rate for one comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BitErrorReport {
    pub bit_errors: usize,
    pub total_bits: usize,
}

impl BitErrorReport {
    /// Fraction of positions that differ; 0.0 for an empty comparison
    pub fn ber(&self) -> f64 {
        if self.total_bits == 0 {
            0.0
        } else {
            self.bit_errors as f64 / self.total_bits as f64
        }
    }
}

impl fmt::Display for BitErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} bit errors (BER {:.3e})",
            self.bit_errors,
            self.total_bits,
            self.ber()
        )
    }
}

/// Compare transmitted and decoded bits position by position
///
/// Unequal lengths mean a stage dropped or invented samples, which is reported as
/// a pipeline integrity failure rather than bad input.
pub fn score(transmitted: &[Bit], received: &[Bit]) -> Result<BitErrorReport> {
    if transmitted.len() != received.len() {
        return Err(LinkError::integrity(
            Stage::Scorer,
            format!(
                "transmitted {} bits but decoded {}",
                transmitted.len(),
                received.len()
            ),
        ));
    }

    let bit_errors = transmitted
        .iter()
        .zip(received.iter())
        .filter(|(a, b)| a != b)
        .count();

    Ok(BitErrorReport {
        bit_errors,
        total_bits: transmitted.len(),
    })
}
