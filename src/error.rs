//! Link simulator error types

use std::fmt;
use thiserror::Error;

/// Result type for link simulation operations
pub type Result<T> = std::result::Result<T, LinkError>;

/// Pipeline stage that raised an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BitSource,
    Modulator,
    InverseTransform,
    Fading,
    Noise,
    ForwardTransform,
    Demodulator,
    Scorer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::BitSource => "bit source",
            Stage::Modulator => "BPSK modulator",
            Stage::InverseTransform => "inverse transform",
            Stage::Fading => "fading channel",
            Stage::Noise => "noise channel",
            Stage::ForwardTransform => "forward transform",
            Stage::Demodulator => "BPSK demodulator",
            Stage::Scorer => "error scorer",
        };
        write!(f, "{}", name)
    }
}

/// Errors that can occur during a simulation run
#[derive(Error, Debug)]
pub enum LinkError {
    /// Caller handed a stage something it cannot accept
    #[error("invalid input to {stage}: {reason}")]
    InvalidInput { stage: Stage, reason: String },

    /// A pipeline invariant broke between stages. Always a wiring defect.
    #[error("pipeline integrity violated at {stage}: {reason}")]
    Integrity { stage: Stage, reason: String },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// The plot collaborator failed to render a series
    #[error("plot error: {0}")]
    Plot(String),
}

impl LinkError {
    pub fn invalid_input(stage: Stage, reason: impl Into<String>) -> Self {
        LinkError::InvalidInput {
            stage,
            reason: reason.into(),
        }
    }

    pub fn integrity(stage: Stage, reason: impl Into<String>) -> Self {
        LinkError::Integrity {
            stage,
            reason: reason.into(),
        }
    }

    /// True when the error signals a pipeline defect rather than bad input
    pub fn is_integrity(&self) -> bool {
        matches!(self, LinkError::Integrity { .. })
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            LinkError::InvalidInput { stage, .. } | LinkError::Integrity { stage, .. } => {
                Some(*stage)
            }
            _ => None,
        }
    }
}

/// Check that a stage preserved the block length it was handed
pub(crate) fn ensure_same_len(stage: Stage, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(LinkError::integrity(
            stage,
            format!("expected {} samples, got {}", expected, actual),
        ));
    }
    Ok(())
}
