use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LinkError, Result};

/// Reference power level the SNR is measured against, in dB
pub const DEFAULT_NOISE_FLOOR_DB: f64 = -90.0;

/// Which impairments the channel applies between transmitter and receiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelModel {
    /// Unit gain, no noise
    Ideal,
    /// Additive white Gaussian noise only
    Awgn,
    /// Flat Rayleigh fading followed by AWGN
    RayleighAwgn,
}

impl Default for ChannelModel {
    fn default() -> Self {
        ChannelModel::RayleighAwgn
    }
}

/// Link configuration
///
/// Run parameters (bit count and SNR) are passed per call and are not part of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Noise floor in dB used to derive noise power from SNR
    pub noise_floor_db: f64,
    /// Offset added to the real part before the BPSK hard decision
    pub decision_bias: f64,
    /// Channel impairments to apply
    pub channel: ChannelModel,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            noise_floor_db: DEFAULT_NOISE_FLOOR_DB,
            decision_bias: 0.0,
            channel: ChannelModel::default(),
            seed: None,
        }
    }
}

impl LinkConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_channel(mut self, channel: ChannelModel) -> Self {
        self.channel = channel;
        self
    }

    /// Parse a JSON config; missing fields fall back to defaults
    pub fn from_json(text: &str) -> Result<Self> {
        let config: LinkConfig =
            serde_json::from_str(text).map_err(|e| LinkError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| LinkError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.noise_floor_db.is_finite() {
            return Err(LinkError::Config(format!(
                "noise_floor_db must be finite, got {}",
                self.noise_floor_db
            )));
        }
        if !self.decision_bias.is_finite() {
            return Err(LinkError::Config(format!(
                "decision_bias must be finite, got {}",
                self.decision_bias
            )));
        }
        Ok(())
    }
}
