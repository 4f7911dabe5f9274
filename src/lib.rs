pub mod bpsk;
pub mod config;
pub mod error;
pub mod fft;
pub mod generate;
pub mod link;
pub mod logging;
pub mod plot;
pub mod scorer;
pub mod vector_ops;

/// A single transmitted or decoded bit, always 0 or 1
pub type Bit = u8;

pub use config::{ChannelModel, LinkConfig};
pub use error::{LinkError, Result, Stage};
pub use link::{run_simulation, BerPoint, Link, SimulationResult};
pub use scorer::BitErrorReport;
