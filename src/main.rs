use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use ofdm_link_sim::logging::init_logging;
use ofdm_link_sim::plot::{write_series_html, Series};
use ofdm_link_sim::{Link, LinkConfig, Result};

#[derive(Parser, Debug)]
#[command(name = "ofdm-link-sim", version, about = "BPSK/OFDM link over a Rayleigh + AWGN channel")]
struct Args {
    /// Number of bits to transmit
    #[arg(long, default_value_t = 10_000, allow_negative_numbers = true)]
    num_bits: i64,

    /// Signal-to-noise ratio in dB
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    snr_db: f64,

    /// RNG seed; overrides the config file
    #[arg(long, env = "LINK_SEED")]
    seed: Option<u64>,

    /// JSON link configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the transmitted/received plots; skipped when absent
    #[arg(long)]
    plot_dir: Option<PathBuf>,

    /// Print the BER report as JSON
    #[arg(long)]
    json: bool,

    #[arg(long, default_value = "info")]
    log_level: String,
}

fn run(args: &Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => LinkConfig::load(path)?,
        None => LinkConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut link = Link::new(config)?;
    let result = link.run(args.num_bits, args.snr_db)?;
    info!(snr_db = args.snr_db, "{}", result.report);

    if args.json {
        match serde_json::to_string_pretty(&result.report) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("failed to serialize report: {}", e),
        }
    }

    if let Some(dir) = &args.plot_dir {
        let transmitted = Series::from_bits("Transmitted Bits", &result.transmitted_bits);
        let received = Series::from_magnitudes("Received Bit Magnitudes", &result.received_signal);
        write_series_html(&transmitted, &dir.join("bits_plot_transmitted.html"))?;
        write_series_html(&received, &dir.join("magnitudes_plot_received.html"))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
