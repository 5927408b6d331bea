use crate::io::OutputFormat;
use crate::risk::Horizon;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "careroi")]
#[command(about = "Risk stratification and care-program ROI projection", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project ROI for a CSV of scored patients
    Project {
        /// CSV with patient_id,horizon_days,risk_score,annual_cost
        input: PathBuf,

        /// Configuration file (defaults to the nearest .careroi.toml)
        #[arg(short, long, env = "CAREROI_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Only project these horizons (e.g. 30,90)
        #[arg(long, value_delimiter = ',')]
        horizons: Option<Vec<Horizon>>,

        /// Number of worker threads (0 = all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0")]
        jobs: usize,

        /// Report invalid rows instead of failing on the first one
        #[arg(long)]
        skip_invalid: bool,

        /// Patients listed in the terminal report
        #[arg(long, default_value = "10")]
        top: usize,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Project one patient across several horizons
    Patient {
        /// Patient identifier
        #[arg(long)]
        id: String,

        /// Baseline yearly cost
        #[arg(long)]
        annual_cost: f64,

        /// Risk score per horizon, as DAYS=SCORE (repeatable)
        #[arg(long = "score", value_parser = parse_horizon_score, required = true)]
        scores: Vec<(Horizon, f64)>,

        /// Configuration file (defaults to the nearest .careroi.toml)
        #[arg(short, long, env = "CAREROI_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .careroi.toml
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Check a configuration file and report every problem
    Validate {
        /// Configuration file (defaults to the nearest .careroi.toml)
        #[arg(short, long, env = "CAREROI_CONFIG")]
        config: Option<PathBuf>,

        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Project { verbosity, .. }
            | Commands::Patient { verbosity, .. }
            | Commands::Validate { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

/// Parse `DAYS=SCORE`, e.g. `30=0.82`
pub fn parse_horizon_score(raw: &str) -> Result<(Horizon, f64), String> {
    let (days, score) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected DAYS=SCORE, got '{raw}'"))?;
    let horizon: Horizon = days.parse()?;
    let score: f64 = score
        .trim()
        .parse()
        .map_err(|_| format!("'{score}' is not a risk score"))?;
    Ok((horizon, score))
}
