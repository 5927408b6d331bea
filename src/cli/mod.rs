//! Command-line interface: argument parsing and runtime setup.

pub mod args;
pub mod setup;

pub use args::{parse_horizon_score, Cli, Commands};
pub use setup::{configure_thread_pool, init_logging, resolve_jobs};
