//! Runtime setup for the CLI: logging and the rayon thread pool.

use crate::config::ParallelConfig;

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        log::debug!("Thread pool already configured: {}", e);
    }
}

/// Worker count: `--jobs` wins, then `[parallel] max_concurrency`, then all
/// cores (0).
pub fn resolve_jobs(jobs: usize, parallel: &ParallelConfig) -> usize {
    if jobs > 0 {
        jobs
    } else {
        parallel.max_concurrency.unwrap_or(0)
    }
}

/// Log level for `-v` repetitions, starting from warnings
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// Install env_logger. `RUST_LOG`, when set, overrides the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(verbosity));
    builder.parse_default_env();
    builder.format_timestamp(None);
    let _ = builder.try_init();
}
