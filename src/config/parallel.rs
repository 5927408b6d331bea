//! Parallelism configuration for batch projection.

use serde::{Deserialize, Serialize};

/// Default value for parallel processing enabled
fn default_enabled() -> bool {
    true
}

/// Default batch size for chunked processing
fn default_batch_size() -> usize {
    1000
}

fn default_batch_size_option() -> Option<usize> {
    Some(default_batch_size())
}

/// Controls how a patient batch is spread over rayon's thread pool.
///
/// Parallelism never affects results: every projection is a pure function
/// of its record and the configuration, and output order always follows
/// input order.
///
/// # Example
///
/// ```rust
/// use careroi::config::ParallelConfig;
///
/// let config = ParallelConfig {
///     enabled: true,
///     max_concurrency: Some(4),
///     batch_size: Some(500),
/// };
/// assert_eq!(config.effective_batch_size(), 500);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParallelConfig {
    /// Project records concurrently (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Worker thread cap (default: available CPU cores)
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Records handed to the pool per chunk (default: 1000)
    #[serde(default = "default_batch_size_option")]
    pub batch_size: Option<usize>,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_concurrency: None,
            batch_size: default_batch_size_option(),
        }
    }
}

impl ParallelConfig {
    /// Create a config with parallel processing disabled.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(default_batch_size()).max(1)
    }
}
