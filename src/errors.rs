//! Shared error types for the engine.
//!
//! Every failure the core can produce is a variant of [`Error`]. Input
//! validation failures are reported per call; configuration failures are
//! reported once, at load time, with every issue found.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single problem found while validating configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    /// Dotted path of the offending field, e.g. `horizons[1].intervention_costs`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Main error type for careroi operations
#[derive(Debug, Error)]
pub enum Error {
    /// Risk score outside [0, 1] or not a number
    #[error("risk score {0} is outside [0, 1]")]
    InvalidRiskScore(f64),

    /// Annual cost negative or not finite
    #[error("annual cost {0} must be a finite, non-negative amount")]
    InvalidAnnualCost(f64),

    /// Horizon length that can never be valid
    #[error("horizon must be a positive number of days, got {0}")]
    InvalidHorizon(u32),

    /// Tier number outside 1..=5
    #[error("tier must be between 1 and 5, got {0}")]
    InvalidTier(u8),

    /// Same horizon scored twice for one patient
    #[error("horizon {0}-day is scored more than once")]
    DuplicateHorizon(u32),

    /// Horizon with no configured cost table / rate ranges
    #[error("no cost table or success-rate ranges configured for a {0}-day horizon")]
    UnknownHorizon(u32),

    /// Configuration rejected at load time; carries every issue found
    #[error("invalid configuration:\n{}", format_issues(.0))]
    InvalidConfig(Vec<ConfigIssue>),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// File system errors with path context
    #[error("{message}: {}", .path.display())]
    FileSystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// CSV read/write errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: path.into(),
            source,
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// True for failures caused by the caller's input rather than by
    /// configuration or the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRiskScore(_)
                | Self::InvalidAnnualCost(_)
                | Self::InvalidHorizon(_)
                | Self::InvalidTier(_)
                | Self::DuplicateHorizon(_)
        )
    }
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("  - {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
