// Export modules for library usage
pub mod aggregate;
pub mod classifier;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod errors;
pub mod io;
pub mod report;
pub mod risk;

// Re-export commonly used types
pub use crate::errors::{ConfigIssue, Error, Result, ResultExt};

pub use crate::risk::{
    derive_seed, projected_cost, Horizon, PatientId, PatientProjection, ProjectionResult,
    RiskAssessment, RiskTier, RoiCalculator, RoiCategory, RoiFloor, RoiPolicy,
    SuccessRateSampler, MAX_ROI_CAP, ROI_SENTINEL, TIER_BREAKPOINTS,
};

pub use crate::aggregate::{
    risk_distribution, summarize_by_horizon, summarize_program, summarize_tiers,
    tier_transitions, ProgramSummary, RiskDistribution, TierAggregator, TierSummary,
    TierTransitions,
};

pub use crate::config::{
    load_config, load_config_from_path, parse_and_validate_config, CareRoiConfig, EngineConfig,
    InterventionCostTable, ParallelConfig, RateRange, SuccessRateTable,
};

pub use crate::engine::{BatchOutcome, ProjectionEngine, RejectedRecord, ScoredPatient};

pub use crate::classifier::{score_population, PatientRecord, RiskClassifier};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::report::ProjectionReport;
