//! Engine configuration: ROI policy, projection settings, parallelism and
//! the per-horizon cost and success-rate tables.
//!
//! Files are parsed into [`CareRoiConfig`] (every section optional) and
//! validated into [`EngineConfig`], which is what the engine consumes.

mod core;
mod loader;
mod parallel;
mod tables;
pub mod validation;

pub use self::core::{CareRoiConfig, EngineConfig, ProjectionSettings};
pub use loader::{
    directory_ancestors, find_config_file, load_config, load_config_from, load_config_from_path,
    parse_and_validate_config, resolve_config, CONFIG_FILE_NAME,
};
pub use parallel::ParallelConfig;
pub use tables::{
    default_horizon_tables, default_tables, EngineTables, HorizonTable, HorizonTableConfig,
    InterventionCostTable, RateRange, SuccessRateTable,
};
pub use validation::{validate_config, validate_config_result, ConfigValidation};
