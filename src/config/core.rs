use serde::{Deserialize, Serialize};

use super::parallel::ParallelConfig;
use super::tables::{EngineTables, HorizonTableConfig};
use crate::risk::RoiPolicy;

fn default_addressable_fraction() -> f64 {
    0.60
}

/// Settings for the informational cost figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSettings {
    /// Share of projected cost treated as preventable (default: 0.60)
    #[serde(default = "default_addressable_fraction")]
    pub addressable_fraction: f64,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            addressable_fraction: default_addressable_fraction(),
        }
    }
}

/// `.careroi.toml` as written on disk. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareRoiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<RoiPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection: Option<ProjectionSettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,

    /// Replaces the built-in tables entirely when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizons: Option<Vec<HorizonTableConfig>>,
}

/// Validated configuration shared read-only by every projection.
///
/// Only produced by validation (or `Default`), so the tables are always
/// complete and monotone.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub policy: RoiPolicy,
    pub projection: ProjectionSettings,
    pub parallel: ParallelConfig,
    pub tables: EngineTables,
}

impl EngineConfig {
    /// File form of this config, with every section filled in
    pub fn to_file_config(&self) -> CareRoiConfig {
        CareRoiConfig {
            roi: Some(self.policy.clone()),
            projection: Some(self.projection.clone()),
            parallel: Some(self.parallel.clone()),
            horizons: Some(
                self.tables
                    .horizons()
                    .into_iter()
                    .filter_map(|h| self.tables.table(h))
                    .map(|t| t.to_config())
                    .collect(),
            ),
        }
    }
}
