//! Intervention cost and success-rate tables, keyed by (horizon, tier).
//!
//! The file form ([`HorizonTableConfig`]) is loose so that every problem can
//! be reported at load time; the validated form ([`EngineTables`]) has one
//! entry per tier for every configured horizon, so lookups can only fail for
//! horizons that were never configured.

use crate::errors::{Error, Result};
use crate::risk::{Horizon, RiskTier, TIER_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed interval of assumed intervention effectiveness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Display form, e.g. "25%-40%"
    pub fn percent_label(&self) -> String {
        format!("{:.0}%-{:.0}%", self.min * 100.0, self.max * 100.0)
    }
}

/// One `[[horizons]]` entry as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonTableConfig {
    pub days: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Cost per patient for tiers 1..=5
    pub intervention_costs: Vec<f64>,

    /// `[min, max]` success rate for tiers 1..=5
    pub success_rates: Vec<[f64; 2]>,
}

/// Validated tables for a single horizon
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonTable {
    pub horizon: Horizon,
    pub label: String,
    pub intervention_costs: [f64; TIER_COUNT],
    pub success_rates: [RateRange; TIER_COUNT],
}

impl HorizonTable {
    pub fn to_config(&self) -> HorizonTableConfig {
        HorizonTableConfig {
            days: self.horizon.days(),
            label: Some(self.label.clone()),
            intervention_costs: self.intervention_costs.to_vec(),
            success_rates: self.success_rates.iter().map(|r| [r.min, r.max]).collect(),
        }
    }
}

/// Time-scaled intervention cost per (horizon, tier)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InterventionCostTable {
    rows: BTreeMap<Horizon, [f64; TIER_COUNT]>,
}

impl InterventionCostTable {
    pub fn cost(&self, horizon: Horizon, tier: RiskTier) -> Result<f64> {
        self.rows
            .get(&horizon)
            .map(|row| row[tier.index()])
            .ok_or(Error::UnknownHorizon(horizon.days()))
    }

    pub fn row(&self, horizon: Horizon) -> Option<&[f64; TIER_COUNT]> {
        self.rows.get(&horizon)
    }
}

/// Success-rate range per (horizon, tier)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuccessRateTable {
    rows: BTreeMap<Horizon, [RateRange; TIER_COUNT]>,
}

impl SuccessRateTable {
    pub fn range(&self, horizon: Horizon, tier: RiskTier) -> Result<RateRange> {
        self.rows
            .get(&horizon)
            .map(|row| row[tier.index()])
            .ok_or(Error::UnknownHorizon(horizon.days()))
    }

    pub fn row(&self, horizon: Horizon) -> Option<&[RateRange; TIER_COUNT]> {
        self.rows.get(&horizon)
    }
}

/// All lookup tables the ROI calculator needs
#[derive(Debug, Clone, PartialEq)]
pub struct EngineTables {
    pub costs: InterventionCostTable,
    pub rates: SuccessRateTable,
    labels: BTreeMap<Horizon, String>,
}

impl EngineTables {
    /// Build from already-validated horizon tables
    pub fn from_tables(tables: impl IntoIterator<Item = HorizonTable>) -> Self {
        let mut costs = InterventionCostTable::default();
        let mut rates = SuccessRateTable::default();
        let mut labels = BTreeMap::new();

        for table in tables {
            costs.rows.insert(table.horizon, table.intervention_costs);
            rates.rows.insert(table.horizon, table.success_rates);
            labels.insert(table.horizon, table.label);
        }

        Self {
            costs,
            rates,
            labels,
        }
    }

    /// The 30/60/90-day tables
    pub fn standard() -> Self {
        Self::from_tables(default_tables())
    }

    /// Configured horizons, shortest first
    pub fn horizons(&self) -> Vec<Horizon> {
        self.labels.keys().copied().collect()
    }

    pub fn label(&self, horizon: Horizon) -> Option<&str> {
        self.labels.get(&horizon).map(String::as_str)
    }

    pub fn table(&self, horizon: Horizon) -> Option<HorizonTable> {
        Some(HorizonTable {
            horizon,
            label: self.labels.get(&horizon)?.clone(),
            intervention_costs: *self.costs.row(horizon)?,
            success_rates: *self.rates.row(horizon)?,
        })
    }
}

impl Default for EngineTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// Time-scaled tables for the standard windows.
pub fn default_tables() -> Vec<HorizonTable> {
    vec![
        HorizonTable {
            horizon: Horizon::THIRTY_DAYS,
            label: Horizon::THIRTY_DAYS.default_label(),
            intervention_costs: [0.0, 150.0, 400.0, 700.0, 900.0],
            success_rates: [
                RateRange::new(0.03, 0.08),
                RateRange::new(0.10, 0.20),
                RateRange::new(0.25, 0.40),
                RateRange::new(0.30, 0.50),
                RateRange::new(0.40, 0.60),
            ],
        },
        HorizonTable {
            horizon: Horizon::SIXTY_DAYS,
            label: Horizon::SIXTY_DAYS.default_label(),
            intervention_costs: [0.0, 250.0, 700.0, 1100.0, 1650.0],
            success_rates: [
                RateRange::new(0.10, 0.25),
                RateRange::new(0.25, 0.40),
                RateRange::new(0.35, 0.55),
                RateRange::new(0.45, 0.65),
                RateRange::new(0.55, 0.75),
            ],
        },
        HorizonTable {
            horizon: Horizon::NINETY_DAYS,
            label: Horizon::NINETY_DAYS.default_label(),
            intervention_costs: [0.0, 350.0, 1050.0, 1550.0, 1900.0],
            success_rates: [
                RateRange::new(0.20, 0.35),
                RateRange::new(0.35, 0.50),
                RateRange::new(0.45, 0.60),
                RateRange::new(0.60, 0.80),
                RateRange::new(0.70, 0.90),
            ],
        },
    ]
}

/// Default tables in file form
pub fn default_horizon_tables() -> Vec<HorizonTableConfig> {
    default_tables().iter().map(HorizonTable::to_config).collect()
}
