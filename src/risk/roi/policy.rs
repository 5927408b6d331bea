use serde::{Deserialize, Serialize};

/// ROI reported when there is no intervention cost to divide by
pub const ROI_SENTINEL: f64 = 0.0;

/// Highest cap a policy may set; reported ROI never exceeds it
pub const MAX_ROI_CAP: f64 = 100.0;

fn default_cap_percent() -> f64 {
    MAX_ROI_CAP
}

/// Lower bound applied to per-patient ROI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoiFloor {
    /// Negative ROI is reported as computed
    #[default]
    Unbounded,
    /// Negative ROI is raised to zero
    Zero,
}

/// Cap and floor rules for reported ROI.
///
/// The cap is a display policy. Aggregates are always computed from the
/// uncapped per-patient savings and costs; `cap_aggregate` only controls
/// whether the final aggregate percentage is capped as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiPolicy {
    #[serde(default = "default_cap_percent")]
    pub cap_percent: f64,

    #[serde(default)]
    pub floor: RoiFloor,

    #[serde(default)]
    pub cap_aggregate: bool,
}

impl Default for RoiPolicy {
    fn default() -> Self {
        Self {
            cap_percent: default_cap_percent(),
            floor: RoiFloor::default(),
            cap_aggregate: false,
        }
    }
}

impl RoiPolicy {
    /// `net / cost * 100`, or `None` when there is no cost
    pub fn raw_roi(net_benefit: f64, intervention_cost: f64) -> Option<f64> {
        (intervention_cost > 0.0).then(|| net_benefit / intervention_cost * 100.0)
    }

    /// Per-patient reported ROI: capped above, floored per policy.
    pub fn apply(&self, raw_roi: Option<f64>) -> f64 {
        let Some(raw) = raw_roi else {
            return ROI_SENTINEL;
        };
        let capped = raw.min(self.cap_percent.min(MAX_ROI_CAP));
        match self.floor {
            RoiFloor::Unbounded => capped,
            RoiFloor::Zero => capped.max(0.0),
        }
    }

    /// Aggregate ROI as a ratio of sums. Cap and floor only apply when
    /// `cap_aggregate` is set.
    pub fn aggregate(&self, total_net_benefit: f64, total_intervention_cost: f64) -> f64 {
        let raw = Self::raw_roi(total_net_benefit, total_intervention_cost);
        if self.cap_aggregate {
            self.apply(raw)
        } else {
            raw.unwrap_or(ROI_SENTINEL)
        }
    }
}
