use crate::config::RateRange;
use crate::risk::{Horizon, PatientId, RiskTier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative ROI band used in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiCategory {
    NoRoi,
    Positive,
    Strong,
    Excellent,
}

impl RoiCategory {
    pub fn from_roi(roi_percent: f64) -> Self {
        match roi_percent {
            r if r > 75.0 => RoiCategory::Excellent,
            r if r >= 50.0 => RoiCategory::Strong,
            r if r > 0.0 => RoiCategory::Positive,
            _ => RoiCategory::NoRoi,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoiCategory::Excellent => "Excellent ROI",
            RoiCategory::Strong => "Strong ROI",
            RoiCategory::Positive => "Positive ROI",
            RoiCategory::NoRoi => "No ROI",
        }
    }
}

impl fmt::Display for RoiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Projection for one patient over one horizon.
///
/// A computed view: everything here follows from the assessment inputs and
/// the engine tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub patient_id: PatientId,
    pub horizon_days: Horizon,
    pub tier: RiskTier,
    pub risk_score: f64,
    pub annual_cost: f64,
    pub projected_cost: f64,
    pub addressable_cost: f64,
    pub intervention_cost: f64,
    pub success_rate: f64,
    pub success_rate_range: RateRange,
    pub expected_savings: f64,
    pub net_benefit: f64,
    /// Uncapped ROI; `None` when the intervention is free
    pub raw_roi_percent: Option<f64>,
    pub roi_percent: f64,
    pub roi_category: RoiCategory,
}

impl ProjectionResult {
    pub fn has_positive_roi(&self) -> bool {
        self.roi_percent > 0.0
    }

    /// Whether any intervention is priced for this patient
    pub fn is_intervened(&self) -> bool {
        self.intervention_cost > 0.0
    }
}

/// One patient projected over several horizons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProjection {
    pub patient_id: PatientId,
    pub annual_cost: f64,
    pub projections: Vec<ProjectionResult>,
    pub total_intervention_cost: f64,
    pub total_expected_savings: f64,
    pub total_net_benefit: f64,
    /// Ratio of summed net benefit to summed intervention cost
    pub overall_roi_percent: f64,
}

impl PatientProjection {
    pub fn for_horizon(&self, horizon: Horizon) -> Option<&ProjectionResult> {
        self.projections.iter().find(|p| p.horizon_days == horizon)
    }

    /// Highest tier reached in any window
    pub fn peak_tier(&self) -> Option<RiskTier> {
        self.projections.iter().map(|p| p.tier).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_bands() {
        assert_eq!(RoiCategory::from_roi(100.0), RoiCategory::Excellent);
        assert_eq!(RoiCategory::from_roi(75.0), RoiCategory::Strong);
        assert_eq!(RoiCategory::from_roi(50.0), RoiCategory::Strong);
        assert_eq!(RoiCategory::from_roi(49.9), RoiCategory::Positive);
        assert_eq!(RoiCategory::from_roi(0.0), RoiCategory::NoRoi);
        assert_eq!(RoiCategory::from_roi(-20.0), RoiCategory::NoRoi);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RoiCategory::NoRoi).unwrap(),
            "\"no_roi\""
        );
    }
}
