pub mod horizon;
pub mod patient;
pub mod projection;
pub mod roi;
pub mod sampler;
pub mod tier;

use crate::errors::Result;
use serde::Serialize;

pub use horizon::{Horizon, DAYS_PER_YEAR};
pub use patient::PatientId;
pub use projection::{addressable_cost, projected_cost};
pub use roi::{
    PatientProjection, ProjectionResult, RoiCalculator, RoiCategory, RoiFloor, RoiPolicy,
    MAX_ROI_CAP, ROI_SENTINEL,
};
pub use sampler::{derive_seed, SuccessRateSampler};
pub use tier::{RiskTier, TIER_BREAKPOINTS, TIER_COUNT};

/// A scored patient for one horizon.
///
/// Construction validates every input and derives the tier, so a
/// `RiskAssessment` that exists is always projectable (given a table for its
/// horizon). Fields are read-only after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    patient_id: PatientId,
    horizon_days: Horizon,
    risk_score: f64,
    tier: RiskTier,
    annual_cost: f64,
}

impl RiskAssessment {
    pub fn new(
        patient_id: PatientId,
        horizon: Horizon,
        risk_score: f64,
        annual_cost: f64,
    ) -> Result<Self> {
        let tier = RiskTier::from_score(risk_score)?;
        let annual_cost = projection::validate_annual_cost(annual_cost)?;
        Ok(Self {
            patient_id,
            horizon_days: horizon,
            risk_score,
            tier,
            annual_cost,
        })
    }

    pub fn patient_id(&self) -> &PatientId {
        &self.patient_id
    }

    pub fn horizon(&self) -> Horizon {
        self.horizon_days
    }

    pub fn risk_score(&self) -> f64 {
        self.risk_score
    }

    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    pub fn annual_cost(&self) -> f64 {
        self.annual_cost
    }
}
