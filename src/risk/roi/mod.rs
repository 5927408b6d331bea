pub mod models;
pub mod policy;


use super::projection::{addressable_cost, projected_cost, validate_annual_cost};
use super::sampler::SuccessRateSampler;
use super::{Horizon, PatientId, RiskAssessment};
use crate::config::EngineConfig;
use crate::errors::{Error, Result};

pub use models::{PatientProjection, ProjectionResult, RoiCategory};
pub use policy::{RoiFloor, RoiPolicy, MAX_ROI_CAP, ROI_SENTINEL};

/// Combines tiering, cost projection, intervention pricing and sampled
/// effectiveness into a per-patient ROI.
pub struct RoiCalculator<'a> {
    config: &'a EngineConfig,
    sampler: SuccessRateSampler<'a>,
}

impl<'a> RoiCalculator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            sampler: SuccessRateSampler::new(&config.tables.rates),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.config
    }

    pub fn calculate(
        &self,
        risk_score: f64,
        annual_cost: f64,
        horizon_days: u32,
        patient_id: &PatientId,
    ) -> Result<ProjectionResult> {
        let assessment = RiskAssessment::new(
            patient_id.clone(),
            Horizon::new(horizon_days)?,
            risk_score,
            annual_cost,
        )?;
        self.calculate_assessment(&assessment)
    }

    pub fn calculate_assessment(&self, assessment: &RiskAssessment) -> Result<ProjectionResult> {
        let horizon = assessment.horizon();
        let tier = assessment.tier();
        let tables = &self.config.tables;

        let projected = projected_cost(assessment.annual_cost(), horizon);
        let intervention_cost = tables.costs.cost(horizon, tier)?;
        let success_rate_range = tables.rates.range(horizon, tier)?;
        let success_rate = self.sampler.sample(assessment.patient_id(), tier, horizon)?;

        let expected_savings = projected * success_rate;
        let net_benefit = expected_savings - intervention_cost;
        let raw_roi_percent = RoiPolicy::raw_roi(net_benefit, intervention_cost);
        let roi_percent = self.config.policy.apply(raw_roi_percent);

        log::trace!(
            "patient {} {}: {} roi {:.1}%",
            assessment.patient_id(),
            horizon,
            tier.short_label(),
            roi_percent
        );

        Ok(ProjectionResult {
            patient_id: assessment.patient_id().clone(),
            horizon_days: horizon,
            tier,
            risk_score: assessment.risk_score(),
            annual_cost: assessment.annual_cost(),
            projected_cost: projected,
            addressable_cost: addressable_cost(
                projected,
                self.config.projection.addressable_fraction,
            ),
            intervention_cost,
            success_rate,
            success_rate_range,
            expected_savings,
            net_benefit,
            raw_roi_percent,
            roi_percent,
            roi_category: RoiCategory::from_roi(roi_percent),
        })
    }

    /// Project one patient across several windows, each with its own score.
    ///
    /// Windows are reported shortest first. The overall ROI is a ratio of
    /// sums over every window.
    pub fn project_patient(
        &self,
        patient_id: &PatientId,
        annual_cost: f64,
        scores: &[(Horizon, f64)],
    ) -> Result<PatientProjection> {
        validate_annual_cost(annual_cost)?;

        let mut scores = scores.to_vec();
        scores.sort_by_key(|(horizon, _)| *horizon);
        if let Some(pair) = scores.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            return Err(Error::DuplicateHorizon(pair[0].0.days()));
        }

        let projections = scores
            .iter()
            .map(|&(horizon, score)| {
                let assessment =
                    RiskAssessment::new(patient_id.clone(), horizon, score, annual_cost)?;
                self.calculate_assessment(&assessment)
            })
            .collect::<Result<Vec<_>>>()?;

        let total_intervention_cost = projections.iter().map(|p| p.intervention_cost).sum();
        let total_expected_savings = projections.iter().map(|p| p.expected_savings).sum();
        let total_net_benefit = projections.iter().map(|p| p.net_benefit).sum();
        let overall_roi_percent = self
            .config
            .policy
            .aggregate(total_net_benefit, total_intervention_cost);

        Ok(PatientProjection {
            patient_id: patient_id.clone(),
            annual_cost,
            projections,
            total_intervention_cost,
            total_expected_savings,
            total_net_benefit,
            overall_roi_percent,
        })
    }
}
