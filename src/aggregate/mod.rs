//! Tier and program roll-ups of per-patient projections.
//!
//! Aggregate ROI is always a ratio of sums over the uncapped per-patient
//! figures. Averaging capped per-patient ROI understates high-value tiers,
//! so the per-patient mean is reported separately as a statistic only.

pub mod distribution;

use crate::risk::{Horizon, ProjectionResult, RiskTier, RoiPolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use distribution::{
    risk_distribution, tier_transitions, RiskDistribution, TierCount, TierTransitions,
};

/// Roll-up of every projection that landed in one tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    pub tier: RiskTier,
    pub tier_label: String,
    pub patient_count: usize,
    pub total_projected_cost: f64,
    pub total_intervention_cost: f64,
    pub total_expected_savings: f64,
    pub total_net_benefit: f64,
    pub mean_risk_score: f64,
    pub mean_success_rate: f64,
    /// Ratio of sums: `(Σsavings - Σcost) / Σcost * 100`
    pub roi_percent: f64,
    pub mean_patient_roi: f64,
    pub median_patient_roi: f64,
    pub std_patient_roi: f64,
    pub positive_roi_count: usize,
    pub positive_roi_share: f64,
}

/// Program-wide totals, optionally restricted to one horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizon: Option<Horizon>,
    pub patient_count: usize,
    pub intervened_count: usize,
    pub total_projected_cost: f64,
    pub total_intervention_cost: f64,
    pub total_expected_savings: f64,
    pub total_net_benefit: f64,
    pub overall_roi_percent: f64,
    pub positive_roi_count: usize,
    pub tiers: Vec<TierSummary>,
}

/// Summarizes projections under a given ROI policy
pub struct TierAggregator<'a> {
    policy: &'a RoiPolicy,
}

impl<'a> TierAggregator<'a> {
    pub fn new(policy: &'a RoiPolicy) -> Self {
        Self { policy }
    }

    /// One summary per tier present in `results`, lowest tier first
    pub fn summarize_tiers(&self, results: &[ProjectionResult]) -> Vec<TierSummary> {
        let mut by_tier: BTreeMap<RiskTier, Vec<&ProjectionResult>> = BTreeMap::new();
        for result in results {
            by_tier.entry(result.tier).or_default().push(result);
        }

        by_tier
            .into_iter()
            .map(|(tier, members)| self.summarize_tier(tier, &members))
            .collect()
    }

    fn summarize_tier(&self, tier: RiskTier, members: &[&ProjectionResult]) -> TierSummary {
        let total_projected_cost = members.iter().map(|r| r.projected_cost).sum();
        let total_intervention_cost: f64 = members.iter().map(|r| r.intervention_cost).sum();
        let total_expected_savings: f64 = members.iter().map(|r| r.expected_savings).sum();
        let total_net_benefit = total_expected_savings - total_intervention_cost;

        let rois: Vec<f64> = members.iter().map(|r| r.roi_percent).collect();
        let positive_roi_count = members.iter().filter(|r| r.has_positive_roi()).count();

        TierSummary {
            tier,
            tier_label: tier.label().to_string(),
            patient_count: members.len(),
            total_projected_cost,
            total_intervention_cost,
            total_expected_savings,
            total_net_benefit,
            mean_risk_score: mean(members.iter().map(|r| r.risk_score)),
            mean_success_rate: mean(members.iter().map(|r| r.success_rate)),
            roi_percent: self
                .policy
                .aggregate(total_net_benefit, total_intervention_cost),
            mean_patient_roi: mean(rois.iter().copied()),
            median_patient_roi: median(&rois),
            std_patient_roi: population_std(&rois),
            positive_roi_count,
            positive_roi_share: share(positive_roi_count, members.len()),
        }
    }

    pub fn summarize_program(&self, results: &[ProjectionResult]) -> ProgramSummary {
        let total_intervention_cost: f64 = results.iter().map(|r| r.intervention_cost).sum();
        let total_net_benefit: f64 = results.iter().map(|r| r.net_benefit).sum();

        ProgramSummary {
            horizon: None,
            patient_count: results.len(),
            intervened_count: results.iter().filter(|r| r.is_intervened()).count(),
            total_projected_cost: results.iter().map(|r| r.projected_cost).sum(),
            total_intervention_cost,
            total_expected_savings: results.iter().map(|r| r.expected_savings).sum(),
            total_net_benefit,
            overall_roi_percent: self
                .policy
                .aggregate(total_net_benefit, total_intervention_cost),
            positive_roi_count: results.iter().filter(|r| r.has_positive_roi()).count(),
            tiers: self.summarize_tiers(results),
        }
    }

    /// One program summary per horizon, shortest horizon first
    pub fn summarize_by_horizon(&self, results: &[ProjectionResult]) -> Vec<ProgramSummary> {
        group_by_horizon(results)
            .into_iter()
            .map(|(horizon, group)| ProgramSummary {
                horizon: Some(horizon),
                ..self.summarize_program(&group)
            })
            .collect()
    }
}

/// [`TierAggregator::summarize_tiers`] under the default policy
pub fn summarize_tiers(results: &[ProjectionResult]) -> Vec<TierSummary> {
    TierAggregator::new(&RoiPolicy::default()).summarize_tiers(results)
}

/// [`TierAggregator::summarize_program`] under the default policy
pub fn summarize_program(results: &[ProjectionResult]) -> ProgramSummary {
    TierAggregator::new(&RoiPolicy::default()).summarize_program(results)
}

/// [`TierAggregator::summarize_by_horizon`] under the default policy
pub fn summarize_by_horizon(results: &[ProjectionResult]) -> Vec<ProgramSummary> {
    TierAggregator::new(&RoiPolicy::default()).summarize_by_horizon(results)
}

pub(crate) fn group_by_horizon(
    results: &[ProjectionResult],
) -> BTreeMap<Horizon, Vec<ProjectionResult>> {
    let mut groups: BTreeMap<Horizon, Vec<ProjectionResult>> = BTreeMap::new();
    for result in results {
        groups
            .entry(result.horizon_days)
            .or_default()
            .push(result.clone());
    }
    groups
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values.iter().copied());
    let variance = mean(values.iter().map(|v| (v - avg).powi(2)));
    variance.sqrt()
}

pub(crate) fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}
