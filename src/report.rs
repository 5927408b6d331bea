//! Everything a `project` run reports, assembled once and handed to the
//! output writers.

use crate::aggregate::{
    risk_distribution, tier_transitions, ProgramSummary, RiskDistribution, TierAggregator,
    TierTransitions,
};
use crate::config::EngineConfig;
use crate::engine::BatchOutcome;
use crate::risk::{Horizon, PatientId, ProjectionResult, RoiPolicy};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-horizon section of the report
#[derive(Debug, Clone, Serialize)]
pub struct HorizonReport {
    pub horizon: Horizon,
    pub label: String,
    pub summary: ProgramSummary,
    pub distribution: RiskDistribution,
}

/// Input record left out of the report, with the reason
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    /// 1-based record number in the input
    pub record: usize,
    pub patient_id: PatientId,
    pub horizon_days: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport {
    pub generated_at: DateTime<Utc>,
    pub policy: RoiPolicy,
    pub horizons: Vec<HorizonReport>,
    pub transitions: Vec<TierTransitions>,
    pub patients: Vec<ProjectionResult>,
    pub rejected: Vec<RejectedRow>,
}

impl ProjectionReport {
    pub fn build(config: &EngineConfig, outcome: BatchOutcome) -> Self {
        let aggregator = TierAggregator::new(&config.policy);
        let results = outcome.results;

        let mut distributions = risk_distribution(&results).into_iter();
        let horizons: Vec<HorizonReport> = aggregator
            .summarize_by_horizon(&results)
            .into_iter()
            .filter_map(|summary| {
                let horizon = summary.horizon?;
                let distribution = distributions.next()?;
                Some(HorizonReport {
                    horizon,
                    label: config
                        .tables
                        .label(horizon)
                        .map(str::to_string)
                        .unwrap_or_else(|| horizon.default_label()),
                    summary,
                    distribution,
                })
            })
            .collect();

        let transitions = horizons
            .windows(2)
            .map(|pair| tier_transitions(&results, pair[0].horizon, pair[1].horizon))
            .filter(|t| t.patients_compared > 0)
            .collect();

        let rejected = outcome
            .rejected
            .into_iter()
            .map(|r| RejectedRow {
                record: r.index + 1,
                patient_id: r.patient_id,
                horizon_days: r.horizon_days,
                reason: r.error.to_string(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            policy: config.policy.clone(),
            horizons,
            transitions,
            patients: results,
            rejected,
        }
    }

    pub fn horizon(&self, horizon: Horizon) -> Option<&HorizonReport> {
        self.horizons.iter().find(|h| h.horizon == horizon)
    }

    /// Patients ranked by net benefit, best first
    pub fn top_patients(&self, limit: usize) -> Vec<&ProjectionResult> {
        let mut ranked: Vec<&ProjectionResult> = self.patients.iter().collect();
        ranked.sort_by(|a, b| b.net_benefit.total_cmp(&a.net_benefit));
        ranked.truncate(limit);
        ranked
    }
}
