use super::{group_by_horizon, share};
use crate::risk::{Horizon, PatientId, ProjectionResult, RiskTier, TIER_COUNT};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier: RiskTier,
    pub label: String,
    pub count: usize,
    /// Share of the horizon's population, 0-100
    pub percent: f64,
}

/// How a horizon's population spreads over the five tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub horizon: Horizon,
    pub total: usize,
    pub tiers: Vec<TierCount>,
}

impl RiskDistribution {
    pub fn count(&self, tier: RiskTier) -> usize {
        self.tiers[tier.index()].count
    }
}

/// Tier counts per horizon, including empty tiers
pub fn risk_distribution(results: &[ProjectionResult]) -> Vec<RiskDistribution> {
    group_by_horizon(results)
        .into_iter()
        .map(|(horizon, group)| {
            let mut counts = [0usize; TIER_COUNT];
            for result in &group {
                counts[result.tier.index()] += 1;
            }
            RiskDistribution {
                horizon,
                total: group.len(),
                tiers: RiskTier::ALL
                    .iter()
                    .map(|&tier| TierCount {
                        tier,
                        label: tier.label().to_string(),
                        count: counts[tier.index()],
                        percent: share(counts[tier.index()], group.len()) * 100.0,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Tier movement of the same patients between two horizons.
///
/// `matrix[from][to]` counts patients in tier `from + 1` at the earlier
/// horizon and tier `to + 1` at the later one. Patients missing from either
/// horizon are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTransitions {
    pub from: Horizon,
    pub to: Horizon,
    pub matrix: [[usize; TIER_COUNT]; TIER_COUNT],
    pub patients_compared: usize,
    pub escalated: usize,
    pub unchanged: usize,
    pub de_escalated: usize,
}

impl TierTransitions {
    pub fn count(&self, from: RiskTier, to: RiskTier) -> usize {
        self.matrix[from.index()][to.index()]
    }

    /// Non-zero cells as `(from, to, count)`, diagonal included
    pub fn moves(&self) -> Vec<(RiskTier, RiskTier, usize)> {
        RiskTier::ALL
            .iter()
            .flat_map(|&from| RiskTier::ALL.iter().map(move |&to| (from, to)))
            .map(|(from, to)| (from, to, self.count(from, to)))
            .filter(|&(_, _, count)| count > 0)
            .collect()
    }
}

pub fn tier_transitions(results: &[ProjectionResult], from: Horizon, to: Horizon) -> TierTransitions {
    let earlier: HashMap<&PatientId, RiskTier> = results
        .iter()
        .filter(|r| r.horizon_days == from)
        .map(|r| (&r.patient_id, r.tier))
        .collect();

    let mut transitions = TierTransitions {
        from,
        to,
        matrix: [[0; TIER_COUNT]; TIER_COUNT],
        patients_compared: 0,
        escalated: 0,
        unchanged: 0,
        de_escalated: 0,
    };

    for later in results.iter().filter(|r| r.horizon_days == to) {
        let Some(&start) = earlier.get(&later.patient_id) else {
            continue;
        };
        transitions.matrix[start.index()][later.tier.index()] += 1;
        transitions.patients_compared += 1;
        match later.tier.cmp(&start) {
            std::cmp::Ordering::Greater => transitions.escalated += 1,
            std::cmp::Ordering::Equal => transitions.unchanged += 1,
            std::cmp::Ordering::Less => transitions.de_escalated += 1,
        }
    }

    log::debug!(
        "{} -> {}: {} patients compared, {} escalated",
        from,
        to,
        transitions.patients_compared,
        transitions.escalated
    );
    transitions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::risk::RoiCalculator;

    fn project(rows: &[(u64, f64, u32)]) -> Vec<ProjectionResult> {
        let config = EngineConfig::default();
        let calculator = RoiCalculator::new(&config);
        rows.iter()
            .map(|&(id, score, days)| {
                calculator
                    .calculate(score, 12_000.0, days, &PatientId::Numeric(id))
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_distribution_counts_every_tier() {
        let results = project(&[(1, 0.05, 30), (2, 0.05, 30), (3, 0.3, 30), (4, 0.9, 30)]);
        let distribution = risk_distribution(&results);

        assert_eq!(distribution.len(), 1);
        let d = &distribution[0];
        assert_eq!(d.total, 4);
        assert_eq!(d.tiers.len(), 5);
        assert_eq!(d.count(RiskTier::Normal), 2);
        assert_eq!(d.count(RiskTier::Low), 0);
        assert_eq!(d.tiers[0].percent, 50.0);
        assert_eq!(d.tiers.iter().map(|t| t.count).sum::<usize>(), 4);
    }

    #[test]
    fn test_transitions_between_horizons() {
        let results = project(&[
            (1, 0.05, 30),
            (1, 0.30, 60),
            (2, 0.60, 30),
            (2, 0.60, 60),
            (3, 0.80, 30),
            (3, 0.20, 60),
            (4, 0.50, 30),
        ]);

        let transitions = tier_transitions(&results, Horizon::THIRTY_DAYS, Horizon::SIXTY_DAYS);
        assert_eq!(transitions.patients_compared, 3);
        assert_eq!(transitions.escalated, 1);
        assert_eq!(transitions.unchanged, 1);
        assert_eq!(transitions.de_escalated, 1);
        assert_eq!(transitions.count(RiskTier::Normal, RiskTier::Moderate), 1);
        assert_eq!(transitions.count(RiskTier::High, RiskTier::High), 1);
        assert_eq!(transitions.count(RiskTier::Critical, RiskTier::Low), 1);
        assert_eq!(transitions.moves().len(), 3);
    }
}
