//! Configuration validation with error accumulation.
//!
//! Every check runs and every problem is collected with stillwater's
//! `Validation`, so a broken config file is reported in one pass instead of
//! one error per run.
//!
//! # Example
//!
//! ```rust
//! use careroi::config::validation::validate_config;
//! use careroi::config::CareRoiConfig;
//!
//! let validation = validate_config(&CareRoiConfig::default());
//! assert!(validation.is_success());
//! ```

use std::collections::BTreeSet;

use stillwater::{NonEmptyVec, Validation};

use super::core::{CareRoiConfig, EngineConfig, ProjectionSettings};
use super::parallel::ParallelConfig;
use super::tables::{default_horizon_tables, EngineTables, HorizonTable, HorizonTableConfig, RateRange};
use crate::errors::{ConfigIssue, Error, Result};
use crate::risk::{Horizon, RiskTier, RoiFloor, RoiPolicy, MAX_ROI_CAP, TIER_COUNT};

/// Validation result carrying every issue found
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ConfigIssue>>;

fn from_issues<T>(value: T, issues: Vec<ConfigIssue>) -> ConfigValidation<T> {
    match NonEmptyVec::from_vec(issues) {
        None => Validation::Success(value),
        Some(errors) => Validation::Failure(errors),
    }
}

/// Validate a file config and build the engine config, accumulating ALL
/// issues.
pub fn validate_config(config: &CareRoiConfig) -> ConfigValidation<EngineConfig> {
    let policy = config.roi.clone().unwrap_or_default();
    let projection = config.projection.clone().unwrap_or_default();
    let parallel = config.parallel.clone().unwrap_or_default();
    let horizons = config
        .horizons
        .clone()
        .unwrap_or_else(default_horizon_tables);

    let mut issues = policy_issues(&policy);
    issues.extend(projection_issues(&projection));
    issues.extend(parallel_issues(&parallel));

    match validate_horizons(&horizons) {
        Validation::Success(tables) => from_issues(
            EngineConfig {
                policy,
                projection,
                parallel,
                tables,
            },
            issues,
        ),
        Validation::Failure(horizon_errors) => match NonEmptyVec::from_vec(issues) {
            Some(mut errors) => {
                for issue in horizon_errors.into_vec() {
                    errors.push(issue);
                }
                Validation::Failure(errors)
            }
            None => Validation::Failure(horizon_errors),
        },
    }
}

/// [`validate_config`] as a `Result`
pub fn validate_config_result(config: &CareRoiConfig) -> Result<EngineConfig> {
    match validate_config(config) {
        Validation::Success(engine) => Ok(engine),
        Validation::Failure(errors) => Err(Error::InvalidConfig(errors.into_vec())),
    }
}

fn policy_issues(policy: &RoiPolicy) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if !policy.cap_percent.is_finite() {
        issues.push(ConfigIssue::new(
            "roi.cap_percent",
            format!("must be a finite percentage, got {}", policy.cap_percent),
        ));
    } else if policy.cap_percent > MAX_ROI_CAP {
        issues.push(ConfigIssue::new(
            "roi.cap_percent",
            format!(
                "cap {} exceeds the {MAX_ROI_CAP}% ceiling",
                policy.cap_percent
            ),
        ));
    } else if policy.floor == RoiFloor::Zero && policy.cap_percent < 0.0 {
        issues.push(ConfigIssue::new(
            "roi.cap_percent",
            format!("cap {} is below the zero floor", policy.cap_percent),
        ));
    }
    issues
}

fn projection_issues(projection: &ProjectionSettings) -> Vec<ConfigIssue> {
    let fraction = projection.addressable_fraction;
    if (0.0..=1.0).contains(&fraction) {
        Vec::new()
    } else {
        vec![ConfigIssue::new(
            "projection.addressable_fraction",
            format!("must be within [0, 1], got {fraction}"),
        )]
    }
}

fn parallel_issues(parallel: &ParallelConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    if parallel.max_concurrency == Some(0) {
        issues.push(ConfigIssue::new(
            "parallel.max_concurrency",
            "must be at least 1",
        ));
    }
    if parallel.batch_size == Some(0) {
        issues.push(ConfigIssue::new("parallel.batch_size", "must be at least 1"));
    }
    issues
}

/// Validate every horizon table, then the relationships between them.
pub fn validate_horizons(configs: &[HorizonTableConfig]) -> ConfigValidation<EngineTables> {
    if configs.is_empty() {
        return Validation::Failure(NonEmptyVec::new(
            ConfigIssue::new("horizons", "at least one horizon must be configured"),
            Vec::new(),
        ));
    }

    let mut issues = Vec::new();
    let mut tables = Vec::new();
    for (index, config) in configs.iter().enumerate() {
        match validate_horizon_table(index, config) {
            Validation::Success(table) => tables.push(table),
            Validation::Failure(errors) => issues.extend(errors.into_vec()),
        }
    }

    let mut seen = BTreeSet::new();
    for config in configs {
        if config.days > 0 && !seen.insert(config.days) {
            issues.push(ConfigIssue::new(
                "horizons",
                format!("horizon {} days is configured more than once", config.days),
            ));
        }
    }

    tables.sort_by_key(|t| t.horizon);
    tables.dedup_by_key(|t| t.horizon);
    issues.extend(cross_horizon_issues(&tables));

    from_issues(EngineTables::from_tables(tables), issues)
}

fn validate_horizon_table(index: usize, config: &HorizonTableConfig) -> ConfigValidation<HorizonTable> {
    let field = |name: &str| format!("horizons[{index}].{name}");
    let mut issues = Vec::new();

    let horizon = match Horizon::new(config.days) {
        Ok(horizon) => Some(horizon),
        Err(_) => {
            issues.push(ConfigIssue::new(field("days"), "must be a positive number of days"));
            None
        }
    };

    let costs = cost_row(&config.intervention_costs, &field("intervention_costs"), &mut issues);
    let rates = rate_row(&config.success_rates, &field("success_rates"), &mut issues);

    match (horizon, costs, rates) {
        (Some(horizon), Some(intervention_costs), Some(success_rates)) => from_issues(
            HorizonTable {
                horizon,
                label: config
                    .label
                    .clone()
                    .unwrap_or_else(|| horizon.default_label()),
                intervention_costs,
                success_rates,
            },
            issues,
        ),
        _ => Validation::Failure(NonEmptyVec::from_vec(issues).unwrap_or_else(|| {
            NonEmptyVec::singleton(ConfigIssue::new(field("days"), "incomplete horizon table"))
        })),
    }
}

fn cost_row(
    values: &[f64],
    field: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<[f64; TIER_COUNT]> {
    let row: [f64; TIER_COUNT] = match values.try_into() {
        Ok(row) => row,
        Err(_) => {
            issues.push(ConfigIssue::new(
                field,
                format!("expected {TIER_COUNT} values, got {}", values.len()),
            ));
            return None;
        }
    };

    let before = issues.len();
    for (tier, cost) in RiskTier::ALL.iter().zip(row) {
        if !cost.is_finite() || cost < 0.0 {
            issues.push(ConfigIssue::new(
                field,
                format!("{} cost must be finite and non-negative, got {cost}", tier.short_label()),
            ));
        }
    }
    if row[0] != 0.0 {
        issues.push(ConfigIssue::new(
            field,
            format!("tier 1 is monitoring only and must cost 0, got {}", row[0]),
        ));
    }
    for pair in RiskTier::ALL.windows(2) {
        let (lower, higher) = (pair[0], pair[1]);
        if row[higher.index()] < row[lower.index()] {
            issues.push(ConfigIssue::new(
                field,
                format!(
                    "costs must not decrease with tier ({} {} > {} {})",
                    lower.short_label(),
                    row[lower.index()],
                    higher.short_label(),
                    row[higher.index()]
                ),
            ));
        }
    }

    (issues.len() == before).then_some(row)
}

fn rate_row(
    values: &[[f64; 2]],
    field: &str,
    issues: &mut Vec<ConfigIssue>,
) -> Option<[RateRange; TIER_COUNT]> {
    if values.len() != TIER_COUNT {
        issues.push(ConfigIssue::new(
            field,
            format!("expected {TIER_COUNT} ranges, got {}", values.len()),
        ));
        return None;
    }

    let before = issues.len();
    let mut row = [RateRange::new(0.0, 0.0); TIER_COUNT];
    for (tier, &[min, max]) in RiskTier::ALL.iter().zip(values) {
        let in_unit = |v: f64| (0.0..=1.0).contains(&v);
        if !in_unit(min) || !in_unit(max) || min > max {
            issues.push(ConfigIssue::new(
                field,
                format!(
                    "{} range must satisfy 0 <= min <= max <= 1, got [{min}, {max}]",
                    tier.short_label()
                ),
            ));
        }
        row[tier.index()] = RateRange::new(min, max);
    }
    for pair in RiskTier::ALL.windows(2) {
        let (lower, higher) = (row[pair[0].index()], row[pair[1].index()]);
        if higher.min < lower.min || higher.max < lower.max {
            issues.push(ConfigIssue::new(
                field,
                format!(
                    "ranges must not decrease with tier ({} {} > {} {})",
                    pair[0].short_label(),
                    lower.percent_label(),
                    pair[1].short_label(),
                    higher.percent_label()
                ),
            ));
        }
    }

    (issues.len() == before).then_some(row)
}

/// Longer windows must not be cheaper or less effective for the same tier.
fn cross_horizon_issues(tables: &[HorizonTable]) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();
    for pair in tables.windows(2) {
        let (shorter, longer) = (&pair[0], &pair[1]);
        for tier in RiskTier::ALL {
            let i = tier.index();
            if longer.intervention_costs[i] < shorter.intervention_costs[i] {
                issues.push(ConfigIssue::new(
                    "horizons",
                    format!(
                        "{} cost at {} ({}) is below {} ({})",
                        tier.short_label(),
                        longer.horizon,
                        longer.intervention_costs[i],
                        shorter.horizon,
                        shorter.intervention_costs[i]
                    ),
                ));
            }
            let (short_range, long_range) = (shorter.success_rates[i], longer.success_rates[i]);
            if long_range.min < short_range.min || long_range.max < short_range.max {
                issues.push(ConfigIssue::new(
                    "horizons",
                    format!(
                        "{} success range at {} ({}) is below {} ({})",
                        tier.short_label(),
                        longer.horizon,
                        long_range.percent_label(),
                        shorter.horizon,
                        short_range.percent_label()
                    ),
                ));
            }
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn issues_of<T: std::fmt::Debug>(validation: ConfigValidation<T>) -> Vec<ConfigIssue> {
        match validation {
            Validation::Success(value) => panic!("expected failure, got {value:?}"),
            Validation::Failure(errors) => errors.into_vec(),
        }
    }

    fn horizon(days: u32, costs: [f64; 5], rates: [[f64; 2]; 5]) -> HorizonTableConfig {
        HorizonTableConfig {
            days,
            label: None,
            intervention_costs: costs.to_vec(),
            success_rates: rates.to_vec(),
        }
    }

    const RATES: [[f64; 2]; 5] = [[0.0, 0.1], [0.1, 0.2], [0.2, 0.3], [0.3, 0.4], [0.4, 0.5]];

    #[test]
    fn test_default_config_is_valid() {
        let engine = validate_config_result(&CareRoiConfig::default()).unwrap();
        assert_eq!(engine, EngineConfig::default());
    }

    #[test]
    fn test_custom_horizon_gets_default_label() {
        let config = CareRoiConfig {
            horizons: Some(vec![horizon(45, [0.0, 1.0, 2.0, 3.0, 4.0], RATES)]),
            ..Default::default()
        };
        let engine = validate_config_result(&config).unwrap();
        let days = Horizon::new(45).unwrap();
        assert_eq!(engine.tables.horizons(), vec![days]);
        assert_eq!(engine.tables.label(days), Some("0-45 days"));
    }

    #[test]
    fn test_nonzero_tier_one_cost_rejected() {
        let issues = issues_of(validate_horizons(&[horizon(30, [10.0, 20.0, 30.0, 40.0, 50.0], RATES)]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "horizons[0].intervention_costs");
        assert!(issues[0].message.contains("tier 1"));
    }

    #[test]
    fn test_costs_decreasing_in_tier_rejected() {
        let issues = issues_of(validate_horizons(&[horizon(30, [0.0, 500.0, 400.0, 700.0, 900.0], RATES)]));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("must not decrease with tier"));
    }

    #[test]
    fn test_costs_decreasing_in_horizon_rejected() {
        let issues = issues_of(validate_horizons(&[
            horizon(30, [0.0, 150.0, 400.0, 700.0, 900.0], RATES),
            horizon(60, [0.0, 150.0, 400.0, 700.0, 800.0], RATES),
        ]));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("T5 cost at 60-day"));
    }

    #[test]
    fn test_bad_rate_ranges_rejected() {
        let rates = [[0.0, 0.1], [0.15, 0.12], [0.2, 0.3], [0.3, 1.4], [0.4, 0.5]];
        let issues = issues_of(validate_horizons(&[horizon(30, [0.0, 1.0, 2.0, 3.0, 4.0], rates)]));
        // T2 inverted, T4 above 1, T5 max below T4 max
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| i.field == "horizons[0].success_rates"));
    }

    #[test]
    fn test_zero_and_duplicate_horizons_rejected() {
        let costs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let issues = issues_of(validate_horizons(&[
            horizon(0, costs, RATES),
            horizon(30, costs, RATES),
            horizon(30, costs, RATES),
        ]));
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["horizons[0].days", "horizons"]);
        assert!(issues[1].message.contains("more than once"));
    }

    #[test]
    fn test_wrong_row_length_rejected() {
        let config = HorizonTableConfig {
            days: 30,
            label: None,
            intervention_costs: vec![0.0, 1.0],
            success_rates: RATES[..4].to_vec(),
        };
        let issues = issues_of(validate_horizons(&[config]));
        assert_eq!(issues.len(), 2);
        assert!(issues[0].message.contains("expected 5 values, got 2"));
        assert!(issues[1].message.contains("expected 5 ranges, got 4"));
    }

    #[test]
    fn test_empty_horizon_list_rejected() {
        let issues = issues_of(validate_horizons(&[]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "horizons");
    }

    #[test]
    fn test_cap_above_ceiling_rejected() {
        let config = CareRoiConfig {
            roi: Some(RoiPolicy {
                cap_percent: 500.0,
                ..RoiPolicy::default()
            }),
            ..Default::default()
        };
        let issues = issues_of(validate_config(&config));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "roi.cap_percent");
        assert!(issues[0].message.contains("exceeds the 100% ceiling"));
    }

    #[test]
    fn test_stricter_cap_accepted() {
        let config = CareRoiConfig {
            roi: Some(RoiPolicy {
                cap_percent: 50.0,
                ..RoiPolicy::default()
            }),
            ..Default::default()
        };
        let engine = validate_config_result(&config).unwrap();
        assert_eq!(engine.policy.cap_percent, 50.0);
    }

    #[test]
    fn test_all_sections_accumulate() {
        let config = CareRoiConfig {
            roi: Some(RoiPolicy {
                cap_percent: f64::NAN,
                ..RoiPolicy::default()
            }),
            projection: Some(ProjectionSettings {
                addressable_fraction: 1.5,
            }),
            parallel: Some(ParallelConfig {
                batch_size: Some(0),
                ..ParallelConfig::default()
            }),
            horizons: Some(vec![horizon(30, [5.0, 1.0, 2.0, 3.0, 4.0], RATES)]),
        };

        let issues = issues_of(validate_config(&config));
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "roi.cap_percent",
                "projection.addressable_fraction",
                "parallel.batch_size",
                "horizons[0].intervention_costs",
                "horizons[0].intervention_costs",
            ]
        );

        match validate_config_result(&config) {
            Err(Error::InvalidConfig(reported)) => assert_eq!(reported.len(), 5),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
