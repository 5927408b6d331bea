#![allow(dead_code)]

use careroi::config::{default_tables, EngineConfig, EngineTables, RateRange};
use careroi::ScoredPatient;

/// Default tables with every success-rate range pinned to `rate`
pub fn fixed_rate_config(rate: f64) -> EngineConfig {
    let tables = default_tables().into_iter().map(|mut table| {
        table.success_rates = [RateRange::new(rate, rate); 5];
        table
    });
    EngineConfig {
        tables: EngineTables::from_tables(tables),
        ..EngineConfig::default()
    }
}

/// Deterministic synthetic population over the standard horizons
pub fn synthetic_population(patients: u64) -> Vec<ScoredPatient> {
    (0..patients)
        .flat_map(|id| {
            let base = (id * 37 % 101) as f64 / 100.0;
            let annual = 1_500.0 + (id * 7_919 % 120_000) as f64;
            [(30, 0.0), (60, 0.05), (90, 0.1)]
                .into_iter()
                .map(move |(days, drift)| {
                    ScoredPatient::new(id, days, (base + drift).min(1.0), annual)
                })
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
