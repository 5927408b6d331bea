//! Seam for the upstream risk model.
//!
//! The engine never trains or runs a model itself; anything that can turn a
//! patient's features into a probability per horizon plugs in here.

use crate::engine::ScoredPatient;
use crate::risk::{Horizon, PatientId};
use rayon::prelude::*;

/// Produces a risk probability in [0, 1] for a patient and horizon
pub trait RiskClassifier: Sync {
    type Features: Sync;

    fn predict(&self, features: &Self::Features, horizon: Horizon) -> f64;
}

/// Unscored patient as handed to a classifier
#[derive(Debug, Clone, PartialEq)]
pub struct PatientRecord<F> {
    pub patient_id: PatientId,
    pub annual_cost: f64,
    pub features: F,
}

/// Score every patient for every horizon.
///
/// Rows come out patient-major in input order, horizons in the order given.
/// Scores are passed through unchecked; out-of-range values are rejected
/// later by projection.
pub fn score_population<C: RiskClassifier>(
    classifier: &C,
    records: &[PatientRecord<C::Features>],
    horizons: &[Horizon],
) -> Vec<ScoredPatient> {
    records
        .par_iter()
        .flat_map_iter(|record| {
            horizons.iter().map(move |&horizon| ScoredPatient {
                patient_id: record.patient_id.clone(),
                horizon_days: horizon.days(),
                risk_score: classifier.predict(&record.features, horizon),
                annual_cost: record.annual_cost,
            })
        })
        .collect()
}
