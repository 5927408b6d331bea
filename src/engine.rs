//! Batch projection over a scored population.
//!
//! Patients are independent, so the batch is split into chunks and each
//! chunk is projected on rayon's pool. Results are collected in input
//! order whatever the thread count.

use crate::config::EngineConfig;
use crate::errors::{Error, Result, ResultExt};
use crate::risk::{PatientId, ProjectionResult, RoiCalculator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One risk score for one patient and horizon, as read from input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPatient {
    pub patient_id: PatientId,
    pub horizon_days: u32,
    pub risk_score: f64,
    pub annual_cost: f64,
}

impl ScoredPatient {
    pub fn new(
        patient_id: impl Into<PatientId>,
        horizon_days: u32,
        risk_score: f64,
        annual_cost: f64,
    ) -> Self {
        Self {
            patient_id: patient_id.into(),
            horizon_days,
            risk_score,
            annual_cost,
        }
    }
}

/// A record that could not be projected
#[derive(Debug)]
pub struct RejectedRecord {
    /// Position in the input batch
    pub index: usize,
    pub patient_id: PatientId,
    pub horizon_days: u32,
    pub error: Error,
}

/// Outcome of a lenient batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<ProjectionResult>,
    pub rejected: Vec<RejectedRecord>,
}

pub struct ProjectionEngine<'a> {
    config: &'a EngineConfig,
    calculator: RoiCalculator<'a>,
}

impl<'a> ProjectionEngine<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            config,
            calculator: RoiCalculator::new(config),
        }
    }

    pub fn calculator(&self) -> &RoiCalculator<'a> {
        &self.calculator
    }

    pub fn project_one(&self, patient: &ScoredPatient) -> Result<ProjectionResult> {
        self.calculator.calculate(
            patient.risk_score,
            patient.annual_cost,
            patient.horizon_days,
            &patient.patient_id,
        )
    }

    /// Project every record, keeping one outcome per input in input order
    pub fn project_all(&self, patients: &[ScoredPatient]) -> Vec<Result<ProjectionResult>> {
        let parallel = &self.config.parallel;
        if !parallel.enabled {
            log::debug!("Projecting {} records sequentially", patients.len());
            return patients.iter().map(|p| self.project_one(p)).collect();
        }

        let batch_size = parallel.effective_batch_size();
        let mut results = Vec::with_capacity(patients.len());

        for (index, batch) in patients.chunks(batch_size).enumerate() {
            log::debug!(
                "Projecting chunk {} ({} records)",
                index + 1,
                batch.len()
            );
            let batch_results: Vec<_> = batch.par_iter().map(|p| self.project_one(p)).collect();
            results.extend(batch_results);
        }

        results
    }

    /// Project a batch, failing on the first invalid record in input order.
    pub fn project_batch(&self, patients: &[ScoredPatient]) -> Result<Vec<ProjectionResult>> {
        self.project_all(patients)
            .into_iter()
            .zip(patients)
            .map(|(result, patient)| {
                result.context(format!(
                    "patient {} ({}-day)",
                    patient.patient_id, patient.horizon_days
                ))
            })
            .collect()
    }

    /// Project a batch, setting aside invalid records instead of failing.
    pub fn project_lenient(&self, patients: &[ScoredPatient]) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (index, (result, patient)) in self.project_all(patients).into_iter().zip(patients).enumerate() {
            match result {
                Ok(projection) => outcome.results.push(projection),
                Err(error) => {
                    log::warn!(
                        "Skipping record {} (patient {}): {}",
                        index + 1,
                        patient.patient_id,
                        error
                    );
                    outcome.rejected.push(RejectedRecord {
                        index,
                        patient_id: patient.patient_id.clone(),
                        horizon_days: patient.horizon_days,
                        error,
                    });
                }
            }
        }

        outcome
    }
}
