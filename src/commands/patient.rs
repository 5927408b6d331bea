use crate::config::resolve_config;
use crate::io::{create_writer, OutputFormat};
use crate::risk::{Horizon, PatientId, RoiCalculator};
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PatientConfig {
    pub id: String,
    pub annual_cost: f64,
    pub scores: Vec<(Horizon, f64)>,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

pub fn project_single_patient(cfg: PatientConfig) -> Result<()> {
    let engine_config = resolve_config(cfg.config.as_deref())?;
    let patient_id = PatientId::parse(&cfg.id);

    let projection = RoiCalculator::new(&engine_config).project_patient(
        &patient_id,
        cfg.annual_cost,
        &cfg.scores,
    )?;
    log::info!(
        "Projected patient {} over {} horizons",
        patient_id,
        projection.projections.len()
    );

    create_writer(cfg.format, None)?.write_patient(&projection)
}
