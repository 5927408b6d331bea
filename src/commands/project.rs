use crate::cli::{configure_thread_pool, resolve_jobs};
use crate::config::resolve_config;
use crate::engine::{BatchOutcome, ProjectionEngine, ScoredPatient};
use crate::io::writers::TerminalWriter;
use crate::io::{
    create_writer, open_input, open_sink, read_scored_patients, read_scored_patients_lenient,
    OutputFormat, OutputWriter,
};
use crate::report::ProjectionReport;
use crate::risk::Horizon;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub horizons: Option<Vec<Horizon>>,
    pub jobs: usize,
    pub skip_invalid: bool,
    pub top: usize,
}

pub fn project_scores(cfg: ProjectConfig) -> Result<()> {
    let engine_config = resolve_config(cfg.config.as_deref())?;
    configure_thread_pool(resolve_jobs(cfg.jobs, &engine_config.parallel));

    let patients = read_input(&cfg)?;
    let patients = filter_horizons(patients, cfg.horizons.as_deref());
    log::info!(
        "Projecting {} records from {}",
        patients.len(),
        cfg.input.display()
    );

    let engine = ProjectionEngine::new(&engine_config);
    let outcome = if cfg.skip_invalid {
        engine.project_lenient(&patients)
    } else {
        BatchOutcome {
            results: engine.project_batch(&patients)?,
            rejected: Vec::new(),
        }
    };
    log::info!(
        "Projected {} records, {} rejected",
        outcome.results.len(),
        outcome.rejected.len()
    );

    let report = ProjectionReport::build(&engine_config, outcome);
    let mut writer: Box<dyn OutputWriter> = match cfg.format {
        OutputFormat::Terminal => Box::new(
            TerminalWriter::new(open_sink(cfg.output.as_deref())?).with_top_patients(cfg.top),
        ),
        format => create_writer(format, cfg.output.as_deref())?,
    };
    writer.write_report(&report)?;

    if let Some(path) = &cfg.output {
        log::info!("Report written to {}", path.display());
    }
    Ok(())
}

fn read_input(cfg: &ProjectConfig) -> Result<Vec<ScoredPatient>> {
    let file = open_input(&cfg.input)?;
    if cfg.skip_invalid {
        let (patients, malformed) = read_scored_patients_lenient(file);
        if malformed > 0 {
            log::warn!("Skipped {} malformed rows in {}", malformed, cfg.input.display());
        }
        Ok(patients)
    } else {
        Ok(read_scored_patients(file)?)
    }
}

/// Keep only rows for the requested horizons; `None` keeps everything
fn filter_horizons(patients: Vec<ScoredPatient>, horizons: Option<&[Horizon]>) -> Vec<ScoredPatient> {
    match horizons {
        None => patients,
        Some(horizons) => patients
            .into_iter()
            .filter(|p| horizons.iter().any(|h| h.days() == p.horizon_days))
            .collect(),
    }
}
