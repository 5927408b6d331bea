use crate::report::ProjectionReport;
use crate::risk::PatientProjection;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::writers::{CsvWriter, JsonWriter, TerminalWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
    Csv,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &ProjectionReport) -> anyhow::Result<()>;
    fn write_patient(&mut self, projection: &PatientProjection) -> anyhow::Result<()>;
}

/// Buffered file at `output`, or stdout
pub fn open_sink(output: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout()),
    })
}

/// Writer for `format`, targeting `output` or stdout
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    let sink = open_sink(output)?;

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Csv => Box::new(CsvWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}
