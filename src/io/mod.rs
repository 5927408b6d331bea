pub mod input;
pub mod output;
pub mod writers;

pub use input::{open_input, read_scored_patients, read_scored_patients_lenient};
pub use output::{create_writer, open_sink, OutputFormat, OutputWriter};

use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}
