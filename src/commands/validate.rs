use crate::config::{find_config_file, validate_config, CareRoiConfig, EngineConfig};
use crate::errors::Error;
use anyhow::{Context, Result};
use colored::*;
use std::path::{Path, PathBuf};
use stillwater::Validation;

/// Outcome of checking one config source
#[derive(Debug)]
pub enum ValidationReport {
    /// No file found; built-in defaults apply
    Defaults,
    Valid { path: PathBuf, config: EngineConfig },
    Invalid { path: PathBuf, issues: Vec<String> },
}

/// Check the explicit file, or the nearest `.careroi.toml` above the working
/// directory.
pub fn check_config(explicit: Option<&Path>) -> Result<ValidationReport> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match find_config_file(std::env::current_dir()?) {
            Some(path) => path,
            None => return Ok(ValidationReport::Defaults),
        },
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let raw: CareRoiConfig = match toml::from_str(&contents) {
        Ok(raw) => raw,
        Err(e) => {
            return Ok(ValidationReport::Invalid {
                path,
                issues: vec![Error::from(e).to_string()],
            })
        }
    };

    Ok(match validate_config(&raw) {
        Validation::Success(config) => ValidationReport::Valid { path, config },
        Validation::Failure(errors) => ValidationReport::Invalid {
            path,
            issues: errors.into_vec().iter().map(ToString::to_string).collect(),
        },
    })
}

pub fn validate_config_file(explicit: Option<&Path>) -> Result<()> {
    match check_config(explicit)? {
        ValidationReport::Defaults => {
            println!("No configuration file found; built-in defaults are valid.");
            Ok(())
        }
        ValidationReport::Valid { path, config } => {
            println!("{} {}", "✓".green(), path.display());
            let horizons: Vec<String> = config
                .tables
                .horizons()
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("  horizons: {}", horizons.join(", "));
            println!(
                "  roi: cap {:.1}%, floor {:?}, aggregate cap {}",
                config.policy.cap_percent,
                config.policy.floor,
                if config.policy.cap_aggregate { "on" } else { "off" }
            );
            Ok(())
        }
        ValidationReport::Invalid { path, issues } => {
            eprintln!("{} {}", "✗".red(), path.display());
            for issue in &issues {
                eprintln!("  - {issue}");
            }
            anyhow::bail!("{} configuration issue(s) found", issues.len())
        }
    }
}
