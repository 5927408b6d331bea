use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{CareRoiConfig, EngineConfig};
use super::validation::validate_config_result;
use crate::errors::{Error, Result, ResultExt};

/// File name searched for by [`load_config`]
pub const CONFIG_FILE_NAME: &str = ".careroi.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse TOML contents and validate them into an engine config
pub fn parse_and_validate_config(contents: &str) -> Result<EngineConfig> {
    let config = toml::from_str::<CareRoiConfig>(contents)?;
    validate_config_result(&config)
}

/// Load and validate a specific config file
pub fn load_config_from_path(path: &Path) -> Result<EngineConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::file_system("Failed to read config file", path, e))?;
    let config = parse_and_validate_config(&contents)
        .context(format!("Invalid config file {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Directory ancestors starting at `start`, at most `max_depth` of them
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Nearest `.careroi.toml` at or above `start`
pub fn find_config_file(start: PathBuf) -> Option<PathBuf> {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the nearest config file above the working directory, falling back
/// to defaults when there is none.
///
/// A file that exists but cannot be parsed or validated is an error.
pub fn load_config() -> Result<EngineConfig> {
    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return Ok(EngineConfig::default());
        }
    };
    load_config_from(current)
}

/// [`load_config`] starting from an explicit directory
pub fn load_config_from(start: PathBuf) -> Result<EngineConfig> {
    match find_config_file(start) {
        Some(path) => load_config_from_path(&path),
        None => {
            log::debug!(
                "No {} found after checking {} directories. Using default config.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            Ok(EngineConfig::default())
        }
    }
}

/// Explicit path if given, otherwise the ancestor search
pub fn resolve_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    }
}
