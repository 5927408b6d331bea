use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Default configuration, equivalent to the built-in defaults
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# careroi configuration

[roi]
# Per-patient ROI is capped at this percentage
cap_percent = 100.0
# "unbounded" keeps negative ROI, "zero" raises it to 0
floor = "unbounded"
# Also cap tier and program ROI (computed from uncapped sums)
cap_aggregate = false

[projection]
# Share of projected cost treated as preventable (informational)
addressable_fraction = 0.6

[parallel]
enabled = true
batch_size = 1000

# One entry per horizon. Costs and [min, max] success rates are listed for
# tiers 1 to 5 and must not decrease with tier or with horizon length.
[[horizons]]
days = 30
intervention_costs = [0.0, 150.0, 400.0, 700.0, 900.0]
success_rates = [[0.03, 0.08], [0.10, 0.20], [0.25, 0.40], [0.30, 0.50], [0.40, 0.60]]

[[horizons]]
days = 60
intervention_costs = [0.0, 250.0, 700.0, 1100.0, 1650.0]
success_rates = [[0.10, 0.25], [0.25, 0.40], [0.35, 0.55], [0.45, 0.65], [0.55, 0.75]]

[[horizons]]
days = 90
intervention_costs = [0.0, 350.0, 1050.0, 1550.0, 1900.0]
success_rates = [[0.20, 0.35], [0.35, 0.50], [0.45, 0.60], [0.60, 0.80], [0.70, 0.90]]
"#;

/// Write the template into `dir`, refusing to overwrite unless `force`
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
    log::info!("Wrote {}", config_path.display());
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}
