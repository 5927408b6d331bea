use anyhow::Result;
use careroi::cli::{init_logging, Cli, Commands};
use careroi::commands::{PatientConfig, ProjectConfig};
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Project {
            input,
            config,
            format,
            output,
            horizons,
            jobs,
            skip_invalid,
            top,
            verbosity: _,
        } => careroi::commands::project_scores(ProjectConfig {
            input,
            config,
            format,
            output,
            horizons,
            jobs,
            skip_invalid,
            top,
        }),
        Commands::Patient {
            id,
            annual_cost,
            scores,
            config,
            format,
            verbosity: _,
        } => careroi::commands::project_single_patient(PatientConfig {
            id,
            annual_cost,
            scores,
            config,
            format,
        }),
        Commands::Init { force } => careroi::commands::init_config(force),
        Commands::Validate {
            config,
            verbosity: _,
        } => careroi::commands::validate_config_file(config.as_deref()),
    }
}
