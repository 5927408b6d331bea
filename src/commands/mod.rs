//! CLI command implementations.
//!
//! - **project**: project ROI for a CSV of scored patients
//! - **patient**: multi-horizon projection for a single patient
//! - **init**: write a default `.careroi.toml`
//! - **validate**: check a configuration file and list every issue

pub mod init;
pub mod patient;
pub mod project;
pub mod validate;

pub use init::init_config;
pub use patient::{project_single_patient, PatientConfig};
pub use project::{project_scores, ProjectConfig};
pub use validate::validate_config_file;
