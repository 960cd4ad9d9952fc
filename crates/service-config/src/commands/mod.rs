//! CLI command implementations

pub mod parse;
pub mod resolve;
pub mod urls;

use anyhow::{Context, Result};
use service_config_core::DeploymentConfig;

use crate::cli::GlobalArgs;

/// Load the deployment descriptor named by `-c`, or the nearest one upwards
pub(crate) fn load_descriptor(global: &GlobalArgs) -> Result<DeploymentConfig> {
    DeploymentConfig::load(global.config.as_deref()).context("Failed to load deployment descriptor")
}
