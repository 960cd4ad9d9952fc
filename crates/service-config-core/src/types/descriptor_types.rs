//! Deployment descriptor types (the parts of serverless.yml we read)

use super::PluginConfig;
use serde::{Deserialize, Serialize};

const DEFAULT_STAGE: &str = "dev";

/// Root deployment descriptor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeploymentDescriptor {
    /// Service name
    #[serde(default)]
    pub service: Option<String>,

    /// Provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Custom section holding plugin configuration
    #[serde(default)]
    pub custom: CustomConfig,
}

/// Provider section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Default deployment stage
    #[serde(default = "default_stage")]
    pub stage: String,

    /// AWS region used for KMS
    #[serde(default)]
    pub region: Option<String>,
}

fn default_stage() -> String {
    DEFAULT_STAGE.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            stage: default_stage(),
            region: None,
        }
    }
}

/// `custom` section; unknown keys belong to other plugins and are ignored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomConfig {
    #[serde(default)]
    pub service_config_plugin: Option<PluginConfig>,
}

impl DeploymentDescriptor {
    /// Plugin configuration with defaults applied under any descriptor values
    pub fn plugin_config(&self) -> PluginConfig {
        self.custom
            .service_config_plugin
            .clone()
            .unwrap_or_default()
    }
}
