//! # service-config-core
//!
//! Core library for service-config providing:
//! - Deployment descriptor parsing (serverless.yml)
//! - Plugin configuration with defaults and overrides
//! - Consul/Vault base URL construction

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

pub use config::DeploymentConfig;
pub use error::{Error, Result};
pub use paths::build_url;
pub use types::{DeploymentDescriptor, KmsKeyId, PluginConfig, ProviderConfig};
