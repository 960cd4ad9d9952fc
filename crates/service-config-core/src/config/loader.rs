//! Deployment descriptor loading and parsing

use crate::error::{Error, Result};
use crate::types::{DeploymentDescriptor, PluginConfig};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

/// Descriptor file names to search for
const CONFIG_FILE_NAMES: &[&str] = &["serverless.yml", "serverless.yaml"];

/// Loaded deployment descriptor
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    /// The parsed descriptor
    pub descriptor: DeploymentDescriptor,

    /// Path to the descriptor file
    pub config_path: Utf8PathBuf,
}

impl DeploymentConfig {
    /// Load the descriptor from the specified path or search for it
    pub fn load(path: Option<&Utf8Path>) -> Result<Self> {
        let (config_path, content) = match path {
            Some(p) => (p.to_owned(), read_config(p)?),
            None => {
                let cwd = std::env::current_dir().map_err(Error::Io)?;
                let cwd = Utf8PathBuf::try_from(cwd).map_err(|_| {
                    Error::invalid_config("Current directory path is not valid UTF-8")
                })?;
                Self::find_config(&cwd)?
            }
        };

        debug!("Loading deployment descriptor from {}", config_path);
        let descriptor: DeploymentDescriptor = serde_yaml_ng::from_str(&content)?;

        Ok(Self {
            descriptor,
            config_path,
        })
    }

    /// Find a descriptor in `start` or any of its parent directories
    fn find_config(start: &Utf8Path) -> Result<(Utf8PathBuf, String)> {
        let mut current = start;

        loop {
            for name in CONFIG_FILE_NAMES {
                let path = current.join(name);
                if path.exists() {
                    let content = fs::read_to_string(&path)?;
                    return Ok((path, content));
                }
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        Err(Error::config_not_found(
            "serverless.yml (searched current and parent directories)",
        ))
    }

    /// Get the parsed descriptor
    pub fn inner(&self) -> &DeploymentDescriptor {
        &self.descriptor
    }

    /// Provider default stage
    pub fn stage(&self) -> &str {
        &self.descriptor.provider.stage
    }

    /// Provider region
    pub fn region(&self) -> Option<&str> {
        self.descriptor.provider.region.as_deref()
    }

    /// Plugin configuration with defaults applied
    pub fn plugin_config(&self) -> PluginConfig {
        self.descriptor.plugin_config()
    }
}

fn read_config(path: &Utf8Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::config_not_found(path.as_str())
        } else {
            Error::Io(e)
        }
    })
}
