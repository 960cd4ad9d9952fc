//! Type definitions for the deployment descriptor and plugin configuration

mod descriptor_types;
mod plugin_config;

pub use descriptor_types::*;
pub use plugin_config::*;
