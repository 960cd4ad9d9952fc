//! Deployment descriptor loading

mod loader;

pub use loader::DeploymentConfig;
