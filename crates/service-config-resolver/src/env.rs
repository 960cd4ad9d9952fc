//! Environment lookup used for backend tokens and local overrides

use std::collections::HashMap;

/// Consul token variable
pub const CONSUL_TOKEN: &str = "CONSUL_TOKEN";

/// Vault token variable
pub const VAULT_TOKEN: &str = "VAULT_TOKEN";

/// Look up a backend token, treating an empty value as unset
pub(crate) fn token(env: &dyn Environment, name: &str) -> Option<String> {
    env.var(name).filter(|v| !v.is_empty())
}

/// Source of environment variables.
///
/// Clients receive one at construction so that tests can supply values
/// without touching the process environment.
pub trait Environment: Send + Sync {
    /// Look up a variable
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed set of variables
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
