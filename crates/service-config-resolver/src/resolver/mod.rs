//! Resolution orchestration
//!
//! Two flows share the parser, the local-override policy and the clients:
//! - config values: Consul only
//! - secret values: Consul (vault path) → Vault (secret) → KMS (ciphertext)

mod plugin;

pub use plugin::{ServiceConfigPlugin, SECRET_CONFIG, SERVICE_CONFIG};

use crate::clients::{ConsulClient, VaultClient};
use crate::encryption::{self, KeyEncryptor};
use crate::env::Environment;
use crate::error::{ResolveError, Result};
use crate::parser;
use crate::security::{AuditLog, Backend};
use crate::types::{ResolvedValue, VariableReference};
use service_config_core::PluginConfig;
use std::sync::Arc;
use tracing::debug;

/// Resolves references against one plugin config snapshot and stage.
///
/// Holds no mutable state; a single instance can serve concurrent calls.
pub struct Resolver {
    config: PluginConfig,
    stage: String,
    consul: ConsulClient,
    vault: VaultClient,
    encryptor: Arc<dyn KeyEncryptor>,
    env: Arc<dyn Environment>,
}

impl Resolver {
    pub fn new(
        config: PluginConfig,
        stage: impl Into<String>,
        http: reqwest::Client,
        encryptor: Arc<dyn KeyEncryptor>,
        env: Arc<dyn Environment>,
    ) -> Self {
        Self {
            consul: ConsulClient::new(http.clone(), Arc::clone(&env)),
            vault: VaultClient::new(http, Arc::clone(&env)),
            config,
            stage: stage.into(),
            encryptor,
            env,
        }
    }

    /// Active deployment stage
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Plugin configuration snapshot
    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Resolve a plain configuration reference from Consul.
    pub async fn resolve_config(&self, raw: &str) -> Result<ResolvedValue> {
        let reference = parser::parse(raw)?;

        if let Some(value) = self.local_override(&reference) {
            AuditLog::new("resolve_config", &reference.path, Backend::LocalEnv).log();
            return Ok(value);
        }

        let url = format!("{}{}", self.config.consul_url(), reference.path);
        let result = self.consul.get(&url, reference.fallback.as_deref()).await;

        AuditLog::new("resolve_config", &reference.path, Backend::Consul).record(&result);
        result
    }

    /// Resolve a secret reference to KMS ciphertext.
    ///
    /// The Consul value stored at the reference path is the vault-relative
    /// secret path.
    pub async fn resolve_secret(&self, raw: &str) -> Result<ResolvedValue> {
        let reference = parser::parse(raw)?;

        if let Some(value) = self.local_override(&reference) {
            AuditLog::new("resolve_secret", &reference.path, Backend::LocalEnv).log();
            return Ok(value);
        }

        let result = self.fetch_and_encrypt(&reference).await;

        AuditLog::new("resolve_secret", &reference.path, Backend::Vault).record(&result);
        result
    }

    async fn fetch_and_encrypt(&self, reference: &VariableReference) -> Result<ResolvedValue> {
        let key_id = self.kms_key_id().await?;
        let fallback = reference.fallback.as_deref();

        let url = format!("{}{}", self.config.consul_url(), reference.path);
        let vault_path = self
            .consul
            .get(&url, fallback)
            .await?
            .value
            .ok_or_else(|| ResolveError::missing_value(&url))?;
        debug!(path = %reference.path, vault_path = %vault_path, "Resolved vault path from Consul");

        let secret = self
            .vault
            .get_secret(&vault_path, &self.config.vault_url(), fallback)
            .await?;

        encryption::encrypt(self.encryptor.as_ref(), &key_id, secret.as_bytes()).await
    }

    /// KMS key id: Consul-resolved path first, then the static/per-stage id.
    async fn kms_key_id(&self) -> Result<String> {
        if let Some(path) = &self.config.kms_key_consul_path {
            debug!(path = %path, "Resolving KMS key id from Consul");
            return self
                .resolve_config(path)
                .await?
                .value
                .ok_or_else(|| ResolveError::missing_key_id(&self.stage));
        }

        self.config
            .kms_key_id
            .as_ref()
            .and_then(|ids| ids.for_stage(&self.stage))
            .map(str::to_string)
            .ok_or_else(|| ResolveError::missing_key_id(&self.stage))
    }

    /// Local environment lookup for stages that bypass remote backends
    fn local_override(&self, reference: &VariableReference) -> Option<ResolvedValue> {
        if !self.config.uses_local_env(&self.stage) {
            return None;
        }

        let name = reference.last_segment();
        debug!(stage = %self.stage, var = %name, "Reading value from local environment");
        Some(ResolvedValue {
            value: self.env.var(name),
        })
    }
}
