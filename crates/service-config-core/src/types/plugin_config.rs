//! Plugin configuration (`custom.service_config_plugin`)

use crate::paths::build_url;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_CONSUL_ADDR: &str = "https://127.0.0.1:8500";
const DEFAULT_CONSUL_ROOT_CONTEXT: &str = "v1/kv";
const DEFAULT_VAULT_ADDR: &str = "https://127.0.0.1:8200";
const DEFAULT_VAULT_ROOT_CONTEXT: &str = "v1";

/// Resolution settings read from the deployment descriptor.
///
/// Every address, root context and prefix has a default; values present in
/// the descriptor replace the default for that field only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    /// Consul HTTP address
    #[serde(default = "default_consul_addr", alias = "kvAddr")]
    pub consul_addr: String,

    /// Consul API root, e.g. `v1/kv`
    #[serde(default = "default_consul_root_context", alias = "kvRootContext")]
    pub consul_root_context: String,

    /// Key prefix prepended to every config path
    #[serde(default, alias = "kvPrefix")]
    pub consul_prefix: String,

    /// Vault HTTP address
    #[serde(default = "default_vault_addr")]
    pub vault_addr: String,

    /// Vault API root, e.g. `v1`
    #[serde(default = "default_vault_root_context")]
    pub vault_root_context: String,

    /// Secret prefix prepended to every vault path
    #[serde(default)]
    pub vault_prefix: String,

    /// KMS key id, static or per stage
    #[serde(default)]
    pub kms_key_id: Option<KmsKeyId>,

    /// Consul path holding the KMS key id; takes priority over `kms_key_id`
    #[serde(default)]
    pub kms_key_consul_path: Option<String>,

    /// Stages that read values from local environment variables
    #[serde(default)]
    pub local_env_var_stages: Option<Vec<String>>,
}

fn default_consul_addr() -> String {
    DEFAULT_CONSUL_ADDR.to_string()
}

fn default_consul_root_context() -> String {
    DEFAULT_CONSUL_ROOT_CONTEXT.to_string()
}

fn default_vault_addr() -> String {
    DEFAULT_VAULT_ADDR.to_string()
}

fn default_vault_root_context() -> String {
    DEFAULT_VAULT_ROOT_CONTEXT.to_string()
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            consul_addr: default_consul_addr(),
            consul_root_context: default_consul_root_context(),
            consul_prefix: String::new(),
            vault_addr: default_vault_addr(),
            vault_root_context: default_vault_root_context(),
            vault_prefix: String::new(),
            kms_key_id: None,
            kms_key_consul_path: None,
            local_env_var_stages: None,
        }
    }
}

impl PluginConfig {
    /// Base URL for Consul KV reads, always ending with `/`
    pub fn consul_url(&self) -> String {
        build_url(
            &self.consul_addr,
            &self.consul_root_context,
            &self.consul_prefix,
        )
    }

    /// Base URL for Vault reads, always ending with `/`
    pub fn vault_url(&self) -> String {
        build_url(&self.vault_addr, &self.vault_root_context, &self.vault_prefix)
    }

    /// Whether `stage` bypasses remote resolution.
    ///
    /// Matching is exact and case-sensitive.
    pub fn uses_local_env(&self, stage: &str) -> bool {
        self.local_env_var_stages
            .as_ref()
            .is_some_and(|stages| stages.iter().any(|s| s == stage))
    }
}

/// KMS key id configuration.
///
/// Older descriptors carry a single key id; newer ones map stage names to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KmsKeyId {
    Static(String),
    PerStage(BTreeMap<String, String>),
}

impl KmsKeyId {
    /// Key id to use for `stage`, if one is configured
    pub fn for_stage(&self, stage: &str) -> Option<&str> {
        match self {
            KmsKeyId::Static(id) => Some(id.as_str()),
            KmsKeyId::PerStage(ids) => ids.get(stage).map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PluginConfig::default();
        assert_eq!(config.consul_addr, "https://127.0.0.1:8500");
        assert_eq!(config.consul_root_context, "v1/kv");
        assert_eq!(config.consul_prefix, "");
        assert_eq!(config.vault_addr, "https://127.0.0.1:8200");
        assert_eq!(config.vault_root_context, "v1");
        assert_eq!(config.vault_prefix, "");
        assert!(config.kms_key_id.is_none());
    }

    #[test]
    fn test_empty_mapping_matches_default() {
        let config: PluginConfig = serde_yaml_ng::from_str("{}").unwrap();
        assert_eq!(config, PluginConfig::default());
    }

    #[test]
    fn test_overrides_win() {
        let yaml = r#"
consulAddr: https://consul/
vaultAddr: https://vault/
consulRootContext: consulRoot/
vaultRootContext: vaultRoot/path/
consulPrefix: consul_prefix/
vaultPrefix: vault_prefix/
"#;
        let config: PluginConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.consul_addr, "https://consul/");
        assert_eq!(config.consul_root_context, "consulRoot/");
        assert_eq!(config.vault_addr, "https://vault/");
        assert_eq!(config.vault_root_context, "vaultRoot/path/");
        assert_eq!(config.consul_prefix, "consul_prefix/");
        assert_eq!(config.vault_prefix, "vault_prefix/");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let yaml = r#"
consulAddr: https://consul.com
consulPrefix: consul/backend
"#;
        let config: PluginConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.consul_url(), "https://consul.com/v1/kv/consul/backend/");
        assert_eq!(config.vault_url(), "https://127.0.0.1:8200/v1/");
    }

    #[test]
    fn test_kv_aliases() {
        let yaml = r#"
kvAddr: http://kv
kvRootContext: root
kvPrefix: pre
"#;
        let config: PluginConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.consul_url(), "http://kv/root/pre/");
    }

    #[test]
    fn test_vault_url() {
        let config = PluginConfig {
            vault_addr: "https://vault".to_string(),
            vault_root_context: "vaultRoot/path".to_string(),
            vault_prefix: "vault_prefix".to_string(),
            ..Default::default()
        };
        assert_eq!(config.vault_url(), "https://vault/vaultRoot/path/vault_prefix/");
    }

    #[test]
    fn test_empty_prefixes() {
        let config = PluginConfig {
            consul_addr: "https://consul/".to_string(),
            vault_addr: "https://vault".to_string(),
            ..Default::default()
        };
        assert_eq!(config.consul_url(), "https://consul/v1/kv/");
        assert_eq!(config.vault_url(), "https://vault/v1/");
    }

    #[test]
    fn test_kms_key_id_per_stage() {
        let yaml = r#"
kmsKeyId:
  dev: key-dev
  green: key-green
"#;
        let config: PluginConfig = serde_yaml_ng::from_str(yaml).unwrap();
        let ids = config.kms_key_id.unwrap();
        assert_eq!(ids.for_stage("dev"), Some("key-dev"));
        assert_eq!(ids.for_stage("green"), Some("key-green"));
        assert_eq!(ids.for_stage("blue"), None);
    }

    #[test]
    fn test_kms_key_id_static() {
        let config: PluginConfig = serde_yaml_ng::from_str("kmsKeyId: key-all").unwrap();
        let ids = config.kms_key_id.unwrap();
        assert_eq!(ids.for_stage("dev"), Some("key-all"));
        assert_eq!(ids.for_stage("anything"), Some("key-all"));
    }

    #[test]
    fn test_uses_local_env_is_exact() {
        let config = PluginConfig {
            local_env_var_stages: Some(vec!["local".to_string(), "offline".to_string()]),
            ..Default::default()
        };
        assert!(config.uses_local_env("local"));
        assert!(config.uses_local_env("offline"));
        assert!(!config.uses_local_env("Local"));
        assert!(!config.uses_local_env("dev"));
        assert!(!PluginConfig::default().uses_local_env("local"));
    }
}
