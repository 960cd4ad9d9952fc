//! Entrypoints exposed to the host deployment tool

use super::Resolver;
use crate::clients::http_client;
use crate::encryption::KeyEncryptor;
use crate::env::{Environment, ProcessEnv};
use crate::error::{ResolveError, Result};
use crate::kms::KmsEncryptor;
use crate::types::{ResolveOptions, ResolvedValue, VariableRequest};
use service_config_core::DeploymentDescriptor;
use std::sync::Arc;

/// Resolver name for plain configuration values
pub const SERVICE_CONFIG: &str = "serviceConfig";

/// Resolver name for encrypted secret values
pub const SECRET_CONFIG: &str = "secretConfig";

/// The two variable resolvers registered with the host.
///
/// A fresh [`Resolver`] (and plugin config snapshot) is built for every
/// request; only the HTTP pool and the encryptor are shared.
pub struct ServiceConfigPlugin {
    descriptor: DeploymentDescriptor,
    options: ResolveOptions,
    http: reqwest::Client,
    encryptor: Arc<dyn KeyEncryptor>,
    env: Arc<dyn Environment>,
}

impl ServiceConfigPlugin {
    /// Production wiring: process environment and AWS KMS
    pub fn new(descriptor: DeploymentDescriptor, options: ResolveOptions) -> Result<Self> {
        let encryptor = KmsEncryptor::new(
            descriptor.provider.region.clone(),
            options.aws_profile.clone(),
        );
        Self::with_parts(descriptor, options, Arc::new(encryptor), Arc::new(ProcessEnv))
    }

    /// Custom encryptor and environment (for testing)
    pub fn with_parts(
        descriptor: DeploymentDescriptor,
        options: ResolveOptions,
        encryptor: Arc<dyn KeyEncryptor>,
        env: Arc<dyn Environment>,
    ) -> Result<Self> {
        Ok(Self {
            descriptor,
            options,
            http: http_client()?,
            encryptor,
            env,
        })
    }

    /// Names of the resolvers this plugin answers
    pub fn variable_resolvers(&self) -> [&'static str; 2] {
        [SERVICE_CONFIG, SECRET_CONFIG]
    }

    /// Caller-supplied stage, else the provider's default stage
    pub fn stage(&self) -> &str {
        self.options
            .stage
            .as_deref()
            .unwrap_or(&self.descriptor.provider.stage)
    }

    fn resolver(&self) -> Resolver {
        Resolver::new(
            self.descriptor.plugin_config(),
            self.stage(),
            self.http.clone(),
            Arc::clone(&self.encryptor),
            Arc::clone(&self.env),
        )
    }

    /// Resolve a `serviceConfig:` reference
    pub async fn get_service_config(
        &self,
        request: impl Into<VariableRequest>,
    ) -> Result<ResolvedValue> {
        let request = request.into();
        let raw = strip_source(request.address(), SERVICE_CONFIG);
        self.resolver().resolve_config(raw).await
    }

    /// Resolve a `secretConfig:` reference
    pub async fn get_secret_config(
        &self,
        request: impl Into<VariableRequest>,
    ) -> Result<ResolvedValue> {
        let request = request.into();
        let raw = strip_source(request.address(), SECRET_CONFIG);
        self.resolver().resolve_secret(raw).await
    }

    /// Dispatch by resolver name
    pub async fn resolve(
        &self,
        source: &str,
        request: impl Into<VariableRequest>,
    ) -> Result<ResolvedValue> {
        match source {
            SERVICE_CONFIG => self.get_service_config(request).await,
            SECRET_CONFIG => self.get_secret_config(request).await,
            other => Err(ResolveError::unknown_resolver(other)),
        }
    }
}

/// Drop a leading `<source>:` the host may pass through
fn strip_source<'a>(raw: &'a str, source: &str) -> &'a str {
    raw.strip_prefix(source)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::mock::RecordingEncryptor;
    use crate::env::{MapEnv, CONSUL_TOKEN, VAULT_TOKEN};
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn descriptor(yaml: &str) -> DeploymentDescriptor {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn plugin(
        descriptor: DeploymentDescriptor,
        options: ResolveOptions,
        encryptor: Arc<RecordingEncryptor>,
    ) -> ServiceConfigPlugin {
        let env = MapEnv::new()
            .with_var(CONSUL_TOKEN, "myToken")
            .with_var(VAULT_TOKEN, "vault_token")
            .with_var("OFFICES", "10.0.0.0/8");
        ServiceConfigPlugin::with_parts(descriptor, options, encryptor, Arc::new(env)).unwrap()
    }

    #[test]
    fn test_strip_source() {
        assert_eq!(strip_source("serviceConfig:a/b", SERVICE_CONFIG), "a/b");
        assert_eq!(strip_source("secretConfig:a/b, x", SECRET_CONFIG), "a/b, x");
        assert_eq!(strip_source("a/b", SERVICE_CONFIG), "a/b");
        assert_eq!(strip_source("serviceConfigX/b", SERVICE_CONFIG), "serviceConfigX/b");
    }

    #[test]
    fn test_variable_resolvers() {
        let plugin = plugin(
            DeploymentDescriptor::default(),
            ResolveOptions::default(),
            Arc::new(RecordingEncryptor::default()),
        );
        assert_eq!(plugin.variable_resolvers(), ["serviceConfig", "secretConfig"]);
    }

    #[test]
    fn test_stage_prefers_options() {
        let yaml = "provider:\n  stage: green\n";
        let from_descriptor = plugin(
            descriptor(yaml),
            ResolveOptions::default(),
            Arc::new(RecordingEncryptor::default()),
        );
        assert_eq!(from_descriptor.stage(), "green");

        let from_options = plugin(
            descriptor(yaml),
            ResolveOptions {
                stage: Some("blue".to_string()),
                aws_profile: None,
            },
            Arc::new(RecordingEncryptor::default()),
        );
        assert_eq!(from_options.stage(), "blue");
    }

    #[test]
    fn test_production_wiring_builds_without_aws() {
        let plugin = ServiceConfigPlugin::new(
            descriptor("provider:\n  stage: green\n  region: eu-west-1\n"),
            ResolveOptions {
                stage: None,
                aws_profile: Some("deploy".to_string()),
            },
        )
        .unwrap();
        assert_eq!(plugin.stage(), "green");
    }

    #[tokio::test]
    async fn test_service_config_entrypoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/kv/prefix/config_path/key"))
            .and(header("X-Consul-Token", "myToken"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "Value": "YSBzYW1wbGUgdmFsdWU=" }])),
            )
            .mount(&server)
            .await;

        let yaml = format!(
            "custom:\n  service_config_plugin:\n    consulAddr: {}\n    consulPrefix: prefix\n",
            server.uri()
        );
        let plugin = plugin(
            descriptor(&yaml),
            ResolveOptions::default(),
            Arc::new(RecordingEncryptor::default()),
        );

        let expected = ResolvedValue::new("a sample value");
        assert_eq!(
            plugin
                .get_service_config("serviceConfig:config_path/key")
                .await
                .unwrap(),
            expected
        );
        assert_eq!(
            plugin
                .resolve(
                    SERVICE_CONFIG,
                    VariableRequest::Address {
                        address: "config_path/key".to_string()
                    }
                )
                .await
                .unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn test_secret_config_entrypoint() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/kv/vault/my_secret/secret"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{ "Value": "c2VjcmV0L3BhdGg=" }])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/secret/path"))
            .and(header("X-Vault-Token", "vault_token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "value": "fake_secret" } })),
            )
            .mount(&server)
            .await;

        let yaml = format!(
            "provider:\n  stage: dev\ncustom:\n  service_config_plugin:\n    consulAddr: {uri}\n    vaultAddr: {uri}\n    kmsKeyId: kmsKeyId\n",
            uri = server.uri()
        );
        let encryptor = Arc::new(RecordingEncryptor::default());
        let plugin = plugin(descriptor(&yaml), ResolveOptions::default(), encryptor.clone());

        let value = plugin
            .resolve(SECRET_CONFIG, "secretConfig:vault/my_secret/secret")
            .await
            .unwrap();
        assert_eq!(value, ResolvedValue::new("ZW5jcnlwdGVkOmZha2Vfc2VjcmV0"));
        assert_eq!(
            encryptor.calls(),
            vec![("kmsKeyId".to_string(), b"fake_secret".to_vec())]
        );
    }

    #[tokio::test]
    async fn test_secret_config_without_key_id() {
        let plugin = plugin(
            descriptor("custom:\n  service_config_plugin: {}\n"),
            ResolveOptions::default(),
            Arc::new(RecordingEncryptor::default()),
        );

        let err = plugin
            .get_secret_config("secretConfig:vault/my_secret/secret")
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingKeyId { .. }), "got: {:?}", err);
    }

    #[tokio::test]
    async fn test_local_stage_from_options() {
        let yaml = "custom:\n  service_config_plugin:\n    localEnvVarStages: [local]\n";
        let plugin = plugin(
            descriptor(yaml),
            ResolveOptions {
                stage: Some("local".to_string()),
                aws_profile: None,
            },
            Arc::new(RecordingEncryptor::default()),
        );

        let value = plugin
            .get_service_config("serviceConfig:global/config.json/IP-aliases/OFFICES")
            .await
            .unwrap();
        assert_eq!(value, ResolvedValue::new("10.0.0.0/8"));
    }

    #[tokio::test]
    async fn test_unknown_resolver() {
        let plugin = plugin(
            DeploymentDescriptor::default(),
            ResolveOptions::default(),
            Arc::new(RecordingEncryptor::default()),
        );

        let err = plugin.resolve("ssm", "a/b").await.unwrap_err();
        assert_eq!(err.to_string(), "Unknown variable resolver: ssm");
    }
}
