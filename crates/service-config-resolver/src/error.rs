//! Error types for config and secret resolution

use thiserror::Error;

/// Result type alias using the resolver's error type
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors raised while resolving a variable reference.
///
/// Fallback substitution happens before any of these are raised; an error
/// always means the caller gets no value.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Reference string has no capturable path
    #[error("Malformed variable reference: '{raw}'")]
    MalformedReference { raw: String },

    /// Backend token not present in the environment
    #[error(
        "Missing {service} token for authentication, you need to set {var} as a environment variable"
    )]
    MissingCredential {
        service: &'static str,
        var: &'static str,
    },

    /// Consul key absent and no fallback given
    #[error("Missing value in Consul at {url}")]
    MissingValue { url: String },

    /// Vault secret absent and no fallback given
    #[error("Missing secret in Vault at {path}")]
    MissingSecret { path: String },

    /// Neither KMS key id route is configured for the stage
    #[error(
        "KMS Key Id missing for stage '{stage}', please specify it in the plugin config \
         [service_config_plugin/kmsKeyId/{stage}] or [service_config_plugin/kmsKeyConsulPath]"
    )]
    MissingKeyId { stage: String },

    /// Encrypt call returned no ciphertext
    #[error("Missing encrypted secret value from AWS response")]
    MissingCiphertext,

    /// Consul returned a value that is not valid Base64
    #[error("Invalid Base64 value in Consul at {url}: {source}")]
    InvalidEncoding {
        url: String,
        #[source]
        source: base64::DecodeError,
    },

    /// Backend answered with a body that is not JSON
    #[error("Invalid JSON response from {url}: {source}")]
    InvalidResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Entrypoint name not handled by this plugin
    #[error("Unknown variable resolver: {name}")]
    UnknownResolver { name: String },

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Encryption backend failure
    #[error("Encryption failed: {0}")]
    Encryption(String),

}

impl ResolveError {
    /// Create a malformed reference error
    pub fn malformed_reference(raw: impl Into<String>) -> Self {
        Self::MalformedReference { raw: raw.into() }
    }

    /// Create a missing Consul token error
    pub fn missing_consul_token() -> Self {
        Self::MissingCredential {
            service: "consul",
            var: crate::env::CONSUL_TOKEN,
        }
    }

    /// Create a missing Vault token error
    pub fn missing_vault_token() -> Self {
        Self::MissingCredential {
            service: "vault",
            var: crate::env::VAULT_TOKEN,
        }
    }

    /// Create a missing value error
    pub fn missing_value(url: impl Into<String>) -> Self {
        Self::MissingValue { url: url.into() }
    }

    /// Create a missing secret error
    pub fn missing_secret(path: impl Into<String>) -> Self {
        Self::MissingSecret { path: path.into() }
    }

    /// Create a missing key id error
    pub fn missing_key_id(stage: impl Into<String>) -> Self {
        Self::MissingKeyId {
            stage: stage.into(),
        }
    }

    /// Create an unknown resolver error
    pub fn unknown_resolver(name: impl Into<String>) -> Self {
        Self::UnknownResolver { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_messages() {
        assert_eq!(
            ResolveError::missing_consul_token().to_string(),
            "Missing consul token for authentication, you need to set CONSUL_TOKEN as a environment variable"
        );
        assert_eq!(
            ResolveError::missing_vault_token().to_string(),
            "Missing vault token for authentication, you need to set VAULT_TOKEN as a environment variable"
        );
    }

    #[test]
    fn test_missing_key_id_names_both_routes() {
        let msg = ResolveError::missing_key_id("green").to_string();
        assert!(msg.contains("service_config_plugin/kmsKeyId/green"));
        assert!(msg.contains("service_config_plugin/kmsKeyConsulPath"));
    }
}
