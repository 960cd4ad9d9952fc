//! HashiCorp Vault secret client

use super::read_json;
use crate::env::{self, Environment, VAULT_TOKEN};
use crate::error::{ResolveError, Result};
use crate::security::SecureString;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

#[derive(Deserialize)]
struct SecretResponse {
    #[serde(default)]
    data: Option<SecretData>,
}

#[derive(Deserialize)]
struct SecretData {
    #[serde(default)]
    value: Option<String>,
}

/// Reads single secrets from Vault
#[derive(Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    env: Arc<dyn Environment>,
}

impl VaultClient {
    pub fn new(http: reqwest::Client, env: Arc<dyn Environment>) -> Self {
        Self { http, env }
    }

    /// Fetch the secret at `vault_prefix + path`.
    ///
    /// A response without `data.value`, or a 404, yields `fallback` when
    /// given and `MissingSecret` (naming `path`) otherwise.
    pub async fn get_secret(
        &self,
        path: &str,
        vault_prefix: &str,
        fallback: Option<&str>,
    ) -> Result<SecureString> {
        let token = env::token(self.env.as_ref(), VAULT_TOKEN)
            .ok_or_else(ResolveError::missing_vault_token)?;

        let url = format!("{}{}", vault_prefix, path);
        debug!(url = %url, "Reading secret from Vault");

        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(VAULT_TOKEN_HEADER, token)
            .send()
            .await?;

        let body: Option<SecretResponse> = if response.status() == StatusCode::NOT_FOUND {
            debug!(url = %url, "Secret not found in Vault");
            None
        } else {
            read_json(response, &url).await?
        };

        let value = body
            .and_then(|body| body.data)
            .and_then(|data| data.value)
            .filter(|value| !value.is_empty());

        match (value, fallback) {
            (Some(value), _) => Ok(SecureString::new(value)),
            (None, Some(fallback)) => {
                debug!(path, "Using fallback for missing Vault secret");
                Ok(SecureString::from(fallback))
            }
            (None, None) => Err(ResolveError::missing_secret(path)),
        }
    }
}
