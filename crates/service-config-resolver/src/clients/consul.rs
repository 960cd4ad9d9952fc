//! Consul KV client

use super::read_json;
use crate::env::{self, Environment, CONSUL_TOKEN};
use crate::error::{ResolveError, Result};
use crate::types::ResolvedValue;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

const CONSUL_TOKEN_HEADER: &str = "X-Consul-Token";

/// One version record returned by `GET /v1/kv/<key>`
#[derive(Debug, Deserialize)]
struct KvRecord {
    #[serde(rename = "Value", default)]
    value: Option<String>,
}

/// Reads single keys from Consul
#[derive(Clone)]
pub struct ConsulClient {
    http: reqwest::Client,
    env: Arc<dyn Environment>,
}

impl ConsulClient {
    pub fn new(http: reqwest::Client, env: Arc<dyn Environment>) -> Self {
        Self { http, env }
    }

    /// Fetch the key at `url` and decode its value.
    ///
    /// An empty body, a record without a value, or a 404 yields
    /// `fallback` when given and `MissingValue` otherwise. The token is
    /// checked before any request is sent.
    pub async fn get(&self, url: &str, fallback: Option<&str>) -> Result<ResolvedValue> {
        let token = env::token(self.env.as_ref(), CONSUL_TOKEN)
            .ok_or_else(ResolveError::missing_consul_token)?;

        debug!(url, "Reading key from Consul");
        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONSUL_TOKEN_HEADER, token)
            .send()
            .await?;

        let records: Option<Vec<KvRecord>> = if response.status() == StatusCode::NOT_FOUND {
            debug!(url, "Key not found in Consul");
            None
        } else {
            read_json(response, url).await?
        };

        let encoded = records
            .and_then(|records| records.into_iter().next())
            .and_then(|record| record.value)
            .filter(|value| !value.is_empty());

        if let Some(encoded) = encoded {
            let bytes = BASE64
                .decode(encoded.as_bytes())
                .map_err(|source| ResolveError::InvalidEncoding {
                    url: url.to_string(),
                    source,
                })?;
            return Ok(ResolvedValue::new(String::from_utf8_lossy(&bytes)));
        }

        match fallback {
            Some(fallback) => {
                debug!(url, "Using fallback for missing Consul key");
                Ok(ResolvedValue::new(fallback))
            }
            None => Err(ResolveError::missing_value(url)),
        }
    }
}
