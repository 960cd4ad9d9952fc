//! HTTP clients for the Consul KV store and Vault

pub mod consul;
pub mod vault;

pub use consul::ConsulClient;
pub use vault::VaultClient;

use crate::error::{ResolveError, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Idle connections are kept warm for repeated lookups against the same host
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const TCP_KEEPALIVE: Duration = Duration::from_secs(60);

/// Build the shared HTTP client.
///
/// No request timeout is set; timeouts and retries belong to the transport.
pub fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .pool_idle_timeout(POOL_IDLE_TIMEOUT)
        .tcp_keepalive(TCP_KEEPALIVE)
        .build()?;
    Ok(client)
}

/// Read a JSON body that may be absent.
///
/// An empty or blank body and a literal `null` both read as `None`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    url: &str,
) -> Result<Option<T>> {
    let body = response.error_for_status()?.bytes().await?;
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    serde_json::from_slice(&body).map_err(|source| ResolveError::InvalidResponse {
        url: url.to_string(),
        source,
    })
}
