//! Core types for variable resolution

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// A parsed variable reference: a path and an optional fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReference {
    pub path: String,
    pub fallback: Option<String>,
}

impl VariableReference {
    /// Text after the last `/` of the path
    pub fn last_segment(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Result of every resolution path.
///
/// `value: None` is a successful resolution to nothing (for example an unset
/// local environment variable); failures are always `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub value: Option<String>,
}

impl ResolvedValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }

    pub fn empty() -> Self {
        Self { value: None }
    }
}

/// Input to a keyed encrypt operation
pub struct EncryptRequest {
    pub key_id: String,
    pub plaintext: Zeroizing<Vec<u8>>,
}

impl EncryptRequest {
    pub fn new(key_id: impl Into<String>, plaintext: &[u8]) -> Self {
        Self {
            key_id: key_id.into(),
            plaintext: Zeroizing::new(plaintext.to_vec()),
        }
    }
}

impl std::fmt::Debug for EncryptRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncryptRequest(key_id={}, plaintext=[REDACTED {} bytes])",
            self.key_id,
            self.plaintext.len()
        )
    }
}

/// Output of a keyed encrypt operation
#[derive(Debug, Clone, Default)]
pub struct EncryptOutput {
    pub ciphertext_blob: Option<Vec<u8>>,
}

/// Per-invocation options supplied by the caller
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Stage override; defaults to the descriptor's provider stage
    pub stage: Option<String>,
    /// AWS shared-config profile for KMS
    pub aws_profile: Option<String>,
}

/// Request shape accepted by the resolution entrypoints: either the raw
/// reference string or an `{ "address": ... }` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum VariableRequest {
    Raw(String),
    Address { address: String },
}

impl VariableRequest {
    /// The raw reference string
    pub fn address(&self) -> &str {
        match self {
            VariableRequest::Raw(raw) => raw,
            VariableRequest::Address { address } => address,
        }
    }
}

impl From<&str> for VariableRequest {
    fn from(raw: &str) -> Self {
        VariableRequest::Raw(raw.to_string())
    }
}

impl From<String> for VariableRequest {
    fn from(raw: String) -> Self {
        VariableRequest::Raw(raw)
    }
}
