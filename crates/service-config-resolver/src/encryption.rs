//! Encryption adapter
//!
//! Secrets leave the resolver only as Base64 ciphertext produced by a keyed
//! encrypt operation. The plaintext crosses the boundary as raw bytes.

use crate::error::{ResolveError, Result};
use crate::types::{EncryptOutput, EncryptRequest, ResolvedValue};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

/// A keyed encrypt capability (KMS in production)
#[async_trait]
pub trait KeyEncryptor: Send + Sync {
    async fn encrypt(&self, request: EncryptRequest) -> Result<EncryptOutput>;
}

/// Encrypt `plaintext` under `key_id` and Base64-encode the ciphertext.
pub async fn encrypt(
    encryptor: &dyn KeyEncryptor,
    key_id: &str,
    plaintext: &[u8],
) -> Result<ResolvedValue> {
    let output = encryptor
        .encrypt(EncryptRequest::new(key_id, plaintext))
        .await?;

    let blob = output
        .ciphertext_blob
        .ok_or(ResolveError::MissingCiphertext)?;

    Ok(ResolvedValue::new(BASE64.encode(blob)))
}
