//! AWS KMS implementation of [`KeyEncryptor`]

use crate::encryption::KeyEncryptor;
use crate::error::{ResolveError, Result};
use crate::types::{EncryptOutput, EncryptRequest};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_kms::config::Region;
use aws_sdk_kms::error::DisplayErrorContext;
use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::Client;
use tokio::sync::OnceCell;
use tracing::debug;

/// Encrypts with AWS KMS.
///
/// The SDK client is built on first use, so config-only resolutions never
/// load AWS credentials.
pub struct KmsEncryptor {
    region: Option<String>,
    profile: Option<String>,
    client: OnceCell<Client>,
}

impl KmsEncryptor {
    /// `region` comes from the descriptor's provider section and `profile`
    /// selects a shared-config profile; both fall back to the default AWS
    /// provider chain when absent.
    pub fn new(region: Option<String>, profile: Option<String>) -> Self {
        Self {
            region,
            profile,
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| Self::create_client(self.region.as_deref(), self.profile.as_deref()))
            .await
    }

    async fn create_client(region: Option<&str>, profile: Option<&str>) -> Client {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = region {
            debug!("Using AWS region: {}", region);
            loader = loader.region(Region::new(region.to_string()));
        }
        if let Some(profile) = profile {
            debug!("Using AWS profile: {}", profile);
            loader = loader.profile_name(profile);
        }

        let sdk_config = loader.load().await;
        Client::new(&sdk_config)
    }
}

#[async_trait]
impl KeyEncryptor for KmsEncryptor {
    async fn encrypt(&self, request: EncryptRequest) -> Result<EncryptOutput> {
        debug!(key_id = %request.key_id, "Encrypting secret with KMS");

        let output = self
            .client()
            .await
            .encrypt()
            .key_id(&request.key_id)
            .plaintext(Blob::new(request.plaintext.to_vec()))
            .send()
            .await
            .map_err(|e| ResolveError::Encryption(DisplayErrorContext(&e).to_string()))?;

        Ok(EncryptOutput {
            ciphertext_blob: output.ciphertext_blob().map(|blob| blob.as_ref().to_vec()),
        })
    }
}
