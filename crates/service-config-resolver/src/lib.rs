//! Service config resolver
//!
//! Resolves `serviceConfig:` and `secretConfig:` variable references for a
//! deployment descriptor:
//! - configuration values are read from Consul KV
//! - secrets are located through Consul, read from Vault and returned only
//!   as KMS ciphertext (Base64)
//! - configured stages read values from local environment variables instead

pub mod clients;
pub mod encryption;
pub mod env;
pub mod error;
pub mod kms;
pub mod parser;
pub mod resolver;
pub mod security;
pub mod types;

pub use encryption::KeyEncryptor;
pub use env::{Environment, MapEnv, ProcessEnv};
pub use error::{ResolveError, Result};
pub use kms::KmsEncryptor;
pub use resolver::{Resolver, ServiceConfigPlugin, SECRET_CONFIG, SERVICE_CONFIG};
pub use security::SecureString;
pub use types::{ResolveOptions, ResolvedValue, VariableReference, VariableRequest};
