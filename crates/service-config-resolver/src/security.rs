//! Secret hygiene and audit logging
//!
//! Provides:
//! - SecureString with zeroize
//! - Audit records for every resolution (never logs values)

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure string that is automatically zeroed on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    /// Create a new secure string
    pub fn new(value: String) -> Self {
        Self { inner: value }
    }

    /// Get the string value (use with caution)
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Raw UTF-8 bytes
    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }

    /// Get length
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for SecureString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecureString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureString([REDACTED {} bytes])", self.len())
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

/// Which backend answered a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Consul,
    Vault,
    LocalEnv,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Consul => write!(f, "consul"),
            Backend::Vault => write!(f, "vault+kms"),
            Backend::LocalEnv => write!(f, "local-env"),
        }
    }
}

/// Audit record for one resolution
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub operation: &'static str,
    pub path: String,
    pub backend: Backend,
    pub success: bool,
    pub error: Option<String>,
    pub timestamp: std::time::SystemTime,
}

impl AuditLog {
    pub fn new(operation: &'static str, path: impl Into<String>, backend: Backend) -> Self {
        Self {
            operation,
            path: path.into(),
            backend,
            success: true,
            error: None,
            timestamp: std::time::SystemTime::now(),
        }
    }

    pub fn with_error(mut self, error: String) -> Self {
        self.success = false;
        self.error = Some(error);
        self
    }

    /// Record the outcome of `result` and log it
    pub fn record<T, E: fmt::Display>(self, result: &Result<T, E>) {
        match result {
            Ok(_) => self.log(),
            Err(e) => self.with_error(e.to_string()).log(),
        }
    }

    /// Log the audit entry (never logs values)
    pub fn log(&self) {
        if self.success {
            tracing::info!(
                operation = %self.operation,
                path = %self.path,
                backend = %self.backend,
                timestamp = ?self.timestamp,
                "Variable resolved"
            );
        } else {
            tracing::warn!(
                operation = %self.operation,
                path = %self.path,
                backend = %self.backend,
                error = ?self.error,
                timestamp = ?self.timestamp,
                "Variable resolution failed"
            );
        }
    }
}
