//! Variable reference parsing
//!
//! A reference is a path optionally followed by `, fallback`. Interpolation
//! markers such as `${self:custom.path}` are kept as opaque path text.

use crate::error::{ResolveError, Result};
use crate::types::VariableReference;
use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z0-9_/:.$\{\}\-]+),?\s?(["A-Za-z0-9_]+)?"#)
        .expect("reference pattern is valid")
});

/// Parse a raw reference into its path and optional fallback.
///
/// The leftmost match wins. Quotes around a fallback are kept.
pub fn parse(raw: &str) -> Result<VariableReference> {
    let captures = REFERENCE_RE
        .captures(raw)
        .ok_or_else(|| ResolveError::malformed_reference(raw))?;

    let path = captures
        .get(1)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ResolveError::malformed_reference(raw))?;
    let fallback = captures.get(2).map(|m| m.as_str().trim().to_string());

    Ok(VariableReference { path, fallback })
}
