//! Base URL construction for the Consul and Vault HTTP APIs

/// Strip every leading and trailing `/` from a path segment.
fn trim_path(path: &str) -> &str {
    path.trim_start_matches('/').trim_end_matches('/')
}

/// Build a normalized base URL from an address, a root context and a prefix.
///
/// The result always ends with `/`. An empty prefix (after trimming) is
/// dropped entirely, so `("https://x", "v1", "")` gives `https://x/v1/`
/// rather than `https://x/v1//`. The root context is always emitted.
pub fn build_url(addr: &str, root_context: &str, prefix: &str) -> String {
    let addr = addr.trim_end_matches('/');
    let root_context = trim_path(root_context);
    let prefix = trim_path(prefix);

    if prefix.is_empty() {
        format!("{}/{}/", addr, root_context)
    } else {
        format!("{}/{}/{}/", addr, root_context, prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_plain() {
        assert_eq!(build_url("https://x", "r", "p"), "https://x/r/p/");
    }

    #[test]
    fn test_build_url_redundant_slashes() {
        assert_eq!(build_url("https://x/", "//r/", "/p/"), "https://x/r/p/");
        assert_eq!(
            build_url("https://consul/", "///consulRoot/", "/consul/prefix/"),
            "https://consul/consulRoot/consul/prefix/"
        );
        assert_eq!(
            build_url("https://vault", "/vaultRoot/path//", "vault/prefix"),
            "https://vault/vaultRoot/path/vault/prefix/"
        );
    }

    #[test]
    fn test_build_url_empty_prefix() {
        assert_eq!(build_url("https://x", "v1", ""), "https://x/v1/");
        assert_eq!(build_url("https://consul/", "v1/kv", "///"), "https://consul/v1/kv/");
    }

    #[test]
    fn test_build_url_keeps_empty_root_context() {
        assert_eq!(build_url("https://x", "", "p"), "https://x//p/");
    }

    #[test]
    fn test_build_url_address_trailing_slashes() {
        assert_eq!(build_url("https://x///", "v1", "p"), "https://x/v1/p/");
    }
}
