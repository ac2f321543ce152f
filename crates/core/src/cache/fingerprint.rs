//! Cache key derivation.
//!
//! A fingerprint is either a canonical page URL or a SHA-256 digest of the
//! extracted text. Callers may also supply their own string.

use crate::Error;
use sha2::{Digest, Sha256};
use std::fmt;

/// Dedup key for the summary cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Canonicalize a page URL for consistent cache hits.
    ///
    /// Normalization steps:
    /// 1. Trim leading/trailing whitespace
    /// 2. Default scheme to https:// if missing
    /// 3. Lowercase the host
    /// 4. Remove fragment (#...)
    /// 5. Keep query string intact (do not reorder)
    pub fn from_url(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidUrl("empty URL".into()));
        }

        let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };
        let mut parsed = url::Url::parse(&url_str).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(Error::InvalidUrl(format!("unsupported scheme: {scheme}"))),
        }

        if let Some(host) = parsed.host_str().map(str::to_lowercase) {
            parsed
                .set_host(Some(&host))
                .map_err(|e| Error::InvalidUrl(e.to_string()))?;
        }
        parsed.set_fragment(None);

        Ok(Self(parsed.to_string()))
    }

    /// Digest of the extracted text, for pages summarized without a URL.
    pub fn from_text(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.trim().as_bytes());
        Self(format!("text:{}", hex::encode(hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Fingerprint {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_canonical_forms_match() {
        let a = Fingerprint::from_url("https://Example.COM/page#section").unwrap();
        let b = Fingerprint::from_url("  example.com/page ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "https://example.com/page");
    }

    #[test]
    fn test_url_keeps_query() {
        let fp = Fingerprint::from_url("https://example.com/watch?v=abc&t=10").unwrap();
        assert_eq!(fp.as_str(), "https://example.com/watch?v=abc&t=10");
    }

    #[test]
    fn test_url_rejects_bad_input() {
        assert!(matches!(Fingerprint::from_url("   "), Err(Error::InvalidUrl(_))));
        assert!(matches!(Fingerprint::from_url("ftp://example.com"), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_text_hash_stability() {
        let a = Fingerprint::from_text("Some article body");
        let b = Fingerprint::from_text("Some article body\n");
        assert_eq!(a, b);
        assert_ne!(a, Fingerprint::from_text("Another body"));
    }

    #[test]
    fn test_text_hash_format() {
        let fp = Fingerprint::from_text("body");
        let digest = fp.as_str().strip_prefix("text:").unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
