// src/crawl/scope.rs
// =============================================================================
// Decides which discovered links the crawler is allowed to follow.
//
// A link is in scope when its host matches the seed's host. Only the host
// is compared: http://example.com and https://example.com:8443 are the same
// site as far as the crawler is concerned. Links with no host at all
// (mailto:, javascript:, data:) are never in scope.
// =============================================================================

use url::Url;

#[derive(Debug, Clone)]
pub struct OriginScope {
    host: String,
}

impl OriginScope {
    // Returns None when the seed has no host to compare against
    pub fn from_seed(seed: &Url) -> Option<Self> {
        seed.host_str().map(|host| Self {
            host: host.to_ascii_lowercase(),
        })
    }

    pub fn contains(&self, link: &Url) -> bool {
        link.host_str()
            .map(|host| host.eq_ignore_ascii_case(&self.host))
            .unwrap_or(false)
    }
}
