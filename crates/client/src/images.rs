//! Image URL resolution against the backend origin.

use chrono::Utc;
use url::Url;

/// `v=` stamp appended to image URLs so each render pass bypasses caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuster(i64);

impl CacheBuster {
    /// Stamp for a render pass happening now (unix millis).
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn fixed(millis: i64) -> Self {
        Self(millis)
    }

    pub fn millis(&self) -> i64 {
        self.0
    }
}

/// Resolve a relative image path against `origin` and stamp it.
///
/// Blank or unparsable paths resolve to `None`.
pub fn resolve_image(origin: &Url, path: &str, stamp: CacheBuster) -> Option<Url> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let mut url = origin.join(path.trim_start_matches('/')).ok()?;
    url.query_pairs_mut()
        .append_pair("v", &stamp.millis().to_string());
    Some(url)
}
