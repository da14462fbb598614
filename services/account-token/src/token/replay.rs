//! Optional single-use enforcement.
//!
//! Tokens are self-contained, so without this registry a captured token can
//! be replayed until it expires. The registry remembers the `jti` of every
//! consumed token until that token's own expiry.

use std::collections::HashMap;
use tokio::sync::Mutex;

/// In-memory set of consumed token ids.
#[derive(Debug, Default)]
pub struct UsedTokenRegistry {
    used: Mutex<HashMap<String, i64>>,
}

impl UsedTokenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `jti` as used.
    ///
    /// Returns true if the token was unused, false on replay. Entries whose
    /// expiry is before `now` are purged first.
    pub async fn claim(&self, jti: &str, expires_at: i64, now: i64) -> bool {
        let mut used = self.used.lock().await;
        used.retain(|_, exp| *exp >= now);

        if used.contains_key(jti) {
            return false;
        }
        used.insert(jti.to_string(), expires_at);
        true
    }

    /// Forget a claim, so the token can be presented again.
    pub async fn release(&self, jti: &str) {
        self.used.lock().await.remove(jti);
    }

    /// Number of remembered token ids.
    pub async fn len(&self) -> usize {
        self.used.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.used.lock().await.is_empty()
    }
}
