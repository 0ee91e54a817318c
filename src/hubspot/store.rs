//! Short-lived key-value storage for OAuth state and credentials.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tokio::task::JoinHandle;

/// Longest lifetime an entry can have; longer TTLs are clamped.
pub const MAX_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// A thread-safe map whose entries expire after a per-entry TTL.
///
/// Expired entries are dropped when read, and in bulk by
/// [`purge_expired`](TtlStore::purge_expired) or a [sweeper](TtlStore::spawn_sweeper).
#[derive(Debug, Clone, Default)]
pub struct TtlStore {
    inner: Arc<DashMap<String, Entry>>,
}

impl TtlStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        self.inner.insert(
            key.into(),
            Entry {
                value: value.into(),
                expires_at: Instant::now() + ttl.min(MAX_TTL),
            },
        );
    }

    /// Get a live value.
    pub fn get(&self, key: &str) -> Option<String> {
        let expired = match self.inner.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.inner.remove(key);
        }
        None
    }

    /// Remove a key, returning its value if it was still live.
    pub fn take(&self, key: &str) -> Option<String> {
        self.inner
            .remove(key)
            .filter(|(_, entry)| entry.expires_at > Instant::now())
            .map(|(_, entry)| entry.value)
    }

    pub fn delete(&self, key: &str) {
        self.inner.remove(key);
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.inner.len();
        self.inner.retain(|_, entry| entry.expires_at > now);
        before - self.inner.len()
    }

    /// Purge expired entries every `every` until the handle is aborted.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let removed = store.purge_expired();
                if removed > 0 {
                    tracing::debug!(removed, remaining = store.len(), "Expired entries purged");
                }
            }
        })
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

pub fn state_key(org_id: &str, user_id: &str) -> String {
    format!("hubspot_state:{}:{}", org_id, user_id)
}

pub fn credentials_key(org_id: &str, user_id: &str) -> String {
    format!("hubspot_credentials:{}:{}", org_id, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = TtlStore::new();
        store.set("k", "v", Duration::from_secs(60));

        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.delete("k");
        assert!(store.get("k").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_expiry() {
        let store = TtlStore::new();
        store.set("gone", "v", Duration::ZERO);
        store.set("kept", "v", Duration::from_secs(60));

        assert!(store.get("gone").is_none());
        assert_eq!(store.len(), 1);

        store.set("gone", "v", Duration::ZERO);
        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_take_is_one_shot() {
        let store = TtlStore::new();
        store.set("creds", "{}", Duration::from_secs(60));

        assert_eq!(store.take("creds").as_deref(), Some("{}"));
        assert!(store.take("creds").is_none());

        store.set("stale", "{}", Duration::ZERO);
        assert!(store.take("stale").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_huge_ttl_is_clamped() {
        let store = TtlStore::new();
        store.set("k", "v", Duration::MAX);
        store.set("j", "v", Duration::from_secs(u64::MAX));

        assert_eq!(store.get("k").as_deref(), Some("v"));
        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_sweeper_drops_abandoned_entries() {
        let store = TtlStore::new();
        for i in 0..1000 {
            store.set(format!("state:{i}"), "v", Duration::from_millis(50));
        }
        store.set("live", "v", Duration::from_secs(60));

        let sweeper = store.spawn_sweeper(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(300)).await;
        sweeper.abort();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("live").as_deref(), Some("v"));
    }

    #[test]
    fn test_keys() {
        assert_eq!(state_key("org", "user"), "hubspot_state:org:user");
        assert_eq!(credentials_key("org", "user"), "hubspot_credentials:org:user");
    }
}
