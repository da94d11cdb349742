//! Per-URL store of credibility results.
//!
//! Keys are the raw URL trimmed and lowercased; no URL canonicalisation
//! happens, so `/a` and `/a/` are different entries. Each key maps to a
//! [`OnceCell`], which gives single-flight behaviour: concurrent callers for
//! the same uncached key all await one pipeline run. A failed run leaves the
//! slot empty so the next waiter, or the next caller, tries again on it.

use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::Instant;
use tracing::debug;

use crate::assessment::CredibilityResult;

/// Bounds applied to the cache. The default keeps every entry for the
/// lifetime of the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Oldest entries are evicted once this many are stored.
    pub max_entries: Option<usize>,
    /// Entries older than this are treated as absent.
    pub ttl: Option<Duration>,
}

/// Whether a result came from the cache or from a fresh pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    result: Arc<CredibilityResult>,
    stored_at: Instant,
}

impl CacheEntry {
    fn new(result: CredibilityResult) -> Self {
        Self {
            result: Arc::new(result),
            stored_at: Instant::now(),
        }
    }
}

type Slot = Arc<OnceCell<CacheEntry>>;

#[derive(Debug, Default)]
pub struct CredibilityCache {
    entries: DashMap<String, Slot>,
    policy: CachePolicy,
}

/// Cache key for a raw URL string: trimmed and lowercased.
pub fn normalize_key(url: &str) -> String {
    url.trim().to_lowercase()
}

impl CredibilityCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: DashMap::new(),
            policy,
        }
    }

    /// Stored result for `url`, if any. In-flight runs count as absent.
    pub fn get(&self, url: &str) -> Option<Arc<CredibilityResult>> {
        let key = normalize_key(url);
        self.evict_if_expired(&key);

        let slot = self.entries.get(&key).map(|slot| Arc::clone(slot.value()))?;
        slot.get().map(|entry| Arc::clone(&entry.result))
    }

    /// Stores `result` under `url`, replacing whatever was there.
    pub fn put(&self, url: &str, result: CredibilityResult) {
        let key = normalize_key(url);
        let slot = Arc::new(OnceCell::new_with(Some(CacheEntry::new(result))));
        self.entries.insert(key, slot);
        self.enforce_capacity();
    }

    /// Returns the stored result for `url`, or runs `init` to produce and store one.
    ///
    /// Only one `init` runs per key at a time; concurrent callers wait for it
    /// and observe a [`CacheStatus::Hit`].
    pub async fn get_or_try_insert_with<F, Fut, E>(
        &self,
        url: &str,
        init: F,
    ) -> Result<(Arc<CredibilityResult>, CacheStatus), E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CredibilityResult, E>>,
    {
        let key = normalize_key(url);
        self.evict_if_expired(&key);

        // The map guard must not be held across the await below.
        let slot = {
            let entry = self
                .entries
                .entry(key.clone())
                .or_insert_with(|| Arc::new(OnceCell::new()));
            Arc::clone(entry.value())
        };

        let mut ran_pipeline = false;
        let outcome = slot
            .get_or_try_init(|| async {
                ran_pipeline = true;
                init().await.map(CacheEntry::new)
            })
            .await;

        match outcome {
            Ok(entry) => {
                let result = Arc::clone(&entry.result);
                if ran_pipeline {
                    debug!(key = %key, "stored credibility result");
                    self.enforce_capacity();
                    Ok((result, CacheStatus::Miss))
                } else {
                    Ok((result, CacheStatus::Hit))
                }
            }
            Err(err) => {
                // Only the map and this caller hold the slot: nobody is waiting on it.
                self.entries.remove_if(&key, |_, current| {
                    Arc::ptr_eq(current, &slot)
                        && !current.initialized()
                        && Arc::strong_count(current) == 2
                });
                Err(err)
            }
        }
    }

    /// Number of stored results (in-flight keys excluded).
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.policy
            .ttl
            .is_some_and(|ttl| entry.stored_at.elapsed() >= ttl)
    }

    fn evict_if_expired(&self, key: &str) {
        let Some(slot) = self.entries.get(key).map(|slot| Arc::clone(slot.value())) else {
            return;
        };
        let expired = slot.get().is_some_and(|entry| self.is_expired(entry));
        if expired {
            self.entries
                .remove_if(key, |_, current| Arc::ptr_eq(current, &slot));
            debug!(key = %key, "evicted expired credibility result");
        }
    }

    fn enforce_capacity(&self) {
        let Some(max_entries) = self.policy.max_entries else {
            return;
        };

        let mut stored = self.len();
        while stored > max_entries {
            let oldest = self
                .entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .value()
                        .get()
                        .map(|stored| (entry.key().clone(), stored.stored_at))
                })
                .min_by_key(|(_, stored_at)| *stored_at)
                .map(|(key, _)| key);

            let Some(key) = oldest else {
                break;
            };
            self.entries.remove(&key);
            stored -= 1;
            debug!(key = %key, "evicted oldest credibility result");
        }
    }
}
