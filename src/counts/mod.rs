//! Per-feature adoption counts: durable table, TTL cache, save-time deltas.
//!
//! Counts are approximate. The durable table is authoritative and
//! recomputed by a background job; the cache serves requests and absorbs ±1
//! adjustments as users save. Nothing here is transactional: drift between
//! the tiers heals at the next TTL expiry, when a full refresh repopulates
//! the cache from the table.

mod job;

pub use job::UpdateUserCountsJob;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use wiki_host::{CacheStore, CountStore, JobQueue};

use crate::prefs::{OPTION_DISABLED, OPTION_ENABLED};

fn cache_key(feature: &str) -> String {
    format!("betafeatures:usercounts:{feature}")
}

/// Approximate per-feature user counts over host cache + durable storage.
pub struct UserCounts {
    cache: Arc<dyn CacheStore>,
    durable: Arc<dyn CountStore>,
    jobs: Arc<dyn JobQueue>,
    ttl: Duration,
}

impl UserCounts {
    /// Wire the count service to its host collaborators.
    pub fn new(
        cache: Arc<dyn CacheStore>,
        durable: Arc<dyn CountStore>,
        jobs: Arc<dyn JobQueue>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            durable,
            jobs,
            ttl,
        }
    }

    /// Fetch counts for the requested features.
    ///
    /// All-or-nothing: if any single key misses the cache, every cached
    /// read is discarded and the whole set is served from the durable
    /// table instead. A partially-cached count map is never returned.
    pub fn get_counts(&self, features: &[String]) -> HashMap<String, i64> {
        let mut counts = HashMap::new();

        for feature in features {
            match self.cache.get(&cache_key(feature)) {
                Some(count) => {
                    counts.insert(feature.clone(), count);
                }
                None => {
                    debug!(feature = %feature, "count cache miss, refreshing all");
                    return self.refresh(features);
                }
            }
        }

        counts
    }

    /// Serve counts from the durable table and repopulate the cache.
    ///
    /// Also enqueues the recount job, unless one is already pending: the
    /// queue holds at most one refresh at a time, and since the cache was
    /// just repopulated for a full TTL, enqueues happen at most once per
    /// expiry.
    pub fn refresh(&self, features: &[String]) -> HashMap<String, i64> {
        if !self.jobs.has_pending(UpdateUserCountsJob::KIND) {
            self.jobs
                .push(UpdateUserCountsJob::new(features.to_vec()).to_queued());
            debug!("user count recount job enqueued");
        }

        let mut counts = HashMap::new();
        for row in self.durable.read_all() {
            self.cache.set(&cache_key(&row.feature), row.number, self.ttl);
            counts.insert(row.feature, row.number);
        }
        counts
    }

    /// Apply save-time count deltas for one user's preference save.
    ///
    /// Only real transitions count: an unchanged value is skipped, and so
    /// is unset→disabled (declining a feature the user never had is not an
    /// adoption change). Enables increment, everything else decrements.
    ///
    /// Adjustments are unsynchronized against concurrent saves and TTL
    /// refreshes; transient drift (including negative counts) is accepted
    /// until the next full refresh. Flagged for product sign-off rather
    /// than serialized here.
    pub fn adjust_on_save(
        &self,
        features: &[String],
        old_options: &HashMap<String, String>,
        new_options: &HashMap<String, String>,
    ) {
        for feature in features {
            let old = old_options.get(feature).map(String::as_str);
            let new = new_options.get(feature).map(String::as_str);

            if old == new || (old.is_none() && new == Some(OPTION_DISABLED)) {
                continue;
            }

            let key = cache_key(feature);
            if new == Some(OPTION_ENABLED) {
                self.cache.incr(&key);
            } else {
                self.cache.decr(&key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiki_host::{MemoryCache, MemoryCountStore, MemoryJobQueue};

    fn service(
        ttl: Duration,
    ) -> (
        UserCounts,
        Arc<MemoryCache>,
        Arc<MemoryCountStore>,
        Arc<MemoryJobQueue>,
    ) {
        let cache = Arc::new(MemoryCache::new());
        let durable = Arc::new(MemoryCountStore::new());
        let jobs = Arc::new(MemoryJobQueue::new());
        let counts = UserCounts::new(cache.clone(), durable.clone(), jobs.clone(), ttl);
        (counts, cache, durable, jobs)
    }

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_all_cached_serves_from_cache() {
        let (counts, cache, durable, jobs) = service(Duration::from_secs(60));
        durable.upsert("ft1", 999);
        cache.set("betafeatures:usercounts:ft1", 5, Duration::from_secs(60));
        cache.set("betafeatures:usercounts:ft2", 2, Duration::from_secs(60));

        let result = counts.get_counts(&keys(&["ft1", "ft2"]));
        assert_eq!(result.get("ft1"), Some(&5));
        assert_eq!(result.get("ft2"), Some(&2));
        // Cache was complete: no refresh, no job.
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_single_miss_falls_through_entirely() {
        let (counts, cache, durable, jobs) = service(Duration::from_secs(60));
        durable.upsert("ft1", 10);
        durable.upsert("ft2", 20);
        // ft1 cached with a stale value; ft2 missing.
        cache.set("betafeatures:usercounts:ft1", 5, Duration::from_secs(60));

        let result = counts.get_counts(&keys(&["ft1", "ft2"]));
        // The cached ft1 read is discarded along with the miss.
        assert_eq!(result.get("ft1"), Some(&10));
        assert_eq!(result.get("ft2"), Some(&20));
        assert_eq!(jobs.len(), 1);

        // Refresh repopulated the cache.
        assert_eq!(cache.get("betafeatures:usercounts:ft1"), Some(10));
        assert_eq!(cache.get("betafeatures:usercounts:ft2"), Some(20));
    }

    #[test]
    fn test_refresh_job_is_single_flight() {
        let (counts, _cache, _durable, jobs) = service(Duration::from_secs(60));
        counts.refresh(&keys(&["ft1"]));
        counts.refresh(&keys(&["ft1"]));
        assert_eq!(jobs.len(), 1);
    }

    #[test]
    fn test_adjust_on_save_transitions() {
        let (counts, cache, _durable, _jobs) = service(Duration::from_secs(60));
        cache.set("betafeatures:usercounts:ft1", 3, Duration::from_secs(60));
        cache.set("betafeatures:usercounts:ft2", 3, Duration::from_secs(60));
        cache.set("betafeatures:usercounts:ft3", 3, Duration::from_secs(60));
        cache.set("betafeatures:usercounts:ft4", 3, Duration::from_secs(60));

        let features = keys(&["ft1", "ft2", "ft3", "ft4"]);
        let old: HashMap<String, String> = [("ft2", "1"), ("ft3", "1")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let new: HashMap<String, String> = [("ft1", "1"), ("ft2", "1"), ("ft3", "0"), ("ft4", "0")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        counts.adjust_on_save(&features, &old, &new);

        // ft1: unset -> enabled, incremented.
        assert_eq!(cache.get("betafeatures:usercounts:ft1"), Some(4));
        // ft2: unchanged, untouched.
        assert_eq!(cache.get("betafeatures:usercounts:ft2"), Some(3));
        // ft3: enabled -> disabled, decremented.
        assert_eq!(cache.get("betafeatures:usercounts:ft3"), Some(2));
        // ft4: unset -> disabled is not a transition.
        assert_eq!(cache.get("betafeatures:usercounts:ft4"), Some(3));
    }

    #[test]
    fn test_adjust_tolerates_missing_cache_entries() {
        let (counts, cache, _durable, _jobs) = service(Duration::from_secs(60));

        let features = keys(&["ft1"]);
        let old = HashMap::new();
        let new: HashMap<String, String> = [("ft1".to_string(), "1".to_string())].into();

        // No cache entry: the increment is silently lost, never backfilled.
        counts.adjust_on_save(&features, &old, &new);
        assert_eq!(cache.get("betafeatures:usercounts:ft1"), None);
    }
}
