//! Background recount of per-feature adoption.
//!
//! The job carries the feature list as JSON params through the host queue,
//! rescans all user option state, and upserts the durable rows. It is the
//! only writer of the durable table. Deduplication happens at enqueue time;
//! running twice is wasteful but harmless.

use serde::{Deserialize, Serialize};
use tracing::info;
use wiki_host::{CountStore, QueuedJob, UserStore};

use crate::prefs::OPTION_ENABLED;

#[derive(Debug, Serialize, Deserialize)]
struct JobParams {
    prefs: Vec<String>,
}

/// Recomputes durable per-feature user counts from option-state scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserCountsJob {
    features: Vec<String>,
}

impl UpdateUserCountsJob {
    /// Job kind tag used for queue routing and pending checks.
    pub const KIND: &'static str = "updateBetaFeaturesUserCounts";

    /// Create a job covering the given features.
    pub fn new(features: Vec<String>) -> Self {
        Self { features }
    }

    /// The features this job recounts.
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Serialize into a host queue description.
    pub fn to_queued(&self) -> QueuedJob {
        let params = serde_json::to_value(JobParams {
            prefs: self.features.clone(),
        })
        .unwrap_or_default();
        QueuedJob::new(Self::KIND, params)
    }

    /// Deserialize from a host queue description of the right kind.
    pub fn from_queued(job: &QueuedJob) -> Option<Self> {
        if job.kind != Self::KIND {
            return None;
        }
        let params: JobParams = serde_json::from_value(job.params.clone()).ok()?;
        Some(Self::new(params.prefs))
    }

    /// Rescan option state and upsert the durable count rows.
    pub fn run(&self, users: &dyn UserStore, store: &dyn CountStore) {
        for feature in &self.features {
            let number = users.count_with_option(feature, OPTION_ENABLED) as i64;
            store.upsert(feature, number);
        }
        info!(features = self.features.len(), "user counts recomputed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiki_host::{MemoryCountStore, MemoryUserStore, UserId};

    #[test]
    fn test_queue_description_roundtrip() {
        let job = UpdateUserCountsJob::new(vec!["ft1".to_string(), "ft2".to_string()]);
        let queued = job.to_queued();
        assert_eq!(queued.kind, "updateBetaFeaturesUserCounts");

        let restored = UpdateUserCountsJob::from_queued(&queued).expect("params parse");
        assert_eq!(restored, job);
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let queued = QueuedJob::new("somethingElse", serde_json::json!({}));
        assert!(UpdateUserCountsJob::from_queued(&queued).is_none());
    }

    #[test]
    fn test_run_recounts_enabled_users() {
        let users = MemoryUserStore::new();
        for id in 1..=4 {
            users.add_user(UserId(id));
        }
        users.set_option(UserId(1), "ft1", "1");
        users.set_option(UserId(2), "ft1", "1");
        users.set_option(UserId(3), "ft1", "0");

        let store = MemoryCountStore::new();
        // A stale row gets replaced by the rescan.
        store.upsert("ft1", 77);

        UpdateUserCountsJob::new(vec!["ft1".to_string(), "ft2".to_string()]).run(&users, &store);

        let rows = store.read_all();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].feature, "ft1");
        assert_eq!(rows[0].number, 2);
        assert_eq!(rows[1].feature, "ft2");
        assert_eq!(rows[1].number, 0);
    }
}
