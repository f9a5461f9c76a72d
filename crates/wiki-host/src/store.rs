//! Durable per-feature count table.
//!
//! One row per feature key holding the authoritative adoption count.
//! Rows are read in bulk and written only by background recomputation;
//! request-path code never writes here.

use parking_lot::RwLock;
use std::collections::BTreeMap;

/// One durable count row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRow {
    /// Feature key.
    pub feature: String,
    /// Current count of users with the feature enabled.
    pub number: i64,
}

/// Durable count storage.
pub trait CountStore: Send + Sync {
    /// Read every stored row.
    fn read_all(&self) -> Vec<CountRow>;

    /// Insert or replace the row for a feature.
    fn upsert(&self, feature: &str, number: i64);
}

/// In-memory [`CountStore`] for tests. Rows iterate in key order.
#[derive(Debug, Default)]
pub struct MemoryCountStore {
    rows: RwLock<BTreeMap<String, i64>>,
}

impl MemoryCountStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CountStore for MemoryCountStore {
    fn read_all(&self) -> Vec<CountRow> {
        self.rows
            .read()
            .iter()
            .map(|(feature, number)| CountRow {
                feature: feature.clone(),
                number: *number,
            })
            .collect()
    }

    fn upsert(&self, feature: &str, number: i64) {
        self.rows.write().insert(feature.to_string(), number);
    }
}
