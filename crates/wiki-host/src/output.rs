//! Output page: client asset bundles and client-side configuration.

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// The page being rendered, as far as extensions can touch it.
pub trait OutputPage: Send + Sync {
    /// Request a client asset bundle. Idempotent: requesting the same
    /// module twice loads it once.
    fn add_module(&self, name: &str);

    /// Expose a read-only configuration value to client-side script.
    fn set_client_config(&self, key: &str, value: Value);
}

/// In-memory [`OutputPage`] recording what was requested.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    modules: Mutex<BTreeSet<String>>,
    config: Mutex<BTreeMap<String, Value>>,
}

impl MemoryOutput {
    /// Create an empty output page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a module was requested.
    pub fn has_module(&self, name: &str) -> bool {
        self.modules.lock().contains(name)
    }

    /// All requested modules.
    pub fn modules(&self) -> Vec<String> {
        self.modules.lock().iter().cloned().collect()
    }

    /// Read back an exposed config value.
    pub fn client_config(&self, key: &str) -> Option<Value> {
        self.config.lock().get(key).cloned()
    }
}

impl OutputPage for MemoryOutput {
    fn add_module(&self, name: &str) {
        self.modules.lock().insert(name.to_string());
    }

    fn set_client_config(&self, key: &str, value: Value) {
        self.config.lock().insert(key.to_string(), value);
    }
}
