//! User account store: named per-user options with explicit save.
//!
//! Options are untyped string values keyed by name; an absent option is a
//! distinct state from any stored value, which is what tri-state feature
//! preferences are built on. Writes are staged with [`UserStore::set_option`]
//! and made durable by [`UserStore::save`].

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Host user-account store.
pub trait UserStore: Send + Sync {
    /// Whether the user has a logged-in session.
    fn is_logged_in(&self, user: UserId) -> bool;

    /// Read a named option. `None` means the user never expressed a choice.
    fn option(&self, user: UserId, key: &str) -> Option<String>;

    /// Stage a named option write.
    fn set_option(&self, user: UserId, key: &str, value: &str);

    /// Persist staged option writes for the user.
    fn save(&self, user: UserId);

    /// Count users whose option `key` currently has exactly `value`.
    ///
    /// Full scan over account state; callers are expected to run this from
    /// background work, not request handling.
    fn count_with_option(&self, key: &str, value: &str) -> u64;
}

/// In-memory [`UserStore`] for tests.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    options: RwLock<HashMap<UserId, HashMap<String, String>>>,
    logged_in: RwLock<HashSet<UserId>>,
    saves: AtomicU64,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user with a logged-in session.
    pub fn add_user(&self, user: UserId) {
        self.logged_in.write().insert(user);
        self.options.write().entry(user).or_default();
    }

    /// Number of `save` calls observed, across all users.
    pub fn save_count(&self) -> u64 {
        self.saves.load(Ordering::Relaxed)
    }

    /// Snapshot a user's current options.
    pub fn options_snapshot(&self, user: UserId) -> HashMap<String, String> {
        self.options.read().get(&user).cloned().unwrap_or_default()
    }
}

impl UserStore for MemoryUserStore {
    fn is_logged_in(&self, user: UserId) -> bool {
        self.logged_in.read().contains(&user)
    }

    fn option(&self, user: UserId, key: &str) -> Option<String> {
        self.options.read().get(&user)?.get(key).cloned()
    }

    fn set_option(&self, user: UserId, key: &str, value: &str) {
        self.options
            .write()
            .entry(user)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    fn save(&self, _user: UserId) {
        self.saves.fetch_add(1, Ordering::Relaxed);
    }

    fn count_with_option(&self, key: &str, value: &str) -> u64 {
        self.options
            .read()
            .values()
            .filter(|opts| opts.get(key).map(String::as_str) == Some(value))
            .count() as u64
    }
}
