//! Localized message lookup.
//!
//! Extensions refer to interface text by message key; the host resolves
//! keys to localized strings with positional `$1`-style parameters.

use std::collections::HashMap;

/// A message key, kept distinct from already-resolved display text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageKey(pub String);

impl MessageKey {
    /// Wrap a key string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Localized message resolution.
pub trait Messages: Send + Sync {
    /// Resolve a key to display text, substituting `$1`, `$2`, ... with
    /// the given arguments.
    fn text(&self, key: &str, args: &[String]) -> String;
}

/// In-memory [`Messages`] backed by a key → template map.
///
/// Unknown keys resolve to the bracketed key itself, which keeps missing
/// translations visible in test assertions.
#[derive(Debug, Default)]
pub struct MapMessages {
    templates: HashMap<String, String>,
}

impl MapMessages {
    /// An empty message map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message template.
    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.templates.insert(key.into(), template.into());
        self
    }
}

impl Messages for MapMessages {
    fn text(&self, key: &str, args: &[String]) -> String {
        let Some(template) = self.templates.get(key) else {
            return format!("({key})");
        };
        let mut out = template.clone();
        for (i, arg) in args.iter().enumerate() {
            out = out.replace(&format!("${}", i + 1), arg);
        }
        out
    }
}
