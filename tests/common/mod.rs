//! Integration test common infrastructure.
//!
//! Builds a plugin wired to in-memory host collaborators, plus the shared
//! feature fixtures the auto-enrollment scenarios use.

// Not every test binary touches every helper.
#![allow(dead_code)]

use std::sync::Arc;

use betafeatures::prefs::{DeclarationSet, FeatureDeclaration};
use betafeatures::{BetaConfig, BetaFeatures};
use wiki_host::{
    MapMessages, MemoryCache, MemoryCountStore, MemoryJobQueue, MemoryUserStore, UserId,
};

/// A wiki in a box: the plugin plus handles to every memory collaborator.
pub struct TestWiki {
    pub plugin: BetaFeatures,
    pub store: Arc<MemoryUserStore>,
    pub cache: Arc<MemoryCache>,
    pub durable: Arc<MemoryCountStore>,
    pub jobs: Arc<MemoryJobQueue>,
}

impl TestWiki {
    /// Build a wiki with the given site config.
    pub fn new(config: BetaConfig) -> Self {
        init_tracing();

        let store = Arc::new(MemoryUserStore::new());
        let cache = Arc::new(MemoryCache::new());
        let durable = Arc::new(MemoryCountStore::new());
        let jobs = Arc::new(MemoryJobQueue::new());

        let messages = MapMessages::new()
            .with("betafeatures-toplink", "Beta")
            .with("betafeatures-count", "$1 users")
            .with("nullish", "Nullish")
            .with("something else", "Something Else")
            .with("something even more else", "Something Even More Else");

        let plugin = BetaFeatures::new(
            config,
            store.clone(),
            Arc::new(messages),
            cache.clone(),
            durable.clone(),
            jobs.clone(),
        );

        Self {
            plugin,
            store,
            cache,
            durable,
            jobs,
        }
    }

    /// Build a wiki with default config.
    pub fn with_defaults() -> Self {
        Self::new(BetaConfig::default())
    }

    /// Register a logged-in user.
    pub fn user(&self, id: u64) -> UserId {
        let user = UserId(id);
        self.store.add_user(user);
        user
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// The three-feature fixture: a trigger feature, a group member that is
/// itself a trigger for a second group, and a member of that second group.
pub fn test_declarations() -> Vec<FeatureDeclaration> {
    vec![
        FeatureDeclaration::new("unittest-all")
            .with_label("nullish")
            .with_description("nullish")
            .with_links(
                "https://example.org/wiki/BetaFeatures",
                "https://example.org/wiki/Talk:BetaFeatures",
            )
            .with_auto_enrollment("unittest"),
        FeatureDeclaration::new("unittest-ft1")
            .with_label("something else")
            .with_description("something even differenter")
            .with_links(
                "https://example.org/wiki/Auto-enrollment",
                "https://example.org/wiki/Talk:Auto-enrollment",
            )
            .with_group("unittest")
            .with_auto_enrollment("unittest2"),
        FeatureDeclaration::new("unittest-ft2")
            .with_label("something even more else")
            .with_description("something even more differenter")
            .with_links(
                "https://example.org/wiki/Auto-enrollment2",
                "https://example.org/wiki/Talk:Auto-enrollment2",
            )
            .with_group("unittest2"),
    ]
}

/// Register a provider declaring the shared fixture features.
pub fn register_test_features(plugin: &mut BetaFeatures) {
    plugin
        .registry_mut()
        .register_provider(|_user: UserId, decls: &mut DeclarationSet| {
            for decl in test_declarations() {
                decls.insert(decl);
            }
        });
}
