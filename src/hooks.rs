//! Host hook entry points.
//!
//! [`BetaFeatures`] is the plugin object a site wires into its hook
//! registry: one method per host hook, each a thin adapter between host
//! calling conventions and the engine underneath. Enrollment persistence
//! lives here, not in assembly: the engine decides, this layer writes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use wiki_host::{
    CacheStore, CountStore, JobQueue, Messages, NavLink, OutputPage, SchemaRegistrar, UserId,
    UserStore,
};

use crate::config::BetaConfig;
use crate::counts::UserCounts;
use crate::error::PreferenceResult;
use crate::nav::insert_nav_link;
use crate::prefs::{
    Assembly, AssemblyContext, FeatureState, PreferenceRegistry, OPTION_ENABLED, POPUP_DISABLE,
};

/// Client asset bundle for the first-visit popup.
pub const POPUP_MODULE: &str = "ext.betaFeatures.popup";

/// Client configuration key carrying feature requirement metadata.
pub const CLIENT_CONFIG_KEY: &str = "betaFeatures";

/// Navigation key of the spliced-in beta link.
pub const NAV_KEY: &str = "betafeatures";

/// The plugin: configuration, registries, and count service in one place.
pub struct BetaFeatures {
    config: BetaConfig,
    registry: PreferenceRegistry,
    counts: UserCounts,
    store: Arc<dyn UserStore>,
    messages: Arc<dyn Messages>,
}

impl BetaFeatures {
    /// Wire the plugin to its host collaborators.
    pub fn new(
        config: BetaConfig,
        store: Arc<dyn UserStore>,
        messages: Arc<dyn Messages>,
        cache: Arc<dyn CacheStore>,
        durable: Arc<dyn CountStore>,
        jobs: Arc<dyn JobQueue>,
    ) -> Self {
        let ttl = Duration::from_secs(config.count_cache_ttl);
        let counts = UserCounts::new(cache, durable, jobs, ttl);
        Self {
            config,
            registry: PreferenceRegistry::new(),
            counts,
            store,
            messages,
        }
    }

    /// The provider/gate registry, for extensions to register into.
    pub fn registry_mut(&mut self) -> &mut PreferenceRegistry {
        &mut self.registry
    }

    /// Site configuration.
    pub fn config(&self) -> &BetaConfig {
        &self.config
    }

    /// The count service.
    pub fn counts(&self) -> &UserCounts {
        &self.counts
    }

    /// Preferences hook: assemble the beta section for a user.
    ///
    /// Applies and persists any auto-enrollments the engine decided on, so
    /// the user's stored state matches the form about to render.
    pub fn get_preferences(&self, user: UserId, skin: &str) -> PreferenceResult<Assembly> {
        let ctx = AssemblyContext {
            user,
            store: self.store.as_ref(),
            messages: self.messages.as_ref(),
            skin,
        };
        let assembly = self.registry.assemble(&ctx, &self.counts, &self.config)?;

        if !assembly.enrollments.is_empty() {
            for key in &assembly.enrollments {
                self.store.set_option(user, key, OPTION_ENABLED);
            }
            self.store.save(user);
            info!(user = %user, enrolled = assembly.enrollments.len(),
                "auto-enrolled user into beta features");
        }

        Ok(assembly)
    }

    /// Options-saved hook: fold one user's save into the cached counts.
    ///
    /// `old_options` is the host's snapshot of the user's options before
    /// the save; current values are read back from the store.
    pub fn save_preferences(&self, user: UserId, old_options: &HashMap<String, String>) {
        let features = self.registry.declared_keys(user);
        let new_options: HashMap<String, String> = features
            .iter()
            .filter_map(|key| {
                self.store
                    .option(user, key)
                    .map(|value| (key.clone(), value))
            })
            .collect();

        self.counts
            .adjust_on_save(&features, old_options, &new_options);
    }

    /// Personal-links hook: splice the beta link in after the configured
    /// anchor. Anonymous sessions get nothing.
    pub fn personal_urls(&self, links: &mut Vec<NavLink>, user: UserId, href: &str, active: bool) {
        if !self.store.is_logged_in(user) {
            return;
        }

        let mut entry = NavLink::new(
            NAV_KEY,
            self.messages.text("betafeatures-toplink", &[]),
            href,
        );
        entry.active = active;
        insert_nav_link(links, &self.config.nav_anchor, entry);
    }

    /// Client-config hook: expose the requirement metadata from an
    /// assembly to client-side script, read-only.
    pub fn export_client_config(&self, assembly: &Assembly, out: &dyn OutputPage) {
        out.set_client_config(CLIENT_CONFIG_KEY, assembly.metadata_json());
    }

    /// Page-display hook: load the popup bundle unless the site disabled
    /// it or the user dismissed it.
    pub fn load_popup(&self, user: UserId, out: &dyn OutputPage) {
        if !self.config.popup_enabled {
            return;
        }
        let dismissed =
            FeatureState::from_option(self.store.option(user, POPUP_DISABLE).as_deref())
                .is_enabled();
        if !dismissed {
            out.add_module(POPUP_MODULE);
        }
    }

    /// Schema hook: declare the durable count table.
    pub fn schema_update(&self, registrar: &mut dyn SchemaRegistrar) {
        crate::schema::register_schema(registrar);
    }
}
