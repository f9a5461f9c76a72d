//! Preference assembly: collect declarations, gate, validate, auto-enroll.
//!
//! The engine is request-scoped and pure with respect to the user store: it
//! reads current option state but never writes. Enrollment decisions come
//! back as an explicit list the hook layer applies and persists, which keeps
//! the engine testable against a bare store snapshot.
//!
//! Pass order is contractual. The trigger index is fully built before any
//! auto-enrollment decision, and requirement metadata is computed after all
//! enrollments so it reflects the state a user will actually be in once the
//! page renders.

use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};
use wiki_host::{Messages, UserId, UserStore};

use crate::config::BetaConfig;
use crate::counts::UserCounts;
use crate::error::{PreferenceError, PreferenceResult};

use super::declaration::{DeclarationSet, FeatureDeclaration};
use super::fields::{FeatureFieldParams, FieldKind, PreferenceField};
use super::state::FeatureState;
use super::synthetic::{self, AUTO_ENROLL_ALL};

/// Supplies feature declarations for one assembly pass.
///
/// Called once per assembly; providers see the user and may declare
/// different features for different users. Registration order across
/// providers is whatever order they were registered in, and later
/// declarations overwrite earlier ones on key collision.
pub trait FeatureProvider: Send + Sync {
    /// Add declarations to the set.
    fn register(&self, user: UserId, decls: &mut DeclarationSet);
}

impl<F> FeatureProvider for F
where
    F: Fn(UserId, &mut DeclarationSet) + Send + Sync,
{
    fn register(&self, user: UserId, decls: &mut DeclarationSet) {
        self(user, decls)
    }
}

/// A dependency gate: a named predicate that must pass before the feature
/// under its key is offered at all.
pub type Gate = Box<dyn Fn() -> bool + Send + Sync>;

/// Gates keyed by feature key.
#[derive(Default)]
pub struct GateMap {
    gates: HashMap<String, Gate>,
}

impl GateMap {
    /// Register a gate for a feature key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        gate: impl Fn() -> bool + Send + Sync + 'static,
    ) {
        self.gates.insert(key.into(), Box::new(gate));
    }

    fn get(&self, key: &str) -> Option<&Gate> {
        self.gates.get(key)
    }
}

/// Populates the gate map for one assembly pass.
pub trait GateProvider: Send + Sync {
    /// Add gates to the map.
    fn register(&self, gates: &mut GateMap);
}

impl<F> GateProvider for F
where
    F: Fn(&mut GateMap) + Send + Sync,
{
    fn register(&self, gates: &mut GateMap) {
        self(gates)
    }
}

/// Per-request inputs to assembly.
pub struct AssemblyContext<'a> {
    /// The user the preferences page is for.
    pub user: UserId,
    /// The host user store (read-only during assembly).
    pub store: &'a dyn UserStore,
    /// Localized message lookup, for requirement display labels.
    pub messages: &'a dyn Messages,
    /// The skin rendering the current page.
    pub skin: &'a str,
}

/// Client-facing requirement metadata for one feature.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FeatureMeta {
    /// Display labels of required features the user has not enabled yet.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    /// Browser user-agent patterns the feature does not support.
    #[serde(rename = "blacklist", skip_serializing_if = "Vec::is_empty")]
    pub browser_blacklist: Vec<String>,
    /// Set when the current skin is outside the feature's skin whitelist.
    #[serde(rename = "skin-not-supported", skip_serializing_if = "std::ops::Not::not")]
    pub skin_not_supported: bool,
}

/// The result of one assembly pass.
#[derive(Debug)]
pub struct Assembly {
    /// Preference fields in display order: synthetic fields first, then
    /// feature cards in provider collection order.
    pub fields: Vec<PreferenceField>,
    /// Requirement metadata per offered feature; `None` when the feature
    /// has nothing to report.
    pub metadata: HashMap<String, Option<FeatureMeta>>,
    /// Feature keys to enroll (set enabled) for this user, in decision
    /// order. The caller applies and persists these.
    pub enrollments: Vec<String>,
}

impl Assembly {
    /// Look up an emitted field by key.
    pub fn field(&self, key: &str) -> Option<&PreferenceField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// The metadata map as a JSON value for the client configuration
    /// channel.
    pub fn metadata_json(&self) -> serde_json::Value {
        serde_json::to_value(&self.metadata).unwrap_or_default()
    }
}

/// Registry of feature providers and dependency gates.
///
/// The host's hook dispatch is modeled as this explicit registry: the
/// plugin owns one, extensions register into it, and assembly consumes it
/// as a capability rather than reaching for ambient dispatch.
#[derive(Default)]
pub struct PreferenceRegistry {
    providers: Vec<Box<dyn FeatureProvider>>,
    gate_providers: Vec<Box<dyn GateProvider>>,
}

impl PreferenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a feature declaration provider.
    pub fn register_provider(&mut self, provider: impl FeatureProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Register a dependency gate provider.
    pub fn register_gates(&mut self, provider: impl GateProvider + 'static) {
        self.gate_providers.push(Box::new(provider));
    }

    fn collect_declarations(&self, user: UserId) -> DeclarationSet {
        let mut decls = DeclarationSet::new();
        for provider in &self.providers {
            provider.register(user, &mut decls);
        }
        decls
    }

    /// Keys of every feature providers declare for this user, in
    /// collection order. Used by the save path, which needs to know which
    /// options are feature options without running a full assembly.
    pub fn declared_keys(&self, user: UserId) -> Vec<String> {
        self.collect_declarations(user)
            .keys()
            .map(str::to_string)
            .collect()
    }

    fn collect_gates(&self) -> GateMap {
        let mut gates = GateMap::default();
        for provider in &self.gate_providers {
            provider.register(&mut gates);
        }
        gates
    }

    /// Assemble the beta preferences section for one user.
    ///
    /// Fails on the first declaration missing a required field; no partial
    /// field set is ever returned.
    pub fn assemble(
        &self,
        ctx: &AssemblyContext<'_>,
        counts: &UserCounts,
        config: &BetaConfig,
    ) -> PreferenceResult<Assembly> {
        let decls = self.collect_declarations(ctx.user);

        // Synthetic fields render ahead of every feature, unconditionally.
        let mut fields = synthetic::synthetic_fields(decls.len());

        let keys: Vec<String> = decls.keys().map(str::to_string).collect();
        let count_map = counts.get_counts(&keys);

        let gates = self.collect_gates();

        // Trigger index must be complete before any enrollment decision.
        let mut triggers: HashMap<&str, &str> = HashMap::new();
        for decl in decls.iter() {
            if let Some(trigger) = &decl.auto_enrollment {
                triggers.insert(trigger.as_str(), decl.key.as_str());
            }
        }

        let auto_enroll_all = FeatureState::from_option(
            ctx.store.option(ctx.user, AUTO_ENROLL_ALL).as_deref(),
        )
        .is_enabled();

        // Enrollments made this pass overlay the stored state, so a group
        // member sees its trigger's enrollment from the same pass.
        let mut enrolled: HashSet<String> = HashSet::new();
        let mut enrollments: Vec<String> = Vec::new();
        let mut offered: Vec<&FeatureDeclaration> = Vec::new();

        let state_of = |key: &str, enrolled: &HashSet<String>| -> FeatureState {
            if enrolled.contains(key) {
                FeatureState::Enabled
            } else {
                FeatureState::from_option(ctx.store.option(ctx.user, key).as_deref())
            }
        };

        for decl in decls.iter() {
            if let Some(allow) = &config.allow_list
                && !allow.contains(&decl.key)
            {
                debug!(feature = %decl.key, "feature not on allow list, skipped");
                continue;
            }

            if decl.dependent {
                // An unregistered gate passes.
                let pass = gates.get(&decl.key).map(|gate| gate()).unwrap_or(true);
                if !pass {
                    debug!(feature = %decl.key, "dependency gate failed, feature skipped");
                    continue;
                }
            }

            let mut params = validate(decl)?;
            params.user_count = count_map.get(&decl.key).copied();
            fields.push(PreferenceField::new(
                decl.key.clone(),
                FieldKind::Feature(params),
            ));
            offered.push(decl);

            let auto_enroll = auto_enroll_all
                || decl.group.as_deref().is_some_and(|group| {
                    triggers
                        .get(group)
                        .is_some_and(|&trigger_key| state_of(trigger_key, &enrolled).is_enabled())
                });

            if auto_enroll && !state_of(&decl.key, &enrolled).is_set() {
                enrolled.insert(decl.key.clone());
                enrollments.push(decl.key.clone());
            }
        }

        // Requirement labels reflect post-enrollment state.
        let mut metadata = HashMap::new();
        for decl in &offered {
            metadata.insert(decl.key.clone(), build_meta(decl, &decls, ctx, &enrolled));
        }

        debug!(
            features = offered.len(),
            enrollments = enrollments.len(),
            "beta preferences assembled"
        );

        Ok(Assembly {
            fields,
            metadata,
            enrollments,
        })
    }
}

fn validate(decl: &FeatureDeclaration) -> PreferenceResult<FeatureFieldParams> {
    let missing = |field: &'static str| PreferenceError::MissingField {
        feature: decl.key.clone(),
        field,
    };

    Ok(FeatureFieldParams {
        label: decl.label.clone().ok_or_else(|| missing("label"))?,
        description: decl.description.clone().ok_or_else(|| missing("description"))?,
        info_link: decl.info_link.clone().ok_or_else(|| missing("info-link"))?,
        discussion_link: decl
            .discussion_link
            .clone()
            .ok_or_else(|| missing("discussion-link"))?,
        screenshot: decl.screenshot.clone(),
        user_count: None,
    })
}

fn build_meta(
    decl: &FeatureDeclaration,
    decls: &DeclarationSet,
    ctx: &AssemblyContext<'_>,
    enrolled: &HashSet<String>,
) -> Option<FeatureMeta> {
    let reqs = decl.requirements.as_ref()?;
    let mut meta = FeatureMeta::default();

    for required in &reqs.sub_features {
        let state = if enrolled.contains(required) {
            FeatureState::Enabled
        } else {
            FeatureState::from_option(ctx.store.option(ctx.user, required).as_deref())
        };
        if state.is_enabled() {
            continue;
        }
        // Fall back to the bare key for requirements nothing declared.
        let label = decls
            .get(required)
            .and_then(|d| d.label.as_ref())
            .map(|l| ctx.messages.text(l.as_str(), &[]))
            .unwrap_or_else(|| required.clone());
        meta.requirements.push(label);
    }

    for pattern in &reqs.browser_blacklist {
        match Regex::new(pattern) {
            Ok(_) => meta.browser_blacklist.push(pattern.clone()),
            Err(error) => {
                warn!(feature = %decl.key, pattern = %pattern, %error,
                    "invalid browser blacklist pattern dropped");
            }
        }
    }

    if let Some(skins) = &reqs.skins
        && !skins.iter().any(|s| s == ctx.skin)
    {
        meta.skin_not_supported = true;
    }

    if meta == FeatureMeta::default() {
        None
    } else {
        Some(meta)
    }
}
