//! Feature declarations, as supplied by provider callbacks.
//!
//! A declaration is what an extension says about its beta feature: labels,
//! required links, gating and auto-enrollment rules. Declarations are
//! re-collected on every assembly; nothing here is persisted.

use std::collections::HashMap;
use wiki_host::MessageKey;

/// A link in a declaration: either a literal URL or a message key the host
/// resolves to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkRef {
    /// Literal URL.
    Url(String),
    /// Message key resolving to a URL.
    Message(MessageKey),
}

/// Structured requirements a feature may declare.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FeatureRequirements {
    /// Other feature keys that must be enabled before this one works.
    pub sub_features: Vec<String>,
    /// Browser user-agent patterns (regexes) the feature does not support.
    pub browser_blacklist: Vec<String>,
    /// Skins the feature supports; `None` means all skins.
    pub skins: Option<Vec<String>>,
}

impl FeatureRequirements {
    /// Whether nothing at all is declared.
    pub fn is_empty(&self) -> bool {
        self.sub_features.is_empty() && self.browser_blacklist.is_empty() && self.skins.is_none()
    }
}

/// One provider-supplied beta feature declaration.
///
/// `label` through `discussion_link` are required for the form design but
/// kept optional here; assembly validates them and fails the whole call on
/// a miss, naming the feature and field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureDeclaration {
    /// Unique feature key; also the persisted user option name.
    pub key: String,
    /// Display name message.
    pub label: Option<MessageKey>,
    /// Short description message.
    pub description: Option<MessageKey>,
    /// "More information" link.
    pub info_link: Option<LinkRef>,
    /// Discussion page link.
    pub discussion_link: Option<LinkRef>,
    /// Optional screenshot asset path.
    pub screenshot: Option<String>,
    /// When true, the named dependency gate must pass before the feature
    /// is offered.
    pub dependent: bool,
    /// Auto-enrollment group this feature belongs to.
    pub group: Option<String>,
    /// Trigger name: enabling this feature auto-enrolls features whose
    /// `group` matches.
    pub auto_enrollment: Option<String>,
    /// Structured requirements surfaced to the client runtime.
    pub requirements: Option<FeatureRequirements>,
}

impl FeatureDeclaration {
    /// Start a declaration for the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Set the label message.
    pub fn with_label(mut self, key: impl Into<MessageKey>) -> Self {
        self.label = Some(key.into());
        self
    }

    /// Set the description message.
    pub fn with_description(mut self, key: impl Into<MessageKey>) -> Self {
        self.description = Some(key.into());
        self
    }

    /// Set the information link.
    pub fn with_info_link(mut self, link: LinkRef) -> Self {
        self.info_link = Some(link);
        self
    }

    /// Set the discussion link.
    pub fn with_discussion_link(mut self, link: LinkRef) -> Self {
        self.discussion_link = Some(link);
        self
    }

    /// Set both links to literal URLs.
    pub fn with_links(self, info: impl Into<String>, discussion: impl Into<String>) -> Self {
        self.with_info_link(LinkRef::Url(info.into()))
            .with_discussion_link(LinkRef::Url(discussion.into()))
    }

    /// Set the screenshot asset path.
    pub fn with_screenshot(mut self, path: impl Into<String>) -> Self {
        self.screenshot = Some(path.into());
        self
    }

    /// Mark the feature as gated on a dependency check.
    pub fn dependent(mut self) -> Self {
        self.dependent = true;
        self
    }

    /// Join an auto-enrollment group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Declare an auto-enrollment trigger name.
    pub fn with_auto_enrollment(mut self, trigger: impl Into<String>) -> Self {
        self.auto_enrollment = Some(trigger.into());
        self
    }

    /// Attach structured requirements.
    pub fn with_requirements(mut self, requirements: FeatureRequirements) -> Self {
        self.requirements = Some(requirements);
        self
    }
}

/// Ordered declaration collection with assoc-array merge semantics:
/// re-inserting a key replaces the value but keeps the original position.
/// Provider registration order is otherwise preserved.
#[derive(Debug, Default)]
pub struct DeclarationSet {
    order: Vec<String>,
    by_key: HashMap<String, FeatureDeclaration>,
}

impl DeclarationSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a declaration under its own key. Last writer wins on
    /// collision; position does not move.
    pub fn insert(&mut self, decl: FeatureDeclaration) {
        let key = decl.key.clone();
        if self.by_key.insert(key.clone(), decl).is_none() {
            self.order.push(key);
        }
    }

    /// Look up a declaration.
    pub fn get(&self, key: &str) -> Option<&FeatureDeclaration> {
        self.by_key.get(key)
    }

    /// Declared keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Declarations, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FeatureDeclaration> {
        self.order.iter().filter_map(|k| self.by_key.get(k))
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no declarations were collected.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
