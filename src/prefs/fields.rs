//! Assembled preference field descriptions.
//!
//! Assembly emits data, not markup: an ordered list of [`PreferenceField`]
//! entries the host's form layer renders (the feature cards through
//! [`crate::field`]). Keys double as form input names and option names.

use wiki_host::MessageKey;

use super::declaration::LinkRef;

/// One entry in the assembled beta preferences section, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceField {
    /// Field key; for feature and toggle fields this is also the persisted
    /// option name.
    pub key: String,
    /// What kind of field this is.
    pub kind: FieldKind,
}

impl PreferenceField {
    /// Shorthand constructor.
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }
}

/// The kinds of field the beta section contains.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A beta feature card.
    Feature(FeatureFieldParams),
    /// A plain two-state toggle (popup dismiss, global auto-enroll).
    Toggle(ToggleParams),
    /// A static descriptive block.
    Info {
        /// Message for the block body.
        message: MessageKey,
        /// Positional message arguments.
        args: Vec<String>,
    },
    /// A visual separator.
    Break,
}

/// Validated parameters for one feature card.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureFieldParams {
    /// Display name message.
    pub label: MessageKey,
    /// Description message.
    pub description: MessageKey,
    /// "More information" link.
    pub info_link: LinkRef,
    /// Discussion page link.
    pub discussion_link: LinkRef,
    /// Optional screenshot asset path.
    pub screenshot: Option<String>,
    /// Approximate count of users with the feature enabled, when known.
    pub user_count: Option<i64>,
}

/// Parameters for a synthetic toggle field.
#[derive(Debug, Clone, PartialEq)]
pub struct ToggleParams {
    /// Display name message.
    pub label: MessageKey,
    /// Description message.
    pub description: Option<MessageKey>,
    /// Whether the stored value is the inverse of the displayed checkbox.
    pub invert: bool,
}
