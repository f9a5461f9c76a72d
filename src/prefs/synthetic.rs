//! Fixed fields inserted ahead of any feature card.
//!
//! These render unconditionally and in this order regardless of what
//! providers declare: popup dismiss, section description, global
//! auto-enroll, then a separator before the features themselves.

use wiki_host::MessageKey;

use super::fields::{FieldKind, PreferenceField, ToggleParams};

/// Option name for the global "enroll me in everything" toggle.
pub const AUTO_ENROLL_ALL: &str = "beta-feature-auto-enroll";

/// Option name for dismissing the first-visit popup.
pub const POPUP_DISABLE: &str = "betafeatures-popup-disable";

/// Field key for the descriptive section block.
pub const SECTION_DESC: &str = "betafeatures-description";

/// Field key for the separator between synthetic fields and features.
pub const SECTION_BREAK: &str = "betafeatures-break";

/// Build the synthetic fields, parameterized by how many features follow.
pub fn synthetic_fields(feature_count: usize) -> Vec<PreferenceField> {
    vec![
        PreferenceField::new(
            POPUP_DISABLE,
            FieldKind::Toggle(ToggleParams {
                label: MessageKey::new("betafeatures-popup-disable"),
                description: Some(MessageKey::new("betafeatures-popup-disable-desc")),
                invert: false,
            }),
        ),
        PreferenceField::new(
            SECTION_DESC,
            FieldKind::Info {
                message: MessageKey::new("betafeatures-section-desc"),
                args: vec![feature_count.to_string()],
            },
        ),
        PreferenceField::new(
            AUTO_ENROLL_ALL,
            FieldKind::Toggle(ToggleParams {
                label: MessageKey::new("betafeatures-auto-enroll"),
                description: Some(MessageKey::new("betafeatures-auto-enroll-desc")),
                invert: false,
            }),
        ),
        PreferenceField::new(SECTION_BREAK, FieldKind::Break),
    ]
}
