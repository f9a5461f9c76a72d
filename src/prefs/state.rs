//! Per-user feature state.
//!
//! A feature preference is tri-state: the user turned it on, turned it off,
//! or never touched it. "Never touched" is what auto-enrollment acts on, so
//! it must survive round-trips through the option store rather than collapse
//! to "off".

/// Stored option value for an enabled feature.
pub const OPTION_ENABLED: &str = "1";
/// Stored option value for an explicitly disabled feature.
pub const OPTION_DISABLED: &str = "0";

/// A user's stance on one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureState {
    /// Explicitly enabled.
    Enabled,
    /// Explicitly disabled.
    Disabled,
    /// No choice recorded.
    #[default]
    Unset,
}

impl FeatureState {
    /// Interpret a raw stored option value.
    ///
    /// Anything other than the two known values reads as [`Self::Unset`].
    pub fn from_option(raw: Option<&str>) -> Self {
        match raw {
            Some(OPTION_ENABLED) => Self::Enabled,
            Some(OPTION_DISABLED) => Self::Disabled,
            _ => Self::Unset,
        }
    }

    /// The stored representation, or `None` for [`Self::Unset`].
    pub fn as_option(self) -> Option<&'static str> {
        match self {
            Self::Enabled => Some(OPTION_ENABLED),
            Self::Disabled => Some(OPTION_DISABLED),
            Self::Unset => None,
        }
    }

    /// Whether the state is explicitly enabled.
    pub fn is_enabled(self) -> bool {
        self == Self::Enabled
    }

    /// Whether the user expressed any choice.
    pub fn is_set(self) -> bool {
        self != Self::Unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_roundtrip() {
        assert_eq!(FeatureState::from_option(Some("1")), FeatureState::Enabled);
        assert_eq!(FeatureState::from_option(Some("0")), FeatureState::Disabled);
        assert_eq!(FeatureState::from_option(None), FeatureState::Unset);
        assert_eq!(FeatureState::from_option(Some("yes")), FeatureState::Unset);

        assert_eq!(FeatureState::Enabled.as_option(), Some("1"));
        assert_eq!(FeatureState::Disabled.as_option(), Some("0"));
        assert_eq!(FeatureState::Unset.as_option(), None);
    }
}
