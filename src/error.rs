//! Error types for preference assembly.
//!
//! Only declaration validation is fatal: a broken feature declaration means
//! the whole beta section fails closed rather than rendering a partial form.
//! Everything else (gate failures, cache misses, duplicate job enqueues) is
//! absorbed where it happens.

use thiserror::Error;

/// Errors raised while assembling the beta preferences section.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// A feature declaration lacks a field the form design requires.
    ///
    /// Aimed at extension authors: names the exact feature and field so the
    /// offending provider can be fixed. The invoking preference flow is
    /// expected to halt, not render around it.
    #[error("the field {field} was missing from the beta feature {feature}")]
    MissingField {
        /// Key of the offending feature declaration.
        feature: String,
        /// Name of the missing required field.
        field: &'static str,
    },
}

impl PreferenceError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
        }
    }
}

/// Result type for preference assembly.
pub type PreferenceResult<T> = Result<T, PreferenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_names_feature_and_field() {
        let err = PreferenceError::MissingField {
            feature: "unittest-ft1".to_string(),
            field: "label",
        };
        assert_eq!(
            err.to_string(),
            "the field label was missing from the beta feature unittest-ft1"
        );
        assert_eq!(err.error_code(), "missing_field");
    }
}
