//! Incoming web request, as seen by form fields.
//!
//! Fields only need three primitives: was the form actually submitted
//! (edit token present), does a named value exist at all, and what is its
//! boolean reading. Browsers omit unchecked checkboxes entirely, so
//! "absent" and "false" are different answers.

use std::collections::HashMap;

/// Read access to submitted form values.
pub trait WebRequest {
    /// Whether the request carries a form submission token.
    fn has_submit_token(&self) -> bool;

    /// Raw value of a named field, if present.
    fn value(&self, name: &str) -> Option<&str>;

    /// Boolean reading of a named field: present, non-empty, and not `"0"`.
    fn bool_value(&self, name: &str) -> bool {
        match self.value(name) {
            Some(v) => !v.is_empty() && v != "0",
            None => false,
        }
    }
}

/// In-memory [`WebRequest`] for tests.
#[derive(Debug, Default)]
pub struct FormRequest {
    token: bool,
    fields: HashMap<String, String>,
}

impl FormRequest {
    /// A request with no submission token and no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the request as a genuine form submission.
    pub fn with_token(mut self) -> Self {
        self.token = true;
        self
    }

    /// Add a submitted field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

impl WebRequest for FormRequest {
    fn has_submit_token(&self) -> bool {
        self.token
    }

    fn value(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_value_reading() {
        let req = FormRequest::new()
            .with_field("checked", "1")
            .with_field("explicit-off", "0")
            .with_field("empty", "");

        assert!(req.bool_value("checked"));
        assert!(!req.bool_value("explicit-off"));
        assert!(!req.bool_value("empty"));
        assert!(!req.bool_value("absent"));
    }
}
