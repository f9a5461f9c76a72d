//! Styled two-state checkbox with invertible value semantics.
//!
//! A field declared with `invert` stores the opposite of what the user
//! sees checked. The same XOR is applied on render and on request read,
//! so the displayed state round-trips regardless of configuration:
//!
//! ```text
//! INVERT VALUE | OUTPUT
//! true   true  | false
//! false  true  | true
//! false  false | false
//! true   false | true
//! ```

use wiki_host::{html, OutputPage, WebRequest};

/// Client asset bundle backing the styled checkboxes.
pub const FIELD_MODULE: &str = "ext.betaFeatures";

/// A label-wrapped checkbox input.
#[derive(Debug, Clone)]
pub struct CheckboxField {
    /// Form input name; for feature fields this is the feature key.
    pub name: String,
    /// DOM id.
    pub id: String,
    /// Resolved display label.
    pub label: String,
    /// Whether the stored value is the inverse of the displayed state.
    pub invert: bool,
    /// Whether the control is disabled.
    pub disabled: bool,
    /// Value reported when the request carries no reading for this field.
    pub default: bool,
}

impl CheckboxField {
    /// A plain checkbox for the given input name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let id = format!("beta-input-{name}");
        Self {
            name,
            id,
            label: String::new(),
            invert: false,
            disabled: false,
            default: false,
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Invert the stored/displayed relationship.
    pub fn inverted(mut self) -> Self {
        self.invert = true;
        self
    }

    /// Disable the control.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// The displayed checked-state for a stored value.
    pub fn is_checked(&self, value: bool) -> bool {
        value != self.invert
    }

    /// Render the field for a stored value.
    ///
    /// Requests the styling asset bundle as a side effect; the host loads
    /// it once however many fields render.
    pub fn render(&self, value: bool, attrs: &[(&str, &str)], out: &dyn OutputPage) -> String {
        out.add_module(FIELD_MODULE);

        let checked = self.is_checked(value);

        let mut label_classes = vec!["beta-checkbox-label"];
        if self.disabled {
            label_classes.push("beta-disabled");
        }
        if checked {
            label_classes.push("beta-checked");
        }
        let label_class = label_classes.join(" ");

        let mut input_attrs: Vec<(&str, &str)> = vec![("id", &self.id), ("class", "beta-checkbox")];
        if self.disabled {
            input_attrs.push(("disabled", "disabled"));
        }
        input_attrs.extend_from_slice(attrs);

        let mut out_html = html::open_element("label", &[("for", &self.id), ("class", &label_class)]);
        out_html.push_str(&html::check(&self.name, checked, &input_attrs));
        out_html.push_str(&html::close_element("label"));
        out_html.push_str(&html::element(
            "label",
            &[("for", &self.id), ("class", "beta-check-text")],
            &self.label,
        ));
        out_html
    }

    /// Read this field's stored value out of a request.
    ///
    /// Browsers omit unchecked boxes, so a bare absence is only meaningful
    /// on a real submission. Without a submission token or an explicit
    /// value, the configured default stands.
    pub fn load_from_request(&self, request: &dyn WebRequest) -> bool {
        if request.has_submit_token() || request.value(&self.name).is_some() {
            request.bool_value(&self.name) != self.invert
        } else {
            self.default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiki_host::{FormRequest, MemoryOutput};

    /// Rendering a stored value and submitting back exactly what was shown
    /// must reproduce the stored value, inverted or not.
    #[test]
    fn test_render_read_roundtrip() {
        for invert in [false, true] {
            for value in [false, true] {
                let mut field = CheckboxField::new("pref");
                field.invert = invert;

                let displayed = field.is_checked(value);
                let request = if displayed {
                    FormRequest::new().with_token().with_field("pref", "1")
                } else {
                    FormRequest::new().with_token()
                };

                assert_eq!(
                    field.load_from_request(&request),
                    value,
                    "roundtrip failed for value={value} invert={invert}"
                );
            }
        }
    }

    #[test]
    fn test_default_without_submission() {
        let mut field = CheckboxField::new("pref");
        field.default = true;

        // No token, no value: default.
        assert!(field.load_from_request(&FormRequest::new()));

        // Explicit value without a token still counts.
        let req = FormRequest::new().with_field("pref", "0");
        assert!(!field.load_from_request(&req));
    }

    #[test]
    fn test_render_classes_and_module() {
        let out = MemoryOutput::new();
        let field = CheckboxField::new("pref").with_label("My feature");

        let checked = field.render(true, &[], &out);
        assert!(checked.contains("beta-checked"));
        assert!(checked.contains(r#"checked="checked""#));
        assert!(out.has_module(FIELD_MODULE));

        let unchecked = field.render(false, &[], &out);
        assert!(!unchecked.contains("beta-checked"));

        let disabled = CheckboxField::new("pref").disabled().render(false, &[], &out);
        assert!(disabled.contains("beta-disabled"));
        assert!(disabled.contains(r#"disabled="disabled""#));
    }

    #[test]
    fn test_inverted_render_flips_display() {
        let out = MemoryOutput::new();
        let field = CheckboxField::new("pref").inverted();

        // Stored true displays unchecked under inversion.
        let html = field.render(true, &[], &out);
        assert!(!html.contains(r#"checked="checked""#));
    }
}
