//! Minimal HTML construction helpers.
//!
//! Attribute values and text content are always escaped; callers build
//! structure, not strings. Only the handful of shapes form fields need.

/// Escape text content for element bodies.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for double-quoted attributes.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_attrs(attrs: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (name, value) in attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out
}

/// `<tag attrs>` opening tag.
pub fn open_element(tag: &str, attrs: &[(&str, &str)]) -> String {
    format!("<{tag}{}>", render_attrs(attrs))
}

/// `</tag>` closing tag.
pub fn close_element(tag: &str) -> String {
    format!("</{tag}>")
}

/// A full element with escaped text content.
pub fn element(tag: &str, attrs: &[(&str, &str)], text: &str) -> String {
    format!("{}{}{}", open_element(tag, attrs), escape(text), close_element(tag))
}

/// A full element with pre-rendered inner HTML.
pub fn raw_element(tag: &str, attrs: &[(&str, &str)], inner: &str) -> String {
    format!("{}{}{}", open_element(tag, attrs), inner, close_element(tag))
}

/// A checkbox input. `checked` renders the attribute; extra attributes are
/// appended verbatim after name/type.
pub fn check(name: &str, checked: bool, attrs: &[(&str, &str)]) -> String {
    let mut all: Vec<(&str, &str)> = vec![("type", "checkbox"), ("name", name), ("value", "1")];
    if checked {
        all.push(("checked", "checked"));
    }
    all.extend_from_slice(attrs);
    format!("<input{}/>", render_attrs(&all))
}
