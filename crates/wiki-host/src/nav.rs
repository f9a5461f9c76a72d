//! Personal navigation links.

/// One entry in the user's personal navigation bar, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Stable key for the entry ("preferences", "logout", ...).
    pub key: String,
    /// Display text, already localized.
    pub text: String,
    /// Target URL.
    pub href: String,
    /// Whether the entry points at the page being viewed.
    pub active: bool,
}

impl NavLink {
    /// Create an inactive link.
    pub fn new(
        key: impl Into<String>,
        text: impl Into<String>,
        href: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            href: href.into(),
            active: false,
        }
    }
}
