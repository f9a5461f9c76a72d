//! Feature card rendering: checkbox, description, links, adoption count.

use wiki_host::{html, Messages, OutputPage};

use crate::prefs::{FeatureFieldParams, FeatureState, LinkRef};

use super::checkbox::CheckboxField;

/// Renders one beta feature as a card around a styled checkbox.
pub struct FeatureField<'a> {
    key: &'a str,
    params: &'a FeatureFieldParams,
    messages: &'a dyn Messages,
}

impl<'a> FeatureField<'a> {
    /// Bind a renderer to a validated feature field.
    pub fn new(key: &'a str, params: &'a FeatureFieldParams, messages: &'a dyn Messages) -> Self {
        Self {
            key,
            params,
            messages,
        }
    }

    fn resolve_link(&self, link: &LinkRef) -> String {
        match link {
            LinkRef::Url(url) => url.clone(),
            LinkRef::Message(key) => self.messages.text(key.as_str(), &[]),
        }
    }

    /// Render the card for the user's current state.
    pub fn render(&self, state: FeatureState, out: &dyn OutputPage) -> String {
        let checkbox = CheckboxField::new(self.key)
            .with_label(self.messages.text(self.params.label.as_str(), &[]));

        let mut inner = checkbox.render(state.is_enabled(), &[], out);

        inner.push_str(&html::element(
            "p",
            &[("class", "beta-feature-description")],
            &self.messages.text(self.params.description.as_str(), &[]),
        ));

        if let Some(count) = self.params.user_count {
            inner.push_str(&html::element(
                "p",
                &[("class", "beta-feature-count")],
                &self
                    .messages
                    .text("betafeatures-count", &[count.to_string()]),
            ));
        }

        let info_href = self.resolve_link(&self.params.info_link);
        let discussion_href = self.resolve_link(&self.params.discussion_link);
        let links = format!(
            "{}{}",
            html::element(
                "a",
                &[("href", info_href.as_str()), ("class", "beta-feature-info-link")],
                &self.messages.text("betafeatures-more-info", &[]),
            ),
            html::element(
                "a",
                &[
                    ("href", discussion_href.as_str()),
                    ("class", "beta-feature-discussion-link"),
                ],
                &self.messages.text("betafeatures-discussion", &[]),
            ),
        );
        inner.push_str(&html::raw_element(
            "div",
            &[("class", "beta-feature-links")],
            &links,
        ));

        if let Some(screenshot) = &self.params.screenshot {
            inner.push_str(&format!(
                "<img src=\"{}\" class=\"beta-feature-screenshot\"/>",
                html::escape_attr(screenshot)
            ));
        }

        html::raw_element("div", &[("class", "beta-feature-field")], &inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiki_host::{MapMessages, MemoryOutput, MessageKey};

    fn params() -> FeatureFieldParams {
        FeatureFieldParams {
            label: MessageKey::new("ft1-label"),
            description: MessageKey::new("ft1-desc"),
            info_link: LinkRef::Url("https://example.org/info".to_string()),
            discussion_link: LinkRef::Url("https://example.org/talk".to_string()),
            screenshot: None,
            user_count: Some(42),
        }
    }

    #[test]
    fn test_card_contains_parts() {
        let messages = MapMessages::new()
            .with("ft1-label", "Fancy feature")
            .with("ft1-desc", "Does fancy things")
            .with("betafeatures-count", "$1 users");
        let out = MemoryOutput::new();
        let p = params();

        let html = FeatureField::new("ft1", &p, &messages).render(FeatureState::Enabled, &out);

        assert!(html.contains("Fancy feature"));
        assert!(html.contains("Does fancy things"));
        assert!(html.contains("42 users"));
        assert!(html.contains("https://example.org/info"));
        assert!(html.contains("https://example.org/talk"));
        assert!(html.contains(r#"checked="checked""#));
    }

    #[test]
    fn test_count_line_omitted_when_unknown() {
        let messages = MapMessages::new();
        let out = MemoryOutput::new();
        let mut p = params();
        p.user_count = None;

        let html = FeatureField::new("ft1", &p, &messages).render(FeatureState::Unset, &out);
        assert!(!html.contains("beta-feature-count"));
    }
}
