//! Personal navigation splicing.

use wiki_host::NavLink;

/// Insert `entry` immediately after the link whose key is `after_key`,
/// preserving the order of everything else. When no entry matches, the
/// link is appended rather than dropped.
pub fn insert_nav_link(links: &mut Vec<NavLink>, after_key: &str, entry: NavLink) {
    match links.iter().position(|link| link.key == after_key) {
        Some(pos) => links.insert(pos + 1, entry),
        None => links.push(entry),
    }
}
