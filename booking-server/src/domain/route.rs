//! Route identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The separator used in stored route identifiers.
pub const ROUTE_SEPARATOR: &str = "->";

/// A route identifier in canonical `"Origin -> Destination"` form.
///
/// Staff screens render routes with an arrow glyph and sometimes send back
/// the HTML-escaped `-&gt;`. Those variants are folded into the canonical
/// `->` separator here, at the boundary, so storage and schedule lookup only
/// ever see one form.
///
/// # Examples
///
/// ```
/// use booking_server::domain::RouteName;
///
/// let route = RouteName::canonical("Golaghat → Guwahati");
/// assert_eq!(route.as_str(), "Golaghat -> Guwahati");
///
/// let route = RouteName::canonical("Golaghat -&gt; Guwahati");
/// assert_eq!(route.as_str(), "Golaghat -> Guwahati");
/// assert_eq!(route.endpoints(), Some(("Golaghat", "Guwahati")));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteName(String);

impl RouteName {
    /// Normalise a raw route string.
    ///
    /// Strings without a separator are kept as-is apart from trimming.
    pub fn canonical(raw: &str) -> Self {
        let unified = raw
            .replace("&gt;", ">")
            .replace('→', ROUTE_SEPARATOR);

        let parts: Vec<&str> = unified.split(ROUTE_SEPARATOR).map(str::trim).collect();
        if parts.len() < 2 {
            return Self(unified.trim().to_string());
        }

        Self(parts.join(" -> "))
    }

    /// Returns the canonical string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Origin and destination, if the route has exactly one separator.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        let (from, to) = self.0.split_once(ROUTE_SEPARATOR)?;
        if to.contains(ROUTE_SEPARATOR) {
            return None;
        }
        Some((from.trim(), to.trim()))
    }

    /// Presentation form with an arrow glyph, e.g. "Golaghat → Guwahati".
    pub fn display(&self) -> String {
        self.0.replace(ROUTE_SEPARATOR, "→")
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteName({})", self.0)
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form_is_unchanged() {
        let route = RouteName::canonical("Kamarbandha -> Guwahati");
        assert_eq!(route.as_str(), "Kamarbandha -> Guwahati");
    }

    #[test]
    fn arrow_glyph_is_folded() {
        let route = RouteName::canonical("Guwahati→Golaghat");
        assert_eq!(route.as_str(), "Guwahati -> Golaghat");
    }

    #[test]
    fn html_entity_is_folded() {
        let route = RouteName::canonical("Guwahati -&gt; Bokakhat");
        assert_eq!(route.as_str(), "Guwahati -> Bokakhat");
    }

    #[test]
    fn spacing_is_normalised() {
        let route = RouteName::canonical("  Golaghat   ->Bokakhat ");
        assert_eq!(route.as_str(), "Golaghat -> Bokakhat");
    }

    #[test]
    fn plain_city_is_trimmed() {
        let route = RouteName::canonical("  Guwahati ");
        assert_eq!(route.as_str(), "Guwahati");
        assert_eq!(route.endpoints(), None);
    }

    #[test]
    fn endpoints_of_multi_hop_route() {
        let route = RouteName::canonical("A -> B -> C");
        assert_eq!(route.endpoints(), None);
    }

    #[test]
    fn display_uses_arrow() {
        let route = RouteName::canonical("Golaghat -> Guwahati");
        assert_eq!(route.display(), "Golaghat → Guwahati");
        assert_eq!(format!("{}", route), "Golaghat -> Guwahati");
        assert_eq!(format!("{:?}", route), "RouteName(Golaghat -> Guwahati)");
    }
}
