//! Matching options shared by every shape matcher.

use serde::{Deserialize, Serialize};

/// Options controlling how matchers treat candidate sub-nodes.
///
/// # Defaults
///
/// - `walk_down_parentheses`: `true`, so `((x))` is matched as `x`
/// - `allow_missing`: `false`, so nodes synthesised by parser recovery are
///   rejected
///
/// The options serialise as a flat table so callers can embed them in their
/// own configuration files. Absent keys take the defaults.
///
/// # Example
///
/// ```
/// use contour_shapes::MatchOptions;
///
/// let options = MatchOptions::default().with_allow_missing(true);
/// assert!(options.walk_down_parentheses());
/// assert!(options.allow_missing());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchOptions {
    /// Whether parenthesized expressions are seen through.
    walk_down_parentheses: bool,
    /// Whether parser-synthesised missing nodes are accepted.
    allow_missing: bool,
}

impl MatchOptions {
    /// Creates options with explicit values.
    #[must_use]
    pub const fn new(walk_down_parentheses: bool, allow_missing: bool) -> Self {
        Self {
            walk_down_parentheses,
            allow_missing,
        }
    }

    /// Returns whether parenthesized expressions are seen through.
    #[must_use]
    pub const fn walk_down_parentheses(&self) -> bool {
        self.walk_down_parentheses
    }

    /// Returns whether missing nodes are accepted.
    #[must_use]
    pub const fn allow_missing(&self) -> bool {
        self.allow_missing
    }

    /// Returns a copy with `walk_down_parentheses` replaced.
    #[must_use]
    pub const fn with_walk_down_parentheses(self, walk_down_parentheses: bool) -> Self {
        Self {
            walk_down_parentheses,
            ..self
        }
    }

    /// Returns a copy with `allow_missing` replaced.
    #[must_use]
    pub const fn with_allow_missing(self, allow_missing: bool) -> Self {
        Self {
            allow_missing,
            ..self
        }
    }
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            walk_down_parentheses: true,
            allow_missing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_walk_parentheses_and_reject_missing() {
        let options = MatchOptions::default();
        assert!(options.walk_down_parentheses());
        assert!(!options.allow_missing());
    }

    #[rstest]
    #[case("{}", MatchOptions::default())]
    #[case(r#"{"allow_missing": true}"#, MatchOptions::new(true, true))]
    #[case(
        r#"{"walk_down_parentheses": false, "allow_missing": false}"#,
        MatchOptions::new(false, false)
    )]
    fn options_deserialize_with_defaults(#[case] json: &str, #[case] expected: MatchOptions) {
        let options: MatchOptions = serde_json::from_str(json).expect("deserialize");
        assert_eq!(options, expected);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = serde_json::from_str::<MatchOptions>(r#"{"walk_up": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn options_serialize_as_flat_table() {
        let json = serde_json::to_value(MatchOptions::new(false, true)).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"walk_down_parentheses": false, "allow_missing": true})
        );
    }
}
