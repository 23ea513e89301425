use log::trace;
use regex::{NoExpand, Regex};
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};

use crate::error::ResolveError;

/// Rewrites the first match of `pattern` in a location with a directory.
#[derive(Debug, Clone)]
pub struct PathMappingRule {
    pattern: Regex,
    replacement: PathBuf,
}

impl PathMappingRule {
    pub fn new(pattern: &str, replacement: impl Into<PathBuf>) -> Result<Self, ResolveError> {
        let compiled = Regex::new(pattern).map_err(|source| ResolveError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern: compiled, replacement: replacement.into() })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn replacement(&self) -> &Path {
        &self.replacement
    }

    /// Replace the first match only. `$` in the directory is kept literally.
    pub fn apply<'a>(&self, location: &'a str) -> Cow<'a, str> {
        let replacement = self.replacement.to_string_lossy();
        self.pattern.replace(location, NoExpand(&replacement))
    }
}

/// Apply every rule in declaration order, each one seeing the previous output.
pub fn apply_rules(rules: &[PathMappingRule], location: &str) -> String {
    rules.iter().fold(location.to_string(), |current, rule| {
        let next = rule.apply(&current).into_owned();
        if next != current {
            trace!("Mapping '{}' rewrote '{}' to '{}'", rule.pattern(), current, next);
        }
        next
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_replaces_first_match_only() {
        let rule = PathMappingRule::new("lib", "/opt/lib").unwrap();
        assert_eq!(rule.apply("lib/lib.jar"), "/opt/lib/lib.jar");
    }

    #[test]
    fn test_rule_without_match_leaves_location_unchanged() {
        let rule = PathMappingRule::new("^vendor", "/opt/vendor").unwrap();
        assert!(matches!(rule.apply("libs/x.jar"), Cow::Borrowed("libs/x.jar")));
    }

    #[test]
    fn test_replacement_is_literal() {
        let rule = PathMappingRule::new("^libs", "/opt/$1/${name}").unwrap();
        assert_eq!(rule.apply("libs/x.jar"), "/opt/$1/${name}/x.jar");
    }

    #[test]
    fn test_rules_compose_sequentially() {
        let rules = vec![
            PathMappingRule::new("^libs", "shared").unwrap(),
            PathMappingRule::new("^shared", "/opt/shared").unwrap(),
        ];
        assert_eq!(apply_rules(&rules, "libs/x.jar"), "/opt/shared/x.jar");
    }

    #[test]
    fn test_rule_order_is_observable() {
        let rules = vec![
            PathMappingRule::new("^shared", "/opt/shared").unwrap(),
            PathMappingRule::new("^libs", "shared").unwrap(),
        ];
        assert_eq!(apply_rules(&rules, "libs/x.jar"), "shared/x.jar");
    }

    #[test]
    fn test_no_rules_is_identity() {
        assert_eq!(apply_rules(&[], "libs/x.jar"), "libs/x.jar");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = PathMappingRule::new("(unclosed", "/opt").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidPattern { ref pattern, .. } if pattern == "(unclosed"));
    }
}
