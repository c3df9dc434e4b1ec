use crate::error::DepthLimitError;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// A rule exempting matching field names from depth counting.
///
/// A field matched by any configured rule contributes zero depth, exactly
/// like the built-in skip for `__`-prefixed introspection fields (which
/// applies whether or not any rules are configured).
#[derive(Clone)]
pub struct IgnoreRule {
    kind: RuleKind,
}

#[derive(Clone)]
enum RuleKind {
    Pattern(Regex),
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl IgnoreRule {
    /// Compile `pattern` as a regular expression matched against field names.
    ///
    /// Matching is unanchored, consistent with the JavaScript
    /// `graphql-depth-limit` rule's `fieldName.match(rule)`: anchor with
    /// `^`/`$` for exact-name matches.
    ///
    /// An invalid pattern is a configuration error and fails here, before
    /// any document is validated.
    pub fn pattern(pattern: &str) -> Result<Self, DepthLimitError> {
        let regex =
            Regex::new(pattern).map_err(|err| DepthLimitError::InvalidIgnorePattern {
                pattern: pattern.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self::regex(regex))
    }

    /// Use an already-compiled regular expression.
    pub fn regex(regex: Regex) -> Self {
        Self {
            kind: RuleKind::Pattern(regex),
        }
    }

    /// Use a predicate called with each field name.
    pub fn predicate(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self {
            kind: RuleKind::Predicate(Arc::new(predicate)),
        }
    }

    fn matches(&self, field_name: &str) -> bool {
        match &self.kind {
            RuleKind::Pattern(regex) => regex.is_match(field_name),
            RuleKind::Predicate(predicate) => predicate(field_name),
        }
    }
}

impl fmt::Debug for IgnoreRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RuleKind::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            RuleKind::Predicate(_) => f.debug_tuple("Predicate").field(&"..").finish(),
        }
    }
}

/// The normalized rule list: absent configuration is the empty set, a single
/// rule a singleton.
#[derive(Debug, Clone, Default)]
pub(crate) struct IgnorePolicy {
    rules: Vec<IgnoreRule>,
}

impl IgnorePolicy {
    pub(crate) fn push(&mut self, rule: IgnoreRule) {
        self.rules.push(rule);
    }

    /// True if any rule matches `field_name`.
    pub(crate) fn matches(&self, field_name: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(field_name))
    }
}
