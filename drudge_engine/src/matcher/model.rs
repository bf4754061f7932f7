use regex::Regex;
use std::sync::Arc;

use crate::parser::ConfigError;

/// The closed set of ways to test a piece of text: by exact equality, by regular expression, or by predicate.
///
/// Used to match long option names, and as an ad-hoc "type" which accepts any value it matches.
#[derive(Clone)]
pub enum Matcher {
    /// Equal to the text.
    Exact(String),
    /// A regular expression found in the text.
    Pattern(Regex),
    /// Accepted by the function.
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl Matcher {
    /// Match precisely `text`.
    pub fn exact(text: impl Into<String>) -> Self {
        Matcher::Exact(text.into())
    }

    /// Compile a regular expression matcher.
    /// The expression must match somewhere in the text; anchor it (`^...$`) to match the whole text.
    pub fn pattern(expression: &str) -> Result<Self, ConfigError> {
        Regex::new(expression)
            .map(Matcher::Pattern)
            .map_err(|error| ConfigError(format!("invalid pattern '{expression}': {error}")))
    }

    /// Match whatever `predicate` accepts.
    pub fn predicate(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Matcher::Predicate(Arc::new(predicate))
    }

    /// Whether `text` matches.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Matcher::Exact(expected) => expected == text,
            Matcher::Pattern(regex) => regex.is_match(text),
            Matcher::Predicate(predicate) => predicate(text),
        }
    }
}

impl From<&str> for Matcher {
    fn from(value: &str) -> Self {
        Matcher::exact(value)
    }
}

impl From<String> for Matcher {
    fn from(value: String) -> Self {
        Matcher::Exact(value)
    }
}

impl From<Regex> for Matcher {
    fn from(value: Regex) -> Self {
        Matcher::Pattern(value)
    }
}

impl std::fmt::Display for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Exact(text) => write!(f, "{text}"),
            Matcher::Pattern(regex) => write!(f, "/{}/", regex.as_str()),
            Matcher::Predicate(_) => write!(f, "<predicate>"),
        }
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Matcher::Exact(text) => f.debug_tuple("Exact").field(text).finish(),
            Matcher::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Matcher::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Matcher::exact("from"), "from", true)]
    #[case(Matcher::exact("from"), "fro", false)]
    #[case(Matcher::exact("from"), "fromage", false)]
    #[case(Matcher::pattern("^[a-z]+$").unwrap(), "from", true)]
    #[case(Matcher::pattern("^[a-z]+$").unwrap(), "from1", false)]
    #[case(Matcher::pattern(".+").unwrap(), "", false)]
    #[case(Matcher::predicate(|text| text.len() == 2), "ab", true)]
    #[case(Matcher::predicate(|text| text.len() == 2), "abc", false)]
    fn matcher_matches(#[case] matcher: Matcher, #[case] text: &str, #[case] expected: bool) {
        assert_eq!(matcher.matches(text), expected);
    }

    #[rstest]
    #[case(Matcher::from("from"), "from")]
    #[case(Matcher::from(Regex::new("^a.c$").unwrap()), "/^a.c$/")]
    #[case(Matcher::predicate(|_| true), "<predicate>")]
    fn matcher_display(#[case] matcher: Matcher, #[case] expected: &str) {
        assert_eq!(matcher.to_string(), expected);
    }

    #[test]
    fn matcher_invalid_pattern() {
        let error = Matcher::pattern("(unclosed").unwrap_err();
        crate::test::assert_contains!(error.to_string(), "invalid pattern '(unclosed'");
    }
}
