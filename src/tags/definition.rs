//! Tag test definitions.
//!
//! A [`TagTest`] decides whether a single tag applies to an environment
//! string. Pattern text is compiled once, when the test is built.

use regex::{Regex, RegexBuilder};

use crate::error::{InitCheckError, Result};

/// Predicate form of a tag test, called with `(environment, tag_name)`.
pub type TagPredicate = Box<dyn Fn(&str, &str) -> bool>;

/// How a tag is matched against the environment string.
pub enum TagTest {
    /// Literal pattern text, compiled case-insensitively.
    Pattern(Regex),
    /// A caller-compiled regular expression, used as is.
    Matcher(Regex),
    /// A caller-supplied predicate.
    Predicate(TagPredicate),
}

impl TagTest {
    /// Compile `pattern` into a case-insensitive test for `tag`.
    pub fn pattern(tag: &str, pattern: &str) -> Result<Self> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(TagTest::Pattern)
            .map_err(|e| InitCheckError::InvalidTagPattern {
                tag: tag.to_string(),
                message: e.to_string(),
            })
    }

    /// Wrap an already compiled regular expression.
    pub fn matcher(regex: Regex) -> Self {
        TagTest::Matcher(regex)
    }

    /// Wrap a predicate.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> bool + 'static,
    {
        TagTest::Predicate(Box::new(f))
    }

    /// Whether `tag` applies to `environment`.
    pub fn matches(&self, environment: &str, tag: &str) -> bool {
        match self {
            TagTest::Pattern(regex) | TagTest::Matcher(regex) => regex.is_match(environment),
            TagTest::Predicate(f) => f(environment, tag),
        }
    }

    /// Short name of the variant, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TagTest::Pattern(_) => "pattern",
            TagTest::Matcher(_) => "matcher",
            TagTest::Predicate(_) => "predicate",
        }
    }
}

impl From<Regex> for TagTest {
    fn from(regex: Regex) -> Self {
        TagTest::Matcher(regex)
    }
}

impl std::fmt::Debug for TagTest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagTest::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            TagTest::Matcher(regex) => f.debug_tuple("Matcher").field(&regex.as_str()).finish(),
            TagTest::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
