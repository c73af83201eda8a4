//! Tag registry.
//!
//! The [`TagRegistry`] stores tag tests in registration order and evaluates
//! them against an environment string.

use tracing::debug;

use super::definition::TagTest;
use super::{TagSet, DEFAULT_TAG};
use crate::error::{InitCheckError, Result};

/// Registry of named tag tests.
#[derive(Debug, Default)]
pub struct TagRegistry {
    tests: Vec<(String, TagTest)>,
}

impl TagRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { tests: Vec::new() }
    }

    /// Store the test for `name`, replacing any earlier definition.
    ///
    /// A replaced definition keeps its original position. The reserved
    /// fallback tag name cannot be defined.
    pub fn define(&mut self, name: impl Into<String>, test: TagTest) -> Result<()> {
        let name = name.into();
        if name == DEFAULT_TAG {
            return Err(InitCheckError::ReservedTagName { tag: name });
        }

        if let Some(slot) = self.tests.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = test;
        } else {
            self.tests.push((name, test));
        }
        Ok(())
    }

    /// Return the names of every tag whose test matches `environment`.
    pub fn evaluate(&self, environment: &str) -> TagSet {
        self.tests
            .iter()
            .filter(|(name, test)| {
                let matched = test.matches(environment, name);
                debug!("Tag '{}' ({}) matched: {}", name, test.kind(), matched);
                matched
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Get a tag test by name.
    pub fn get(&self, name: &str) -> Option<&TagTest> {
        self.tests.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    /// Iterate over tag names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tests.iter().map(|(n, _)| n.as_str())
    }

    /// Get the number of registered tags.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Mobile Safari/537.36";

    #[test]
    fn registry_new_is_empty() {
        let registry = TagRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn evaluate_collects_all_matching_tags() {
        let mut registry = TagRegistry::new();
        registry
            .define("android", TagTest::pattern("android", "android").unwrap())
            .unwrap();
        registry
            .define("mobile", TagTest::matcher(Regex::new("Mobile").unwrap()))
            .unwrap();
        registry
            .define("ios", TagTest::pattern("ios", "iphone|ipad").unwrap())
            .unwrap();

        let tags = registry.evaluate(ANDROID_UA);
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("android"));
        assert!(tags.contains("mobile"));
    }

    #[test]
    fn evaluate_is_independent_of_registration_order() {
        let build = |order: &[&str]| {
            let mut registry = TagRegistry::new();
            for name in order {
                registry
                    .define(*name, TagTest::predicate(|env, tag| env.contains(tag)))
                    .unwrap();
            }
            registry.evaluate("alpha gamma")
        };

        assert_eq!(
            build(&["alpha", "beta", "gamma"]),
            build(&["gamma", "alpha", "beta"])
        );
    }

    #[test]
    fn define_overwrites_and_keeps_position() {
        let mut registry = TagRegistry::new();
        registry.define("a", TagTest::predicate(|_, _| false)).unwrap();
        registry.define("b", TagTest::predicate(|_, _| false)).unwrap();
        registry.define("a", TagTest::predicate(|_, _| true)).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(registry.evaluate("anything").contains("a"));
    }

    #[test]
    fn define_rejects_default_tag() {
        let mut registry = TagRegistry::new();
        let err = registry
            .define(DEFAULT_TAG, TagTest::predicate(|_, _| true))
            .unwrap_err();
        assert!(matches!(err, InitCheckError::ReservedTagName { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn get_returns_registered_test() {
        let mut registry = TagRegistry::new();
        registry
            .define("android", TagTest::pattern("android", "android").unwrap())
            .unwrap();
        assert!(registry.get("android").is_some());
        assert!(registry.get("ios").is_none());
    }

    #[test]
    fn empty_registry_yields_no_tags() {
        let registry = TagRegistry::default();
        assert!(registry.evaluate(ANDROID_UA).is_empty());
    }
}
