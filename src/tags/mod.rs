//! Environment classification.
//!
//! Tags are named boolean classifications of the environment string. Each
//! tag is backed by a [`TagTest`]; the [`TagRegistry`] runs every test and
//! collects the names that matched into a [`TagSet`].
//!
//! # Example
//!
//! ```
//! use initcheck::tags::{TagRegistry, TagTest};
//!
//! let mut registry = TagRegistry::new();
//! registry.define("android", TagTest::pattern("android", "Android").unwrap()).unwrap();
//! registry.define("mobile", TagTest::predicate(|env, _| env.contains("Mobile"))).unwrap();
//!
//! let tags = registry.evaluate("Mozilla/5.0 (Linux; ANDROID 14) Mobile");
//! assert!(tags.contains("android"));
//! assert!(tags.contains("mobile"));
//! ```

pub mod definition;
pub mod registry;

pub use definition::TagTest;
pub use registry::TagRegistry;

use std::collections::BTreeSet;

/// Reserved tag name marking fallback messages.
///
/// Never matched against the environment.
pub const DEFAULT_TAG: &str = "default";

/// Set of tag names that matched an environment string.
pub type TagSet = BTreeSet<String>;
