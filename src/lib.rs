//! initcheck - Environment capability checks with tailored remediation.
//!
//! initcheck classifies an environment string (such as a browser user agent)
//! into named tags, runs a set of named checks, and for every failing check
//! picks the remediation messages that fit the environment's tags, falling
//! back to messages tagged `default`.
//!
//! # Modules
//!
//! - [`tags`] - Tag tests and the tag registry
//! - [`checks`] - Checks, messages, and the check registry
//! - [`resolver`] - Two-phase failure message selection
//! - [`evaluator`] - Run orchestration and global callbacks
//! - [`catalog`] - YAML catalogs of tags and checks
//! - [`output`] - Human and JSON report formatters
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```
//! use initcheck::{Check, Evaluator, Message};
//!
//! let mut evaluator = Evaluator::new(
//!     "Mozilla/5.0 (iPhone; CPU iPhone OS 12_0)",
//!     || Ok(()),
//!     |_: &[Message]| Ok(()),
//! )
//! .unwrap();
//!
//! evaluator
//!     .add_tag_pattern("ios", "iphone|ipad")
//!     .unwrap()
//!     .add_check(
//!         "storage",
//!         Check::new(|| false)
//!             .with_message(Message::new("Disable private browsing", "").with_tag("ios"))
//!             .with_message(Message::new("Enable local storage", "").with_tag("default")),
//!     )
//!     .run()
//!     .unwrap();
//!
//! assert_eq!(evaluator.failure_messages()[0].title, "Disable private browsing");
//! ```

pub mod catalog;
pub mod checks;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod output;
pub mod resolver;
pub mod tags;

pub use checks::{Check, CheckRegistry, Message};
pub use error::{InitCheckError, Result};
pub use evaluator::{CheckOutcome, Evaluator, FailurePolicy, RunReport};
pub use resolver::MessageResolver;
pub use tags::{TagRegistry, TagSet, TagTest, DEFAULT_TAG};
