//! Diagnostic checks and their remediation messages.
//!
//! - [`Check`] - A named predicate with messages and optional callbacks
//! - [`Message`] - A tagged remediation message
//! - [`CheckRegistry`] - Insertion-ordered collection of checks
//!
//! # Example
//!
//! ```
//! use initcheck::checks::{Check, CheckRegistry, Message};
//!
//! let mut registry = CheckRegistry::new();
//! registry.add(
//!     "cookies",
//!     Check::new(|| false).with_message(
//!         Message::new("Enable cookies", "Cookies are required").with_tag("default"),
//!     ),
//! );
//!
//! registry.run_all().unwrap();
//! assert_eq!(registry.failing().count(), 1);
//! ```

pub mod check;
pub mod message;
pub mod registry;

pub use check::{Check, CheckCallback, CheckPredicate};
pub use message::Message;
pub use registry::CheckRegistry;
