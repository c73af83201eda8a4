//! YAML catalogs of tags and checks.
//!
//! A catalog lets tags and checks be authored as a file instead of code:
//!
//! - [`schema`] - Serde types mirroring the file
//! - [`probe`] - Declarative check predicates
//! - [`loader`] - Reading and parsing catalog files
//!
//! # Example
//!
//! ```
//! use initcheck::catalog::parse_catalog;
//! use initcheck::{Evaluator, Message};
//! use std::path::Path;
//!
//! let catalog = parse_catalog(
//!     r#"
//! tags:
//!   android: android
//! checks:
//!   modern-browser:
//!     probe: { type: environment_matches, pattern: "chrome/1[0-9]{2}" }
//!     messages:
//!       - title: Update Chrome
//!         tags: android
//!       - title: Update your browser
//!         tags: default
//! "#,
//!     Path::new("catalog.yml"),
//! )
//! .unwrap();
//!
//! let mut evaluator =
//!     Evaluator::new("Linux; Android 9; Chrome/70.0", || Ok(()), |_: &[Message]| Ok(())).unwrap();
//! catalog.apply(&mut evaluator).unwrap();
//! evaluator.run().unwrap();
//!
//! assert_eq!(evaluator.failure_messages()[0].title, "Update Chrome");
//! ```

mod build;
pub mod loader;
pub mod probe;
pub mod schema;

pub use loader::{load_catalog, parse_catalog};
pub use probe::Probe;
pub use schema::{Catalog, CheckSpec};
