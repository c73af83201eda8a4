//! Check registry.
//!
//! The [`CheckRegistry`] stores checks in registration order and runs them.

use tracing::debug;

use super::check::Check;
use crate::error::{InitCheckError, Result};

/// Registry of named checks.
#[derive(Debug, Default)]
pub struct CheckRegistry {
    checks: Vec<(String, Check)>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Store `check` under `name`, replacing any earlier check.
    ///
    /// A replaced check keeps its original position.
    pub fn add(&mut self, name: impl Into<String>, check: Check) {
        let name = name.into();
        if let Some(slot) = self.checks.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = check;
        } else {
            self.checks.push((name, check));
        }
    }

    /// Execute every check in registration order, firing its callback.
    ///
    /// Stops at the first predicate or callback error. Checks executed
    /// before the error keep their updated outcome.
    pub fn run_all(&mut self) -> Result<()> {
        for (name, check) in &mut self.checks {
            let passed = check
                .execute()
                .map_err(|source| InitCheckError::CheckExecution {
                    check: name.clone(),
                    source,
                })?;
            debug!("Check '{}' {}", name, if passed { "passed" } else { "failed" });

            check
                .notify(name)
                .map_err(|source| InitCheckError::CheckCallback {
                    check: name.clone(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Get a check by name.
    pub fn get(&self, name: &str) -> Option<&Check> {
        self.checks.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }

    /// Iterate over `(name, check)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Check)> {
        self.checks.iter().map(|(n, c)| (n.as_str(), c))
    }

    /// Iterate over checks whose last execution failed.
    pub fn failing(&self) -> impl Iterator<Item = (&str, &Check)> {
        self.iter().filter(|(_, c)| !c.passed())
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
