//! Failure message resolution.
//!
//! For each failing check the [`MessageResolver`] picks the messages to show:
//!
//! 1. Every message sharing at least one tag with the environment's tags.
//! 2. Only when step 1 finds nothing, every message carrying the fallback tag.
//!
//! Messages keep check order and authoring order, and each message appears
//! once in the result.

use tracing::{debug, warn};

use crate::checks::{Check, Message};
use crate::tags::{TagSet, DEFAULT_TAG};

/// Selects the messages shown for failing checks.
#[derive(Debug, Clone, Default)]
pub struct MessageResolver;

impl MessageResolver {
    /// Create a resolver using the reserved `default` fallback tag.
    pub fn new() -> Self {
        Self
    }

    /// Gather the messages for every failing check in `checks`.
    pub fn resolve<'a, I>(&self, checks: I, tags: &TagSet) -> Vec<Message>
    where
        I: IntoIterator<Item = (&'a str, &'a Check)>,
    {
        let mut resolved: Vec<Message> = Vec::new();

        for (name, check) in checks {
            if check.passed() {
                continue;
            }

            let selected = self.select(check, tags);
            if selected.is_empty() {
                warn!("Check '{}' failed but has no message for this environment", name);
                continue;
            }
            debug!("Check '{}' contributed {} message(s)", name, selected.len());

            for message in selected {
                if !resolved.contains(message) {
                    resolved.push(message.clone());
                }
            }
        }

        resolved
    }

    /// Messages of one check: tag-specific first, fallback otherwise.
    fn select<'c>(&self, check: &'c Check, tags: &TagSet) -> Vec<&'c Message> {
        let specific: Vec<&Message> = check
            .messages()
            .iter()
            .filter(|m| m.applies_to(tags))
            .collect();
        if !specific.is_empty() {
            return specific;
        }

        check
            .messages()
            .iter()
            .filter(|m| m.has_tag(DEFAULT_TAG))
            .collect()
    }
}
