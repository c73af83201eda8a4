//! Remediation messages attached to checks.
//!
//! A [`Message`] explains a failing check to the user and lists the steps to
//! fix it. Its tags decide for which environments it is shown.

use serde::{Deserialize, Deserializer, Serialize};

use crate::tags::TagSet;

/// A tagged, user-facing remediation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Message {
    /// Short headline.
    pub title: String,

    /// Longer explanation of the problem.
    #[serde(default, rename = "desc", alias = "description")]
    pub description: String,

    /// Ordered remediation steps.
    #[serde(default, deserialize_with = "one_or_many")]
    pub steps: Vec<String>,

    /// Tags this message applies to.
    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Accept either a single string or a list of strings.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

impl Message {
    /// Create a message with no steps and no tags.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            steps: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Add a single tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add a single remediation step.
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Add several remediation steps.
    pub fn with_steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Whether the message carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether any of the message's tags is in `tags`.
    pub fn applies_to(&self, tags: &TagSet) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }
}
