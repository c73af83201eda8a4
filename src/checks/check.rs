//! Named diagnostic checks.
//!
//! A [`Check`] pairs a zero-argument predicate with the messages shown when
//! it fails, plus optional callbacks fired after it runs.

use super::message::Message;

/// Predicate of a check. An error aborts the run.
pub type CheckPredicate = Box<dyn Fn() -> anyhow::Result<bool>>;

/// Callback fired after a check runs, with the check's name and record.
pub type CheckCallback = Box<dyn Fn(&str, &Check) -> anyhow::Result<()>>;

/// A diagnostic with a pass/fail predicate and remediation messages.
pub struct Check {
    predicate: CheckPredicate,
    messages: Vec<Message>,
    on_pass: Option<CheckCallback>,
    on_fail: Option<CheckCallback>,
    pass: bool,
}

impl Check {
    /// Create a check from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + 'static,
    {
        Self::fallible(move || Ok(predicate()))
    }

    /// Create a check whose predicate may fail.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn() -> anyhow::Result<bool> + 'static,
    {
        Self {
            predicate: Box::new(predicate),
            messages: Vec::new(),
            on_pass: None,
            on_fail: None,
            pass: false,
        }
    }

    /// Attach a message.
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Attach several messages, keeping their order.
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Set the callback fired when this check passes.
    pub fn on_pass<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Check) -> anyhow::Result<()> + 'static,
    {
        self.on_pass = Some(Box::new(f));
        self
    }

    /// Set the callback fired when this check fails.
    pub fn on_fail<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Check) -> anyhow::Result<()> + 'static,
    {
        self.on_fail = Some(Box::new(f));
        self
    }

    /// Messages in authoring order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Outcome of the most recent execution. False before the first run.
    pub fn passed(&self) -> bool {
        self.pass
    }

    /// Evaluate the predicate and record the outcome.
    pub(crate) fn execute(&mut self) -> anyhow::Result<bool> {
        self.pass = (self.predicate)()?;
        Ok(self.pass)
    }

    /// Fire whichever callback matches the recorded outcome.
    pub(crate) fn notify(&self, name: &str) -> anyhow::Result<()> {
        let callback = if self.pass {
            &self.on_pass
        } else {
            &self.on_fail
        };
        match callback {
            Some(f) => f(name, self),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("messages", &self.messages)
            .field("on_pass", &self.on_pass.is_some())
            .field("on_fail", &self.on_fail.is_some())
            .field("pass", &self.pass)
            .finish()
    }
}
