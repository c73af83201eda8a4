//! Run orchestration.
//!
//! The [`Evaluator`] ties the registries together. One call to
//! [`Evaluator::run`] goes through these phases:
//!
//! 1. Clear and recompute the tags matching the environment string
//! 2. Execute every check, firing check-level callbacks
//! 3. Resolve failure messages for the failing checks
//! 4. Fire either every pass callback or every fail callback
//!
//! A run has no rollback. When a predicate or callback errors, the phases
//! already completed keep their effects and the error is returned.

use serde::Serialize;
use tracing::{debug, info};

use crate::checks::{Check, CheckRegistry, Message};
use crate::error::{InitCheckError, Result};
use crate::resolver::MessageResolver;
use crate::tags::{TagRegistry, TagSet, TagTest};

/// Global callback fired when a run passes.
pub type PassFn = Box<dyn FnMut() -> anyhow::Result<()>>;

/// Global callback fired with the resolved messages when a run fails.
pub type FailFn = Box<dyn FnMut(&[Message]) -> anyhow::Result<()>>;

/// Decides whether a run counts as failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Fail only when at least one message was resolved.
    #[default]
    MessagesOnly,
    /// Also fail when a check failed without any resolvable message.
    AnyFailingCheck,
}

/// Classifies an environment, runs checks, and reports failures.
///
/// # Example
///
/// ```
/// use initcheck::{Check, Evaluator, Message};
///
/// let mut evaluator = Evaluator::new(
///     "Mozilla/5.0 (Linux; Android 14)",
///     || Ok(()),
///     |messages| {
///         assert_eq!(messages[0].title, "Update WebView");
///         Ok(())
///     },
/// )
/// .unwrap();
///
/// evaluator
///     .add_tag_pattern("android", "android")
///     .unwrap()
///     .add_check(
///         "webview",
///         Check::new(|| false)
///             .with_message(Message::new("Update WebView", "").with_tag("android"))
///             .with_message(Message::new("Update your browser", "").with_tag("default")),
///     )
///     .run()
///     .unwrap();
///
/// assert_eq!(evaluator.passed(), Some(false));
/// ```
pub struct Evaluator {
    environment: String,
    tags: TagRegistry,
    checks: CheckRegistry,
    resolver: MessageResolver,
    policy: FailurePolicy,
    current_tags: TagSet,
    failure_messages: Vec<Message>,
    passed: Option<bool>,
    pass_fns: Vec<PassFn>,
    fail_fns: Vec<FailFn>,
}

impl Evaluator {
    /// Create an evaluator for `environment` with one pass and one fail callback.
    ///
    /// Fails with [`InitCheckError::MissingEnvironment`] when the environment
    /// string is empty or only whitespace.
    pub fn new<P, F>(environment: impl Into<String>, on_pass: P, on_fail: F) -> Result<Self>
    where
        P: FnMut() -> anyhow::Result<()> + 'static,
        F: FnMut(&[Message]) -> anyhow::Result<()> + 'static,
    {
        let environment = environment.into();
        if environment.trim().is_empty() {
            return Err(InitCheckError::MissingEnvironment);
        }

        Ok(Self {
            environment,
            tags: TagRegistry::new(),
            checks: CheckRegistry::new(),
            resolver: MessageResolver::new(),
            policy: FailurePolicy::default(),
            current_tags: TagSet::new(),
            failure_messages: Vec::new(),
            passed: None,
            pass_fns: vec![Box::new(on_pass)],
            fail_fns: vec![Box::new(on_fail)],
        })
    }

    /// Register or replace a check.
    pub fn add_check(&mut self, name: impl Into<String>, check: Check) -> &mut Self {
        self.checks.add(name, check);
        self
    }

    /// Register or replace a tag test.
    pub fn add_tag_definition(
        &mut self,
        name: impl Into<String>,
        test: TagTest,
    ) -> Result<&mut Self> {
        self.tags.define(name, test)?;
        Ok(self)
    }

    /// Register a case-insensitive pattern tag.
    pub fn add_tag_pattern(&mut self, name: &str, pattern: &str) -> Result<&mut Self> {
        let test = TagTest::pattern(name, pattern)?;
        self.add_tag_definition(name, test)
    }

    /// Replace every pass callback with `f`.
    pub fn on_pass<P>(&mut self, f: P) -> &mut Self
    where
        P: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.pass_fns = vec![Box::new(f)];
        self
    }

    /// Replace every fail callback with `f`.
    pub fn on_fail<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&[Message]) -> anyhow::Result<()> + 'static,
    {
        self.fail_fns = vec![Box::new(f)];
        self
    }

    /// Append a pass callback.
    pub fn add_pass_fn<P>(&mut self, f: P) -> &mut Self
    where
        P: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.pass_fns.push(Box::new(f));
        self
    }

    /// Append a fail callback.
    pub fn add_fail_fn<F>(&mut self, f: F) -> &mut Self
    where
        F: FnMut(&[Message]) -> anyhow::Result<()> + 'static,
    {
        self.fail_fns.push(Box::new(f));
        self
    }

    /// Choose how a run's outcome is decided.
    pub fn with_failure_policy(&mut self, policy: FailurePolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Execute one full run.
    pub fn run(&mut self) -> Result<&mut Self> {
        self.passed = None;
        self.failure_messages.clear();

        self.current_tags = self.tags.evaluate(&self.environment);
        debug!(
            "Environment matched {} of {} tag(s)",
            self.current_tags.len(),
            self.tags.len()
        );

        self.checks.run_all()?;

        self.failure_messages = self
            .resolver
            .resolve(self.checks.iter(), &self.current_tags);

        let failed = match self.policy {
            FailurePolicy::MessagesOnly => !self.failure_messages.is_empty(),
            FailurePolicy::AnyFailingCheck => {
                !self.failure_messages.is_empty() || self.checks.failing().next().is_some()
            }
        };
        self.passed = Some(!failed);

        if failed {
            info!(
                "{} check(s) failed with {} message(s)",
                self.checks.failing().count(),
                self.failure_messages.len()
            );
            for f in &mut self.fail_fns {
                f(&self.failure_messages).map_err(|source| InitCheckError::CallbackFailed {
                    outcome: "Fail",
                    source,
                })?;
            }
        } else {
            info!("All {} check(s) passed", self.checks.len());
            for f in &mut self.pass_fns {
                f().map_err(|source| InitCheckError::CallbackFailed {
                    outcome: "Pass",
                    source,
                })?;
            }
        }

        Ok(self)
    }

    /// The environment string under evaluation.
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Tags matched by the most recent run.
    pub fn current_tags(&self) -> &TagSet {
        &self.current_tags
    }

    /// Messages resolved by the most recent run.
    pub fn failure_messages(&self) -> &[Message] {
        &self.failure_messages
    }

    /// Outcome decided by the most recent run, `None` before any.
    ///
    /// Set before the global callbacks fire, so it is also available after a
    /// run that ended with [`InitCheckError::CallbackFailed`].
    pub fn passed(&self) -> Option<bool> {
        self.passed
    }

    /// Registered checks.
    pub fn checks(&self) -> &CheckRegistry {
        &self.checks
    }

    /// Registered tag tests.
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Number of pass callbacks.
    pub fn pass_fn_count(&self) -> usize {
        self.pass_fns.len()
    }

    /// Number of fail callbacks.
    pub fn fail_fn_count(&self) -> usize {
        self.fail_fns.len()
    }

    /// Snapshot of the most recent run whose outcome was decided.
    pub fn report(&self) -> Option<RunReport> {
        let passed = self.passed?;
        Some(RunReport {
            environment: self.environment.clone(),
            tags: self.current_tags.iter().cloned().collect(),
            checks: self
                .checks
                .iter()
                .map(|(name, check)| CheckOutcome {
                    name: name.to_string(),
                    passed: check.passed(),
                })
                .collect(),
            messages: self.failure_messages.clone(),
            passed,
        })
    }
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("environment", &self.environment)
            .field("tags", &self.tags)
            .field("checks", &self.checks)
            .field("policy", &self.policy)
            .field("current_tags", &self.current_tags)
            .field("passed", &self.passed)
            .field("pass_fns", &self.pass_fns.len())
            .field("fail_fns", &self.fail_fns.len())
            .finish()
    }
}

/// Outcome of a single check in a [`RunReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub name: String,
    pub passed: bool,
}

/// Serializable snapshot of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub environment: String,
    pub tags: Vec<String>,
    pub checks: Vec<CheckOutcome>,
    pub messages: Vec<Message>,
    pub passed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    fn recording_evaluator(environment: &str) -> (Evaluator, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let pass_log = Rc::clone(&log);
        let fail_log = Rc::clone(&log);
        let evaluator = Evaluator::new(
            environment,
            move || {
                pass_log.borrow_mut().push("pass".to_string());
                Ok(())
            },
            move |messages: &[Message]| {
                fail_log
                    .borrow_mut()
                    .push(format!("fail:{}", messages.len()));
                Ok(())
            },
        )
        .unwrap();
        (evaluator, log)
    }

    fn android_check(pass: bool) -> Check {
        Check::new(move || pass)
            .with_message(Message::new("Android fix", "").with_tag("android"))
            .with_message(Message::new("Generic fix", "").with_tag("default"))
    }

    #[test]
    fn new_rejects_empty_environment() {
        let err = Evaluator::new("", || Ok(()), |_: &[Message]| Ok(())).unwrap_err();
        assert!(matches!(err, InitCheckError::MissingEnvironment));

        let err = Evaluator::new("   ", || Ok(()), |_: &[Message]| Ok(())).unwrap_err();
        assert!(matches!(err, InitCheckError::MissingEnvironment));
    }

    #[test]
    fn new_starts_idle() {
        let (evaluator, log) = recording_evaluator("Android");
        assert_eq!(evaluator.passed(), None);
        assert!(evaluator.report().is_none());
        assert!(evaluator.current_tags().is_empty());
        assert_eq!(evaluator.pass_fn_count(), 1);
        assert_eq!(evaluator.fail_fn_count(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn all_passing_fires_pass_callbacks_only() {
        let (mut evaluator, log) = recording_evaluator("Android");
        evaluator.add_check("webview", android_check(true));

        evaluator.run().unwrap();

        assert_eq!(*log.borrow(), vec!["pass"]);
        assert_eq!(evaluator.passed(), Some(true));
        assert!(evaluator.failure_messages().is_empty());
    }

    #[test]
    fn failing_check_fires_fail_callbacks_with_messages() {
        let (mut evaluator, log) = recording_evaluator("Linux; Android 14");
        evaluator
            .add_tag_pattern("android", "android")
            .unwrap()
            .add_check("webview", android_check(false));

        evaluator.run().unwrap();

        assert_eq!(*log.borrow(), vec!["fail:1"]);
        assert_eq!(evaluator.failure_messages()[0].title, "Android fix");
        assert_eq!(evaluator.passed(), Some(false));
    }

    #[test]
    fn pass_callbacks_fire_in_registration_order() {
        let (mut evaluator, log) = recording_evaluator("desktop");
        for label in ["second", "third"] {
            let log = Rc::clone(&log);
            evaluator.add_pass_fn(move || {
                log.borrow_mut().push(label.to_string());
                Ok(())
            });
        }

        evaluator.run().unwrap();

        assert_eq!(*log.borrow(), vec!["pass", "second", "third"]);
    }

    #[test]
    fn every_fail_callback_receives_full_list() {
        let (mut evaluator, log) = recording_evaluator("desktop");
        let extra = Rc::clone(&log);
        evaluator
            .add_fail_fn(move |messages| {
                let titles: Vec<_> = messages.iter().map(|m| m.title.clone()).collect();
                extra.borrow_mut().push(titles.join(","));
                Ok(())
            })
            .add_check(
                "a",
                Check::new(|| false).with_message(Message::new("A", "").with_tag("default")),
            )
            .add_check(
                "b",
                Check::new(|| false).with_message(Message::new("B", "").with_tag("default")),
            );

        evaluator.run().unwrap();

        assert_eq!(*log.borrow(), vec!["fail:2", "A,B"]);
    }

    #[test]
    fn on_pass_replaces_and_add_pass_fn_appends() {
        let (mut evaluator, _log) = recording_evaluator("desktop");
        evaluator.add_pass_fn(|| Ok(())).add_pass_fn(|| Ok(()));
        assert_eq!(evaluator.pass_fn_count(), 3);

        evaluator.on_pass(|| Ok(()));
        assert_eq!(evaluator.pass_fn_count(), 1);

        evaluator.add_pass_fn(|| Ok(()));
        assert_eq!(evaluator.pass_fn_count(), 2);
    }

    #[test]
    fn on_fail_replaces_list() {
        let (mut evaluator, log) = recording_evaluator("desktop");
        let replaced = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&replaced);
        evaluator
            .add_fail_fn(|_| Ok(()))
            .on_fail(move |_| {
                *counter.borrow_mut() += 1;
                Ok(())
            })
            .add_check(
                "a",
                Check::new(|| false).with_message(Message::new("A", "").with_tag("default")),
            );

        evaluator.run().unwrap();

        assert_eq!(evaluator.fail_fn_count(), 1);
        assert_eq!(*replaced.borrow(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn silent_failure_passes_under_default_policy() {
        let (mut evaluator, log) = recording_evaluator("desktop");
        evaluator.add_check(
            "ios-only",
            Check::new(|| false).with_message(Message::new("iOS", "").with_tag("ios")),
        );

        evaluator.run().unwrap();

        assert_eq!(*log.borrow(), vec!["pass"]);
        assert!(!evaluator.checks().get("ios-only").unwrap().passed());
    }

    #[test]
    fn silent_failure_fails_under_any_failing_check_policy() {
        let (mut evaluator, log) = recording_evaluator("desktop");
        evaluator
            .with_failure_policy(FailurePolicy::AnyFailingCheck)
            .add_check("bare", Check::new(|| false));

        evaluator.run().unwrap();

        assert_eq!(*log.borrow(), vec!["fail:0"]);
        assert_eq!(evaluator.passed(), Some(false));
    }

    #[test]
    fn tags_do_not_accumulate_across_runs() {
        let (mut evaluator, _log) = recording_evaluator("Android");
        let enabled = Rc::new(RefCell::new(true));
        let flag = Rc::clone(&enabled);
        evaluator
            .add_tag_definition("android", TagTest::predicate(move |_, _| *flag.borrow()))
            .unwrap();

        evaluator.run().unwrap();
        assert!(evaluator.current_tags().contains("android"));

        *enabled.borrow_mut() = false;
        evaluator.run().unwrap();
        assert!(evaluator.current_tags().is_empty());
    }

    #[test]
    fn check_error_propagates_without_global_callbacks() {
        let (mut evaluator, log) = recording_evaluator("desktop");
        evaluator
            .add_check("ok", Check::new(|| true))
            .add_check("broken", Check::fallible(|| anyhow::bail!("predicate crashed")));

        let err = evaluator.run().unwrap_err();

        assert!(matches!(err, InitCheckError::CheckExecution { .. }));
        assert!(log.borrow().is_empty());
        assert!(evaluator.checks().get("ok").unwrap().passed());
        assert_eq!(evaluator.passed(), None);
    }

    #[test]
    fn global_callback_error_propagates() {
        let mut evaluator = Evaluator::new(
            "desktop",
            || anyhow::bail!("display unavailable"),
            |_: &[Message]| Ok(()),
        )
        .unwrap();

        let err = evaluator.run().unwrap_err();

        assert!(matches!(err, InitCheckError::CallbackFailed { outcome: "Pass", .. }));
        assert_eq!(evaluator.passed(), Some(true));
        assert!(evaluator.report().is_some());
    }

    #[test]
    fn check_callbacks_fire_before_global_callbacks() {
        let (mut evaluator, log) = recording_evaluator("desktop");
        let check_log = Rc::clone(&log);
        evaluator.add_check(
            "storage",
            Check::new(|| false)
                .with_message(Message::new("Storage", "").with_tag("default"))
                .on_fail(move |name, _| {
                    check_log.borrow_mut().push(format!("check:{name}"));
                    Ok(())
                }),
        );

        evaluator.run().unwrap();

        assert_eq!(*log.borrow(), vec!["check:storage", "fail:1"]);
    }

    #[test]
    fn report_snapshots_last_run() {
        let (mut evaluator, _log) = recording_evaluator("Linux; Android 14");
        evaluator
            .add_tag_pattern("android", "android")
            .unwrap()
            .add_check("webview", android_check(false))
            .add_check("cookies", Check::new(|| true));

        evaluator.run().unwrap();
        let report = evaluator.report().unwrap();

        assert_eq!(report.environment, "Linux; Android 14");
        assert_eq!(report.tags, vec!["android"]);
        assert_eq!(
            report.checks,
            vec![
                CheckOutcome {
                    name: "webview".into(),
                    passed: false
                },
                CheckOutcome {
                    name: "cookies".into(),
                    passed: true
                },
            ]
        );
        assert_eq!(report.messages.len(), 1);
        assert!(!report.passed);
    }

    #[test]
    fn add_tag_definition_rejects_reserved_name() {
        let (mut evaluator, _log) = recording_evaluator("desktop");
        let err = evaluator
            .add_tag_definition("default", TagTest::predicate(|_, _| true))
            .unwrap_err();
        assert!(matches!(err, InitCheckError::ReservedTagName { .. }));
    }
}
