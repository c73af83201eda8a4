//! Run command implementation.
//!
//! The `initcheck run` command loads a catalog, evaluates it against the
//! environment string, and prints the resolved messages.

use std::io::Write;

use tracing::debug;

use crate::catalog::load_catalog;
use crate::checks::Message;
use crate::cli::args::RunArgs;
use crate::error::Result;
use crate::evaluator::{Evaluator, FailurePolicy};
use crate::output::{HumanFormatter, JsonFormatter, OutputFormat, ReportFormatter};

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    args: RunArgs,
    use_color: bool,
}

impl RunCommand {
    /// Create a new run command.
    pub fn new(args: RunArgs, use_color: bool) -> Self {
        Self { args, use_color }
    }
}

impl Command for RunCommand {
    fn execute(&self, mut out: &mut dyn Write) -> Result<CommandResult> {
        let catalog = load_catalog(&self.args.catalog)?;

        let mut evaluator = Evaluator::new(
            self.args.env.as_str(),
            || {
                debug!("Environment passed every check");
                Ok(())
            },
            |messages: &[Message]| {
                debug!("Environment failed with {} message(s)", messages.len());
                Ok(())
            },
        )?;
        if self.args.strict {
            evaluator.with_failure_policy(FailurePolicy::AnyFailingCheck);
        }
        catalog.apply(&mut evaluator)?;
        evaluator.run()?;

        let Some(report) = evaluator.report() else {
            return Ok(CommandResult::failure(1));
        };

        match self.args.output_format() {
            OutputFormat::Json => JsonFormatter::new().format(&report, &mut out)?,
            OutputFormat::Human => {
                HumanFormatter::new(self.use_color).format(&report, &mut out)?
            }
        }

        if report.passed {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
