//! Tags command implementation.
//!
//! The `initcheck tags` command prints the catalog tags that match the
//! environment string, without running any check.

use std::io::Write;

use crate::catalog::load_catalog;
use crate::cli::args::TagsArgs;
use crate::error::{InitCheckError, Result};
use crate::output::OutputFormat;
use crate::tags::TagRegistry;

use super::dispatcher::{Command, CommandResult};

/// The tags command implementation.
pub struct TagsCommand {
    args: TagsArgs,
}

impl TagsCommand {
    /// Create a new tags command.
    pub fn new(args: TagsArgs) -> Self {
        Self { args }
    }
}

impl Command for TagsCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        if self.args.env.trim().is_empty() {
            return Err(InitCheckError::MissingEnvironment);
        }

        let catalog = load_catalog(&self.args.catalog)?;
        let mut registry = TagRegistry::new();
        for (name, test) in catalog.tag_tests()? {
            registry.define(name, test)?;
        }

        let tags = registry.evaluate(&self.args.env);
        match self.args.output_format() {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, &tags).map_err(anyhow::Error::from)?;
                writeln!(out)?;
            }
            OutputFormat::Human => {
                for tag in &tags {
                    writeln!(out, "{}", tag)?;
                }
            }
        }

        Ok(CommandResult::success())
    }
}
