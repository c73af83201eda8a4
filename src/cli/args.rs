//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// initcheck - Environment capability checks with tailored remediation.
#[derive(Debug, Parser)]
#[command(name = "initcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a catalog's checks against an environment string
    Run(RunArgs),

    /// Show which catalog tags match an environment string
    Tags(TagsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Path to the catalog file
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Environment string to classify (e.g. a user agent)
    #[arg(short, long, env = "INITCHECK_ENV")]
    pub env: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail when any check fails, even without a matching message
    #[arg(long)]
    pub strict: bool,
}

impl RunArgs {
    /// Report format selected by the flags.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }
}

/// Arguments for the `tags` command.
#[derive(Debug, Clone, clap::Args)]
pub struct TagsArgs {
    /// Path to the catalog file
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Environment string to classify (e.g. a user agent)
    #[arg(short, long, env = "INITCHECK_ENV")]
    pub env: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl TagsArgs {
    /// Tag list format selected by the flags.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_json_flag(self.json)
    }
}
