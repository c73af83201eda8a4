//! Declarative check probes.
//!
//! A [`Probe`] is the catalog form of a check predicate. Converting it with
//! [`Probe::into_predicate`] validates it and yields a boxed predicate.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context;
use regex::RegexBuilder;
use serde::Deserialize;

use crate::checks::CheckPredicate;
use crate::error::{InitCheckError, Result};

/// How a catalog check decides pass or fail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum Probe {
    /// Pass if the environment variable is set.
    EnvSet {
        /// Variable name
        var: String,
    },

    /// Pass if the file or directory exists.
    FileExists {
        /// Path, relative to the catalog's directory unless absolute
        path: String,
    },

    /// Pass if the shell command exits with status 0.
    CommandSucceeds {
        /// Command run with `sh -c`
        command: String,
    },

    /// Pass if the environment string matches the pattern (case-insensitive).
    EnvironmentMatches {
        /// Regular expression
        pattern: String,
    },

    /// Fixed outcome.
    Always {
        /// Whether the check passes
        pass: bool,
    },
}

impl Probe {
    /// Build the predicate for check `name`.
    ///
    /// `environment` is the string under evaluation and `base_dir` anchors
    /// relative paths.
    pub fn into_predicate(
        self,
        name: &str,
        environment: &str,
        base_dir: &Path,
    ) -> Result<CheckPredicate> {
        let predicate: CheckPredicate = match self {
            Probe::EnvSet { var } => Box::new(move || -> anyhow::Result<bool> {
                Ok(std::env::var_os(&var).is_some())
            }),
            Probe::FileExists { path } => {
                let full_path = if Path::new(&path).is_absolute() {
                    PathBuf::from(path)
                } else {
                    base_dir.join(path)
                };
                Box::new(move || -> anyhow::Result<bool> { Ok(full_path.exists()) })
            }
            Probe::CommandSucceeds { command } => {
                if command.trim().is_empty() {
                    return Err(InitCheckError::InvalidProbe {
                        check: name.to_string(),
                        message: "command is empty".to_string(),
                    });
                }
                Box::new(move || run_command_succeeds(&command))
            }
            Probe::EnvironmentMatches { pattern } => {
                let regex = RegexBuilder::new(&pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| InitCheckError::InvalidProbe {
                        check: name.to_string(),
                        message: e.to_string(),
                    })?;
                let environment = environment.to_string();
                Box::new(move || -> anyhow::Result<bool> { Ok(regex.is_match(&environment)) })
            }
            Probe::Always { pass } => Box::new(move || -> anyhow::Result<bool> { Ok(pass) }),
        };
        Ok(predicate)
    }
}

fn run_command_succeeds(command: &str) -> anyhow::Result<bool> {
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("failed to spawn `{command}`"))?;
    Ok(status.success())
}
