//! JSON output formatter.
//!
//! Formats run reports as machine-readable JSON for tooling integration.

use serde::Serialize;
use std::io::Write;

use super::ReportFormatter;
use crate::evaluator::RunReport;

/// Formats run reports as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    report: &'a RunReport,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonSummary {
    checks: usize,
    failed: usize,
    messages: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &RunReport, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            report,
            summary: JsonSummary {
                checks: report.checks.len(),
                failed: report.checks.iter().filter(|c| !c.passed).count(),
                messages: report.messages.len(),
            },
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)?;

        Ok(())
    }
}
