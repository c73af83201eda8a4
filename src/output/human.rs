//! Human-readable output formatter.
//!
//! Formats run reports for terminal display with optional color support.

use console::Style;
use std::io::Write;

use super::ReportFormatter;
use crate::evaluator::RunReport;

/// Formats run reports for human consumption.
pub struct HumanFormatter {
    /// Whether to use colors (ANSI escape codes).
    pub use_color: bool,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn style(&self, style: Style) -> Style {
        if self.use_color {
            style.force_styling(true)
        } else {
            Style::new().force_styling(false)
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &RunReport, writer: &mut W) -> std::io::Result<()> {
        let dim = self.style(Style::new().dim());
        let title = self.style(Style::new().bold());
        let success = self.style(Style::new().green());
        let error = self.style(Style::new().red().bold());

        if report.tags.is_empty() {
            writeln!(writer, "{}", dim.apply_to("Tags: (none)"))?;
        } else {
            writeln!(
                writer,
                "{}",
                dim.apply_to(format!("Tags: {}", report.tags.join(", ")))
            )?;
        }

        for check in &report.checks {
            let mark = if check.passed {
                success.apply_to("✓")
            } else {
                error.apply_to("✗")
            };
            writeln!(writer, "{} {}", mark, check.name)?;
        }
        writeln!(writer)?;

        for message in &report.messages {
            writeln!(writer, "{}", title.apply_to(&message.title))?;
            if !message.description.is_empty() {
                writeln!(writer, "  {}", message.description)?;
            }
            for (i, step) in message.steps.iter().enumerate() {
                writeln!(writer, "  {}. {}", i + 1, step)?;
            }
            writeln!(writer)?;
        }

        let failed = report.checks.iter().filter(|c| !c.passed).count();
        if report.passed && failed == 0 {
            writeln!(
                writer,
                "{}",
                success.apply_to(format!("All checks passed ({} checked)", report.checks.len()))
            )?;
        } else if report.passed {
            writeln!(
                writer,
                "{}",
                success.apply_to(format!(
                    "Passed, {} check(s) failed without a message",
                    failed
                ))
            )?;
        } else {
            writeln!(
                writer,
                "{}",
                error.apply_to(format!(
                    "{} check(s) failed, {} message(s)",
                    failed,
                    report.messages.len()
                ))
            )?;
        }

        Ok(())
    }
}
