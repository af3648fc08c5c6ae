//! Console reporting and the run tally.
//!
//! Everything that prints or counts lives here; the validation engine only
//! produces findings.

use std::io::{self, Write};
use std::path::Path;

use colored::{Color, Colorize};

use crate::core::{Finding, Severity, Source};
use crate::validation::{DocumentReport, DocumentStatus};

/// Totals across one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunTally {
    pub files: usize,
    pub errors: usize,
    pub warnings: usize,
}

impl RunTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one document's findings into the totals
    pub fn record(&mut self, report: &DocumentReport) {
        self.files += 1;
        self.errors += report.error_count();
        self.warnings += report.warning_count();
    }

    pub fn passed(&self) -> bool {
        self.errors == 0
    }
}

/// Writes the human-readable report
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn banner(&mut self, root: &Path) -> io::Result<()> {
        let title = self.paint("=== WoW Addon XML Validator ===", Color::Cyan);
        writeln!(self.out, "{}\n", title)?;
        writeln!(self.out, "Scanning: {}\n", root.display())
    }

    pub fn missing_directory(&mut self, root: &Path) -> io::Result<()> {
        let line = format!("Error: {} directory not found", root.display());
        let line = self.paint(&line, Color::Red);
        writeln!(self.out, "{}", line)
    }

    pub fn no_files(&mut self) -> io::Result<()> {
        let line = self.paint("No XML files found", Color::Yellow);
        writeln!(self.out, "{}", line)
    }

    pub fn found(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.out, "Found {} XML file(s)\n", count)
    }

    /// Status line for a document followed by its findings
    pub fn document(&mut self, report: &DocumentReport) -> io::Result<()> {
        let (marker, color) = match report.status() {
            DocumentStatus::Passed => ("✓", Color::Green),
            DocumentStatus::PassedWithWarnings => ("⚠", Color::Yellow),
            DocumentStatus::Failed => ("✗", Color::Red),
        };
        let heading = format!("{} {}", marker, report.display_name);
        let heading = self.paint(&heading, color);
        writeln!(self.out, "{}", heading)?;

        for finding in &report.findings {
            self.finding(finding)?;
        }
        Ok(())
    }

    fn finding(&mut self, finding: &Finding) -> io::Result<()> {
        let label = match finding.severity {
            Severity::Error => self.paint("Error:", Color::Red),
            Severity::Warning => self.paint("Warning:", Color::Yellow),
        };

        match (finding.source, finding.location) {
            (Source::Syntax, Some(loc)) => {
                writeln!(self.out, "  {} {}", label, finding.message)?;
                writeln!(self.out, "  Line: {}, Column: {}", loc.line, loc.column)
            }
            (_, Some(loc)) => writeln!(self.out, "  {} {} ({})", label, finding.message, loc),
            (_, None) => writeln!(self.out, "  {} {}", label, finding.message),
        }
    }

    pub fn summary(&mut self, tally: &RunTally) -> io::Result<()> {
        let title = self.paint("=== Validation Summary ===", Color::Cyan);
        writeln!(self.out, "\n{}", title)?;
        writeln!(self.out, "Files checked: {}", tally.files)?;
        let errors = self.paint(&tally.errors.to_string(), Color::Red);
        writeln!(self.out, "Errors: {}", errors)?;
        let warnings = self.paint(&tally.warnings.to_string(), Color::Yellow);
        writeln!(self.out, "Warnings: {}", warnings)?;

        let verdict = if tally.errors > 0 {
            self.paint("✗ Validation failed", Color::Red)
        } else if tally.warnings > 0 {
            self.paint("⚠ Validation passed with warnings", Color::Yellow)
        } else {
            self.paint("✓ All XML files are valid", Color::Green)
        };
        writeln!(self.out, "\n{}", verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Location;
    use crate::validation::{Rule, Stage};

    fn render(report: &DocumentReport) -> String {
        let mut reporter = Reporter::new(Vec::new(), false);
        reporter.document(report).expect("write");
        String::from_utf8(reporter.into_inner()).expect("utf8")
    }

    #[test]
    fn test_tally_record() {
        let mut report = DocumentReport::new("a.xml");
        report
            .findings
            .push(Finding::error(Source::Rule(Rule::DeprecatedElement), "e"));
        report
            .findings
            .push(Finding::warning(Source::Rule(Rule::UnnamedFrame), "w"));
        report
            .findings
            .push(Finding::warning(Source::Rule(Rule::UnnamedFrame), "w"));

        let mut tally = RunTally::new();
        tally.record(&report);
        tally.record(&DocumentReport::new("b.xml"));

        assert_eq!(
            tally,
            RunTally {
                files: 2,
                errors: 1,
                warnings: 2
            }
        );
        assert!(!tally.passed());
    }

    #[test]
    fn test_render_clean_document() {
        assert_eq!(render(&DocumentReport::new("Main.xml")), "✓ Main.xml\n");
    }

    #[test]
    fn test_render_syntax_error() {
        let finding = Finding::error(Source::Syntax, "unexpected end of stream")
            .at(Location { line: 3, column: 7 });
        let report = DocumentReport::halted("Broken.xml", Stage::WellFormedness, finding);
        assert_eq!(
            render(&report),
            "✗ Broken.xml\n  Error: unexpected end of stream\n  Line: 3, Column: 7\n"
        );
    }

    #[test]
    fn test_render_warnings_with_locations() {
        let mut report = DocumentReport::new("Frames.xml");
        report.findings.push(Finding::warning(
            Source::Rule(Rule::MissingNamespace),
            "Missing xmlns declaration",
        ));
        report.findings.push(
            Finding::warning(Source::Rule(Rule::UnnamedFrame), "Frame without name")
                .at(Location { line: 2, column: 5 }),
        );
        assert_eq!(
            render(&report),
            "⚠ Frames.xml\n  Warning: Missing xmlns declaration\n  Warning: Frame without name (line 2, column 5)\n"
        );
    }

    #[test]
    fn test_summary_verdicts() {
        let cases = [
            (RunTally { files: 1, errors: 0, warnings: 0 }, "✓ All XML files are valid"),
            (RunTally { files: 1, errors: 0, warnings: 2 }, "⚠ Validation passed with warnings"),
            (RunTally { files: 1, errors: 1, warnings: 2 }, "✗ Validation failed"),
        ];
        for (tally, verdict) in cases {
            let mut reporter = Reporter::new(Vec::new(), false);
            reporter.summary(&tally).expect("write");
            let out = String::from_utf8(reporter.into_inner()).expect("utf8");
            assert!(out.contains(&format!("Files checked: {}", tally.files)));
            assert!(out.contains(&format!("Errors: {}", tally.errors)));
            assert!(out.trim_end().ends_with(verdict), "{}", out);
        }
    }
}
