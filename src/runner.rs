//! Run orchestration: discovery, per-document validation, reporting.

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::core::{Document, Finding, Source};
use crate::discovery;
use crate::report::{Reporter, RunTally};
use crate::validation::{validate_document, DocumentReport, RuleEngine, Stage};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Target directory absent; nothing was scanned
    MissingDirectory,
    /// Directory exists but holds no candidate files
    NoFiles,
    Completed(RunTally),
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::MissingDirectory => 1,
            RunOutcome::NoFiles => 0,
            RunOutcome::Completed(tally) if tally.passed() => 0,
            RunOutcome::Completed(_) => 1,
        }
    }

    pub fn tally(&self) -> Option<&RunTally> {
        match self {
            RunOutcome::Completed(tally) => Some(tally),
            _ => None,
        }
    }
}

/// Validate every candidate file under the configured root
pub fn run<W: Write>(config: &Config, reporter: &mut Reporter<W>) -> Result<RunOutcome> {
    let rules = RuleEngine::new(config.dialect.clone())?;

    reporter.banner(&config.root)?;

    if !config.root.is_dir() {
        log::error!("{} is not a directory", config.root.display());
        reporter.missing_directory(&config.root)?;
        return Ok(RunOutcome::MissingDirectory);
    }

    let files = discovery::discover(&config.root, &config.extension, &config.exclude_dir)?;
    if files.is_empty() {
        reporter.no_files()?;
        return Ok(RunOutcome::NoFiles);
    }
    reporter.found(files.len())?;

    let mut tally = RunTally::new();
    for path in &files {
        let report = match Document::read(&config.root, path) {
            Ok(doc) => validate_document(&doc, &rules),
            Err(e) => {
                log::warn!("{:#}", e);
                let name = crate::core::document::display_name(&config.root, path);
                let finding = Finding::error(Source::Io, format!("Failed to read file - {:#}", e));
                DocumentReport::halted(name, Stage::WellFormedness, finding)
            }
        };
        reporter
            .document(&report)
            .context("failed to write report")?;
        tally.record(&report);
    }

    reporter.summary(&tally)?;
    Ok(RunOutcome::Completed(tally))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunOutcome::MissingDirectory.exit_code(), 1);
        assert_eq!(RunOutcome::NoFiles.exit_code(), 0);

        let clean = RunTally {
            files: 3,
            errors: 0,
            warnings: 5,
        };
        assert_eq!(RunOutcome::Completed(clean).exit_code(), 0);

        let failed = RunTally {
            files: 3,
            errors: 1,
            warnings: 0,
        };
        assert_eq!(RunOutcome::Completed(failed).exit_code(), 1);
        assert_eq!(RunOutcome::Completed(failed).tally(), Some(&failed));
        assert_eq!(RunOutcome::NoFiles.tally(), None);
    }

    #[test]
    fn test_unreadable_file_counts_as_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("Binary.xml"), [0xff, 0xfe, 0x00]).expect("write");

        let config = Config::for_root(dir.path());
        let mut reporter = Reporter::new(Vec::new(), false);
        let outcome = run(&config, &mut reporter).expect("run");

        let tally = outcome.tally().expect("completed");
        assert_eq!(tally.errors, 1);
        let out = String::from_utf8(reporter.into_inner()).expect("utf8");
        assert!(out.contains("Failed to read file"));
    }
}
