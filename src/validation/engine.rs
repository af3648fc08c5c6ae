//! Validation Engine
//!
//! Per-document pipeline: well-formedness, then structure, then the dialect rules.
//! Each stage must pass before the next one runs.

use crate::core::{Document, Finding, Location, Severity, Source};
use crate::parser;
use crate::validation::rules::{RuleContext, RuleEngine};

/// Pipeline stage that stopped a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    WellFormedness,
    Structure,
}

/// Outcome shown for a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    Passed,
    PassedWithWarnings,
    Failed,
}

/// Findings for one document
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentReport {
    pub display_name: String,
    pub findings: Vec<Finding>,
    /// `None` when the rule engine ran
    pub halted_at: Option<Stage>,
}

impl DocumentReport {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            findings: Vec::new(),
            halted_at: None,
        }
    }

    /// Report for a document stopped by a single error
    pub fn halted(display_name: impl Into<String>, stage: Stage, finding: Finding) -> Self {
        Self {
            display_name: display_name.into(),
            findings: vec![finding],
            halted_at: Some(stage),
        }
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(Finding::is_error)
    }

    pub fn status(&self) -> DocumentStatus {
        if !self.is_valid() {
            DocumentStatus::Failed
        } else if self.warning_count() > 0 {
            DocumentStatus::PassedWithWarnings
        } else {
            DocumentStatus::Passed
        }
    }
}

/// Validate a document through all stages
pub fn validate_document(doc: &Document, rules: &RuleEngine) -> DocumentReport {
    validate_text(&doc.display_name, &doc.content, rules)
}

/// Validate raw text under the given display name
pub fn validate_text(display_name: &str, text: &str, rules: &RuleEngine) -> DocumentReport {
    if let Err(err) = parser::check_well_formed(text) {
        log::debug!("{}: not well-formed: {}", display_name, err);
        let finding = Finding::error(Source::Syntax, err.message).at(Location {
            line: err.line,
            column: err.column,
        });
        return DocumentReport::halted(display_name, Stage::WellFormedness, finding);
    }

    let tree = match parser::parse_tree(text) {
        Ok(tree) => tree,
        Err(message) => {
            log::debug!("{}: tree construction failed: {}", display_name, message);
            let finding = Finding::error(
                Source::Structure,
                format!("Failed to parse XML - {}", message),
            );
            return DocumentReport::halted(display_name, Stage::Structure, finding);
        }
    };

    if let Err(message) = parser::check_root(&tree, &rules.dialect().root_element) {
        log::debug!("{}: root element is <{}>", display_name, tree.name);
        let finding = Finding::error(Source::Structure, message);
        return DocumentReport::halted(display_name, Stage::Structure, finding);
    }

    log::debug!(
        "{}: structure ok ({} elements), running rules",
        display_name,
        tree.element_count()
    );

    let ctx = RuleContext::new(text);
    let mut report = DocumentReport::new(display_name);
    report.findings = rules.run(&ctx);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn rules() -> RuleEngine {
        RuleEngine::new(Dialect::builtin()).expect("rules")
    }

    #[test]
    fn test_report_status() {
        let mut report = DocumentReport::new("a.xml");
        assert!(report.is_valid());
        assert_eq!(report.status(), DocumentStatus::Passed);

        report
            .findings
            .push(Finding::warning(Source::Structure, "Test warning"));
        assert!(report.is_valid()); // Warnings don't make it invalid
        assert_eq!(report.status(), DocumentStatus::PassedWithWarnings);

        report
            .findings
            .push(Finding::error(Source::Structure, "Test error"));
        assert!(!report.is_valid());
        assert_eq!(report.status(), DocumentStatus::Failed);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_syntax_error_halts() {
        let report = validate_text("bad.xml", "<Ui>\n<Frame>\n</Ui>", &rules());
        assert_eq!(report.halted_at, Some(Stage::WellFormedness));
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].source, Source::Syntax);
        assert!(report.findings[0].location.is_some());
    }

    #[test]
    fn test_wrong_root_halts() {
        let report = validate_text("w.xml", "<Window><Backdrop/></Window>", &rules());
        assert_eq!(report.halted_at, Some(Stage::Structure));
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].message, "Root element must be <Ui>");
    }

    #[test]
    fn test_rules_run_after_structure() {
        let report = validate_text("ok.xml", "<Ui><Frame></Frame></Ui>", &rules());
        assert_eq!(report.halted_at, None);
        assert_eq!(report.warning_count(), 2);
        assert_eq!(report.status(), DocumentStatus::PassedWithWarnings);
    }

    #[test]
    fn test_namespaced_root_accepted() {
        let text = r#"<Ui xmlns="http://www.blizzard.com/wow/ui/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://www.blizzard.com/wow/ui/ ..\FrameXML\UI.xsd"></Ui>"#;
        let report = validate_text("ns.xml", text, &rules());
        assert!(report.findings.is_empty());
        assert_eq!(report.status(), DocumentStatus::Passed);
    }
}
