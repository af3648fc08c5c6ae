//! Markup Parser
//!
//! Generic XML well-formedness checking and tree construction on top of `roxmltree`.
//! Nothing here knows about the dialect's vocabulary except the root-element check.

pub mod tree;

pub use tree::{parse_tree, Attribute, UiElement};

use std::fmt;

/// First syntax violation in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (line {}, column {})", self.message, self.line, self.column)
    }
}

impl From<roxmltree::Error> for SyntaxError {
    fn from(err: roxmltree::Error) -> Self {
        let pos = err.pos();
        let full = err.to_string();
        // Position is reported separately.
        let message = full
            .strip_suffix(&format!(" at {}", pos))
            .unwrap_or(&full)
            .to_string();
        Self {
            message,
            line: pos.row as usize,
            column: pos.col as usize,
        }
    }
}

pub(crate) fn parsing_options() -> roxmltree::ParsingOptions {
    roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    }
}

/// Check generic XML syntax: balanced tags, legal characters, attribute syntax
pub fn check_well_formed(text: &str) -> Result<(), SyntaxError> {
    roxmltree::Document::parse_with_options(text, parsing_options())
        .map(|_| ())
        .map_err(SyntaxError::from)
}

/// Check that the tree's root label is the dialect's required root
pub fn check_root(tree: &UiElement, expected: &str) -> Result<(), String> {
    if tree.name == expected {
        Ok(())
    } else {
        Err(format!("Root element must be <{}>", expected))
    }
}
