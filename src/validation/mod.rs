//! Validation Engine
//!
//! Document pipeline and the dialect rule battery, kept apart from discovery and reporting.

pub mod engine;
pub mod rules;

pub use engine::{validate_document, validate_text, DocumentReport, DocumentStatus, Stage};
pub use rules::{Rule, RuleContext, RuleEngine};
