//! WoW UI Validator
//!
//! A static checker for World of Warcraft addon UI XML, meant as a
//! pre-commit or CI gate.
//!
//! This library provides:
//! - XML well-formedness and root-element checks
//! - Dialect rules for known-bad markup patterns
//! - Directory discovery and console reporting

pub mod config;
pub mod core;
pub mod dialect;
pub mod discovery;
pub mod parser;
pub mod report;
pub mod runner;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{Document, Finding, Location, Severity};
pub use dialect::Dialect;
pub use report::{Reporter, RunTally};
pub use runner::{run, RunOutcome};
pub use validation::{validate_document, validate_text, DocumentReport, Rule, RuleEngine};
