//! Core Types
//!
//! Documents and the findings reported about them.

pub mod diagnostics;
pub mod document;

pub use diagnostics::{Finding, Location, Severity, Source};
pub use document::Document;
