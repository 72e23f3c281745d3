//! Common types and utilities for the extnorm rewriter.
//!
//! This crate provides foundational types used across all extnorm crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message catalog)
//! - Language modes (`LanguageMode`) that drive identifier validity rules
//! - Position/line-map types for byte offset to line/column conversion

// Common types - Shared constants to break circular dependencies
pub mod common;
pub use common::LanguageMode;

// Diagnostic types and the message catalog
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, StyleWarning, diagnostic_codes,
    format_message,
};

// Position/Range types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};
