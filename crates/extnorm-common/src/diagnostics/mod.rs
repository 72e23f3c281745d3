//! Diagnostic types and message lookup.
//!
//! Message data lives in `data.rs`. Parser diagnostics use the `EXT1xxx`
//! range, pass diagnostics the `EXT2xxx` range.

use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic message definition with code, kind tag, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    /// Stable kind tag, e.g. `INVALID_DEFINE_NAME`.
    pub key: &'static str,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// A structured error report tied to a source range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Build a diagnostic from a catalog entry, filling `{0}`, `{1}`, ... with `args`.
    #[must_use]
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: format_message(message.message, args),
            category: message.category,
            code: message.code,
        }
    }

    /// The kind tag for this diagnostic's code, if it is in the catalog.
    #[must_use]
    pub fn key(&self) -> Option<&'static str> {
        get_diagnostic_message(self.code).map(|m| m.key)
    }
}

/// A plain-text, non-blocking notice about non-standard (but legal) usage.
///
/// Style warnings travel on their own channel and never count as errors.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StyleWarning {
    pub file: String,
    pub start: u32,
    pub message: String,
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}
