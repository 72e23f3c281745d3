//! ES5 scanner/tokenizer for the extnorm rewriter.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine
//! - `char_codes` - Identifier and reserved-word classification

pub mod char_codes;
pub use char_codes::{is_identifier_text, is_reserved_word};

mod syntax_kind;
pub use syntax_kind::{SyntaxKind, keyword_kind};

mod scanner_impl;
pub use scanner_impl::{DocComment, ScannerDiagnostic, ScannerState};
