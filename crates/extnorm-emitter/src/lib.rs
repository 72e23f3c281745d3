//! Prints an extnorm tree back to JavaScript source.
//!
//! Parentheses are not stored in the tree; the printer inserts them from
//! operator precedence. Doc comments are printed in front of the node that
//! carries them.

mod printer;
mod printer_helpers;

pub use printer::Printer;
