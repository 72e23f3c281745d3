//! Parser and tree model for the extnorm rewriter.
//!
//! - `parser`: the arena (`NodeArena`, `NodeIndex`), node kinds and the
//!   recursive-descent ES5 parser (`ParserState`)
//! - `jsdoc`: doc-comment model (`JsDocInfo`) and its builder
//! - `syntax`: traversal driver and qualified-name utilities

pub mod parser;
pub use parser::{Node, NodeArena, NodeFlags, NodeIndex, NodeList, ParserState, syntax_kind_ext};

pub mod jsdoc;
pub use jsdoc::{JsDocInfo, JsDocInfoBuilder, TypeExpr};

pub mod syntax;
