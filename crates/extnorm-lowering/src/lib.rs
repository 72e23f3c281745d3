//! The Ext class-definition pass.
//!
//! Finds `Ext.define(name, {...})`, `Ext.define(null, {...})`,
//! `Ext.create(name, ...)` and `extend: "Base"` config keys in a parsed
//! program and rewrites them into plain constructor functions with
//! prototype assignments and doc-comment type annotations.
//!
//! Matching happens in one read-only post-order traversal that fills four
//! worklists; rewriting runs afterwards in a fixed order: extends
//! annotations, named defines, anonymous defines, creates.

mod annotations;
pub mod ext_pass;
pub mod host;
mod matcher;
mod rewriter;
pub mod verifier;

pub use ext_pass::{ANONYMOUS_CLASS_PREFIX, CREATE_SUPPRESSION, DEFAULT_EXT_BASE, ExtPass, ExtPassOptions};
pub use host::{Compiler, PassHost};
pub use verifier::VerifyError;
