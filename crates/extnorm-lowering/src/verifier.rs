//! Argument and context checks for matched Ext calls.
//!
//! Checks return a `VerifyError` instead of reporting directly so the
//! `extend` key check can re-run them on its enclosing define silently.

use extnorm_common::diagnostics::diagnostic_messages;
use extnorm_common::{Diagnostic, DiagnosticMessage, LanguageMode};
use extnorm_parser::syntax::{ValueType, get_qualified_name, is_valid_qualified_name, known_value_type};
use extnorm_parser::syntax::NodeTraversal;
use extnorm_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use extnorm_scanner::SyntaxKind;
use thiserror::Error;

use crate::matcher::{ExtCall, match_ext_call};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("method \"{method}\" called without an argument")]
    NullArgument { method: String, at: NodeIndex },

    #[error("method \"{method}\" called with invalid argument")]
    InvalidArgument { method: String, at: NodeIndex },

    #[error("\"{name}\" is not a valid JS identifier name")]
    InvalidDefineName { name: String, at: NodeIndex },

    #[error("{method} must be called at file scope")]
    InvalidClosureCall { method: String, at: NodeIndex },
}

impl VerifyError {
    pub const fn message(&self) -> &'static DiagnosticMessage {
        match self {
            VerifyError::NullArgument { .. } => &diagnostic_messages::NULL_ARGUMENT,
            VerifyError::InvalidArgument { .. } => &diagnostic_messages::INVALID_ARGUMENT,
            VerifyError::InvalidDefineName { .. } => &diagnostic_messages::INVALID_DEFINE_NAME,
            VerifyError::InvalidClosureCall { .. } => &diagnostic_messages::INVALID_CLOSURE_CALL,
        }
    }

    /// The node the diagnostic points at.
    pub const fn node(&self) -> NodeIndex {
        match self {
            VerifyError::NullArgument { at, .. }
            | VerifyError::InvalidArgument { at, .. }
            | VerifyError::InvalidDefineName { at, .. }
            | VerifyError::InvalidClosureCall { at, .. } => *at,
        }
    }

    pub fn to_diagnostic(&self, t: &NodeTraversal<'_>, ext_base: &str) -> Diagnostic {
        let arg = match self {
            VerifyError::NullArgument { method, .. } | VerifyError::InvalidArgument { method, .. } => {
                method.as_str()
            }
            VerifyError::InvalidDefineName { name, .. } => name.as_str(),
            VerifyError::InvalidClosureCall { .. } => ext_base,
        };
        t.make_error(self.node(), self.message(), &[arg])
    }
}

/// How a `create` call names its class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CreateUsage {
    /// A string literal holding a qualified name; rewritten.
    Literal,
    /// String-valued but not a rewritable literal, e.g. `"ns." + name`.
    Dynamic,
    /// Missing, or not known to be a string.
    NonStandard,
}

/// Where named defines may appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DefineContext {
    pub(crate) language_mode: LanguageMode,
    pub(crate) require_file_scope: bool,
}

fn method_name(arena: &NodeArena, call: NodeIndex) -> (NodeIndex, String) {
    let callee = arena.child(call, 0);
    let name = get_qualified_name(arena, callee).unwrap_or_default();
    (callee, name)
}

fn expect_object_literal(arena: &NodeArena, call: NodeIndex) -> Result<(), VerifyError> {
    let (callee, method) = method_name(arena, call);
    let config = arena.child(call, 2);
    if config.is_none() {
        return Err(VerifyError::NullArgument { method, at: callee });
    }
    if arena.kind(config) != syntax_kind_ext::OBJECT_LITERAL_EXPRESSION {
        return Err(VerifyError::InvalidArgument { method, at: callee });
    }
    // The rewrite has nowhere to put a created callback or other extras.
    if arena.child(call, 3).is_some() {
        return Err(VerifyError::InvalidArgument { method, at: callee });
    }
    Ok(())
}

/// `Ext.define("a.b.C", {...})` as a statement of its own.
pub(crate) fn verify_define(arena: &NodeArena, call: NodeIndex, context: DefineContext) -> Result<(), VerifyError> {
    let (callee, method) = method_name(arena, call);
    let name = arena.child(call, 1);
    if name.is_none() {
        return Err(VerifyError::NullArgument { method, at: callee });
    }
    if !arena.is_kind(name, SyntaxKind::StringLiteral) {
        return Err(VerifyError::InvalidArgument { method, at: callee });
    }
    expect_object_literal(arena, call)?;

    let class_name = arena.text(name);
    if !is_valid_qualified_name(context.language_mode, class_name) {
        return Err(VerifyError::InvalidDefineName {
            name: class_name.to_string(),
            at: name,
        });
    }

    let statement = arena.parent(call);
    let in_statement_position = arena.kind(statement) == syntax_kind_ext::EXPRESSION_STATEMENT;
    let at_file_scope = arena.kind(arena.parent(statement)) == syntax_kind_ext::SOURCE_FILE;
    if !in_statement_position || (context.require_file_scope && !at_file_scope) {
        return Err(VerifyError::InvalidClosureCall { method, at: callee });
    }
    Ok(())
}

/// `Ext.define(null, {...})` in any expression position.
pub(crate) fn verify_anonymous_define(arena: &NodeArena, call: NodeIndex) -> Result<(), VerifyError> {
    let (callee, method) = method_name(arena, call);
    if arena.kind(arena.parent(callee)) != syntax_kind_ext::CALL_EXPRESSION {
        return Err(VerifyError::InvalidArgument { method, at: callee });
    }
    let first = arena.child(call, 1);
    if first.is_none() {
        return Err(VerifyError::NullArgument { method, at: callee });
    }
    if !arena.is_kind(first, SyntaxKind::NullKeyword) {
        return Err(VerifyError::InvalidArgument { method, at: callee });
    }
    expect_object_literal(arena, call)
}

/// Classify the class name passed to `Ext.create`.
///
/// Never an error: a create the pass cannot rewrite is at most a style warning.
pub(crate) fn verify_create(arena: &NodeArena, call: NodeIndex, language_mode: LanguageMode) -> CreateUsage {
    let name = arena.child(call, 1);
    if name.is_none() || known_value_type(arena, name) != ValueType::String {
        return CreateUsage::NonStandard;
    }
    if arena.is_kind(name, SyntaxKind::StringLiteral) && is_valid_qualified_name(language_mode, arena.text(name)) {
        CreateUsage::Literal
    } else {
        CreateUsage::Dynamic
    }
}

/// `extend: "a.b.Base"` directly inside the config of a valid define.
///
/// Returns the define call whose doc receives the base type.
pub(crate) fn verify_extend(
    arena: &NodeArena,
    key: NodeIndex,
    ext_base: &str,
    context: DefineContext,
) -> Option<NodeIndex> {
    if !arena.is_kind(arena.child(key, 0), SyntaxKind::StringLiteral) {
        return None;
    }
    let config = arena.parent(key);
    if arena.kind(config) != syntax_kind_ext::OBJECT_LITERAL_EXPRESSION {
        return None;
    }
    let call = arena.parent(config);
    if arena.child(call, 2) != config {
        return None;
    }
    let verified = match match_ext_call(arena, call, ext_base)? {
        ExtCall::NamedDefine => verify_define(arena, call, context),
        ExtCall::AnonymousDefine => verify_anonymous_define(arena, call),
        ExtCall::Create => return None,
    };
    verified.ok().map(|()| call)
}
