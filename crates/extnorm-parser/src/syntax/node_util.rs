//! Qualified names, value-type inference and small tree builders.

use crate::jsdoc::JsDocInfo;
use crate::parser::{NodeArena, NodeIndex, syntax_kind_ext};
use extnorm_common::LanguageMode;
use extnorm_scanner::{SyntaxKind, is_identifier_text, is_reserved_word};

/// Statically known value type of an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Undetermined,
    Null,
    Void,
    Number,
    String,
    Boolean,
    Object,
}

/// An identifier usable as a simple name under `mode`.
///
/// Only ASCII names are accepted so generated code stays valid in ES3.
pub fn is_valid_simple_name(mode: LanguageMode, name: &str) -> bool {
    name.is_ascii() && is_identifier_text(name) && !is_reserved_word(name, mode)
}

/// A dot-separated path of valid simple names, e.g. `a.b.C`.
pub fn is_valid_qualified_name(mode: LanguageMode, name: &str) -> bool {
    !name.is_empty() && name.split('.').all(|part| is_valid_simple_name(mode, part))
}

/// `a.b.c` for identifier/property-access chains, `None` for anything else.
pub fn get_qualified_name(arena: &NodeArena, n: NodeIndex) -> Option<String> {
    let node = arena.get(n)?;
    match node.kind {
        k if k == SyntaxKind::Identifier as u16 => Some(node.text.clone()),
        k if k == SyntaxKind::ThisKeyword as u16 => Some("this".to_string()),
        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
            let object = get_qualified_name(arena, node.first_child())?;
            Some(format!("{object}.{}", node.text))
        }
        _ => None,
    }
}

/// Build the reference `a.b.C` for a dotted name.
pub fn new_qname(arena: &mut NodeArena, name: &str) -> NodeIndex {
    let mut parts = name.split('.');
    let first = parts.next().unwrap_or_default();
    let mut node = if first == "this" {
        arena.new_synthesized(SyntaxKind::ThisKeyword)
    } else {
        arena.new_identifier(first)
    };
    for part in parts {
        node = arena.new_property_access(node, part);
    }
    node
}

/// Declare or assign `name`:
/// `var name = value;` for a simple name, `a.b.name = value;` otherwise.
///
/// The doc goes on the `var` statement or on the assignment.
pub fn new_qname_declaration(
    arena: &mut NodeArena,
    name: &str,
    value: NodeIndex,
    info: Option<JsDocInfo>,
) -> NodeIndex {
    if !name.contains('.') {
        let statement = arena.new_variable_statement(name, value);
        arena.set_jsdoc(statement, info);
        return statement;
    }
    let target = new_qname(arena, name);
    let assignment = arena.new_assignment(target, value);
    arena.set_jsdoc(assignment, info);
    arena.new_expression_statement(assignment)
}

fn same_type(a: ValueType, b: ValueType) -> ValueType {
    if a == b { a } else { ValueType::Undetermined }
}

/// Infer the value type of `n` from its syntax alone.
pub fn known_value_type(arena: &NodeArena, n: NodeIndex) -> ValueType {
    let Some(node) = arena.get(n) else {
        return ValueType::Undetermined;
    };
    let child = |i: usize| arena.child(n, i);
    match node.kind {
        k if k == SyntaxKind::StringLiteral as u16 => ValueType::String,
        k if k == SyntaxKind::NumericLiteral as u16 => ValueType::Number,
        k if k == SyntaxKind::TrueKeyword as u16 || k == SyntaxKind::FalseKeyword as u16 => ValueType::Boolean,
        k if k == SyntaxKind::NullKeyword as u16 => ValueType::Null,
        k if k == SyntaxKind::RegularExpressionLiteral as u16 => ValueType::Object,
        k if k == SyntaxKind::Identifier as u16 => match node.text.as_str() {
            "undefined" => ValueType::Void,
            "NaN" | "Infinity" => ValueType::Number,
            _ => ValueType::Undetermined,
        },
        syntax_kind_ext::OBJECT_LITERAL_EXPRESSION
        | syntax_kind_ext::ARRAY_LITERAL_EXPRESSION
        | syntax_kind_ext::FUNCTION_EXPRESSION
        | syntax_kind_ext::NEW_EXPRESSION => ValueType::Object,
        syntax_kind_ext::CONDITIONAL_EXPRESSION => {
            same_type(known_value_type(arena, child(1)), known_value_type(arena, child(2)))
        }
        syntax_kind_ext::PREFIX_UNARY_EXPRESSION => match node.operator {
            SyntaxKind::TypeOfKeyword => ValueType::String,
            SyntaxKind::VoidKeyword => ValueType::Void,
            SyntaxKind::ExclamationToken | SyntaxKind::DeleteKeyword => ValueType::Boolean,
            _ => ValueType::Number,
        },
        syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => ValueType::Number,
        syntax_kind_ext::ASSIGNMENT_EXPRESSION => match node.operator {
            SyntaxKind::EqualsToken => known_value_type(arena, child(1)),
            SyntaxKind::PlusEqualsToken => add_type(
                known_value_type(arena, child(0)),
                known_value_type(arena, child(1)),
            ),
            _ => ValueType::Number,
        },
        syntax_kind_ext::BINARY_EXPRESSION => {
            let left = known_value_type(arena, child(0));
            let right = known_value_type(arena, child(1));
            match node.operator {
                SyntaxKind::CommaToken => right,
                SyntaxKind::PlusToken => add_type(left, right),
                SyntaxKind::AmpersandAmpersandToken | SyntaxKind::BarBarToken => same_type(left, right),
                SyntaxKind::EqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::EqualsEqualsEqualsToken
                | SyntaxKind::ExclamationEqualsEqualsToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::LessThanEqualsToken
                | SyntaxKind::GreaterThanEqualsToken
                | SyntaxKind::InstanceOfKeyword
                | SyntaxKind::InKeyword => ValueType::Boolean,
                _ => ValueType::Number,
            }
        }
        _ => ValueType::Undetermined,
    }
}

/// `+` yields a string when either side is one.
fn add_type(left: ValueType, right: ValueType) -> ValueType {
    match (left, right) {
        (ValueType::String, _) | (_, ValueType::String) => ValueType::String,
        (ValueType::Undetermined, _) | (_, ValueType::Undetermined) => ValueType::Undetermined,
        (ValueType::Object, _) | (_, ValueType::Object) => ValueType::Undetermined,
        _ => ValueType::Number,
    }
}
