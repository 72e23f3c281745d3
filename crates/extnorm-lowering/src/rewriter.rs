//! Tree rewrites for verified Ext matches.
//!
//! Each rule returns `false` without touching the tree when the match no
//! longer sits where verification saw it.

use extnorm_parser::syntax::{new_qname, new_qname_declaration};
use extnorm_parser::{JsDocInfo, NodeArena, NodeFlags, NodeIndex, syntax_kind_ext};
use rustc_hash::FxHashMap;

use crate::annotations::{
    CONFIG_PARAM, anonymous_constructor_doc, named_constructor_doc, prototype_doc, with_base_type,
};

fn span(arena: &NodeArena, n: NodeIndex) -> Option<(u32, u32)> {
    arena.get(n).map(|node| (node.pos, node.end))
}

fn is_child_of(arena: &NodeArena, parent: NodeIndex, child: NodeIndex) -> bool {
    arena.children(parent).contains(&child)
}

/// Merge `@extends {!Base}` into the doc of the define call owning `key`.
///
/// The call's doc before the first merge is saved in `original_docs`.
pub(crate) fn annotate_extends(
    arena: &mut NodeArena,
    key: NodeIndex,
    original_docs: &mut FxHashMap<NodeIndex, Option<JsDocInfo>>,
) -> bool {
    let call = arena.parent(arena.parent(key));
    let base_name = arena.text(arena.child(key, 0)).to_string();
    let current = arena.jsdoc(call);
    original_docs
        .entry(call)
        .or_insert_with(|| current.cloned());
    let merged = with_base_type(current, &base_name);
    if current == Some(&merged) {
        return false;
    }
    arena.set_jsdoc(call, Some(merged));
    true
}

/// `Ext.define("a.b.C", {...});` to
/// `a.b.C = function (config) {}; a.b.C.prototype = {...};`
pub(crate) fn replace_define(arena: &mut NodeArena, call: NodeIndex, original_doc: Option<JsDocInfo>) -> bool {
    let statement = arena.parent(call);
    let container = arena.parent(statement);
    let Some((pos, end)) = span(arena, call) else {
        return false;
    };
    if !is_child_of(arena, container, statement) {
        return false;
    }

    let name = arena.text(arena.child(call, 1)).to_string();
    let members = arena.detach(arena.child(call, 2));
    let constructor_doc = named_constructor_doc(arena.jsdoc(call));
    arena.take_jsdoc(call);

    let constructor = arena.new_function_expression(&[CONFIG_PARAM], Vec::new());
    let declaration = new_qname_declaration(arena, &name, constructor, Some(constructor_doc));
    arena.set_source_info_if_missing_for_tree(declaration, pos, end);
    arena.replace_child(container, statement, declaration);

    let prototype_name = format!("{name}.prototype");
    let prototype = new_qname_declaration(arena, &prototype_name, members, prototype_doc(original_doc.as_ref()));
    arena.set_source_info_if_missing_for_tree(prototype, pos, end);
    arena.insert_after(declaration, prototype)
}

/// `Ext.define(null, {...})` to
/// `(function () { var T = function () {}; T.prototype = {...}; return T; })()`
pub(crate) fn replace_anonymous_define(
    arena: &mut NodeArena,
    call: NodeIndex,
    temp_name: &str,
    original_doc: Option<JsDocInfo>,
) -> bool {
    let parent = arena.parent(call);
    let Some((pos, end)) = span(arena, call) else {
        return false;
    };
    if !is_child_of(arena, parent, call) {
        return false;
    }

    let enclosing_doc = match arena.kind(parent) {
        syntax_kind_ext::ASSIGNMENT_EXPRESSION if arena.child(parent, 1) == call => arena.jsdoc(parent),
        syntax_kind_ext::VARIABLE_DECLARATION => arena.jsdoc(arena.parent(parent)),
        _ => None,
    };
    let base = arena.jsdoc(call).and_then(|info| info.base_type.clone());
    let constructor_doc = anonymous_constructor_doc(enclosing_doc, base);
    arena.take_jsdoc(call);

    let members = arena.detach(arena.child(call, 2));
    let constructor = arena.new_function_expression(&[], Vec::new());
    let declaration = arena.new_variable_statement(temp_name, constructor);
    arena.set_jsdoc(declaration, Some(constructor_doc));

    let prototype_name = format!("{temp_name}.prototype");
    let prototype = new_qname_declaration(arena, &prototype_name, members, prototype_doc(original_doc.as_ref()));
    let result = arena.new_identifier(temp_name);
    let return_statement = arena.new_return(result);

    let function = arena.new_function_expression(&[], vec![declaration, prototype, return_statement]);
    let iife = arena.new_call(function, Vec::new());
    if let Some(node) = arena.get_mut(iife) {
        node.flags |= NodeFlags::FREE_CALL;
    }
    arena.set_source_info_if_missing_for_tree(iife, pos, end);
    arena.replace_child(parent, call, iife)
}

/// `Ext.create("a.b.C", ...)` to `Ext.create(a.b.C, ...)`.
pub(crate) fn replace_create(arena: &mut NodeArena, call: NodeIndex) -> bool {
    let name_node = arena.child(call, 1);
    let Some((pos, end)) = span(arena, name_node) else {
        return false;
    };
    let name = arena.text(name_node).to_string();
    let reference = new_qname(arena, &name);
    arena.set_source_info_if_missing_for_tree(reference, pos, end);
    arena.replace_child(call, name_node, reference)
}
