//! Arena tree nodes.
//!
//! Every node shares one shape: a kind tag, ordered children and an optional
//! text payload. The meaning of `children` and `text` per kind is listed in
//! `syntax_kind_ext`.

use super::base::{NodeIndex, NodeList};
use crate::jsdoc::JsDocInfo;
use bitflags::bitflags;
use extnorm_scanner::SyntaxKind;

/// Node kinds with no token counterpart.
///
/// Leaf nodes reuse the token kinds: `Identifier` (text = name),
/// `StringLiteral` (text = cooked value), `NumericLiteral` and
/// `RegularExpressionLiteral` (text = source), and the `null`/`true`/
/// `false`/`this` keywords.
pub mod syntax_kind_ext {
    pub const SOURCE_FILE: u16 = 200;
    /// `[VARIABLE_DECLARATION...]`
    pub const VARIABLE_STATEMENT: u16 = 201;
    /// text = name, `[initializer?]`
    pub const VARIABLE_DECLARATION: u16 = 202;
    /// `[name: Identifier, PARAMETER_LIST, BLOCK]`
    pub const FUNCTION_DECLARATION: u16 = 203;
    /// `[expression]`
    pub const EXPRESSION_STATEMENT: u16 = 204;
    /// `[expression?]`
    pub const RETURN_STATEMENT: u16 = 205;
    /// `[condition, then, else?]`
    pub const IF_STATEMENT: u16 = 206;
    /// `[condition, body]`
    pub const WHILE_STATEMENT: u16 = 207;
    /// `[body, condition]`
    pub const DO_STATEMENT: u16 = 208;
    /// `[initializer, condition, incrementor, body]`, missing parts are `OMITTED_EXPRESSION`
    pub const FOR_STATEMENT: u16 = 209;
    /// `[initializer, expression, body]`
    pub const FOR_IN_STATEMENT: u16 = 210;
    /// text = label
    pub const BREAK_STATEMENT: u16 = 211;
    /// text = label
    pub const CONTINUE_STATEMENT: u16 = 212;
    /// `[expression]`
    pub const THROW_STATEMENT: u16 = 213;
    /// `[BLOCK, CATCH_CLAUSE or OMITTED_EXPRESSION, finally BLOCK?]`
    pub const TRY_STATEMENT: u16 = 214;
    /// text = parameter name, `[BLOCK]`
    pub const CATCH_CLAUSE: u16 = 215;
    /// `[discriminant, CASE_CLAUSE | DEFAULT_CLAUSE ...]`
    pub const SWITCH_STATEMENT: u16 = 216;
    /// `[test, statements...]`
    pub const CASE_CLAUSE: u16 = 217;
    /// `[statements...]`
    pub const DEFAULT_CLAUSE: u16 = 218;
    /// text = label, `[statement]`
    pub const LABELED_STATEMENT: u16 = 219;
    /// `[statements...]`
    pub const BLOCK: u16 = 220;
    pub const EMPTY_STATEMENT: u16 = 221;
    pub const DEBUGGER_STATEMENT: u16 = 222;
    /// `[object, body]`
    pub const WITH_STATEMENT: u16 = 223;

    /// `[name: Identifier, PARAMETER_LIST, BLOCK]`, name text may be empty
    pub const FUNCTION_EXPRESSION: u16 = 240;
    /// `[Identifier...]`
    pub const PARAMETER_LIST: u16 = 241;
    /// `[callee, arguments...]`
    pub const CALL_EXPRESSION: u16 = 242;
    /// `[callee, arguments...]`
    pub const NEW_EXPRESSION: u16 = 243;
    /// text = property name, `[object]`
    pub const PROPERTY_ACCESS_EXPRESSION: u16 = 244;
    /// `[object, index]`
    pub const ELEMENT_ACCESS_EXPRESSION: u16 = 245;
    /// operator, `[left, right]`; the comma operator included
    pub const BINARY_EXPRESSION: u16 = 246;
    /// operator (`=` or compound), `[target, value]`
    pub const ASSIGNMENT_EXPRESSION: u16 = 247;
    /// operator, `[operand]`
    pub const PREFIX_UNARY_EXPRESSION: u16 = 248;
    /// operator, `[operand]`
    pub const POSTFIX_UNARY_EXPRESSION: u16 = 249;
    /// `[condition, when_true, when_false]`
    pub const CONDITIONAL_EXPRESSION: u16 = 250;
    /// `[PROPERTY_ASSIGNMENT...]`
    pub const OBJECT_LITERAL_EXPRESSION: u16 = 251;
    /// text = key, `[value]`
    pub const PROPERTY_ASSIGNMENT: u16 = 252;
    /// `[elements...]`, holes are `OMITTED_EXPRESSION`
    pub const ARRAY_LITERAL_EXPRESSION: u16 = 253;
    pub const OMITTED_EXPRESSION: u16 = 254;

    pub fn name(kind: u16) -> &'static str {
        match kind {
            SOURCE_FILE => "SourceFile",
            VARIABLE_STATEMENT => "VariableStatement",
            VARIABLE_DECLARATION => "VariableDeclaration",
            FUNCTION_DECLARATION => "FunctionDeclaration",
            EXPRESSION_STATEMENT => "ExpressionStatement",
            RETURN_STATEMENT => "ReturnStatement",
            IF_STATEMENT => "IfStatement",
            WHILE_STATEMENT => "WhileStatement",
            DO_STATEMENT => "DoStatement",
            FOR_STATEMENT => "ForStatement",
            FOR_IN_STATEMENT => "ForInStatement",
            BREAK_STATEMENT => "BreakStatement",
            CONTINUE_STATEMENT => "ContinueStatement",
            THROW_STATEMENT => "ThrowStatement",
            TRY_STATEMENT => "TryStatement",
            CATCH_CLAUSE => "CatchClause",
            SWITCH_STATEMENT => "SwitchStatement",
            CASE_CLAUSE => "CaseClause",
            DEFAULT_CLAUSE => "DefaultClause",
            LABELED_STATEMENT => "LabeledStatement",
            BLOCK => "Block",
            EMPTY_STATEMENT => "EmptyStatement",
            DEBUGGER_STATEMENT => "DebuggerStatement",
            WITH_STATEMENT => "WithStatement",
            FUNCTION_EXPRESSION => "FunctionExpression",
            PARAMETER_LIST => "ParameterList",
            CALL_EXPRESSION => "CallExpression",
            NEW_EXPRESSION => "NewExpression",
            PROPERTY_ACCESS_EXPRESSION => "PropertyAccessExpression",
            ELEMENT_ACCESS_EXPRESSION => "ElementAccessExpression",
            BINARY_EXPRESSION => "BinaryExpression",
            ASSIGNMENT_EXPRESSION => "AssignmentExpression",
            PREFIX_UNARY_EXPRESSION => "PrefixUnaryExpression",
            POSTFIX_UNARY_EXPRESSION => "PostfixUnaryExpression",
            CONDITIONAL_EXPRESSION => "ConditionalExpression",
            OBJECT_LITERAL_EXPRESSION => "ObjectLiteralExpression",
            PROPERTY_ASSIGNMENT => "PropertyAssignment",
            ARRAY_LITERAL_EXPRESSION => "ArrayLiteralExpression",
            OMITTED_EXPRESSION => "OmittedExpression",
            _ => "Token",
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Call whose callee is not a member access; `this` is unbound.
        const FREE_CALL = 1 << 0;
        /// Object-literal key written as a string literal.
        const QUOTED = 1 << 1;
        /// Object-literal key written as a numeric literal.
        const NUMERIC_KEY = 1 << 2;
        /// Node created by a rewrite rather than the parser.
        const SYNTHESIZED = 1 << 3;
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: u16,
    pub flags: NodeFlags,
    pub pos: u32,
    pub end: u32,
    pub parent: NodeIndex,
    pub children: NodeList,
    pub text: String,
    /// Operator token for binary, assignment and unary expressions.
    pub operator: SyntaxKind,
    pub jsdoc: Option<Box<JsDocInfo>>,
}

impl Node {
    pub fn new(kind: u16, pos: u32, end: u32) -> Self {
        Node {
            kind,
            flags: NodeFlags::empty(),
            pos,
            end,
            parent: NodeIndex::NONE,
            children: NodeList::new(),
            text: String::new(),
            operator: SyntaxKind::Unknown,
            jsdoc: None,
        }
    }

    #[inline]
    pub fn is(&self, kind: impl Into<u16>) -> bool {
        self.kind == kind.into()
    }

    #[inline]
    pub fn first_child(&self) -> NodeIndex {
        self.children.get(0)
    }

    /// Source location has not been assigned.
    #[inline]
    pub const fn has_no_source_info(&self) -> bool {
        self.pos == 0 && self.end == 0
    }
}

/// Owner of every node of one file.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    file_name: String,
}

impl NodeArena {
    pub fn new(file_name: impl Into<String>) -> Self {
        NodeArena {
            nodes: Vec::new(),
            file_name: file_name.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(node);
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        self.nodes.get_mut(index.0 as usize)
    }

    /// Kind of `index`, or `SyntaxKind::Unknown` for a missing node.
    #[inline]
    pub fn kind(&self, index: NodeIndex) -> u16 {
        self.get(index).map_or(SyntaxKind::Unknown as u16, |n| n.kind)
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: impl Into<u16>) -> bool {
        self.get(index).is_some_and(|n| n.kind == kind.into())
    }

    pub fn text(&self, index: NodeIndex) -> &str {
        self.get(index).map_or("", |n| n.text.as_str())
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.get(index) {
            Some(node) => node.children.nodes.as_slice(),
            None => &[],
        }
    }

    /// Child at `position`, or `NodeIndex::NONE`.
    #[inline]
    pub fn child(&self, index: NodeIndex, position: usize) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.children.get(position))
    }

    pub fn jsdoc(&self, index: NodeIndex) -> Option<&JsDocInfo> {
        self.get(index).and_then(|n| n.jsdoc.as_deref())
    }

    pub fn set_jsdoc(&mut self, index: NodeIndex, info: Option<JsDocInfo>) {
        if let Some(node) = self.get_mut(index) {
            node.jsdoc = info.map(Box::new);
        }
    }

    pub fn take_jsdoc(&mut self, index: NodeIndex) -> Option<JsDocInfo> {
        self.get_mut(index).and_then(|n| n.jsdoc.take()).map(|b| *b)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
        }
    }

    pub fn append_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        if child.is_none() {
            return;
        }
        if let Some(node) = self.get_mut(parent) {
            node.children.nodes.push(child);
            self.set_parent(child, parent);
        }
    }

    pub fn set_children(&mut self, parent: NodeIndex, children: Vec<NodeIndex>) {
        for &child in &children {
            self.set_parent(child, parent);
        }
        if let Some(node) = self.get_mut(parent) {
            node.children = NodeList::from(children);
        }
    }

    /// Put `new` in `old`'s slot under `parent`. `old` becomes detached.
    pub fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) -> bool {
        let Some(slot) = self.get(parent).and_then(|p| p.children.position(old)) else {
            return false;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.nodes[slot] = new;
        }
        self.set_parent(new, parent);
        self.set_parent(old, NodeIndex::NONE);
        true
    }

    /// Remove `child` from its parent, returning it.
    pub fn detach(&mut self, child: NodeIndex) -> NodeIndex {
        let parent = self.parent(child);
        if let Some(node) = self.get_mut(parent) {
            node.children.nodes.retain(|c| *c != child);
        }
        self.set_parent(child, NodeIndex::NONE);
        child
    }

    /// Insert `new` right after `anchor` in `anchor`'s parent.
    pub fn insert_after(&mut self, anchor: NodeIndex, new: NodeIndex) -> bool {
        let parent = self.parent(anchor);
        let Some(slot) = self.get(parent).and_then(|p| p.children.position(anchor)) else {
            return false;
        };
        if let Some(node) = self.get_mut(parent) {
            node.children.nodes.insert(slot + 1, new);
        }
        self.set_parent(new, parent);
        true
    }

    /// Give every node under `root` without a source location the span `pos..end`.
    pub fn set_source_info_if_missing_for_tree(&mut self, root: NodeIndex, pos: u32, end: u32) {
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let Some(node) = self.get_mut(index) else {
                continue;
            };
            if node.has_no_source_info() {
                node.pos = pos;
                node.end = end;
            }
            stack.extend(node.children.nodes.iter().copied());
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        let mut current = node;
        while current.is_some() {
            if current == ancestor {
                return true;
            }
            current = self.parent(current);
        }
        false
    }
}
