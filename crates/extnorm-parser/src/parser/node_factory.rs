//! Constructors for synthesized nodes.
//!
//! Synthesized nodes carry `NodeFlags::SYNTHESIZED` and no source span;
//! callers copy a span onto them with `set_source_info_if_missing_for_tree`.

use super::base::NodeIndex;
use super::node::{Node, NodeArena, NodeFlags, syntax_kind_ext};
use extnorm_scanner::SyntaxKind;

impl NodeArena {
    pub fn new_synthesized(&mut self, kind: impl Into<u16>) -> NodeIndex {
        let mut node = Node::new(kind.into(), 0, 0);
        node.flags = NodeFlags::SYNTHESIZED;
        self.add(node)
    }

    fn new_with_children(&mut self, kind: u16, children: Vec<NodeIndex>) -> NodeIndex {
        let index = self.new_synthesized(kind);
        self.set_children(index, children);
        index
    }

    fn set_text(&mut self, index: NodeIndex, text: &str) {
        if let Some(node) = self.get_mut(index) {
            node.text = text.to_string();
        }
    }

    pub fn new_identifier(&mut self, name: &str) -> NodeIndex {
        let index = self.new_synthesized(SyntaxKind::Identifier);
        self.set_text(index, name);
        index
    }

    pub fn new_string_literal(&mut self, value: &str) -> NodeIndex {
        let index = self.new_synthesized(SyntaxKind::StringLiteral);
        self.set_text(index, value);
        index
    }

    pub fn new_property_access(&mut self, object: NodeIndex, name: &str) -> NodeIndex {
        let index = self.new_with_children(syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION, vec![object]);
        self.set_text(index, name);
        index
    }

    pub fn new_call(&mut self, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        let mut children = Vec::with_capacity(arguments.len() + 1);
        children.push(callee);
        children.extend(arguments);
        self.new_with_children(syntax_kind_ext::CALL_EXPRESSION, children)
    }

    pub fn new_assignment(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        let index = self.new_with_children(syntax_kind_ext::ASSIGNMENT_EXPRESSION, vec![target, value]);
        if let Some(node) = self.get_mut(index) {
            node.operator = SyntaxKind::EqualsToken;
        }
        index
    }

    pub fn new_expression_statement(&mut self, expression: NodeIndex) -> NodeIndex {
        self.new_with_children(syntax_kind_ext::EXPRESSION_STATEMENT, vec![expression])
    }

    /// `var name = initializer;`
    pub fn new_variable_statement(&mut self, name: &str, initializer: NodeIndex) -> NodeIndex {
        let declaration = self.new_with_children(syntax_kind_ext::VARIABLE_DECLARATION, vec![initializer]);
        self.set_text(declaration, name);
        self.new_with_children(syntax_kind_ext::VARIABLE_STATEMENT, vec![declaration])
    }

    pub fn new_block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.new_with_children(syntax_kind_ext::BLOCK, statements)
    }

    pub fn new_return(&mut self, expression: NodeIndex) -> NodeIndex {
        let children = if expression.is_some() { vec![expression] } else { Vec::new() };
        self.new_with_children(syntax_kind_ext::RETURN_STATEMENT, children)
    }

    /// Anonymous `function (params) { body }`.
    pub fn new_function_expression(&mut self, params: &[&str], body: Vec<NodeIndex>) -> NodeIndex {
        let name = self.new_identifier("");
        let param_nodes = params.iter().map(|p| self.new_identifier(p)).collect();
        let param_list = self.new_with_children(syntax_kind_ext::PARAMETER_LIST, param_nodes);
        let block = self.new_block(body);
        self.new_with_children(syntax_kind_ext::FUNCTION_EXPRESSION, vec![name, param_list, block])
    }
}
