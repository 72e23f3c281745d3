use extnorm_parser::{NodeArena, NodeFlags, NodeIndex, syntax_kind_ext};
use extnorm_scanner::{SyntaxKind, is_identifier_text};
use tracing::trace;

// Expression precedence, loosest first.
const PREC_COMMA: u8 = 0;
const PREC_ASSIGNMENT: u8 = 1;
const PREC_CONDITIONAL: u8 = 2;
const PREC_UNARY: u8 = 13;
const PREC_POSTFIX: u8 = 14;
const PREC_CALL: u8 = 15;
const PREC_MEMBER: u8 = 16;
const PREC_PRIMARY: u8 = 17;

fn binary_precedence(operator: SyntaxKind) -> u8 {
    match operator {
        SyntaxKind::CommaToken => PREC_COMMA,
        SyntaxKind::BarBarToken => 3,
        SyntaxKind::AmpersandAmpersandToken => 4,
        SyntaxKind::BarToken => 5,
        SyntaxKind::CaretToken => 6,
        SyntaxKind::AmpersandToken => 7,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 8,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 9,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 10,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 11,
        _ => 12,
    }
}

/// Prints a tree held in a `NodeArena`.
pub struct Printer<'a> {
    pub(super) arena: &'a NodeArena,
    pub(super) output: String,
    pub(super) indent_level: u32,
    pub(super) indent_str: &'static str,
    /// Inside a `for` head initializer, where a bare `in` would end the clause.
    pub(super) no_in: bool,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            output: String::new(),
            indent_level: 0,
            indent_str: "  ",
            no_in: false,
        }
    }

    /// Print a whole program (or any statement) to a string.
    pub fn print(arena: &'a NodeArena, root: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        if arena.kind(root) == syntax_kind_ext::SOURCE_FILE {
            for &statement in arena.children(root) {
                printer.emit_statement_in_list(statement);
            }
        } else {
            printer.emit_node(root);
        }
        trace!(bytes = printer.output.len(), "printed tree");
        printer.output
    }

    /// Print a single node: statements as statements, anything else as an expression.
    pub fn print_node(arena: &'a NodeArena, node: NodeIndex) -> String {
        let mut printer = Printer::new(arena);
        printer.emit_node(node);
        printer.output
    }

    fn emit_node(&mut self, node: NodeIndex) {
        if Self::is_statement(self.arena.kind(node)) {
            self.emit_statement(node);
        } else {
            self.emit_expression(node, PREC_COMMA);
        }
    }

    const fn is_statement(kind: u16) -> bool {
        kind >= syntax_kind_ext::SOURCE_FILE && kind <= syntax_kind_ext::WITH_STATEMENT
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Statement on its own line with its leading doc comment.
    fn emit_statement_in_list(&mut self, statement: NodeIndex) {
        let arena = self.arena;
        self.write_indent();
        let doc_holder = if arena.kind(statement) == syntax_kind_ext::EXPRESSION_STATEMENT {
            arena.child(statement, 0)
        } else {
            statement
        };
        if let Some(info) = arena.jsdoc(doc_holder) {
            self.emit_leading_jsdoc(info);
        }
        self.emit_statement(statement);
        self.write_line();
    }

    fn emit_statement_list(&mut self, statements: &[NodeIndex]) {
        self.increase_indent();
        for &statement in statements {
            self.emit_statement_in_list(statement);
        }
        self.decrease_indent();
    }

    fn emit_block(&mut self, block: NodeIndex) {
        let statements = self.arena.children(block);
        if statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.emit_statement_list(statements);
        self.write_indent();
        self.write("}");
    }

    /// Body of `if`/`while`/`for`: a block stays on the same line.
    fn emit_embedded_statement(&mut self, statement: NodeIndex) {
        self.write(" ");
        self.emit_statement(statement);
    }

    fn emit_statement(&mut self, statement: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(statement) else {
            return;
        };
        let child = |i: usize| node.children.get(i);

        match node.kind {
            syntax_kind_ext::SOURCE_FILE => {
                for &s in arena.children(statement) {
                    self.emit_statement_in_list(s);
                }
            }
            syntax_kind_ext::VARIABLE_STATEMENT => {
                self.emit_variable_declaration_list(statement);
                self.write(";");
            }
            syntax_kind_ext::FUNCTION_DECLARATION => self.emit_function(statement),
            syntax_kind_ext::EXPRESSION_STATEMENT => {
                let expression = child(0);
                if self.starts_with_function_or_brace(expression) {
                    self.write("(");
                    self.emit_expression_without_doc(expression, PREC_COMMA);
                    self.write(")");
                } else {
                    self.emit_expression_without_doc(expression, PREC_COMMA);
                }
                self.write(";");
            }
            syntax_kind_ext::RETURN_STATEMENT => {
                self.write("return");
                if child(0).is_some() {
                    self.write(" ");
                    self.emit_expression(child(0), PREC_COMMA);
                }
                self.write(";");
            }
            syntax_kind_ext::IF_STATEMENT => {
                self.write("if (");
                self.emit_expression(child(0), PREC_COMMA);
                self.write(")");
                self.emit_embedded_statement(child(1));
                if child(2).is_some() {
                    self.write(" else");
                    self.emit_embedded_statement(child(2));
                }
            }
            syntax_kind_ext::WHILE_STATEMENT => {
                self.write("while (");
                self.emit_expression(child(0), PREC_COMMA);
                self.write(")");
                self.emit_embedded_statement(child(1));
            }
            syntax_kind_ext::DO_STATEMENT => {
                self.write("do");
                self.emit_embedded_statement(child(0));
                self.write(" while (");
                self.emit_expression(child(1), PREC_COMMA);
                self.write(");");
            }
            syntax_kind_ext::FOR_STATEMENT => {
                self.write("for (");
                self.emit_for_initializer(child(0));
                self.write(";");
                if !arena.is_kind(child(1), syntax_kind_ext::OMITTED_EXPRESSION) {
                    self.write(" ");
                    self.emit_expression(child(1), PREC_COMMA);
                }
                self.write(";");
                if !arena.is_kind(child(2), syntax_kind_ext::OMITTED_EXPRESSION) {
                    self.write(" ");
                    self.emit_expression(child(2), PREC_COMMA);
                }
                self.write(")");
                self.emit_embedded_statement(child(3));
            }
            syntax_kind_ext::FOR_IN_STATEMENT => {
                self.write("for (");
                self.emit_for_initializer(child(0));
                self.write(" in ");
                self.emit_expression(child(1), PREC_COMMA);
                self.write(")");
                self.emit_embedded_statement(child(2));
            }
            syntax_kind_ext::BREAK_STATEMENT | syntax_kind_ext::CONTINUE_STATEMENT => {
                self.write(if node.kind == syntax_kind_ext::BREAK_STATEMENT { "break" } else { "continue" });
                if !node.text.is_empty() {
                    self.write(" ");
                    self.write(&node.text);
                }
                self.write(";");
            }
            syntax_kind_ext::THROW_STATEMENT => {
                self.write("throw ");
                self.emit_expression(child(0), PREC_COMMA);
                self.write(";");
            }
            syntax_kind_ext::TRY_STATEMENT => {
                self.write("try ");
                self.emit_block(child(0));
                if let Some(catch) = arena.get(child(1)).filter(|c| c.kind == syntax_kind_ext::CATCH_CLAUSE) {
                    self.write(" catch (");
                    self.write(&catch.text);
                    self.write(") ");
                    self.emit_block(catch.first_child());
                }
                if child(2).is_some() {
                    self.write(" finally ");
                    self.emit_block(child(2));
                }
            }
            syntax_kind_ext::SWITCH_STATEMENT => {
                self.write("switch (");
                self.emit_expression(child(0), PREC_COMMA);
                self.write(") {");
                self.write_line();
                self.increase_indent();
                for &clause in arena.children(statement).iter().skip(1) {
                    self.emit_switch_clause(clause);
                }
                self.decrease_indent();
                self.write_indent();
                self.write("}");
            }
            syntax_kind_ext::LABELED_STATEMENT => {
                self.write(&node.text);
                self.write(":");
                self.emit_embedded_statement(child(0));
            }
            syntax_kind_ext::BLOCK => self.emit_block(statement),
            syntax_kind_ext::EMPTY_STATEMENT => self.write(";"),
            syntax_kind_ext::DEBUGGER_STATEMENT => self.write("debugger;"),
            syntax_kind_ext::WITH_STATEMENT => {
                self.write("with (");
                self.emit_expression(child(0), PREC_COMMA);
                self.write(")");
                self.emit_embedded_statement(child(1));
            }
            _ => {
                self.emit_expression(statement, PREC_COMMA);
                self.write(";");
            }
        }
    }

    fn emit_switch_clause(&mut self, clause: NodeIndex) {
        let arena = self.arena;
        let statements = arena.children(clause);
        self.write_indent();
        let body = if arena.kind(clause) == syntax_kind_ext::CASE_CLAUSE {
            self.write("case ");
            self.emit_expression(arena.child(clause, 0), PREC_COMMA);
            statements.get(1..).unwrap_or(&[])
        } else {
            self.write("default");
            statements
        };
        self.write(":");
        self.write_line();
        self.emit_statement_list(body);
    }

    fn emit_for_initializer(&mut self, initializer: NodeIndex) {
        let outer_no_in = std::mem::replace(&mut self.no_in, true);
        match self.arena.kind(initializer) {
            syntax_kind_ext::VARIABLE_STATEMENT => self.emit_variable_declaration_list(initializer),
            syntax_kind_ext::OMITTED_EXPRESSION => {}
            _ => self.emit_expression(initializer, PREC_COMMA),
        }
        self.no_in = outer_no_in;
    }

    fn emit_variable_declaration_list(&mut self, statement: NodeIndex) {
        let arena = self.arena;
        self.write("var ");
        for (i, &declaration) in arena.children(statement).iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(arena.text(declaration));
            let initializer = arena.child(declaration, 0);
            if initializer.is_some() {
                self.write(" = ");
                self.emit_expression(initializer, PREC_ASSIGNMENT);
            }
        }
    }

    fn emit_function(&mut self, function: NodeIndex) {
        let arena = self.arena;
        let name = arena.text(arena.child(function, 0));
        self.write("function ");
        if !name.is_empty() {
            self.write(name);
        }
        self.write("(");
        for (i, &param) in arena.children(arena.child(function, 1)).iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(arena.text(param));
        }
        self.write(") ");
        let outer_no_in = std::mem::replace(&mut self.no_in, false);
        self.emit_block(arena.child(function, 2));
        self.no_in = outer_no_in;
    }

    /// Whether an expression statement would be misread as a declaration or block.
    fn starts_with_function_or_brace(&self, expression: NodeIndex) -> bool {
        let arena = self.arena;
        let mut current = expression;
        loop {
            match arena.kind(current) {
                syntax_kind_ext::FUNCTION_EXPRESSION | syntax_kind_ext::OBJECT_LITERAL_EXPRESSION => return true,
                syntax_kind_ext::CALL_EXPRESSION => {
                    let callee = arena.child(current, 0);
                    // IIFE callees are already parenthesized
                    if arena.is_kind(callee, syntax_kind_ext::FUNCTION_EXPRESSION) {
                        return false;
                    }
                    current = callee;
                }
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
                | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
                | syntax_kind_ext::BINARY_EXPRESSION
                | syntax_kind_ext::ASSIGNMENT_EXPRESSION
                | syntax_kind_ext::CONDITIONAL_EXPRESSION
                | syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => {
                    if arena.jsdoc(current).is_some() && current != expression {
                        return false;
                    }
                    current = arena.child(current, 0);
                }
                _ => return false,
            }
        }
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn precedence(&self, expression: NodeIndex) -> u8 {
        let Some(node) = self.arena.get(expression) else {
            return PREC_PRIMARY;
        };
        match node.kind {
            syntax_kind_ext::BINARY_EXPRESSION => binary_precedence(node.operator),
            syntax_kind_ext::ASSIGNMENT_EXPRESSION => PREC_ASSIGNMENT,
            syntax_kind_ext::CONDITIONAL_EXPRESSION => PREC_CONDITIONAL,
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => PREC_UNARY,
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => PREC_POSTFIX,
            syntax_kind_ext::CALL_EXPRESSION => PREC_CALL,
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
            | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
            | syntax_kind_ext::NEW_EXPRESSION => PREC_MEMBER,
            _ => PREC_PRIMARY,
        }
    }

    pub(super) fn emit_expression(&mut self, expression: NodeIndex, min_precedence: u8) {
        if let Some(info) = self.arena.jsdoc(expression) {
            self.emit_inline_jsdoc(info);
        }
        self.emit_expression_without_doc(expression, min_precedence);
    }

    fn emit_expression_without_doc(&mut self, expression: NodeIndex, min_precedence: u8) {
        let needs_parens = self.precedence(expression) < min_precedence
            || (self.no_in && self.is_in_expression(expression));
        if needs_parens {
            self.write("(");
        }
        let inner_no_in = self.no_in && !needs_parens;
        let outer_no_in = std::mem::replace(&mut self.no_in, inner_no_in);
        self.emit_expression_body(expression);
        self.no_in = outer_no_in;
        if needs_parens {
            self.write(")");
        }
    }

    fn is_in_expression(&self, expression: NodeIndex) -> bool {
        self.arena.get(expression).is_some_and(|node| {
            node.kind == syntax_kind_ext::BINARY_EXPRESSION && node.operator == SyntaxKind::InKeyword
        })
    }

    fn emit_expression_body(&mut self, expression: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(expression) else {
            return;
        };
        let child = |i: usize| node.children.get(i);

        match node.kind {
            k if k == SyntaxKind::Identifier as u16
                || k == SyntaxKind::NumericLiteral as u16
                || k == SyntaxKind::RegularExpressionLiteral as u16 =>
            {
                self.write(&node.text)
            }
            k if k == SyntaxKind::StringLiteral as u16 => self.write_quoted(&node.text),
            k if k == SyntaxKind::ThisKeyword as u16
                || k == SyntaxKind::NullKeyword as u16
                || k == SyntaxKind::TrueKeyword as u16
                || k == SyntaxKind::FalseKeyword as u16 =>
            {
                if let Some(text) = Self::keyword_text(k) {
                    self.write(text);
                }
            }
            syntax_kind_ext::FUNCTION_EXPRESSION => self.emit_function(expression),
            syntax_kind_ext::CALL_EXPRESSION => {
                let callee = child(0);
                if arena.is_kind(callee, syntax_kind_ext::FUNCTION_EXPRESSION) {
                    self.write("(");
                    self.emit_expression(callee, PREC_COMMA);
                    self.write(")");
                } else {
                    self.emit_expression(callee, PREC_CALL);
                }
                self.emit_arguments(node.children.nodes.get(1..).unwrap_or(&[]));
            }
            syntax_kind_ext::NEW_EXPRESSION => {
                self.write("new ");
                let callee = child(0);
                if self.new_callee_needs_parens(callee) {
                    self.write("(");
                    self.emit_expression(callee, PREC_COMMA);
                    self.write(")");
                } else {
                    self.emit_expression(callee, PREC_MEMBER);
                }
                self.emit_arguments(node.children.nodes.get(1..).unwrap_or(&[]));
            }
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                let object = child(0);
                let is_integer = arena.is_kind(object, SyntaxKind::NumericLiteral)
                    && arena.text(object).bytes().all(|b| b.is_ascii_digit());
                if is_integer {
                    self.write("(");
                    self.emit_expression(object, PREC_COMMA);
                    self.write(")");
                } else {
                    self.emit_expression(object, PREC_CALL);
                }
                self.write(".");
                self.write(&node.text);
            }
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                self.emit_expression(child(0), PREC_CALL);
                self.write("[");
                self.emit_expression(child(1), PREC_COMMA);
                self.write("]");
            }
            syntax_kind_ext::BINARY_EXPRESSION => {
                let precedence = binary_precedence(node.operator);
                self.emit_expression(child(0), precedence);
                if node.operator == SyntaxKind::CommaToken {
                    self.write(", ");
                    self.emit_expression(child(1), PREC_ASSIGNMENT);
                } else {
                    self.write(" ");
                    self.write(node.operator.text());
                    self.write(" ");
                    self.emit_expression(child(1), precedence + 1);
                }
            }
            syntax_kind_ext::ASSIGNMENT_EXPRESSION => {
                self.emit_expression(child(0), PREC_CALL);
                self.write(" ");
                self.write(node.operator.text());
                self.write(" ");
                self.emit_expression(child(1), PREC_ASSIGNMENT);
            }
            syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                self.emit_expression(child(0), PREC_CONDITIONAL + 1);
                self.write(" ? ");
                self.emit_expression(child(1), PREC_ASSIGNMENT);
                self.write(" : ");
                self.emit_expression(child(2), PREC_ASSIGNMENT);
            }
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => {
                let operand = child(0);
                self.write(node.operator.text());
                if node.operator.is_keyword() || self.needs_space_after_sign(node.operator, operand) {
                    self.write(" ");
                }
                self.emit_expression(operand, PREC_UNARY);
            }
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => {
                self.emit_expression(child(0), PREC_CALL);
                self.write(node.operator.text());
            }
            syntax_kind_ext::OBJECT_LITERAL_EXPRESSION => self.emit_object_literal(expression),
            syntax_kind_ext::ARRAY_LITERAL_EXPRESSION => {
                self.write("[");
                let elements = arena.children(expression);
                for (i, &element) in elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    if !arena.is_kind(element, syntax_kind_ext::OMITTED_EXPRESSION) {
                        self.emit_expression(element, PREC_ASSIGNMENT);
                    }
                }
                // A trailing hole needs its own comma
                if elements
                    .last()
                    .is_some_and(|&e| arena.is_kind(e, syntax_kind_ext::OMITTED_EXPRESSION))
                {
                    self.write(",");
                }
                self.write("]");
            }
            syntax_kind_ext::OMITTED_EXPRESSION => {}
            _ => {}
        }
    }

    fn keyword_text(kind: u16) -> Option<&'static str> {
        [
            SyntaxKind::ThisKeyword,
            SyntaxKind::NullKeyword,
            SyntaxKind::TrueKeyword,
            SyntaxKind::FalseKeyword,
        ]
        .into_iter()
        .find(|k| *k as u16 == kind)
        .map(SyntaxKind::text)
    }

    /// `- -x` and `+ ++x` must not fuse into `--x` / `+++x`.
    fn needs_space_after_sign(&self, operator: SyntaxKind, operand: NodeIndex) -> bool {
        let Some(inner) = self.arena.get(operand) else {
            return false;
        };
        if inner.kind != syntax_kind_ext::PREFIX_UNARY_EXPRESSION {
            return false;
        }
        matches!(
            (operator, inner.operator),
            (SyntaxKind::PlusToken, SyntaxKind::PlusToken | SyntaxKind::PlusPlusToken)
                | (SyntaxKind::MinusToken, SyntaxKind::MinusToken | SyntaxKind::MinusMinusToken)
        )
    }

    /// `new (a().b)()`: a call in the callee chain would bind the arguments.
    fn new_callee_needs_parens(&self, callee: NodeIndex) -> bool {
        let arena = self.arena;
        let mut current = callee;
        loop {
            match arena.kind(current) {
                syntax_kind_ext::CALL_EXPRESSION => return true,
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                    current = arena.child(current, 0);
                }
                _ => return false,
            }
        }
    }

    fn emit_arguments(&mut self, arguments: &[NodeIndex]) {
        self.write("(");
        for (i, &argument) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(argument, PREC_ASSIGNMENT);
        }
        self.write(")");
    }

    /// Object literals print on one line unless a key has a doc comment
    /// or a value spans several lines.
    fn is_multiline_object(&self, object: NodeIndex) -> bool {
        let arena = self.arena;
        arena.children(object).iter().any(|&property| {
            let value = arena.child(property, 0);
            arena.jsdoc(property).is_some()
                || match arena.kind(value) {
                    syntax_kind_ext::FUNCTION_EXPRESSION => !arena.children(arena.child(value, 2)).is_empty(),
                    syntax_kind_ext::OBJECT_LITERAL_EXPRESSION => self.is_multiline_object(value),
                    _ => false,
                }
        })
    }

    fn emit_object_literal(&mut self, object: NodeIndex) {
        let arena = self.arena;
        let properties = arena.children(object);
        if properties.is_empty() {
            self.write("{}");
            return;
        }

        if !self.is_multiline_object(object) {
            self.write("{");
            for (i, &property) in properties.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.emit_property(property);
            }
            self.write("}");
            return;
        }

        self.write("{");
        self.write_line();
        self.increase_indent();
        for (i, &property) in properties.iter().enumerate() {
            self.write_indent();
            if let Some(info) = arena.jsdoc(property) {
                self.emit_leading_jsdoc(info);
            }
            self.emit_property(property);
            if i + 1 < properties.len() {
                self.write(",");
            }
            self.write_line();
        }
        self.decrease_indent();
        self.write_indent();
        self.write("}");
    }

    fn emit_property(&mut self, property: NodeIndex) {
        let Some(node) = self.arena.get(property) else {
            return;
        };
        let key = node.text.as_str();
        if node.flags.contains(NodeFlags::NUMERIC_KEY) {
            self.write(key);
        } else if node.flags.contains(NodeFlags::QUOTED) || !is_identifier_text(key) {
            self.write_quoted(key);
        } else {
            self.write(key);
        }
        self.write(": ");
        self.emit_expression(node.first_child(), PREC_ASSIGNMENT);
    }
}
