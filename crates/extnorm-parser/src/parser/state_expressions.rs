//! Parser state - expression parsing methods

use super::base::NodeIndex;
use super::node::{NodeFlags, syntax_kind_ext};
use super::state::ParserState;
use extnorm_common::diagnostics::diagnostic_messages;
use extnorm_scanner::SyntaxKind;

/// Binary operator precedence; 0 for tokens that are not binary operators.
fn binary_precedence(kind: SyntaxKind, no_in: bool) -> u8 {
    match kind {
        SyntaxKind::BarBarToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::BarToken => 3,
        SyntaxKind::CaretToken => 4,
        SyntaxKind::AmpersandToken => 5,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => 6,
        SyntaxKind::InKeyword if no_in => 0,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => 7,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => 8,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => 9,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => 10,
        _ => 0,
    }
}

impl ParserState {
    // =========================================================================
    // Parse Methods - Expressions
    // =========================================================================

    /// Run `f` with `in` allowed as an operator again (inside brackets).
    pub(crate) fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.no_in;
        self.no_in = false;
        let result = f(self);
        self.no_in = saved;
        result
    }

    /// Parse an expression (including comma operator)
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut left = self.parse_assignment_expression();
        if left.is_none() {
            return left;
        }

        while self.is_token(SyntaxKind::CommaToken) {
            self.next_token();
            let right = self.parse_assignment_expression();
            if right.is_none() {
                self.error_expression_expected();
                break;
            }
            left = self.finish_node(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.previous_end,
                vec![left, right],
            );
            self.set_operator(left, SyntaxKind::CommaToken);
        }
        left
    }

    /// Parse an expression, reporting and substituting a placeholder when missing.
    pub(crate) fn parse_expression_or_error(&mut self) -> NodeIndex {
        let expression = self.parse_expression();
        if expression.is_some() {
            return expression;
        }
        self.error_expression_expected();
        let pos = self.token_pos();
        self.finish_node(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos, Vec::new())
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let target = self.parse_conditional_expression();
        if target.is_none() {
            return target;
        }

        let operator = self.token();
        if !operator.is_assignment_operator() {
            return target;
        }
        if !matches!(
            self.arena.kind(target),
            k if k == SyntaxKind::Identifier as u16
                || k == syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
                || k == syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
        ) {
            let pos = self.node_pos(target);
            self.error_at(pos, self.previous_end.saturating_sub(pos), &diagnostic_messages::INVALID_ASSIGNMENT_TARGET, &[]);
        }
        self.next_token();
        let value = self.parse_assignment_expression();
        if value.is_none() {
            self.error_expression_expected();
            return target;
        }
        let assignment = self.finish_node(
            syntax_kind_ext::ASSIGNMENT_EXPRESSION,
            start_pos,
            self.previous_end,
            vec![target, value],
        );
        self.set_operator(assignment, operator);
        assignment
    }

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let condition = self.parse_binary_expression(1);
        if condition.is_none() || !self.is_token(SyntaxKind::QuestionToken) {
            return condition;
        }
        self.next_token();
        let when_true = self.allow_in(|p| p.parse_assignment_expression());
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        if when_true.is_none() || when_false.is_none() {
            self.error_expression_expected();
            return condition;
        }
        self.finish_node(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            start_pos,
            self.previous_end,
            vec![condition, when_true, when_false],
        )
    }

    /// Precedence climbing over left-associative binary operators.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        if left.is_none() {
            return left;
        }

        loop {
            let operator = self.token();
            let precedence = binary_precedence(operator, self.no_in);
            if precedence == 0 || precedence < min_precedence {
                break;
            }
            self.next_token();
            let right = self.parse_binary_expression(precedence + 1);
            if right.is_none() {
                self.error_expression_expected();
                break;
            }
            left = self.finish_node(
                syntax_kind_ext::BINARY_EXPRESSION,
                start_pos,
                self.previous_end,
                vec![left, right],
            );
            self.set_operator(left, operator);
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let operator = self.token();
        match operator {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                self.next_token();
                let operand = self.parse_unary_expression();
                if operand.is_none() {
                    self.error_expression_expected();
                    return operand;
                }
                let node = self.finish_node(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    start_pos,
                    self.previous_end,
                    vec![operand],
                );
                self.set_operator(node, operator);
                node
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let operand = self.parse_left_hand_side_expression();
        let operator = self.token();
        if operand.is_some()
            && matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
            && !self.scanner.has_preceding_line_break()
        {
            self.next_token();
            let node = self.finish_node(
                syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                start_pos,
                self.previous_end,
                vec![operand],
            );
            self.set_operator(node, operator);
            return node;
        }
        operand
    }

    /// Member access, calls and `new`.
    fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        let mut expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if expression.is_none() {
            return expression;
        }

        loop {
            if let Some(member) = self.parse_member_suffix(start_pos, expression) {
                expression = member;
                continue;
            }
            if self.is_token(SyntaxKind::OpenParenToken) {
                let is_free = !matches!(
                    self.arena.kind(expression),
                    syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
                );
                let mut children = vec![expression];
                children.extend(self.parse_arguments());
                expression = self.finish_node(syntax_kind_ext::CALL_EXPRESSION, start_pos, self.previous_end, children);
                if is_free {
                    if let Some(node) = self.arena.get_mut(expression) {
                        node.flags |= NodeFlags::FREE_CALL;
                    }
                }
                continue;
            }
            break;
        }
        expression
    }

    /// `.name` or `[index]` after `object`, if present.
    fn parse_member_suffix(&mut self, start_pos: u32, object: NodeIndex) -> Option<NodeIndex> {
        if self.parse_optional(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name_text(true).unwrap_or_default();
            return Some(self.finish_node_with_text(
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                start_pos,
                self.previous_end,
                name,
                vec![object],
            ));
        }
        if self.parse_optional(SyntaxKind::OpenBracketToken) {
            let index = self.allow_in(|p| p.parse_expression_or_error());
            self.parse_expected(SyntaxKind::CloseBracketToken);
            return Some(self.finish_node(
                syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                start_pos,
                self.previous_end,
                vec![object, index],
            ));
        }
        None
    }

    /// `new Callee(args)`; the argument list is optional.
    fn parse_new_expression(&mut self) -> NodeIndex {
        let start_pos = self.token_pos();
        self.parse_expected(SyntaxKind::NewKeyword);
        let mut callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        if callee.is_none() {
            return callee;
        }
        let callee_pos = self.node_pos(callee);
        while let Some(member) = self.parse_member_suffix(callee_pos, callee) {
            callee = member;
        }
        let mut children = vec![callee];
        if self.is_token(SyntaxKind::OpenParenToken) {
            children.extend(self.parse_arguments());
        }
        self.finish_node(syntax_kind_ext::NEW_EXPRESSION, start_pos, self.previous_end, children)
    }

    fn parse_arguments(&mut self) -> Vec<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !p.is_token(SyntaxKind::CloseParenToken) && !p.is_token(SyntaxKind::EndOfFileToken) {
                let argument = p.parse_assignment_expression();
                if argument.is_none() {
                    p.error_expression_expected();
                    break;
                }
                arguments.push(argument);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            arguments
        });
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier
            | SyntaxKind::StringLiteral
            | SyntaxKind::NumericLiteral => {
                let kind = self.token() as u16;
                let text = self.scanner.token_value().to_string();
                self.next_token();
                self.finish_node_with_text(kind, pos, self.previous_end, text, Vec::new())
            }
            SyntaxKind::ThisKeyword
            | SyntaxKind::NullKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword => {
                let kind = self.token() as u16;
                self.next_token();
                self.finish_node(kind, pos, self.previous_end, Vec::new())
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.re_scan_slash_token();
                let text = self.scanner.token_value().to_string();
                self.next_token();
                self.finish_node_with_text(
                    SyntaxKind::RegularExpressionLiteral as u16,
                    pos,
                    self.previous_end,
                    text,
                    Vec::new(),
                )
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let expression = self.allow_in(|p| p.parse_expression_or_error());
                self.parse_expected(SyntaxKind::CloseParenToken);
                expression
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function(pos, syntax_kind_ext::FUNCTION_EXPRESSION, false),
            _ => NodeIndex::NONE,
        }
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            loop {
                if p.is_token(SyntaxKind::CloseBracketToken) || p.is_token(SyntaxKind::EndOfFileToken) {
                    break;
                }
                if p.is_token(SyntaxKind::CommaToken) {
                    let hole_pos = p.token_pos();
                    elements.push(p.finish_node(syntax_kind_ext::OMITTED_EXPRESSION, hole_pos, hole_pos, Vec::new()));
                    p.next_token();
                    continue;
                }
                let element = p.parse_assignment_expression();
                if element.is_none() {
                    p.error_expression_expected();
                    break;
                }
                elements.push(element);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            elements
        });
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(syntax_kind_ext::ARRAY_LITERAL_EXPRESSION, pos, self.previous_end, elements)
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            while !p.is_token(SyntaxKind::CloseBraceToken) && !p.is_token(SyntaxKind::EndOfFileToken) {
                let Some(property) = p.parse_property_assignment() else {
                    break;
                };
                properties.push(property);
                if !p.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
            properties
        });
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(syntax_kind_ext::OBJECT_LITERAL_EXPRESSION, pos, self.previous_end, properties)
    }

    /// `key: value`, keeping the key's doc comment.
    fn parse_property_assignment(&mut self) -> Option<NodeIndex> {
        let pos = self.token_pos();
        let jsdoc = self.take_leading_jsdoc();
        let token = self.token();
        let flags = match token {
            SyntaxKind::StringLiteral => NodeFlags::QUOTED,
            SyntaxKind::NumericLiteral => NodeFlags::NUMERIC_KEY,
            _ if token.is_identifier_or_keyword() => NodeFlags::empty(),
            _ => {
                self.error_at_current_token(&diagnostic_messages::PROPERTY_ASSIGNMENT_EXPECTED, &[]);
                return None;
            }
        };
        let key = self.scanner.token_value().to_string();
        self.next_token();
        self.parse_expected(SyntaxKind::ColonToken);
        let value = self.parse_assignment_expression();
        if value.is_none() {
            self.error_expression_expected();
            return None;
        }

        let property =
            self.finish_node_with_text(syntax_kind_ext::PROPERTY_ASSIGNMENT, pos, self.previous_end, key, vec![value]);
        if let Some(node) = self.arena.get_mut(property) {
            node.flags |= flags;
        }
        self.arena.set_jsdoc(property, jsdoc);
        Some(property)
    }
}
