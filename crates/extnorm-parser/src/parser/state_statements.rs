//! Parser state - statement parsing methods

use super::base::NodeIndex;
use super::node::syntax_kind_ext;
use super::state::ParserState;
use crate::jsdoc::JsDocInfo;
use extnorm_common::diagnostics::diagnostic_messages;
use extnorm_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Statements
    // =========================================================================

    /// Parse statements until `is_end` accepts the current token (or EOF).
    pub(crate) fn parse_statement_list(&mut self, is_end: impl Fn(SyntaxKind) -> bool) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        while !is_end(self.token()) && !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.token_pos();
            let statement = self.parse_statement();
            // Zero-width empty statements are error placeholders
            let is_placeholder = self
                .arena
                .get(statement)
                .is_none_or(|n| n.kind == syntax_kind_ext::EMPTY_STATEMENT && n.pos == n.end);
            if !is_placeholder {
                statements.push(statement);
            }
            if self.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                // No progress: skip the offending token
                self.error_at_current_token(&diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                self.next_token();
            }
        }
        statements
    }

    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        let jsdoc = self.take_leading_jsdoc();
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::VarKeyword => self.parse_variable_statement(pos, jsdoc),
            SyntaxKind::FunctionKeyword => self.parse_function_declaration(pos, jsdoc),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                self.finish_node(syntax_kind_ext::EMPTY_STATEMENT, pos, self.previous_end, Vec::new())
            }
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::BreakKeyword => self.parse_break_or_continue(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ContinueKeyword => self.parse_break_or_continue(syntax_kind_ext::CONTINUE_STATEMENT),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::WithKeyword => self.parse_with_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_semicolon();
                self.finish_node(syntax_kind_ext::DEBUGGER_STATEMENT, pos, self.previous_end, Vec::new())
            }
            _ => self.parse_expression_or_labeled_statement(pos, jsdoc),
        }
    }

    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(|kind| kind == SyntaxKind::CloseBraceToken);
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(syntax_kind_ext::BLOCK, pos, self.previous_end, statements)
    }

    fn parse_variable_statement(&mut self, pos: u32, jsdoc: Option<JsDocInfo>) -> NodeIndex {
        let statement = self.parse_variable_declaration_list(pos);
        self.parse_semicolon();
        if let Some(node) = self.arena.get_mut(statement) {
            node.end = self.previous_end;
        }
        self.arena.set_jsdoc(statement, jsdoc);
        statement
    }

    /// `var a = 1, b` without the terminating semicolon.
    pub(crate) fn parse_variable_declaration_list(&mut self, pos: u32) -> NodeIndex {
        self.parse_expected(SyntaxKind::VarKeyword);
        let mut declarations = Vec::new();
        loop {
            let decl_pos = self.token_pos();
            let Some(name) = self.parse_identifier_name_text(false) else {
                break;
            };
            let mut children = Vec::new();
            if self.parse_optional(SyntaxKind::EqualsToken) {
                let initializer = self.parse_assignment_expression();
                if initializer.is_none() {
                    self.error_expression_expected();
                } else {
                    children.push(initializer);
                }
            }
            declarations.push(self.finish_node_with_text(
                syntax_kind_ext::VARIABLE_DECLARATION,
                decl_pos,
                self.previous_end,
                name,
                children,
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.finish_node(syntax_kind_ext::VARIABLE_STATEMENT, pos, self.previous_end, declarations)
    }

    fn parse_function_declaration(&mut self, pos: u32, jsdoc: Option<JsDocInfo>) -> NodeIndex {
        let function = self.parse_function(pos, syntax_kind_ext::FUNCTION_DECLARATION, true);
        self.arena.set_jsdoc(function, jsdoc);
        function
    }

    /// `function name? (params) { body }`
    pub(crate) fn parse_function(&mut self, pos: u32, kind: u16, name_required: bool) -> NodeIndex {
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let name_pos = self.token_pos();
        let name = if self.is_token(SyntaxKind::Identifier) || name_required {
            self.parse_identifier_name_text(false).unwrap_or_default()
        } else {
            String::new()
        };
        let name_end = if name.is_empty() { name_pos } else { self.previous_end };
        let name_node =
            self.finish_node_with_text(SyntaxKind::Identifier as u16, name_pos, name_end, name, Vec::new());

        let params_pos = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut params = Vec::new();
        while self.is_token(SyntaxKind::Identifier) {
            let param_pos = self.token_pos();
            let text = self.scanner.token_value().to_string();
            self.next_token();
            params.push(self.finish_node_with_text(
                SyntaxKind::Identifier as u16,
                param_pos,
                self.previous_end,
                text,
                Vec::new(),
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        let param_list = self.finish_node(syntax_kind_ext::PARAMETER_LIST, params_pos, self.previous_end, params);

        // A function body inside a `for` head may use `in` freely.
        let body = self.allow_in(|p| p.parse_block());
        self.finish_node(kind, pos, self.previous_end, vec![name_node, param_list, body])
    }

    fn parse_parenthesized_condition(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression_or_error();
        self.parse_expected(SyntaxKind::CloseParenToken);
        condition
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement();
        let mut children = vec![condition, then_statement];
        if self.parse_optional(SyntaxKind::ElseKeyword) {
            children.push(self.parse_statement());
        }
        self.finish_node(syntax_kind_ext::IF_STATEMENT, pos, self.previous_end, children)
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let condition = self.parse_parenthesized_condition();
        let body = self.parse_statement();
        self.finish_node(syntax_kind_ext::WHILE_STATEMENT, pos, self.previous_end, vec![condition, body])
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let body = self.parse_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        let condition = self.parse_parenthesized_condition();
        // `do ... while (x)` never needs a semicolon
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(syntax_kind_ext::DO_STATEMENT, pos, self.previous_end, vec![body, condition])
    }

    fn omitted(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.finish_node(syntax_kind_ext::OMITTED_EXPRESSION, pos, pos, Vec::new())
    }

    fn parse_for_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);

        let saved_no_in = self.no_in;
        self.no_in = true;
        let initializer = if self.is_token(SyntaxKind::VarKeyword) {
            let var_pos = self.token_pos();
            self.parse_variable_declaration_list(var_pos)
        } else if self.is_token(SyntaxKind::SemicolonToken) {
            self.omitted()
        } else {
            self.parse_expression_or_error()
        };
        self.no_in = saved_no_in;

        if self.parse_optional(SyntaxKind::InKeyword) {
            let object = self.parse_expression_or_error();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let body = self.parse_statement();
            return self.finish_node(
                syntax_kind_ext::FOR_IN_STATEMENT,
                pos,
                self.previous_end,
                vec![initializer, object, body],
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            self.omitted()
        } else {
            self.parse_expression_or_error()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            self.omitted()
        } else {
            self.parse_expression_or_error()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_statement();
        self.finish_node(
            syntax_kind_ext::FOR_STATEMENT,
            pos,
            self.previous_end,
            vec![initializer, condition, incrementor, body],
        )
    }

    fn parse_return_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut children = Vec::new();
        if !self.can_parse_semicolon() {
            children.push(self.parse_expression_or_error());
        }
        self.parse_semicolon();
        self.finish_node(syntax_kind_ext::RETURN_STATEMENT, pos, self.previous_end, children)
    }

    fn parse_break_or_continue(&mut self, kind: u16) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let mut label = String::new();
        if self.is_token(SyntaxKind::Identifier) && !self.scanner.has_preceding_line_break() {
            label = self.scanner.token_value().to_string();
            self.next_token();
        }
        self.parse_semicolon();
        self.finish_node_with_text(kind, pos, self.previous_end, label, Vec::new())
    }

    fn parse_throw_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_expression_or_error();
        self.parse_semicolon();
        self.finish_node(syntax_kind_ext::THROW_STATEMENT, pos, self.previous_end, vec![expression])
    }

    fn parse_try_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.is_token(SyntaxKind::CatchKeyword) {
            let catch_pos = self.token_pos();
            self.next_token();
            self.parse_expected(SyntaxKind::OpenParenToken);
            let name = self.parse_identifier_name_text(false).unwrap_or_default();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let block = self.parse_block();
            self.finish_node_with_text(syntax_kind_ext::CATCH_CLAUSE, catch_pos, self.previous_end, name, vec![block])
        } else {
            self.omitted()
        };

        let mut children = vec![try_block, catch_clause];
        if self.parse_optional(SyntaxKind::FinallyKeyword) {
            children.push(self.parse_block());
        } else if self.arena.is_kind(catch_clause, syntax_kind_ext::OMITTED_EXPRESSION) {
            self.error_at_current_token(&diagnostic_messages::TOKEN_EXPECTED, &["catch"]);
        }
        self.finish_node(syntax_kind_ext::TRY_STATEMENT, pos, self.previous_end, children)
    }

    fn parse_switch_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let discriminant = self.parse_parenthesized_condition();
        self.parse_expected(SyntaxKind::OpenBraceToken);

        let mut children = vec![discriminant];
        let is_clause_end = |kind: SyntaxKind| {
            matches!(
                kind,
                SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBraceToken
            )
        };
        loop {
            let clause_pos = self.token_pos();
            if self.parse_optional(SyntaxKind::CaseKeyword) {
                let test = self.parse_expression_or_error();
                self.parse_expected(SyntaxKind::ColonToken);
                let mut clause_children = vec![test];
                clause_children.extend(self.parse_statement_list(is_clause_end));
                children.push(self.finish_node(
                    syntax_kind_ext::CASE_CLAUSE,
                    clause_pos,
                    self.previous_end,
                    clause_children,
                ));
            } else if self.parse_optional(SyntaxKind::DefaultKeyword) {
                self.parse_expected(SyntaxKind::ColonToken);
                let statements = self.parse_statement_list(is_clause_end);
                children.push(self.finish_node(
                    syntax_kind_ext::DEFAULT_CLAUSE,
                    clause_pos,
                    self.previous_end,
                    statements,
                ));
            } else {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(syntax_kind_ext::SWITCH_STATEMENT, pos, self.previous_end, children)
    }

    fn parse_with_statement(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.next_token();
        let object = self.parse_parenthesized_condition();
        let body = self.parse_statement();
        self.finish_node(syntax_kind_ext::WITH_STATEMENT, pos, self.previous_end, vec![object, body])
    }

    /// Expression statement; a bare identifier followed by `:` is a label.
    fn parse_expression_or_labeled_statement(&mut self, pos: u32, jsdoc: Option<JsDocInfo>) -> NodeIndex {
        let expression = self.parse_expression();
        if expression.is_none() {
            self.error_at_current_token(&diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
            return self.finish_node(syntax_kind_ext::EMPTY_STATEMENT, pos, pos, Vec::new());
        }

        if self.is_token(SyntaxKind::ColonToken) && self.arena.is_kind(expression, SyntaxKind::Identifier) {
            self.next_token();
            let label = self.arena.text(expression).to_string();
            let statement = self.parse_statement();
            return self.finish_node_with_text(
                syntax_kind_ext::LABELED_STATEMENT,
                pos,
                self.previous_end,
                label,
                vec![statement],
            );
        }

        if jsdoc.is_some() {
            self.arena.set_jsdoc(expression, jsdoc);
        }
        self.parse_semicolon();
        self.finish_node(syntax_kind_ext::EXPRESSION_STATEMENT, pos, self.previous_end, vec![expression])
    }
}
