//! Parser state: token cursor, diagnostics and node construction helpers.
//!
//! Statement parsing lives in `state_statements.rs`, expression parsing in
//! `state_expressions.rs`.

use super::base::NodeIndex;
use super::node::{Node, NodeArena, syntax_kind_ext};
use crate::jsdoc::{JsDocInfo, parse_jsdoc};
use extnorm_common::diagnostics::{DiagnosticMessage, diagnostic_messages};
use extnorm_common::Diagnostic;
use extnorm_scanner::{ScannerState, SyntaxKind};
use tracing::debug;

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    diagnostics: Vec<Diagnostic>,
    /// End of the last consumed token
    pub(crate) previous_end: u32,
    /// Disallow `in` as a binary operator (for-statement initializer)
    pub(crate) no_in: bool,
    last_error_pos: Option<u32>,
}

impl ParserState {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        ParserState {
            scanner: ScannerState::new(source.into()),
            arena: NodeArena::new(file_name),
            diagnostics: Vec::new(),
            previous_end: 0,
            no_in: false,
            last_error_pos: None,
        }
    }

    /// Parse the whole input and return the `SOURCE_FILE` root.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();
        let statements = self.parse_statement_list(|kind| kind == SyntaxKind::EndOfFileToken);
        let end = self.scanner.text().len() as u32;
        let root = self.finish_node(syntax_kind_ext::SOURCE_FILE, 0, end, statements);
        self.collect_scanner_diagnostics();
        debug!(
            file = self.arena.file_name(),
            nodes = self.arena.len(),
            diagnostics = self.diagnostics.len(),
            "parsed source file"
        );
        root
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn get_arena_mut(&mut self) -> &mut NodeArena {
        &mut self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    #[inline]
    pub(crate) const fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    #[inline]
    pub(crate) const fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.previous_end = self.scanner.token_end();
        self.scanner.scan()
    }

    /// Consume the current token if it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report `'x' expected.`
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_at_current_token(&diagnostic_messages::TOKEN_EXPECTED, &[kind.text()]);
        false
    }

    /// Take the doc comment in front of the current token, parsed.
    pub(crate) fn take_leading_jsdoc(&mut self) -> Option<JsDocInfo> {
        self.scanner.take_token_doc().map(|doc| parse_jsdoc(&doc.text))
    }

    /// Whether a statement may end here (explicit `;` or automatic insertion).
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.scanner.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.error_at_current_token(&diagnostic_messages::TOKEN_EXPECTED, &[";"]);
        }
    }

    /// Consume an identifier and return its text.
    pub(crate) fn parse_identifier_name_text(&mut self, allow_keywords: bool) -> Option<String> {
        let token = self.token();
        if token == SyntaxKind::Identifier || (allow_keywords && token.is_keyword()) {
            let text = self.scanner.token_value().to_string();
            self.next_token();
            Some(text)
        } else {
            self.error_at_current_token(&diagnostic_messages::IDENTIFIER_EXPECTED, &[]);
            None
        }
    }

    // =========================================================================
    // Node helpers
    // =========================================================================

    pub(crate) fn finish_node(&mut self, kind: u16, pos: u32, end: u32, children: Vec<NodeIndex>) -> NodeIndex {
        let index = self.arena.add(Node::new(kind, pos, end));
        self.arena.set_children(index, children);
        index
    }

    pub(crate) fn finish_node_with_text(
        &mut self,
        kind: u16,
        pos: u32,
        end: u32,
        text: String,
        children: Vec<NodeIndex>,
    ) -> NodeIndex {
        let index = self.finish_node(kind, pos, end, children);
        if let Some(node) = self.arena.get_mut(index) {
            node.text = text;
        }
        index
    }

    pub(crate) fn set_operator(&mut self, index: NodeIndex, operator: SyntaxKind) {
        if let Some(node) = self.arena.get_mut(index) {
            node.operator = operator;
        }
    }

    pub(crate) fn node_pos(&self, index: NodeIndex) -> u32 {
        self.arena.get(index).map_or(self.token_pos(), |n| n.pos)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at(&mut self, pos: u32, length: u32, message: &DiagnosticMessage, args: &[&str]) {
        // One error per position keeps recovery from cascading
        if self.last_error_pos == Some(pos) {
            return;
        }
        self.last_error_pos = Some(pos);
        self.diagnostics.push(Diagnostic::from_message(
            self.arena.file_name(),
            pos,
            length,
            message,
            args,
        ));
    }

    pub(crate) fn error_at_current_token(&mut self, message: &DiagnosticMessage, args: &[&str]) {
        let pos = self.token_pos();
        let length = self.scanner.token_end().saturating_sub(pos);
        self.error_at(pos, length, message, args);
    }

    pub(crate) fn error_expression_expected(&mut self) {
        self.error_at_current_token(&diagnostic_messages::EXPRESSION_EXPECTED, &[]);
    }

    fn collect_scanner_diagnostics(&mut self) {
        for diag in self.scanner.take_diagnostics() {
            self.diagnostics.push(Diagnostic::from_message(
                self.arena.file_name(),
                diag.pos,
                diag.length,
                diag.message,
                &[],
            ));
        }
        self.diagnostics.sort_by_key(|d| d.start);
    }
}
