//! Scanner state machine.
//!
//! Produces one token per `scan()` call. Trivia (whitespace, comments) is
//! skipped; a `/** ... */` doc comment directly preceding a token is kept
//! on that token so the parser can attach it to the node it starts.

use crate::char_codes::{is_identifier_part, is_identifier_start, is_line_break, is_white_space_single_line};
use crate::syntax_kind::{SyntaxKind, keyword_kind};
use extnorm_common::DiagnosticMessage;
use extnorm_common::diagnostics::diagnostic_messages;

/// A doc comment found in the trivia before a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocComment {
    /// Text between `/**` and `*/`.
    pub text: String,
    pub pos: u32,
    pub end: u32,
}

/// A lexical error, converted into a `Diagnostic` by the parser.
#[derive(Clone, Copy, Debug)]
pub struct ScannerDiagnostic {
    pub pos: u32,
    pub length: u32,
    pub message: &'static DiagnosticMessage,
}

pub struct ScannerState {
    text: String,
    /// Current position (end of the current token)
    pos: usize,
    token: SyntaxKind,
    token_pos: usize,
    token_value: String,
    preceding_line_break: bool,
    token_doc: Option<DocComment>,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: String) -> Self {
        ScannerState {
            text,
            pos: 0,
            token: SyntaxKind::Unknown,
            token_pos: 0,
            token_value: String::new(),
            preceding_line_break: false,
            token_doc: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub const fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub const fn token_pos(&self) -> u32 {
        self.token_pos as u32
    }

    #[inline]
    pub const fn token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Identifier/keyword text, cooked string value, or numeric/regex source text.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn token_text(&self) -> &str {
        self.text.get(self.token_pos..self.pos).unwrap_or("")
    }

    #[inline]
    pub const fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn token_doc(&self) -> Option<&DocComment> {
        self.token_doc.as_ref()
    }

    pub fn take_token_doc(&mut self) -> Option<DocComment> {
        self.token_doc.take()
    }

    pub fn take_diagnostics(&mut self) -> Vec<ScannerDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static DiagnosticMessage) {
        self.diagnostics.push(ScannerDiagnostic {
            pos: pos as u32,
            length: length as u32,
            message,
        });
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.text.as_bytes().get(pos).copied().unwrap_or(0)
    }

    // =========================================================================
    // Main scan loop
    // =========================================================================

    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.token_doc = None;
        self.token_value.clear();

        loop {
            self.token_pos = self.pos;
            let Some(ch) = self.char_at(self.pos) else {
                self.token = SyntaxKind::EndOfFileToken;
                return self.token;
            };

            if is_line_break(ch) {
                self.preceding_line_break = true;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
                continue;
            }

            if ch == '/' {
                match self.byte_at(self.pos + 1) {
                    b'/' => {
                        self.skip_line_comment();
                        continue;
                    }
                    b'*' => {
                        self.skip_block_comment();
                        continue;
                    }
                    _ => {}
                }
            }

            self.token = self.scan_token(ch);
            return self.token;
        }
    }

    fn skip_line_comment(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        match memchr::memchr2(b'\n', b'\r', rest) {
            Some(offset) => self.pos += offset,
            None => self.pos = self.text.len(),
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.pos;
        let body_start = start + 2;
        let rest = &self.text.as_bytes()[body_start..];
        let (body_end, end) = match memchr::memmem::find(rest, b"*/") {
            Some(offset) => (body_start + offset, body_start + offset + 2),
            None => {
                self.error(start, 2, &diagnostic_messages::UNTERMINATED_COMMENT);
                (self.text.len(), self.text.len())
            }
        };

        let body = &self.text[body_start..body_end];
        if body.chars().any(is_line_break) {
            self.preceding_line_break = true;
        }
        // `/**/` is an empty block comment, not a doc comment
        if body.starts_with('*') && body_end > body_start {
            self.token_doc = Some(DocComment {
                text: body[1..].to_string(),
                pos: start as u32,
                end: end as u32,
            });
        }
        self.pos = end;
    }

    fn scan_token(&mut self, ch: char) -> SyntaxKind {
        if ch.is_ascii_digit() || (ch == '.' && self.byte_at(self.pos + 1).is_ascii_digit()) {
            return self.scan_number();
        }
        if ch == '"' || ch == '\'' {
            return self.scan_string(ch);
        }
        if is_identifier_start(ch) {
            return self.scan_identifier();
        }
        self.scan_punctuation(ch)
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(ch) = self.char_at(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        keyword_kind(&self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        if self.byte_at(self.pos) == b'0' && matches!(self.byte_at(self.pos + 1), b'x' | b'X') {
            self.pos += 2;
            while self.byte_at(self.pos).is_ascii_hexdigit() {
                self.pos += 1;
            }
        } else {
            while self.byte_at(self.pos).is_ascii_digit() {
                self.pos += 1;
            }
            if self.byte_at(self.pos) == b'.' {
                self.pos += 1;
                while self.byte_at(self.pos).is_ascii_digit() {
                    self.pos += 1;
                }
            }
            if matches!(self.byte_at(self.pos), b'e' | b'E') {
                let mut lookahead = self.pos + 1;
                if matches!(self.byte_at(lookahead), b'+' | b'-') {
                    lookahead += 1;
                }
                if self.byte_at(lookahead).is_ascii_digit() {
                    self.pos = lookahead;
                    while self.byte_at(self.pos).is_ascii_digit() {
                        self.pos += 1;
                    }
                }
            }
        }
        self.token_value.push_str(&self.text[start..self.pos]);
        SyntaxKind::NumericLiteral
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.error(start, self.pos - start, &diagnostic_messages::UNTERMINATED_STRING_LITERAL);
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if is_line_break(ch) {
                self.error(start, self.pos - start, &diagnostic_messages::UNTERMINATED_STRING_LITERAL);
                break;
            }
            if ch == '\\' {
                self.pos += 1;
                self.scan_escape(&mut value);
                continue;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }

    fn scan_escape(&mut self, value: &mut String) {
        let Some(ch) = self.char_at(self.pos) else {
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => value.push('\n'),
            't' => value.push('\t'),
            'r' => value.push('\r'),
            'b' => value.push('\u{0008}'),
            'f' => value.push('\u{000C}'),
            'v' => value.push('\u{000B}'),
            '0' if !self.byte_at(self.pos).is_ascii_digit() => value.push('\0'),
            'x' => self.scan_hex_escape(2, value, 'x'),
            'u' => self.scan_hex_escape(4, value, 'u'),
            '\r' => {
                // Line continuation
                if self.byte_at(self.pos) == b'\n' {
                    self.pos += 1;
                }
            }
            c if is_line_break(c) => {}
            c => value.push(c),
        }
    }

    fn scan_hex_escape(&mut self, digits: usize, value: &mut String, marker: char) {
        let hex = self.text.get(self.pos..self.pos + digits).unwrap_or("");
        let decoded = (hex.len() == digits)
            .then(|| u32::from_str_radix(hex, 16).ok())
            .flatten()
            .and_then(char::from_u32);
        match decoded {
            Some(c) => {
                value.push(c);
                self.pos += digits;
            }
            None => value.push(marker),
        }
    }

    fn scan_punctuation(&mut self, ch: char) -> SyntaxKind {
        let rest = &self.text.as_bytes()[self.pos..];
        let starts = |s: &str| rest.starts_with(s.as_bytes());

        let (kind, len) = match ch {
            '{' => (SyntaxKind::OpenBraceToken, 1),
            '}' => (SyntaxKind::CloseBraceToken, 1),
            '(' => (SyntaxKind::OpenParenToken, 1),
            ')' => (SyntaxKind::CloseParenToken, 1),
            '[' => (SyntaxKind::OpenBracketToken, 1),
            ']' => (SyntaxKind::CloseBracketToken, 1),
            '.' => (SyntaxKind::DotToken, 1),
            ';' => (SyntaxKind::SemicolonToken, 1),
            ',' => (SyntaxKind::CommaToken, 1),
            '?' => (SyntaxKind::QuestionToken, 1),
            ':' => (SyntaxKind::ColonToken, 1),
            '~' => (SyntaxKind::TildeToken, 1),
            '<' if starts("<<=") => (SyntaxKind::LessThanLessThanEqualsToken, 3),
            '<' if starts("<<") => (SyntaxKind::LessThanLessThanToken, 2),
            '<' if starts("<=") => (SyntaxKind::LessThanEqualsToken, 2),
            '<' => (SyntaxKind::LessThanToken, 1),
            '>' if starts(">>>=") => (SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken, 4),
            '>' if starts(">>>") => (SyntaxKind::GreaterThanGreaterThanGreaterThanToken, 3),
            '>' if starts(">>=") => (SyntaxKind::GreaterThanGreaterThanEqualsToken, 3),
            '>' if starts(">>") => (SyntaxKind::GreaterThanGreaterThanToken, 2),
            '>' if starts(">=") => (SyntaxKind::GreaterThanEqualsToken, 2),
            '>' => (SyntaxKind::GreaterThanToken, 1),
            '=' if starts("===") => (SyntaxKind::EqualsEqualsEqualsToken, 3),
            '=' if starts("==") => (SyntaxKind::EqualsEqualsToken, 2),
            '=' => (SyntaxKind::EqualsToken, 1),
            '!' if starts("!==") => (SyntaxKind::ExclamationEqualsEqualsToken, 3),
            '!' if starts("!=") => (SyntaxKind::ExclamationEqualsToken, 2),
            '!' => (SyntaxKind::ExclamationToken, 1),
            '+' if starts("++") => (SyntaxKind::PlusPlusToken, 2),
            '+' if starts("+=") => (SyntaxKind::PlusEqualsToken, 2),
            '+' => (SyntaxKind::PlusToken, 1),
            '-' if starts("--") => (SyntaxKind::MinusMinusToken, 2),
            '-' if starts("-=") => (SyntaxKind::MinusEqualsToken, 2),
            '-' => (SyntaxKind::MinusToken, 1),
            '*' if starts("*=") => (SyntaxKind::AsteriskEqualsToken, 2),
            '*' => (SyntaxKind::AsteriskToken, 1),
            '/' if starts("/=") => (SyntaxKind::SlashEqualsToken, 2),
            '/' => (SyntaxKind::SlashToken, 1),
            '%' if starts("%=") => (SyntaxKind::PercentEqualsToken, 2),
            '%' => (SyntaxKind::PercentToken, 1),
            '&' if starts("&&") => (SyntaxKind::AmpersandAmpersandToken, 2),
            '&' if starts("&=") => (SyntaxKind::AmpersandEqualsToken, 2),
            '&' => (SyntaxKind::AmpersandToken, 1),
            '|' if starts("||") => (SyntaxKind::BarBarToken, 2),
            '|' if starts("|=") => (SyntaxKind::BarEqualsToken, 2),
            '|' => (SyntaxKind::BarToken, 1),
            '^' if starts("^=") => (SyntaxKind::CaretEqualsToken, 2),
            '^' => (SyntaxKind::CaretToken, 1),
            _ => {
                let len = ch.len_utf8();
                self.error(self.pos, len, &diagnostic_messages::INVALID_CHARACTER);
                self.pos += len;
                return SyntaxKind::Unknown;
            }
        };
        self.pos += len;
        kind
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    ///
    /// Called by the parser when a slash appears where an expression is expected.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let start = self.token_pos;
        let mut pos = start + 1;
        let mut in_class = false;
        let mut terminated = false;

        while let Some(ch) = self.char_at(pos) {
            if is_line_break(ch) {
                break;
            }
            pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(next) = self.char_at(pos) {
                        if !is_line_break(next) {
                            pos += next.len_utf8();
                        }
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    terminated = true;
                    break;
                }
                _ => {}
            }
        }

        if !terminated {
            self.error(start, pos - start, &diagnostic_messages::UNTERMINATED_STRING_LITERAL);
        } else {
            while let Some(ch) = self.char_at(pos) {
                if !is_identifier_part(ch) {
                    break;
                }
                pos += ch.len_utf8();
            }
        }

        self.pos = pos;
        self.token_value = self.text[start..pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }
}
