//! Diagnostic message catalog.

use super::{DiagnosticCategory, DiagnosticMessage};

pub mod diagnostic_codes {
    // Parser
    pub const TOKEN_EXPECTED: u32 = 1001;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const EXPRESSION_EXPECTED: u32 = 1004;
    pub const INVALID_CHARACTER: u32 = 1005;
    pub const UNTERMINATED_COMMENT: u32 = 1006;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1007;
    pub const PROPERTY_ASSIGNMENT_EXPECTED: u32 = 1008;
    pub const INVALID_ASSIGNMENT_TARGET: u32 = 1009;

    // Ext pass
    pub const INVALID_CLOSURE_CALL: u32 = 2001;
    pub const INVALID_DEFINE_NAME: u32 = 2002;
    pub const MISSING_DEFINE_ANNOTATION: u32 = 2003;
    pub const NULL_ARGUMENT: u32 = 2004;
    pub const INVALID_ARGUMENT: u32 = 2005;
}

pub mod diagnostic_messages {
    use super::*;

    pub const TOKEN_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::TOKEN_EXPECTED,
        key: "TOKEN_EXPECTED",
        category: DiagnosticCategory::Error,
        message: "'{0}' expected.",
    };
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        key: "UNTERMINATED_STRING_LITERAL",
        category: DiagnosticCategory::Error,
        message: "Unterminated string literal.",
    };
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::IDENTIFIER_EXPECTED,
        key: "IDENTIFIER_EXPECTED",
        category: DiagnosticCategory::Error,
        message: "Identifier expected.",
    };
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::EXPRESSION_EXPECTED,
        key: "EXPRESSION_EXPECTED",
        category: DiagnosticCategory::Error,
        message: "Expression expected.",
    };
    pub const INVALID_CHARACTER: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        key: "INVALID_CHARACTER",
        category: DiagnosticCategory::Error,
        message: "Invalid character.",
    };
    pub const UNTERMINATED_COMMENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_COMMENT,
        key: "UNTERMINATED_COMMENT",
        category: DiagnosticCategory::Error,
        message: "'*/' expected.",
    };
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
        key: "DECLARATION_OR_STATEMENT_EXPECTED",
        category: DiagnosticCategory::Error,
        message: "Declaration or statement expected.",
    };
    pub const PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::PROPERTY_ASSIGNMENT_EXPECTED,
        key: "PROPERTY_ASSIGNMENT_EXPECTED",
        category: DiagnosticCategory::Error,
        message: "Property assignment expected.",
    };
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INVALID_ASSIGNMENT_TARGET,
        key: "INVALID_ASSIGNMENT_TARGET",
        category: DiagnosticCategory::Error,
        message: "The left-hand side of an assignment expression must be a variable or a property access.",
    };

    pub const INVALID_CLOSURE_CALL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INVALID_CLOSURE_CALL,
        key: "INVALID_CLOSURE_CALL",
        category: DiagnosticCategory::Error,
        message: "Class dependency methods ({0}.define, {0}.create, etc) must be called at file scope.",
    };
    pub const INVALID_DEFINE_NAME: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INVALID_DEFINE_NAME,
        key: "INVALID_DEFINE_NAME",
        category: DiagnosticCategory::Error,
        message: "\"{0}\" is not a valid JS identifier name",
    };
    pub const MISSING_DEFINE_ANNOTATION: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::MISSING_DEFINE_ANNOTATION,
        key: "MISSING_DEFINE_ANNOTATION",
        category: DiagnosticCategory::Error,
        message: "Missing @define annotation",
    };
    pub const NULL_ARGUMENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::NULL_ARGUMENT,
        key: "NULL_ARGUMENT",
        category: DiagnosticCategory::Error,
        message: "method \"{0}\" called without an argument",
    };
    pub const INVALID_ARGUMENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INVALID_ARGUMENT,
        key: "INVALID_ARGUMENT",
        category: DiagnosticCategory::Error,
        message: "method \"{0}\" called with invalid argument",
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::TOKEN_EXPECTED,
    diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    diagnostic_messages::IDENTIFIER_EXPECTED,
    diagnostic_messages::EXPRESSION_EXPECTED,
    diagnostic_messages::INVALID_CHARACTER,
    diagnostic_messages::UNTERMINATED_COMMENT,
    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
    diagnostic_messages::PROPERTY_ASSIGNMENT_EXPECTED,
    diagnostic_messages::INVALID_ASSIGNMENT_TARGET,
    diagnostic_messages::INVALID_CLOSURE_CALL,
    diagnostic_messages::INVALID_DEFINE_NAME,
    diagnostic_messages::MISSING_DEFINE_ANNOTATION,
    diagnostic_messages::NULL_ARGUMENT,
    diagnostic_messages::INVALID_ARGUMENT,
];
