use serde::Serialize;

/// Token kinds produced by the scanner.
///
/// Node kinds that have no token counterpart live in the parser's
/// `syntax_kind_ext` module and start after `LastToken`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,
    // Literals
    NumericLiteral,
    StringLiteral,
    RegularExpressionLiteral,
    Identifier,
    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    SemicolonToken,
    CommaToken,
    QuestionToken,
    ColonToken,
    // Relational / equality
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    // Arithmetic / bitwise
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    // Assignment
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    GreaterThanGreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    // Keywords
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ContinueKeyword,
    DebuggerKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    WithKeyword,
    LastToken,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::WithKeyword;

    pub const fn is_keyword(self) -> bool {
        (self as u16) >= (Self::FIRST_KEYWORD as u16) && (self as u16) <= (Self::LAST_KEYWORD as u16)
    }

    /// Identifier or keyword: valid after `.` and as an object literal key.
    pub const fn is_identifier_or_keyword(self) -> bool {
        matches!(self, Self::Identifier) || self.is_keyword()
    }

    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            Self::EqualsToken
                | Self::PlusEqualsToken
                | Self::MinusEqualsToken
                | Self::AsteriskEqualsToken
                | Self::SlashEqualsToken
                | Self::PercentEqualsToken
                | Self::LessThanLessThanEqualsToken
                | Self::GreaterThanGreaterThanEqualsToken
                | Self::GreaterThanGreaterThanGreaterThanEqualsToken
                | Self::AmpersandEqualsToken
                | Self::BarEqualsToken
                | Self::CaretEqualsToken
        )
    }

    /// Source spelling for punctuators and keywords; empty for other tokens.
    pub const fn text(self) -> &'static str {
        match self {
            Self::OpenBraceToken => "{",
            Self::CloseBraceToken => "}",
            Self::OpenParenToken => "(",
            Self::CloseParenToken => ")",
            Self::OpenBracketToken => "[",
            Self::CloseBracketToken => "]",
            Self::DotToken => ".",
            Self::SemicolonToken => ";",
            Self::CommaToken => ",",
            Self::QuestionToken => "?",
            Self::ColonToken => ":",
            Self::LessThanToken => "<",
            Self::GreaterThanToken => ">",
            Self::LessThanEqualsToken => "<=",
            Self::GreaterThanEqualsToken => ">=",
            Self::EqualsEqualsToken => "==",
            Self::ExclamationEqualsToken => "!=",
            Self::EqualsEqualsEqualsToken => "===",
            Self::ExclamationEqualsEqualsToken => "!==",
            Self::PlusToken => "+",
            Self::MinusToken => "-",
            Self::AsteriskToken => "*",
            Self::SlashToken => "/",
            Self::PercentToken => "%",
            Self::PlusPlusToken => "++",
            Self::MinusMinusToken => "--",
            Self::LessThanLessThanToken => "<<",
            Self::GreaterThanGreaterThanToken => ">>",
            Self::GreaterThanGreaterThanGreaterThanToken => ">>>",
            Self::AmpersandToken => "&",
            Self::BarToken => "|",
            Self::CaretToken => "^",
            Self::ExclamationToken => "!",
            Self::TildeToken => "~",
            Self::AmpersandAmpersandToken => "&&",
            Self::BarBarToken => "||",
            Self::EqualsToken => "=",
            Self::PlusEqualsToken => "+=",
            Self::MinusEqualsToken => "-=",
            Self::AsteriskEqualsToken => "*=",
            Self::SlashEqualsToken => "/=",
            Self::PercentEqualsToken => "%=",
            Self::LessThanLessThanEqualsToken => "<<=",
            Self::GreaterThanGreaterThanEqualsToken => ">>=",
            Self::GreaterThanGreaterThanGreaterThanEqualsToken => ">>>=",
            Self::AmpersandEqualsToken => "&=",
            Self::BarEqualsToken => "|=",
            Self::CaretEqualsToken => "^=",
            Self::BreakKeyword => "break",
            Self::CaseKeyword => "case",
            Self::CatchKeyword => "catch",
            Self::ContinueKeyword => "continue",
            Self::DebuggerKeyword => "debugger",
            Self::DefaultKeyword => "default",
            Self::DeleteKeyword => "delete",
            Self::DoKeyword => "do",
            Self::ElseKeyword => "else",
            Self::FalseKeyword => "false",
            Self::FinallyKeyword => "finally",
            Self::ForKeyword => "for",
            Self::FunctionKeyword => "function",
            Self::IfKeyword => "if",
            Self::InKeyword => "in",
            Self::InstanceOfKeyword => "instanceof",
            Self::NewKeyword => "new",
            Self::NullKeyword => "null",
            Self::ReturnKeyword => "return",
            Self::SwitchKeyword => "switch",
            Self::ThisKeyword => "this",
            Self::ThrowKeyword => "throw",
            Self::TrueKeyword => "true",
            Self::TryKeyword => "try",
            Self::TypeOfKeyword => "typeof",
            Self::VarKeyword => "var",
            Self::VoidKeyword => "void",
            Self::WhileKeyword => "while",
            Self::WithKeyword => "with",
            _ => "",
        }
    }
}

/// Map identifier text to its keyword kind, if it is a scanned keyword.
pub fn keyword_kind(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "catch" => SyntaxKind::CatchKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "debugger" => SyntaxKind::DebuggerKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "delete" => SyntaxKind::DeleteKeyword,
        "do" => SyntaxKind::DoKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "false" => SyntaxKind::FalseKeyword,
        "finally" => SyntaxKind::FinallyKeyword,
        "for" => SyntaxKind::ForKeyword,
        "function" => SyntaxKind::FunctionKeyword,
        "if" => SyntaxKind::IfKeyword,
        "in" => SyntaxKind::InKeyword,
        "instanceof" => SyntaxKind::InstanceOfKeyword,
        "new" => SyntaxKind::NewKeyword,
        "null" => SyntaxKind::NullKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "this" => SyntaxKind::ThisKeyword,
        "throw" => SyntaxKind::ThrowKeyword,
        "true" => SyntaxKind::TrueKeyword,
        "try" => SyntaxKind::TryKeyword,
        "typeof" => SyntaxKind::TypeOfKeyword,
        "var" => SyntaxKind::VarKeyword,
        "void" => SyntaxKind::VoidKeyword,
        "while" => SyntaxKind::WhileKeyword,
        "with" => SyntaxKind::WithKeyword,
        _ => return None,
    };
    Some(kind)
}

impl From<SyntaxKind> for u16 {
    #[inline]
    fn from(kind: SyntaxKind) -> u16 {
        kind as u16
    }
}
