//! Character classification and identifier validity rules.

use extnorm_common::LanguageMode;

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit() || (!ch.is_ascii() && ch.is_alphanumeric())
}

#[inline]
pub const fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}'
    ) || (!ch.is_ascii() && ch.is_whitespace() && !is_line_break(ch))
}

/// Whether `text` is lexically an identifier (keywords included).
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => chars.all(is_identifier_part),
        _ => false,
    }
}

const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "continue", "debugger", "default", "delete", "do", "else",
    "finally", "for", "function", "if", "in", "instanceof", "new", "return", "switch", "this",
    "throw", "try", "typeof", "var", "void", "while", "with", "null", "true", "false",
];

const FUTURE_RESERVED: &[&str] = &["class", "const", "enum", "export", "extends", "import", "super"];

const ES3_RESERVED: &[&str] = &[
    "abstract", "boolean", "byte", "char", "double", "final", "float", "goto", "implements", "int",
    "interface", "long", "native", "package", "private", "protected", "public", "short", "static",
    "synchronized", "throws", "transient", "volatile",
];

const STRICT_RESERVED: &[&str] = &[
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
];

/// Whether `word` may not be used as a simple name under `mode`.
pub fn is_reserved_word(word: &str, mode: LanguageMode) -> bool {
    if KEYWORDS.contains(&word) || FUTURE_RESERVED.contains(&word) {
        return true;
    }
    match mode {
        LanguageMode::EcmaScript3 => ES3_RESERVED.contains(&word),
        LanguageMode::EcmaScript5 => false,
        LanguageMode::EcmaScript5Strict => STRICT_RESERVED.contains(&word),
    }
}
