use extnorm_common::diagnostics::{get_diagnostic_message, get_message_template};
use extnorm_common::{Diagnostic, DiagnosticCategory, diagnostic_codes, format_message};

#[test]
fn test_format_message_replaces_placeholders() {
    assert_eq!(
        format_message("method \"{0}\" called without an argument", &["Ext.define"]),
        "method \"Ext.define\" called without an argument"
    );
    assert_eq!(format_message("{0}.define, {0}.create", &["Ext"]), "Ext.define, Ext.create");
    assert_eq!(format_message("no args", &[]), "no args");
}

#[test]
fn test_catalog_codes_are_unique() {
    let mut codes: Vec<u32> = extnorm_common::diagnostics::DIAGNOSTIC_MESSAGES
        .iter()
        .map(|m| m.code)
        .collect();
    let before = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), before, "duplicate diagnostic codes in catalog");
}

#[test]
fn test_pass_diagnostic_kind_tags() {
    let expected = [
        (diagnostic_codes::INVALID_CLOSURE_CALL, "INVALID_CLOSURE_CALL"),
        (diagnostic_codes::INVALID_DEFINE_NAME, "INVALID_DEFINE_NAME"),
        (diagnostic_codes::MISSING_DEFINE_ANNOTATION, "MISSING_DEFINE_ANNOTATION"),
        (diagnostic_codes::NULL_ARGUMENT, "NULL_ARGUMENT"),
        (diagnostic_codes::INVALID_ARGUMENT, "INVALID_ARGUMENT"),
    ];
    for (code, key) in expected {
        let message = get_diagnostic_message(code).expect("code should be in catalog");
        assert_eq!(message.key, key);
        assert_eq!(message.category, DiagnosticCategory::Error);
    }
}

#[test]
fn test_diagnostic_from_message() {
    let diag = Diagnostic::from_message(
        "app.js",
        10,
        4,
        &extnorm_common::diagnostics::diagnostic_messages::INVALID_DEFINE_NAME,
        &["1bad"],
    );
    assert_eq!(diag.file, "app.js");
    assert_eq!(diag.start, 10);
    assert_eq!(diag.length, 4);
    assert_eq!(diag.code, diagnostic_codes::INVALID_DEFINE_NAME);
    assert_eq!(diag.message_text, "\"1bad\" is not a valid JS identifier name");
    assert_eq!(diag.key(), Some("INVALID_DEFINE_NAME"));
}

#[test]
fn test_diagnostic_serializes_to_json() {
    let diag = Diagnostic::error("a.js".to_string(), 1, 2, "boom".to_string(), 2005);
    let json = serde_json::to_value(&diag).expect("serialize diagnostic");
    assert_eq!(json["file"], "a.js");
    assert_eq!(json["code"], 2005);
    assert_eq!(json["category"], "Error");
    assert_eq!(get_message_template(2005), Some("method \"{0}\" called with invalid argument"));
}
