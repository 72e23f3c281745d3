use super::args::{CliArgs, DiagnosticsFormat, LanguageModeArg};
use clap::Parser;
use extnorm_common::LanguageMode;
use std::path::PathBuf;

#[test]
fn parses_inputs_and_defaults() {
    let args = CliArgs::try_parse_from(["extnorm", "app.js", "src"]).expect("args should parse");
    assert_eq!(args.inputs, vec![PathBuf::from("app.js"), PathBuf::from("src")]);
    assert_eq!(args.config, None);
    assert_eq!(args.ext_base, None);
    assert_eq!(args.language_mode, None);
    assert!(!args.require_file_scope);
    assert_eq!(args.diagnostics, DiagnosticsFormat::Pretty);
    assert!(args.exclude.is_empty());
}

#[test]
fn requires_at_least_one_input() {
    assert!(CliArgs::try_parse_from(["extnorm"]).is_err());
}

#[test]
fn parses_pass_options() {
    let args = CliArgs::try_parse_from([
        "extnorm",
        "--ext-base",
        "Ext6",
        "--language-mode",
        "ES5-STRICT",
        "--require-file-scope",
        "--out-dir",
        "build",
        "--diagnostics",
        "json",
        "--exclude",
        "vendor/**,**/*.min.js",
        "app.js",
    ])
    .expect("args should parse");
    assert_eq!(args.ext_base.as_deref(), Some("Ext6"));
    assert_eq!(args.language_mode, Some(LanguageModeArg::Es5Strict));
    assert!(args.require_file_scope);
    assert_eq!(args.out_dir, Some(PathBuf::from("build")));
    assert_eq!(args.diagnostics, DiagnosticsFormat::Json);
    assert_eq!(args.exclude, vec!["vendor/**".to_string(), "**/*.min.js".to_string()]);
}

#[test]
fn accepts_camel_case_aliases() {
    let args = CliArgs::try_parse_from(["extnorm", "--extBase", "X", "--languageMode", "es3", "a.js"])
        .expect("args should parse");
    assert_eq!(args.ext_base.as_deref(), Some("X"));
    assert_eq!(args.language_mode.map(LanguageMode::from), Some(LanguageMode::EcmaScript3));
}

#[test]
fn rejects_unknown_language_mode() {
    assert!(CliArgs::try_parse_from(["extnorm", "--language-mode", "es2015", "a.js"]).is_err());
}
