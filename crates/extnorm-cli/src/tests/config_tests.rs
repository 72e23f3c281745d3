use super::args::CliArgs;
use super::config::{ExtConfig, find_config_file, load_config, parse_config_json, parse_properties, resolve_config};
use clap::Parser;
use extnorm_common::LanguageMode;
use std::path::{Path, PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn parses_jsonc_with_trailing_commas() {
    let input = r#"
    {
      // framework alias
      "extBase": "Ext6", /* inline */
      "languageMode": "es5-strict",
      "exclude": ["vendor/**",],
    }
    "#;

    let config = parse_config_json(input).expect("should parse JSONC");
    assert_eq!(config.ext_base, "Ext6");
    assert_eq!(config.language_mode, LanguageMode::EcmaScript5Strict);
    assert!(!config.require_file_scope);
    assert_eq!(config.exclude, vec!["vendor/**".to_string()]);
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    let config = parse_config_json(r#"{"extBase": "A//B", "exclude": ["/*.js"]}"#).expect("should parse");
    assert_eq!(config.ext_base, "A//B");
    assert_eq!(config.exclude, vec!["/*.js".to_string()]);
}

#[test]
fn missing_keys_use_defaults() {
    let config = parse_config_json("{}").expect("should parse");
    assert_eq!(config, ExtConfig::default());
    assert_eq!(config.ext_base, "Ext");
    let blank = parse_config_json(r#"{"extBase": "  "}"#).expect("should parse");
    assert_eq!(blank.ext_base, "Ext");
}

#[test]
fn parses_properties() {
    let config = parse_properties("# legacy\next_base = MyExt\nrequire_file_scope=true\nlanguage_mode: es3\nother=1\n");
    assert_eq!(config.ext_base, "MyExt");
    assert!(config.require_file_scope);
    assert_eq!(config.language_mode, LanguageMode::EcmaScript3);

    let empty = parse_properties("ext_base=\nlanguage_mode=es2020\n");
    assert_eq!(empty, ExtConfig::default());
}

#[test]
fn load_or_default_recovers_from_bad_sources() {
    let temp = tempfile::tempdir().expect("temp dir");
    let missing = temp.path().join("nope.json");
    assert_eq!(ExtConfig::load_or_default(&missing), ExtConfig::default());
    assert!(load_config(&missing).is_err());

    let invalid = write_file(temp.path(), "extnorm.json", "{ \"extBase\": ");
    assert_eq!(ExtConfig::load_or_default(&invalid), ExtConfig::default());

    let properties = write_file(temp.path(), "ext.properties", "ext_base=Legacy\n");
    assert_eq!(ExtConfig::load_or_default(&properties).ext_base, "Legacy");
}

#[test]
fn finds_config_in_working_directory() {
    let temp = tempfile::tempdir().expect("temp dir");
    let args = CliArgs::try_parse_from(["extnorm", "a.js"]).expect("args");
    assert_eq!(find_config_file(&args, temp.path()), None);

    write_file(temp.path(), "ext.properties", "ext_base=FromProperties\n");
    assert_eq!(resolve_config(&args, temp.path()).ext_base, "FromProperties");

    // extnorm.json wins over ext.properties
    write_file(temp.path(), "extnorm.json", r#"{"extBase": "FromJson"}"#);
    assert_eq!(resolve_config(&args, temp.path()).ext_base, "FromJson");
}

#[test]
fn finds_legacy_properties_file() {
    let temp = tempfile::tempdir().expect("temp dir");
    let args = CliArgs::try_parse_from(["extnorm", "a.js"]).expect("args");
    let legacy = write_file(temp.path(), "ExtConfig.properties", "ext_base=Legacy\n");
    assert_eq!(find_config_file(&args, temp.path()), Some(legacy));
    assert_eq!(resolve_config(&args, temp.path()).ext_base, "Legacy");

    // ext.properties wins over the legacy name
    write_file(temp.path(), "ext.properties", "ext_base=Current\n");
    assert_eq!(resolve_config(&args, temp.path()).ext_base, "Current");
}

#[test]
fn flags_override_file_values() {
    let temp = tempfile::tempdir().expect("temp dir");
    write_file(
        temp.path(),
        "custom.json",
        r#"{"extBase": "FromFile", "languageMode": "es3", "exclude": ["a/**"]}"#,
    );
    let args = CliArgs::try_parse_from([
        "extnorm",
        "--config",
        "custom.json",
        "--ext-base",
        "FromFlag",
        "--require-file-scope",
        "--exclude",
        "b/**",
        "a.js",
    ])
    .expect("args");
    let config = resolve_config(&args, temp.path());
    assert_eq!(config.ext_base, "FromFlag");
    assert_eq!(config.language_mode, LanguageMode::EcmaScript3);
    assert!(config.require_file_scope);
    assert_eq!(config.exclude, vec!["a/**".to_string(), "b/**".to_string()]);

    let options = config.pass_options();
    assert_eq!(options.ext_base, "FromFlag");
    assert!(options.require_file_scope);
}
