use super::args::CliArgs;
use super::config::ExtConfig;
use super::driver::{discover_inputs, output_path, rewrite_source, run};
use clap::Parser;
use std::path::{Path, PathBuf};

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create test dir");
    }
    std::fs::write(&path, contents).expect("failed to write test file");
    path
}

#[test]
fn rewrite_source_rewrites_defines() {
    let result = rewrite_source("a.js", "Ext.define('app.Foo', {x: 1});", &ExtConfig::default());
    assert_eq!(result.code_changes, 1);
    assert!(result.diagnostics.is_empty());
    assert!(result.output.contains("app.Foo = function (config) {};\n"));
    assert!(result.output.ends_with("app.Foo.prototype = {x: 1};\n"));
}

#[test]
fn rewrite_source_keeps_untouched_files_verbatim() {
    let source = "// no classes here\nvar  a = 'x';\n";
    let result = rewrite_source("a.js", source, &ExtConfig::default());
    assert_eq!(result.output, source);
    assert_eq!(result.code_changes, 0);
}

#[test]
fn rewrite_source_skips_files_with_syntax_errors() {
    let source = "Ext.define('app.Foo', {x: });";
    let result = rewrite_source("bad.js", source, &ExtConfig::default());
    assert_eq!(result.output, source);
    assert!(result.has_errors());
    assert!(result.diagnostics.iter().all(|d| d.code < 2000));
}

#[test]
fn rewrite_source_uses_configured_base() {
    let config = ExtConfig {
        ext_base: "Sencha".to_string(),
        ..ExtConfig::default()
    };
    let result = rewrite_source("a.js", "Ext.create('a.B');\nSencha.create('a.B');", &config);
    assert_eq!(result.output, "Ext.create(\"a.B\");\nSencha.create(a.B);\n");
}

#[test]
fn discovers_js_files_and_applies_excludes() {
    let temp = tempfile::tempdir().expect("temp dir");
    let root = temp.path();
    write_file(root, "app/a.js", "");
    write_file(root, "app/view/b.js", "");
    write_file(root, "app/readme.md", "");
    write_file(root, "app/vendor/lib.js", "");
    let direct = write_file(root, "single.txt", "");

    let files = discover_inputs(
        &[root.join("app"), direct.clone()],
        &["vendor/**".to_string()],
    )
    .expect("discovery should succeed");
    assert_eq!(
        files,
        vec![root.join("app/a.js"), root.join("app/view/b.js"), direct]
    );
}

#[test]
fn discovery_fails_for_missing_inputs_and_bad_globs() {
    let temp = tempfile::tempdir().expect("temp dir");
    assert!(discover_inputs(&[temp.path().join("missing")], &[]).is_err());
    assert!(discover_inputs(&[temp.path().to_path_buf()], &["a[".to_string()]).is_err());
}

#[test]
fn output_path_mirrors_relative_layout() {
    let cwd = Path::new("/work");
    let out = Path::new("/work/build");
    assert_eq!(output_path(out, Path::new("/work/app/a.js"), cwd), PathBuf::from("/work/build/app/a.js"));
    assert_eq!(output_path(out, Path::new("/elsewhere/b.js"), cwd), PathBuf::from("/work/build/b.js"));
    assert_eq!(output_path(out, Path::new("../c.js"), cwd), PathBuf::from("/work/build/c.js"));
}

#[test]
fn run_writes_outputs_and_collects_diagnostics() {
    let temp = tempfile::tempdir().expect("temp dir");
    let cwd = temp.path();
    write_file(cwd, "src/good.js", "Ext.define('app.Good', {});\n");
    write_file(cwd, "src/bad.js", "Ext.define('1bad', {});\n");
    write_file(cwd, "extnorm.json", r#"{ "requireFileScope": true, }"#);

    let args = CliArgs::try_parse_from(["extnorm", "src", "--out-dir", "out"]).expect("args");
    let summary = run(&args, cwd).expect("run should succeed");

    assert!(summary.config.require_file_scope);
    assert_eq!(summary.outcomes.len(), 2);
    assert!(summary.has_errors());
    assert_eq!(summary.code_changes(), 1);

    let good = std::fs::read_to_string(cwd.join("out/src/good.js")).expect("good output");
    assert!(good.contains("app.Good.prototype = {};"));
    let bad = std::fs::read_to_string(cwd.join("out/src/bad.js")).expect("bad output");
    assert_eq!(bad, "Ext.define('1bad', {});\n");

    let bad_outcome = summary
        .outcomes
        .iter()
        .find(|o| o.path.ends_with("bad.js"))
        .expect("bad outcome");
    assert_eq!(bad_outcome.result.diagnostics.len(), 1);
    assert_eq!(bad_outcome.result.diagnostics[0].key(), Some("INVALID_DEFINE_NAME"));
}
