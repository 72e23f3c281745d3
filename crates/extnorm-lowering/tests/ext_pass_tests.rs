use extnorm_common::{LanguageMode, diagnostic_codes};
use extnorm_emitter::Printer;
use extnorm_lowering::{Compiler, ExtPass, ExtPassOptions};
use extnorm_parser::{NodeArena, ParserState};

fn parse(source: &str) -> (NodeArena, extnorm_parser::NodeIndex) {
    let mut parser = ParserState::new("test.js", source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    (parser.into_arena(), root)
}

fn run_with(source: &str, options: ExtPassOptions, mode: LanguageMode) -> (String, Compiler) {
    let (mut arena, root) = parse(source);
    let mut compiler = Compiler::new(mode);
    ExtPass::new(&mut compiler, options).process(None, &mut arena, root);
    (Printer::print(&arena, root), compiler)
}

fn run(source: &str) -> (String, Compiler) {
    run_with(source, ExtPassOptions::default(), LanguageMode::EcmaScript5)
}

fn reprint(source: &str) -> String {
    let (arena, root) = parse(source);
    Printer::print(&arena, root)
}

fn diagnostic_keys(compiler: &Compiler) -> Vec<&'static str> {
    compiler.diagnostics().iter().filter_map(|d| d.key()).collect()
}

// =============================================================================
// Non-matches
// =============================================================================

#[test]
fn test_source_without_ext_calls_is_unchanged() {
    let source = "var a = 1;\nfunction f(x) { return x.define('a.B', {}); }\nOther.define('a.B', {});\nExt.apply(a, {b: 1});";
    let (output, compiler) = run(source);
    assert_eq!(output, reprint(source));
    assert!(compiler.diagnostics().is_empty());
    assert!(compiler.warnings().is_empty());
    assert_eq!(compiler.code_changes(), 0);
}

#[test]
fn test_custom_ext_base() {
    let options = ExtPassOptions {
        ext_base: "Ext6".to_string(),
        ..Default::default()
    };
    let (output, compiler) = run_with(
        "Ext.define('a.B', {});\nExt6.define('a.C', {});",
        options,
        LanguageMode::EcmaScript5,
    );
    assert_eq!(
        output,
        "Ext.define(\"a.B\", {});\n/**\n * @constructor\n * @param {Object=} config\n */\na.C = function (config) {};\na.C.prototype = {};\n"
    );
    assert_eq!(compiler.code_changes(), 1);
}

// =============================================================================
// Named defines
// =============================================================================

#[test]
fn test_named_define() {
    let (output, compiler) = run("Ext.define(\"ns.Foo\", {bar: 1});");
    assert_eq!(
        output,
        "/**\n * @constructor\n * @param {Object=} config\n */\nns.Foo = function (config) {};\nns.Foo.prototype = {bar: 1};\n"
    );
    assert!(compiler.diagnostics().is_empty());
    assert_eq!(compiler.code_changes(), 1);
}

#[test]
fn test_named_define_single_segment_uses_var() {
    let (output, _) = run("Ext.define('Foo', {bar: 1});");
    assert_eq!(
        output,
        "/**\n * @constructor\n * @param {Object=} config\n */\nvar Foo = function (config) {};\nFoo.prototype = {bar: 1};\n"
    );
}

#[test]
fn test_named_define_keeps_doc_on_both_statements() {
    let (output, _) = run("/** A panel. */\nExt.define('ns.Panel', {});\nnext();");
    assert_eq!(
        output,
        "/**\n * A panel.\n * @constructor\n * @param {Object=} config\n */\nns.Panel = function (config) {};\n/** A panel. */\nns.Panel.prototype = {};\nnext();\n"
    );
}

#[test]
fn test_named_define_inside_function() {
    let (output, compiler) = run("function f() { Ext.define('a.B', {}); }");
    assert_eq!(
        output,
        "function f() {\n  /**\n   * @constructor\n   * @param {Object=} config\n   */\n  a.B = function (config) {};\n  a.B.prototype = {};\n}\n"
    );
    assert!(compiler.diagnostics().is_empty());
}

#[test]
fn test_generated_nodes_inherit_call_position() {
    let source = "x();\nExt.define('a.B', {m: 1});";
    let (mut arena, root) = parse(source);
    let mut compiler = Compiler::default();
    ExtPass::new(&mut compiler, ExtPassOptions::default()).process(None, &mut arena, root);

    let call_start = source.find("Ext").unwrap() as u32;
    let constructor = arena.get(arena.child(root, 1)).unwrap();
    assert_eq!(constructor.pos, call_start);
    assert_eq!(constructor.end, source.len() as u32 - 1);
    // The member object keeps its own position
    let prototype = arena.child(arena.child(root, 2), 0);
    let members = arena.get(arena.child(prototype, 1)).unwrap();
    assert_eq!(members.pos, source.find('{').unwrap() as u32);
}

// =============================================================================
// Extends
// =============================================================================

#[test]
fn test_extends_annotates_constructor_only() {
    let (output, compiler) = run("Ext.define(\"ns.Sub\", {extend: \"ns.Base\", m: 1});");
    assert_eq!(
        output,
        "/**\n * @constructor\n * @extends {!ns.Base}\n * @param {Object=} config\n */\nns.Sub = function (config) {};\nns.Sub.prototype = {extend: \"ns.Base\", m: 1};\n"
    );
    assert_eq!(compiler.code_changes(), 2);
}

#[test]
fn test_explicit_extends_is_kept() {
    let (output, compiler) = run("/** @extends {my.Base} */\nExt.define('ns.Sub', {extend: 'ns.Base'});");
    assert!(output.contains(" * @extends {my.Base}\n"), "{output}");
    assert!(!output.contains("ns.Base}"), "{output}");
    assert_eq!(compiler.code_changes(), 1);
}

#[test]
fn test_extend_outside_define_is_ignored() {
    let source = "var cfg = {extend: 'ns.Base'};\nExt.define('ns.Sub', {extend: Base});";
    let (output, compiler) = run(source);
    assert!(!output.contains("@extends"), "{output}");
    assert_eq!(compiler.code_changes(), 1);
}

// =============================================================================
// Anonymous defines
// =============================================================================

#[test]
fn test_anonymous_define_in_variable_initializer() {
    let (output, compiler) = run("/** Lazy class. */\nvar k = Ext.define(null, {m: 1});");
    assert_eq!(
        output,
        "/** Lazy class. */\nvar k = (function () {\n  /**\n   * Lazy class.\n   * @constructor\n   */\n  var $extnorm$anon$0 = function () {};\n  $extnorm$anon$0.prototype = {m: 1};\n  return $extnorm$anon$0;\n})();\n"
    );
    assert!(compiler.diagnostics().is_empty());
    assert_eq!(compiler.code_changes(), 1);
}

#[test]
fn test_anonymous_define_in_assignment() {
    let (output, _) = run("/** @private */\nx.y = Ext.define(null, {});");
    assert_eq!(
        output,
        "/** @private */\nx.y = (function () {\n  /**\n   * @constructor\n   * @private\n   */\n  var $extnorm$anon$0 = function () {};\n  $extnorm$anon$0.prototype = {};\n  return $extnorm$anon$0;\n})();\n"
    );
}

#[test]
fn test_anonymous_define_as_call_argument() {
    let (output, _) = run("register(Ext.define(null, {}));");
    assert_eq!(
        output,
        "register((function () {\n  /** @constructor */\n  var $extnorm$anon$0 = function () {};\n  $extnorm$anon$0.prototype = {};\n  return $extnorm$anon$0;\n})());\n"
    );
}

#[test]
fn test_anonymous_define_statement_is_free_call() {
    let source = "Ext.define(null, {});";
    let (mut arena, root) = parse(source);
    let mut compiler = Compiler::default();
    ExtPass::new(&mut compiler, ExtPassOptions::default()).process(None, &mut arena, root);
    let iife = arena.child(arena.child(root, 0), 0);
    let node = arena.get(iife).unwrap();
    assert!(node.flags.contains(extnorm_parser::NodeFlags::FREE_CALL));
    assert_eq!((node.pos, node.end), (0, source.len() as u32 - 1));
    assert!(Printer::print(&arena, root).starts_with("(function () {\n"));
}

#[test]
fn test_anonymous_temporaries_are_unique() {
    let (output, compiler) = run("var a = Ext.define(null, {});\nvar b = Ext.define(null, {});");
    assert!(output.contains("return $extnorm$anon$0;"), "{output}");
    assert!(output.contains("return $extnorm$anon$1;"), "{output}");
    assert_eq!(compiler.code_changes(), 2);
}

#[test]
fn test_anonymous_define_with_extend() {
    let (output, compiler) = run("var k = Ext.define(null, {extend: 'a.Base'});");
    assert!(
        output.contains("  /**\n   * @constructor\n   * @extends {!a.Base}\n   */\n  var $extnorm$anon$0"),
        "{output}"
    );
    assert!(output.contains("$extnorm$anon$0.prototype = {extend: \"a.Base\"};"), "{output}");
    assert_eq!(compiler.code_changes(), 2);
}

// =============================================================================
// Creates
// =============================================================================

#[test]
fn test_create_keeps_extra_arguments() {
    let (output, compiler) = run("Ext.create(\"ns.Foo\", 1, 2);");
    assert_eq!(output, "Ext.create(ns.Foo, 1, 2);\n");
    assert_eq!(compiler.code_changes(), 1);
}

#[test]
fn test_create_with_non_string_warns() {
    let source = "var w = Ext.create(klass);";
    let (output, compiler) = run(source);
    assert_eq!(output, reprint(source));
    assert!(compiler.diagnostics().is_empty());
    let warnings = compiler.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "Usage of Ext.create is not standard: klass");
    assert_eq!(warnings[0].start, source.find("klass").unwrap() as u32);
}

#[test]
fn test_create_warning_suppressed() {
    let cases = [
        "/** @suppress {extCreate} */\nvar w = Ext.create(klass);",
        "/** @suppress {extCreate} */\nw = Ext.create(klass);",
        "/** @suppress {extCreate} */\nExt.create(klass);",
    ];
    for source in cases {
        let (_, compiler) = run(source);
        assert!(compiler.warnings().is_empty(), "{source}");
        assert_eq!(compiler.code_changes(), 0);
    }
}

#[test]
fn test_create_with_computed_string_is_left_alone() {
    let source = "Ext.create('ns.' + name);\nExt.create('x-widget');";
    let (output, compiler) = run(source);
    assert_eq!(output, reprint(source));
    assert!(compiler.warnings().is_empty());
    assert!(compiler.diagnostics().is_empty());
}

#[test]
fn test_create_without_arguments_only_warns() {
    let (output, compiler) = run("Ext.create();");
    assert_eq!(output, "Ext.create();\n");
    assert!(compiler.diagnostics().is_empty());
    assert!(!compiler.has_errors());
    assert_eq!(compiler.code_changes(), 0);
    let warnings = compiler.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "Usage of Ext.create is not standard: undefined");
    assert_eq!(warnings[0].start, 0);

    let (_, compiler) = run("/** @suppress {extCreate} */\nvar w = Ext.create();");
    assert!(compiler.diagnostics().is_empty());
    assert!(compiler.warnings().is_empty());
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn test_invalid_define_name() {
    let source = "Ext.define(\"1bad\", {});";
    let (output, compiler) = run(source);
    assert_eq!(output, reprint(source));
    assert_eq!(compiler.code_changes(), 0);
    let diagnostics = compiler.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, diagnostic_codes::INVALID_DEFINE_NAME);
    assert_eq!(diagnostics[0].message_text, "\"1bad\" is not a valid JS identifier name");
    assert_eq!((diagnostics[0].start, diagnostics[0].length), (11, 6));
    assert!(compiler.has_errors());
}

#[test]
fn test_define_argument_diagnostics() {
    let cases = [
        ("Ext.define();", "NULL_ARGUMENT", "method \"Ext.define\" called without an argument"),
        ("Ext.define('a.B');", "NULL_ARGUMENT", "method \"Ext.define\" called without an argument"),
        ("Ext.define(name, {});", "INVALID_ARGUMENT", "method \"Ext.define\" called with invalid argument"),
        ("Ext.define('a.B', config);", "INVALID_ARGUMENT", "method \"Ext.define\" called with invalid argument"),
        ("x = Ext.define(null);", "NULL_ARGUMENT", "method \"Ext.define\" called without an argument"),
        ("x = Ext.define(null, []);", "INVALID_ARGUMENT", "method \"Ext.define\" called with invalid argument"),
        ("Ext.define('a.B', {m: 1}, onCreated);", "INVALID_ARGUMENT", "method \"Ext.define\" called with invalid argument"),
        ("x = Ext.define(null, {}, 1);", "INVALID_ARGUMENT", "method \"Ext.define\" called with invalid argument"),
    ];
    for (source, key, message) in cases {
        let (output, compiler) = run(source);
        assert_eq!(output, reprint(source), "{source}");
        assert_eq!(diagnostic_keys(&compiler), vec![key], "{source}");
        assert_eq!(compiler.diagnostics()[0].message_text, message, "{source}");
        // Reported at the callee
        assert_eq!(compiler.diagnostics()[0].length, 10, "{source}");
    }
}

#[test]
fn test_named_define_outside_statement_position() {
    let (output, compiler) = run("var x = Ext.define('a.B', {});");
    assert_eq!(output, "var x = Ext.define(\"a.B\", {});\n");
    assert_eq!(diagnostic_keys(&compiler), vec!["INVALID_CLOSURE_CALL"]);
    assert_eq!(
        compiler.diagnostics()[0].message_text,
        "Class dependency methods (Ext.define, Ext.create, etc) must be called at file scope."
    );
}

#[test]
fn test_require_file_scope() {
    let options = ExtPassOptions {
        require_file_scope: true,
        ..Default::default()
    };
    let source = "Ext.define('a.B', {});\nif (x) { Ext.define('a.C', {}); }";
    let (output, compiler) = run_with(source, options, LanguageMode::EcmaScript5);
    assert!(output.contains("a.B.prototype = {};"), "{output}");
    assert!(output.contains("Ext.define(\"a.C\", {});"), "{output}");
    assert_eq!(diagnostic_keys(&compiler), vec!["INVALID_CLOSURE_CALL"]);
    assert_eq!(compiler.code_changes(), 1);
}

#[test]
fn test_name_validity_follows_language_mode() {
    let es3 = run_with("Ext.define('ns.int', {});", ExtPassOptions::default(), LanguageMode::EcmaScript3).1;
    assert_eq!(diagnostic_keys(&es3), vec!["INVALID_DEFINE_NAME"]);
    let es5 = run_with("Ext.define('ns.int', {});", ExtPassOptions::default(), LanguageMode::EcmaScript5).1;
    assert!(es5.diagnostics().is_empty());

    let strict = run_with(
        "Ext.define('ns.static', {});",
        ExtPassOptions::default(),
        LanguageMode::EcmaScript5Strict,
    )
    .1;
    assert_eq!(diagnostic_keys(&strict), vec!["INVALID_DEFINE_NAME"]);
    let es5 = run_with("Ext.define('ns.static', {});", ExtPassOptions::default(), LanguageMode::EcmaScript5).1;
    assert!(es5.diagnostics().is_empty());
}

#[test]
fn test_errors_do_not_stop_other_rewrites() {
    let (output, compiler) = run("Ext.define('1bad', {});\nExt.define('a.Good', {});\nExt.create('a.Good');");
    assert!(output.starts_with("Ext.define(\"1bad\", {});\n"), "{output}");
    assert!(output.contains("a.Good.prototype = {};"), "{output}");
    assert!(output.ends_with("Ext.create(a.Good);\n"), "{output}");
    assert_eq!(diagnostic_keys(&compiler), vec!["INVALID_DEFINE_NAME"]);
    assert_eq!(compiler.code_changes(), 2);
}

// =============================================================================
// Nesting
// =============================================================================

#[test]
fn test_nested_shapes_in_define_config() {
    let source = "Ext.define('ns.A', {\n  extend: 'ns.Base',\n  child: Ext.define(null, {}),\n  make: function () { return Ext.create('ns.B', this); }\n});";
    let (output, compiler) = run(source);
    assert!(compiler.diagnostics().is_empty());
    assert_eq!(compiler.code_changes(), 4);
    assert_eq!(
        output,
        concat!(
            "/**\n * @constructor\n * @extends {!ns.Base}\n * @param {Object=} config\n */\n",
            "ns.A = function (config) {};\n",
            "ns.A.prototype = {\n",
            "  extend: \"ns.Base\",\n",
            "  child: (function () {\n",
            "    /** @constructor */\n",
            "    var $extnorm$anon$0 = function () {};\n",
            "    $extnorm$anon$0.prototype = {};\n",
            "    return $extnorm$anon$0;\n",
            "  })(),\n",
            "  make: function () {\n",
            "    return Ext.create(ns.B, this);\n",
            "  }\n",
            "};\n",
        )
    );
}

#[test]
fn test_create_of_anonymous_define_warns_and_rewrites_inner() {
    let (output, compiler) = run("Ext.create(Ext.define(null, {}));");
    assert_eq!(compiler.warnings().len(), 1);
    assert!(compiler.warnings()[0].message.starts_with("Usage of Ext.create is not standard: Ext.define(null, {})"));
    assert!(output.starts_with("Ext.create((function () {\n"), "{output}");
    assert_eq!(compiler.code_changes(), 1);
}

#[test]
fn test_pass_instances_share_nothing() {
    let (mut first, first_root) = parse("var a = Ext.define(null, {});");
    let (mut second, second_root) = parse("var b = Ext.define(null, {});");
    let mut compiler = Compiler::default();
    let externs = NodeArena::new("externs.js");
    let mut pass = ExtPass::new(&mut compiler, ExtPassOptions::default());
    assert_eq!(pass.ext_base(), "Ext");
    pass.process(Some(&externs), &mut first, first_root);
    pass.process(Some(&externs), &mut second, second_root);
    assert!(Printer::print(&first, first_root).contains("$extnorm$anon$0"));
    // Temporaries stay unique across trees handled by one pass
    assert!(Printer::print(&second, second_root).contains("$extnorm$anon$1"));
}
