use extnorm_emitter::Printer;
use extnorm_parser::{NodeArena, ParserState};

fn reprint(source: &str) -> String {
    let mut parser = ParserState::new("test.js", source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    Printer::print(parser.get_arena(), root)
}

#[test]
fn test_print_simple_statements() {
    assert_eq!(reprint("var a=1,b;"), "var a = 1, b;\n");
    assert_eq!(reprint("foo( 'x' , 2 )"), "foo(\"x\", 2);\n");
    assert_eq!(reprint("a.b['c'] = d;"), "a.b[\"c\"] = d;\n");
}

#[test]
fn test_print_restores_needed_parentheses() {
    assert_eq!(reprint("(a + b) * c;"), "(a + b) * c;\n");
    assert_eq!(reprint("a + (b * c);"), "a + b * c;\n");
    assert_eq!(reprint("a - (b - c);"), "a - (b - c);\n");
    assert_eq!(reprint("(a, b);"), "a, b;\n");
    assert_eq!(reprint("f((a, b));"), "f((a, b));\n");
    assert_eq!(reprint("new (foo())();"), "new (foo())();\n");
    assert_eq!(reprint("(a = b) ? c : d;"), "(a = b) ? c : d;\n");
    assert_eq!(reprint("- -x;"), "- -x;\n");
    assert_eq!(reprint("typeof a === 'string';"), "typeof a === \"string\";\n");
}

#[test]
fn test_print_iife_and_statement_start() {
    assert_eq!(
        reprint("(function () { return 1; })();"),
        "(function () {\n  return 1;\n})();\n"
    );
    assert_eq!(reprint("({}).toString();"), "({}.toString());\n");
}

#[test]
fn test_print_doc_comments() {
    let source = "/** @constructor */\nvar A = function () {};\n/**\n * Doc.\n * @private\n */\nx.y = 1;";
    assert_eq!(
        reprint(source),
        "/** @constructor */\nvar A = function () {};\n/**\n * Doc.\n * @private\n */\nx.y = 1;\n"
    );
}

#[test]
fn test_print_object_literals() {
    assert_eq!(reprint("x = {a: 1, 'b-c': 2, 3: 4};"), "x = {a: 1, \"b-c\": 2, 3: 4};\n");
    assert_eq!(
        reprint("x = {m: function () { return 1; }};"),
        "x = {\n  m: function () {\n    return 1;\n  }\n};\n"
    );
    assert_eq!(
        reprint("x = {/** @type {number} */ a: 1};"),
        "x = {\n  /** @type {number} */\n  a: 1\n};\n"
    );
}

#[test]
fn test_print_control_flow() {
    let source = "if (a) { b(); } else c();\nfor (var i = 0; i < n; i++) {}\nfor (k in o) {}\ntry { f(); } catch (e) {} finally { g(); }";
    assert_eq!(
        reprint(source),
        "if (a) {\n  b();\n} else c();\nfor (var i = 0; i < n; i++) {}\nfor (k in o) {}\ntry {\n  f();\n} catch (e) {} finally {\n  g();\n}\n"
    );
}

#[test]
fn test_print_switch_and_arrays() {
    assert_eq!(
        reprint("switch (x) { case 1: a(); break; default: b(); }"),
        "switch (x) {\n  case 1:\n    a();\n    break;\n  default:\n    b();\n}\n"
    );
    assert_eq!(reprint("x = [1, , 2, ];"), "x = [1, , 2];\n");
    assert_eq!(reprint("x = [1, , ];"), "x = [1, ,];\n");
}

#[test]
fn test_print_escapes_strings() {
    assert_eq!(reprint(r#"x = 'say "hi"\n';"#), "x = \"say \\\"hi\\\"\\n\";\n");
}

#[test]
fn test_print_synthesized_nodes() {
    let mut arena = NodeArena::new("synth.js");
    let target = arena.new_identifier("a");
    let target = arena.new_property_access(target, "b");
    let value = arena.new_function_expression(&["config"], Vec::new());
    let assignment = arena.new_assignment(target, value);
    let statement = arena.new_expression_statement(assignment);
    assert_eq!(Printer::print(&arena, statement), "a.b = function (config) {};");
    assert_eq!(Printer::print_node(&arena, target), "a.b");
}

#[test]
fn test_print_keeps_in_parenthesized_in_for_initializer() {
    let cases = [
        (
            "for (var i = ('a' in o) ? 1 : 0; i < 2; i++) {}",
            "for (var i = (\"a\" in o) ? 1 : 0; i < 2; i++) {}\n",
        ),
        ("for (x = ('a' in o);;) {}", "for (x = (\"a\" in o);;) {}\n"),
        ("for (var a = f(('b' in o)); a;) {}", "for (var a = f((\"b\" in o)); a;) {}\n"),
        (
            "for (var f = function () { return 'a' in o; }; f();) {}",
            "for (var f = function () {\n  return \"a\" in o;\n}; f();) {}\n",
        ),
    ];
    for (source, expected) in cases {
        let printed = reprint(source);
        assert_eq!(printed, expected);
        assert_eq!(reprint(&printed), printed, "output must re-parse to the same tree");
    }
}

#[test]
fn test_print_in_outside_for_head_is_unchanged() {
    assert_eq!(reprint("var a = ('x' in o);"), "var a = \"x\" in o;\n");
    assert_eq!(reprint("for (k in o) { b = 'x' in k; }"), "for (k in o) {\n  b = \"x\" in k;\n}\n");
}
