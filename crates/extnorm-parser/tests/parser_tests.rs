use extnorm_common::diagnostic_codes;
use extnorm_parser::{NodeArena, NodeFlags, NodeIndex, ParserState, syntax_kind_ext};
use extnorm_scanner::SyntaxKind;

fn parse(source: &str) -> (NodeArena, NodeIndex, Vec<u32>) {
    let mut parser = ParserState::new("test.js", source);
    let root = parser.parse_source_file();
    let codes = parser.get_diagnostics().iter().map(|d| d.code).collect();
    (parser.into_arena(), root, codes)
}

fn first_statement(arena: &NodeArena, root: NodeIndex) -> NodeIndex {
    arena.child(root, 0)
}

#[test]
fn test_parse_ext_define_statement() {
    let (arena, root, codes) = parse("Ext.define('app.Foo', { bar: 1, 'baz': 2 });");
    assert!(codes.is_empty(), "unexpected diagnostics: {codes:?}");
    assert_eq!(arena.kind(root), syntax_kind_ext::SOURCE_FILE);

    let statement = first_statement(&arena, root);
    assert_eq!(arena.kind(statement), syntax_kind_ext::EXPRESSION_STATEMENT);
    let call = arena.child(statement, 0);
    assert_eq!(arena.kind(call), syntax_kind_ext::CALL_EXPRESSION);
    assert_eq!(arena.parent(call), statement);

    let callee = arena.child(call, 0);
    assert_eq!(arena.kind(callee), syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION);
    assert_eq!(arena.text(callee), "define");
    assert_eq!(arena.text(arena.child(callee, 0)), "Ext");
    let call_node = arena.get(call).expect("call node");
    assert!(!call_node.flags.contains(NodeFlags::FREE_CALL));

    let name = arena.child(call, 1);
    assert!(arena.is_kind(name, SyntaxKind::StringLiteral));
    assert_eq!(arena.text(name), "app.Foo");

    let config = arena.child(call, 2);
    assert_eq!(arena.kind(config), syntax_kind_ext::OBJECT_LITERAL_EXPRESSION);
    let keys: Vec<&str> = arena.children(config).iter().map(|&k| arena.text(k)).collect();
    assert_eq!(keys, vec!["bar", "baz"]);
    let quoted = arena.get(arena.child(config, 1)).expect("key");
    assert!(quoted.flags.contains(NodeFlags::QUOTED));
}

#[test]
fn test_doc_comment_attachment() {
    let source = r#"
/** @constructor */
var a = 1;
/** @suppress {extCreate} */
x = Ext.create(name);
/** Call doc. */
Ext.define('A', {
    /** @type {string} */
    extend: 'B'
});
"#;
    let (arena, root, codes) = parse(source);
    assert!(codes.is_empty(), "unexpected diagnostics: {codes:?}");

    let var_statement = arena.child(root, 0);
    assert!(arena.jsdoc(var_statement).is_some_and(|d| d.is_constructor()));

    let assignment = arena.child(arena.child(root, 1), 0);
    assert_eq!(arena.kind(assignment), syntax_kind_ext::ASSIGNMENT_EXPRESSION);
    assert!(arena.jsdoc(assignment).is_some_and(|d| d.is_suppressed("extCreate")));

    let call = arena.child(arena.child(root, 2), 0);
    assert_eq!(arena.jsdoc(call).map(|d| d.description.as_str()), Some("Call doc."));
    let key = arena.child(arena.child(call, 2), 0);
    assert_eq!(arena.text(key), "extend");
    assert!(arena.jsdoc(key).is_some_and(|d| d.type_expr.is_some()));
}

#[test]
fn test_operator_precedence_shapes() {
    let (arena, root, codes) = parse("a = b + c * d;");
    assert!(codes.is_empty());
    let assignment = arena.child(first_statement(&arena, root), 0);
    let sum = arena.child(assignment, 1);
    assert_eq!(arena.get(sum).map(|n| n.operator), Some(SyntaxKind::PlusToken));
    let product = arena.child(sum, 1);
    assert_eq!(arena.get(product).map(|n| n.operator), Some(SyntaxKind::AsteriskToken));
}

#[test]
fn test_parenthesized_iife_is_free_call() {
    let (arena, root, codes) = parse("(function () { return 1; })();");
    assert!(codes.is_empty());
    let call = arena.child(first_statement(&arena, root), 0);
    assert_eq!(arena.kind(call), syntax_kind_ext::CALL_EXPRESSION);
    assert!(arena.get(call).is_some_and(|n| n.flags.contains(NodeFlags::FREE_CALL)));
    assert_eq!(arena.kind(arena.child(call, 0)), syntax_kind_ext::FUNCTION_EXPRESSION);
}

#[test]
fn test_automatic_semicolon_insertion() {
    let (arena, root, codes) = parse("var a = 1\nvar b = 2\na++\nreturnValue()");
    assert!(codes.is_empty(), "unexpected diagnostics: {codes:?}");
    assert_eq!(arena.children(root).len(), 4);
}

#[test]
fn test_statement_forms() {
    let source = r#"
function f(a, b) {
    for (var i = 0; i < 10; i++) { continue; }
    for (var k in a) {}
    while (a) { break; }
    do { a--; } while (a)
    if (a) b(); else { c(); }
    try { x(); } catch (e) { throw e; } finally { y(); }
    switch (a) { case 1: b(); break; default: c(); }
    label: for (;;) { break label; }
    return typeof a === "string" ? new Foo(a) : [1, , 2];
}
"#;
    let (arena, root, codes) = parse(source);
    assert!(codes.is_empty(), "unexpected diagnostics: {codes:?}");
    let function = first_statement(&arena, root);
    assert_eq!(arena.kind(function), syntax_kind_ext::FUNCTION_DECLARATION);
    let body = arena.child(function, 2);
    let kinds: Vec<u16> = arena.children(body).iter().map(|&s| arena.kind(s)).collect();
    assert_eq!(
        kinds,
        vec![
            syntax_kind_ext::FOR_STATEMENT,
            syntax_kind_ext::FOR_IN_STATEMENT,
            syntax_kind_ext::WHILE_STATEMENT,
            syntax_kind_ext::DO_STATEMENT,
            syntax_kind_ext::IF_STATEMENT,
            syntax_kind_ext::TRY_STATEMENT,
            syntax_kind_ext::SWITCH_STATEMENT,
            syntax_kind_ext::LABELED_STATEMENT,
            syntax_kind_ext::RETURN_STATEMENT,
        ]
    );
}

#[test]
fn test_regex_literal_in_expression_position() {
    let (arena, root, codes) = parse("var r = /ab+c/g.test(s);");
    assert!(codes.is_empty());
    let declaration = arena.child(first_statement(&arena, root), 0);
    let call = arena.child(declaration, 0);
    let access = arena.child(call, 0);
    let regex = arena.child(access, 0);
    assert!(arena.is_kind(regex, SyntaxKind::RegularExpressionLiteral));
    assert_eq!(arena.text(regex), "/ab+c/g");
}

#[test]
fn test_syntax_errors_are_reported_and_recovered() {
    let (arena, root, codes) = parse("var = 1;\nExt.define('a', {});");
    assert!(codes.contains(&diagnostic_codes::IDENTIFIER_EXPECTED));
    let last = *arena.children(root).last().expect("recovered statement");
    assert_eq!(arena.kind(last), syntax_kind_ext::EXPRESSION_STATEMENT);
}

#[test]
fn test_invalid_assignment_target() {
    let (_, _, codes) = parse("f() = 1;");
    assert_eq!(codes, vec![diagnostic_codes::INVALID_ASSIGNMENT_TARGET]);
}

#[test]
fn test_missing_property_value() {
    let (_, _, codes) = parse("x = {a: };");
    assert!(codes.contains(&diagnostic_codes::EXPRESSION_EXPECTED));
}

#[test]
fn test_in_operator_inside_for_initializer() {
    let (arena, root, codes) = parse("for (var i = ('a' in o) ? 1 : 0, f = function () { return 'b' in o; }; i;) {}");
    assert!(codes.is_empty(), "unexpected diagnostics: {codes:?}");
    let statement = first_statement(&arena, root);
    assert_eq!(arena.kind(statement), syntax_kind_ext::FOR_STATEMENT);

    let (_, _, codes) = parse("for (var i = 'a' in o; i;) {}");
    assert!(!codes.is_empty());
}
