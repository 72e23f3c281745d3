use extnorm_parser::jsdoc::{parse_jsdoc, parse_type_expr};
use extnorm_parser::{JsDocInfoBuilder, TypeExpr};

#[test]
fn test_parse_multiline_doc() {
    let info = parse_jsdoc(
        "*\n * A grid panel.\n *\n * @constructor\n * @extends {app.Base}\n * @param {Object=} config The config.\n * @private\n ",
    );
    assert_eq!(info.description, "A grid panel.");
    assert!(info.is_constructor());
    assert_eq!(info.base_type, Some(TypeExpr::named("app.Base")));
    assert_eq!(
        info.parameter_type("config"),
        Some(&TypeExpr::optional(TypeExpr::named("Object")))
    );
    assert_eq!(info.params[0].description, "The config.");
    assert!(info.has_tag("private"));
}

#[test]
fn test_parse_single_line_tags() {
    let info = parse_jsdoc(" @constructor @suppress {extCreate, visibility} ");
    assert!(info.is_constructor());
    assert!(info.is_suppressed("extCreate"));
    assert!(info.is_suppressed("visibility"));
    assert!(!info.is_suppressed("other"));
}

#[test]
fn test_at_sign_inside_braces_is_not_a_tag() {
    let info = parse_jsdoc(" @type {{a: @b}} ");
    assert_eq!(info.type_expr, Some(TypeExpr::Raw("{a: @b}".to_string())));
    assert!(info.other_tags.is_empty());
}

#[test]
fn test_type_expression_forms() {
    assert_eq!(parse_type_expr("!a.B").to_string(), "!a.B");
    assert_eq!(parse_type_expr("?string"), TypeExpr::Nullable(Box::new(TypeExpr::named("string"))));
    assert_eq!(parse_type_expr("Object="), TypeExpr::optional(TypeExpr::named("Object")));
    assert_eq!(parse_type_expr("Array<string>"), TypeExpr::Raw("Array<string>".to_string()));
    assert_eq!(parse_type_expr("?"), TypeExpr::Raw("?".to_string()));
}

#[test]
fn test_lines_render_recorded_facts() {
    let mut builder = JsDocInfoBuilder::maybe_copy_from(None);
    builder.record_constructor();
    builder.record_parameter("config", TypeExpr::optional(TypeExpr::named("Object")));
    builder.record_base_type(TypeExpr::non_null(TypeExpr::named("ns.Base")));
    let info = builder.build();
    assert_eq!(
        info.lines(),
        vec!["@constructor", "@extends {!ns.Base}", "@param {Object=} config"]
    );
    assert_eq!(info.without_base_type().lines(), vec!["@constructor", "@param {Object=} config"]);
}

#[test]
fn test_unknown_tags_round_trip_through_lines() {
    let info = parse_jsdoc(" @author someone\n * @deprecated ");
    assert_eq!(info.lines(), vec!["@author someone", "@deprecated"]);
}
