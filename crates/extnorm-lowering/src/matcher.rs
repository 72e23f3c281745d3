//! Recognizes the Ext call shapes and the `extend` config key.

use extnorm_parser::{NodeArena, NodeIndex, syntax_kind_ext};
use extnorm_scanner::SyntaxKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ExtCall {
    /// `Ext.define("a.b.C", {...})`
    NamedDefine,
    /// `Ext.define(null, {...})`
    AnonymousDefine,
    /// `Ext.create("a.b.C", ...)`
    Create,
}

/// Classify `call` as one of the Ext call shapes.
///
/// The callee must be `<ext_base>.define` or `<ext_base>.create` with the
/// base written as a plain identifier. Matching is by name only.
pub(crate) fn match_ext_call(arena: &NodeArena, call: NodeIndex, ext_base: &str) -> Option<ExtCall> {
    if arena.kind(call) != syntax_kind_ext::CALL_EXPRESSION {
        return None;
    }
    let callee = arena.get(arena.child(call, 0))?;
    if callee.kind != syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION {
        return None;
    }
    let object = arena.get(callee.first_child())?;
    if !object.is(SyntaxKind::Identifier) || object.text != ext_base {
        return None;
    }
    match callee.text.as_str() {
        "define" if arena.is_kind(arena.child(call, 1), SyntaxKind::NullKeyword) => Some(ExtCall::AnonymousDefine),
        "define" => Some(ExtCall::NamedDefine),
        "create" => Some(ExtCall::Create),
        _ => None,
    }
}

/// A config key spelled exactly `extend`.
pub(crate) fn is_extend_key(arena: &NodeArena, key: NodeIndex) -> bool {
    arena
        .get(key)
        .is_some_and(|n| n.kind == syntax_kind_ext::PROPERTY_ASSIGNMENT && n.text == "extend")
}

#[cfg(test)]
mod tests {
    use super::*;
    use extnorm_parser::ParserState;

    fn first_call(source: &str) -> (NodeArena, NodeIndex) {
        let mut parser = ParserState::new("m.js", source);
        let root = parser.parse_source_file();
        let arena = parser.into_arena();
        let call = arena.child(arena.child(root, 0), 0);
        (arena, call)
    }

    #[test]
    fn test_match_shapes() {
        let cases = [
            ("Ext.define('a.B', {});", Some(ExtCall::NamedDefine)),
            ("Ext.define();", Some(ExtCall::NamedDefine)),
            ("Ext.define(null, {});", Some(ExtCall::AnonymousDefine)),
            ("Ext.create('a.B');", Some(ExtCall::Create)),
            ("Ext.apply(a, b);", None),
            ("Other.define('a.B', {});", None),
            ("window.Ext.define('a.B', {});", None),
            ("Ext['define']('a.B', {});", None),
            ("define('a.B', {});", None),
        ];
        for (source, expected) in cases {
            let (arena, call) = first_call(source);
            assert_eq!(match_ext_call(&arena, call, "Ext"), expected, "for {source}");
        }
    }

    #[test]
    fn test_custom_base_name() {
        let (arena, call) = first_call("Ext6.define('a.B', {});");
        assert_eq!(match_ext_call(&arena, call, "Ext"), None);
        assert_eq!(match_ext_call(&arena, call, "Ext6"), Some(ExtCall::NamedDefine));
    }
}
