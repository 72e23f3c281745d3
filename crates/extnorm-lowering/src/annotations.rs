//! Doc-comment merges for generated constructors.

use extnorm_parser::{JsDocInfo, JsDocInfoBuilder, TypeExpr};

/// Name and type of the parameter every named constructor takes.
pub(crate) const CONFIG_PARAM: &str = "config";

/// `existing` plus `@constructor` and `@param {Object=} config`.
pub(crate) fn named_constructor_doc(existing: Option<&JsDocInfo>) -> JsDocInfo {
    let mut builder = JsDocInfoBuilder::maybe_copy_from(existing);
    builder.record_constructor();
    builder.record_parameter(CONFIG_PARAM, TypeExpr::optional(TypeExpr::named("Object")));
    builder.build()
}

/// `existing` plus `@constructor`, and `base` as `@extends` when given.
pub(crate) fn anonymous_constructor_doc(existing: Option<&JsDocInfo>, base: Option<TypeExpr>) -> JsDocInfo {
    let mut builder = JsDocInfoBuilder::maybe_copy_from(existing);
    builder.record_constructor();
    if let Some(base) = base {
        builder.record_base_type(base);
    }
    builder.build()
}

/// `existing` plus `@extends {!base_name}`.
///
/// An explicit `@extends` already in `existing` wins.
pub(crate) fn with_base_type(existing: Option<&JsDocInfo>, base_name: &str) -> JsDocInfo {
    let mut builder = JsDocInfoBuilder::maybe_copy_from(existing);
    builder.record_base_type(TypeExpr::non_null(TypeExpr::named(base_name)));
    builder.build()
}

/// Doc for a `prototype` assignment: the define's doc without type facts
/// that only make sense on the constructor.
pub(crate) fn prototype_doc(original: Option<&JsDocInfo>) -> Option<JsDocInfo> {
    let info = original?.without_base_type();
    (!info.is_empty()).then_some(info)
}
