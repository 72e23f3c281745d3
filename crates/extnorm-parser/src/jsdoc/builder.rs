use super::{JsDocInfo, JsDocParam, TypeExpr};

/// Accumulates doc-comment facts, optionally starting from an existing doc.
///
/// `record_*` methods return `false` and leave the doc unchanged when the
/// fact is already present.
#[derive(Clone, Debug, Default)]
pub struct JsDocInfoBuilder {
    info: JsDocInfo,
    populated: bool,
}

impl JsDocInfoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a copy of `info`, or from an empty doc when there is none.
    pub fn maybe_copy_from(info: Option<&JsDocInfo>) -> Self {
        match info {
            Some(info) => JsDocInfoBuilder {
                info: info.clone(),
                populated: true,
            },
            None => Self::new(),
        }
    }

    pub const fn is_populated(&self) -> bool {
        self.populated
    }

    pub fn record_constructor(&mut self) -> bool {
        if self.info.constructor {
            return false;
        }
        self.info.constructor = true;
        self.populated = true;
        true
    }

    pub fn record_parameter(&mut self, name: &str, type_expr: TypeExpr) -> bool {
        if self.info.params.iter().any(|p| p.name == name) {
            return false;
        }
        self.info.params.push(JsDocParam {
            name: name.to_string(),
            type_expr: Some(type_expr),
            description: String::new(),
        });
        self.populated = true;
        true
    }

    pub fn record_base_type(&mut self, base: TypeExpr) -> bool {
        if self.info.base_type.is_some() {
            return false;
        }
        self.info.base_type = Some(base);
        self.populated = true;
        true
    }

    pub fn record_suppression(&mut self, name: &str) -> bool {
        if self.info.is_suppressed(name) {
            return false;
        }
        self.info.suppressions.push(name.to_string());
        self.populated = true;
        true
    }

    pub fn build(self) -> JsDocInfo {
        self.info
    }
}
