//! Doc-comment model.
//!
//! A `JsDocInfo` is parsed from the text of a `/** ... */` comment and is
//! attached to at most one node. Known tags are modelled; any other tag is
//! kept verbatim so it survives printing.

use std::fmt;

mod builder;
pub use builder::JsDocInfoBuilder;

mod parse;
pub use parse::{parse_jsdoc, parse_type_expr};

/// A type expression inside `{...}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr {
    /// `a.b.C`
    Named(String),
    /// `!T`
    NonNull(Box<TypeExpr>),
    /// `?T`
    Nullable(Box<TypeExpr>),
    /// `T=`
    Optional(Box<TypeExpr>),
    /// Anything else, kept as written.
    Raw(String),
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named(name.into())
    }

    pub fn non_null(inner: TypeExpr) -> Self {
        TypeExpr::NonNull(Box::new(inner))
    }

    pub fn optional(inner: TypeExpr) -> Self {
        TypeExpr::Optional(Box::new(inner))
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named(name) => f.write_str(name),
            TypeExpr::NonNull(inner) => write!(f, "!{inner}"),
            TypeExpr::Nullable(inner) => write!(f, "?{inner}"),
            TypeExpr::Optional(inner) => write!(f, "{inner}="),
            TypeExpr::Raw(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsDocParam {
    pub name: String,
    pub type_expr: Option<TypeExpr>,
    pub description: String,
}

/// A tag with no dedicated field, e.g. `@private` or `@author x`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsDocTag {
    pub name: String,
    pub body: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsDocInfo {
    pub description: String,
    pub constructor: bool,
    pub params: Vec<JsDocParam>,
    pub base_type: Option<TypeExpr>,
    pub type_expr: Option<TypeExpr>,
    pub return_type: Option<TypeExpr>,
    pub return_description: String,
    pub suppressions: Vec<String>,
    pub other_tags: Vec<JsDocTag>,
}

impl JsDocInfo {
    #[inline]
    pub const fn is_constructor(&self) -> bool {
        self.constructor
    }

    #[inline]
    pub const fn has_base_type(&self) -> bool {
        self.base_type.is_some()
    }

    pub fn parameter_type(&self, name: &str) -> Option<&TypeExpr> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.type_expr.as_ref())
    }

    pub fn is_suppressed(&self, name: &str) -> bool {
        self.suppressions.iter().any(|s| s == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.other_tags.iter().any(|t| t.name == name)
    }

    /// A copy with the base type removed.
    pub fn without_base_type(&self) -> JsDocInfo {
        JsDocInfo {
            base_type: None,
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == JsDocInfo::default()
    }

    /// One entry per comment line, without the leading ` * `.
    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        if !self.description.is_empty() {
            lines.extend(self.description.lines().map(str::to_string));
        }
        if self.constructor {
            lines.push("@constructor".to_string());
        }
        if let Some(base) = &self.base_type {
            lines.push(format!("@extends {{{base}}}"));
        }
        for param in &self.params {
            let mut line = String::from("@param");
            if let Some(ty) = &param.type_expr {
                line.push_str(&format!(" {{{ty}}}"));
            }
            line.push(' ');
            line.push_str(&param.name);
            if !param.description.is_empty() {
                line.push(' ');
                line.push_str(&param.description);
            }
            lines.push(line);
        }
        if let Some(ty) = &self.return_type {
            let mut line = format!("@return {{{ty}}}");
            if !self.return_description.is_empty() {
                line.push(' ');
                line.push_str(&self.return_description);
            }
            lines.push(line);
        }
        if let Some(ty) = &self.type_expr {
            lines.push(format!("@type {{{ty}}}"));
        }
        if !self.suppressions.is_empty() {
            lines.push(format!("@suppress {{{}}}", self.suppressions.join(",")));
        }
        for tag in &self.other_tags {
            if tag.body.is_empty() {
                lines.push(format!("@{}", tag.name));
            } else {
                lines.push(format!("@{} {}", tag.name, tag.body));
            }
        }
        lines
    }
}
