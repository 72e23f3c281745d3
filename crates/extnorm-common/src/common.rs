//! Shared enums used by the scanner, parser and pass crates.

use serde::{Deserialize, Serialize};

/// ECMAScript language mode the input is interpreted under.
///
/// Only reserved-word rules depend on it: ES3 reserves the Java-era future
/// words, ES5 strict mode reserves the strict-mode-only words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageMode {
    #[serde(rename = "es3")]
    EcmaScript3,
    #[default]
    #[serde(rename = "es5")]
    EcmaScript5,
    #[serde(rename = "es5-strict")]
    EcmaScript5Strict,
}

impl LanguageMode {
    /// Parse the user-facing spelling (`es3`, `es5`, `es5-strict`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "es3" | "ecmascript3" => Some(Self::EcmaScript3),
            "es5" | "ecmascript5" => Some(Self::EcmaScript5),
            "es5-strict" | "es5_strict" | "ecmascript5_strict" => Some(Self::EcmaScript5Strict),
            _ => None,
        }
    }

    pub const fn is_strict(self) -> bool {
        matches!(self, Self::EcmaScript5Strict)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::EcmaScript3 => "es3",
            Self::EcmaScript5 => "es5",
            Self::EcmaScript5Strict => "es5-strict",
        }
    }
}
