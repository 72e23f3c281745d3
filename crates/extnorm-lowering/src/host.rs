//! The pass's view of the surrounding compiler.

use extnorm_common::{Diagnostic, DiagnosticCategory, LanguageMode, StyleWarning};

/// Sinks and settings the pass needs from its host.
pub trait PassHost {
    /// Report an error diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);

    /// Report a non-blocking notice about non-standard usage.
    fn warn_style(&mut self, warning: StyleWarning);

    /// Called once per individual rewrite.
    fn report_code_change(&mut self);

    /// Language mode used for identifier validity.
    fn language_mode(&self) -> LanguageMode;
}

/// A host that collects everything it is told.
#[derive(Debug, Default)]
pub struct Compiler {
    language_mode: LanguageMode,
    diagnostics: Vec<Diagnostic>,
    warnings: Vec<StyleWarning>,
    code_changes: usize,
}

impl Compiler {
    pub fn new(language_mode: LanguageMode) -> Self {
        Compiler {
            language_mode,
            ..Default::default()
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn warnings(&self) -> &[StyleWarning] {
        &self.warnings
    }

    pub const fn code_changes(&self) -> usize {
        self.code_changes
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn take_warnings(&mut self) -> Vec<StyleWarning> {
        std::mem::take(&mut self.warnings)
    }
}

impl PassHost for Compiler {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn warn_style(&mut self, warning: StyleWarning) {
        self.warnings.push(warning);
    }

    fn report_code_change(&mut self) {
        self.code_changes += 1;
    }

    fn language_mode(&self) -> LanguageMode {
        self.language_mode
    }
}
