use colored::Colorize;
use extnorm_common::{Diagnostic, DiagnosticCategory, LineMap, StyleWarning};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

pub struct Reporter {
    color: bool,
    sources: HashMap<String, String>,
    line_maps: HashMap<String, LineMap>,
}

/// A diagnostic with its resolved 1-based location, for JSON output.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
    pub code: u32,
    pub key: Option<&'static str>,
    pub category: DiagnosticCategory,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JsonWarning<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
    pub message: &'a str,
}

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub diagnostics: Vec<JsonDiagnostic<'a>>,
    pub warnings: Vec<JsonWarning<'a>>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
            line_maps: HashMap::new(),
        }
    }

    /// Register the text of `file` so it is not read from disk again.
    pub fn add_source(&mut self, file: &str, source: &str) {
        self.line_maps.remove(file);
        self.sources.insert(file.to_string(), source.to_string());
    }

    pub fn render(&mut self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&mut self, diagnostic: &Diagnostic) -> String {
        let location = self.format_location(&diagnostic.file, diagnostic.start);
        let category = self.format_category(diagnostic.category);
        let code = self.format_code(diagnostic.code);

        let mut output = String::new();
        if let Some(location) = location {
            output.push_str(&location);
        } else if !diagnostic.file.is_empty() {
            output.push_str(&diagnostic.file);
        } else {
            output.push_str("<unknown>");
        }

        output.push_str(" - ");
        output.push_str(&category);
        if !code.is_empty() {
            output.push(' ');
            output.push_str(&code);
        }
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        if let Some(snippet) = self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length) {
            output.push_str(&snippet);
        }
        output
    }

    /// `warning: file:line:col: message`
    pub fn format_warning(&mut self, warning: &StyleWarning) -> String {
        let location = self
            .format_location(&warning.file, warning.start)
            .unwrap_or_else(|| warning.file.clone());
        let label = if self.color {
            "warning".yellow().bold().to_string()
        } else {
            "warning".to_string()
        };
        format!("{label}: {location}: {}", warning.message)
    }

    pub fn render_json(&mut self, diagnostics: &[Diagnostic], warnings: &[StyleWarning]) -> serde_json::Result<String> {
        let mut report = JsonReport {
            diagnostics: Vec::with_capacity(diagnostics.len()),
            warnings: Vec::with_capacity(warnings.len()),
        };
        for diagnostic in diagnostics {
            let (line, column) = self.position_for(&diagnostic.file, diagnostic.start).unwrap_or((0, 0));
            report.diagnostics.push(JsonDiagnostic {
                file: &diagnostic.file,
                line,
                column,
                code: diagnostic.code,
                key: diagnostic.key(),
                category: diagnostic.category,
                message: &diagnostic.message_text,
            });
        }
        for warning in warnings {
            let (line, column) = self.position_for(&warning.file, warning.start).unwrap_or((0, 0));
            report.warnings.push(JsonWarning {
                file: &warning.file,
                line,
                column,
                message: &warning.message,
            });
        }
        serde_json::to_string_pretty(&report)
    }

    /// Source line with the span underlined:
    ///     2   Ext.define("1bad", {});
    ///                    ~~~~~~
    fn format_snippet(&mut self, file: &str, start: u32, length: u32) -> Option<String> {
        if file.is_empty() || length == 0 {
            return None;
        }

        let (line_num, column) = self.position_for(file, start)?;
        let source = self.sources.get(file)?;
        let line_map = self.line_maps.get(file)?;
        let line_text = line_map.line_text(line_num - 1, source)?;

        let mut underline = String::new();
        for (i, ch) in line_text.chars().enumerate() {
            let offset = i as u32;
            if offset < column - 1 {
                underline.push_str(if ch == '\t' { "    " } else { " " });
            } else if offset < column - 1 + length {
                underline.push_str(if ch == '\t' { "~~~~" } else { "~" });
            } else {
                break;
            }
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!("\n  {line_num:>3}   {line_text}\n        {underline}"))
    }

    fn format_location(&mut self, file: &str, offset: u32) -> Option<String> {
        if file.is_empty() {
            return None;
        }
        let (line, column) = self.position_for(file, offset)?;
        Some(format!("{file}:{line}:{column}"))
    }

    /// 1-based line and column of `offset` in `file`.
    fn position_for(&mut self, file: &str, offset: u32) -> Option<(u32, u32)> {
        self.ensure_source(file)?;
        let source = self.sources.get(file)?;
        let line_map = self
            .line_maps
            .entry(file.to_string())
            .or_insert_with(|| LineMap::build(source));
        let position = line_map.offset_to_position(offset, source);
        Some((position.line + 1, position.character + 1))
    }

    fn ensure_source(&mut self, file: &str) -> Option<()> {
        if !self.sources.contains_key(file) {
            let contents = std::fs::read_to_string(Path::new(file)).ok()?;
            self.sources.insert(file.to_string(), contents);
        }
        Some(())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Suggestion => label.blue().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        if code == 0 {
            return String::new();
        }
        let label = format!("EXT{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
