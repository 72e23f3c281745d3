//! Pass configuration.
//!
//! Read from `extnorm.json` (comments and trailing commas allowed) or from a
//! Java-style `.properties` file carrying `ext_base=...`. Command-line flags
//! override file values.

use anyhow::{Context, Result};
use extnorm_common::LanguageMode;
use extnorm_lowering::{DEFAULT_EXT_BASE, ExtPassOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::args::CliArgs;

/// File names looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAMES: &[&str] = &["extnorm.json", "ext.properties", "ExtConfig.properties"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtConfig {
    pub ext_base: String,
    pub require_file_scope: bool,
    pub language_mode: LanguageMode,
    /// Glob patterns skipped during directory search.
    pub exclude: Vec<String>,
}

impl Default for ExtConfig {
    fn default() -> Self {
        ExtConfig {
            ext_base: DEFAULT_EXT_BASE.to_string(),
            require_file_scope: false,
            language_mode: LanguageMode::default(),
            exclude: Vec::new(),
        }
    }
}

impl ExtConfig {
    /// Load `path`, falling back to defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                debug!(path = %path.display(), error = %format!("{err:#}"), "using default configuration");
                ExtConfig::default()
            }
        }
    }

    pub fn pass_options(&self) -> ExtPassOptions {
        ExtPassOptions {
            ext_base: self.ext_base.clone(),
            require_file_scope: self.require_file_scope,
        }
    }

    /// Apply command-line overrides.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(ext_base) = &args.ext_base {
            self.ext_base.clone_from(ext_base);
        }
        if let Some(mode) = args.language_mode {
            self.language_mode = mode.into();
        }
        if args.require_file_scope {
            self.require_file_scope = true;
        }
        self.exclude.extend(args.exclude.iter().cloned());
    }
}

pub fn load_config(path: &Path) -> Result<ExtConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    if path.extension().is_some_and(|ext| ext == "properties") {
        return Ok(parse_properties(&source));
    }
    parse_config_json(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Parse `extnorm.json` text.
pub fn parse_config_json(source: &str) -> Result<ExtConfig> {
    let stripped = strip_jsonc(source);
    let normalized = remove_trailing_commas(&stripped);
    let mut config: ExtConfig = serde_json::from_str(&normalized).context("failed to parse config JSON")?;
    if config.ext_base.trim().is_empty() {
        config.ext_base = DEFAULT_EXT_BASE.to_string();
    }
    Ok(config)
}

/// Parse `key=value` lines. Unknown keys and bad values are ignored.
pub fn parse_properties(source: &str) -> ExtConfig {
    let mut config = ExtConfig::default();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let Some((key, value)) = line.split_once(['=', ':']) else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "ext_base" | "extBase" if !value.is_empty() => config.ext_base = value.to_string(),
            "require_file_scope" | "requireFileScope" => {
                config.require_file_scope = value.eq_ignore_ascii_case("true");
            }
            "language_mode" | "languageMode" => {
                if let Some(mode) = LanguageMode::from_name(value) {
                    config.language_mode = mode;
                }
            }
            _ => {}
        }
    }
    config
}

/// The config file for a run: `--config`, else the first of
/// `CONFIG_FILE_NAMES` present in `cwd`.
pub fn find_config_file(args: &CliArgs, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(if path.is_absolute() { path.clone() } else { cwd.join(path) });
    }
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| cwd.join(name))
        .find(|path| path.is_file())
}

/// Configuration for a run: file values (or defaults) plus flags.
pub fn resolve_config(args: &CliArgs, cwd: &Path) -> ExtConfig {
    let mut config = find_config_file(args, cwd)
        .map(|path| ExtConfig::load_or_default(&path))
        .unwrap_or_default();
    config.apply_args(args);
    config
}

fn strip_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;
    let mut in_line_comment = false;
    let mut in_block_comment = false;

    while let Some(ch) = chars.next() {
        if in_line_comment {
            if ch == '\n' {
                in_line_comment = false;
                out.push(ch);
            }
            continue;
        }

        if in_block_comment {
            if ch == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block_comment = false;
            } else if ch == '\n' {
                out.push(ch);
            }
            continue;
        }

        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match (ch, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                chars.next();
                in_line_comment = true;
            }
            ('/', Some('*')) => {
                chars.next();
                in_block_comment = true;
            }
            _ => out.push(ch),
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escape = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        if ch == '"' {
            in_string = true;
            out.push(ch);
            continue;
        }

        if ch == ',' {
            let mut lookahead = chars.clone();
            while lookahead.peek().is_some_and(|c| c.is_whitespace()) {
                lookahead.next();
            }
            if matches!(lookahead.peek(), Some('}' | ']')) {
                continue;
            }
        }

        out.push(ch);
    }

    out
}
