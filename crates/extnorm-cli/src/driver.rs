//! Input discovery and the per-file parse, rewrite and print pipeline.

use anyhow::{Context, Result, bail};
use extnorm_common::{Diagnostic, DiagnosticCategory, StyleWarning};
use extnorm_emitter::Printer;
use extnorm_lowering::{Compiler, ExtPass};
use extnorm_parser::ParserState;
use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};
use walkdir::WalkDir;

use crate::args::CliArgs;
use crate::config::{ExtConfig, resolve_config};

/// Result of rewriting one source text.
#[derive(Debug, Clone)]
pub struct RewriteResult {
    /// Printed output; the original text when the file did not parse.
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
    pub warnings: Vec<StyleWarning>,
    pub code_changes: usize,
}

impl RewriteResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.category == DiagnosticCategory::Error)
    }
}

/// A rewritten input file.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Name used in diagnostics.
    pub file_name: String,
    pub source: String,
    pub result: RewriteResult,
}

#[derive(Debug)]
pub struct RunSummary {
    pub config: ExtConfig,
    pub outcomes: Vec<FileOutcome>,
}

impl RunSummary {
    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.has_errors())
    }

    pub fn code_changes(&self) -> usize {
        self.outcomes.iter().map(|o| o.result.code_changes).sum()
    }
}

/// Parse `source`, run the Ext pass over it and print the result.
///
/// Files with syntax errors are reported and left as they are.
pub fn rewrite_source(file_name: &str, source: &str, config: &ExtConfig) -> RewriteResult {
    let mut parser = ParserState::new(file_name, source);
    let root = parser.parse_source_file();
    let parse_diagnostics = parser.take_diagnostics();
    if !parse_diagnostics.is_empty() {
        debug!(file = file_name, errors = parse_diagnostics.len(), "skipping file with syntax errors");
        return RewriteResult {
            output: source.to_string(),
            diagnostics: parse_diagnostics,
            warnings: Vec::new(),
            code_changes: 0,
        };
    }

    let mut arena = parser.into_arena();
    let mut compiler = Compiler::new(config.language_mode);
    ExtPass::new(&mut compiler, config.pass_options()).process(None, &mut arena, root);

    let code_changes = compiler.code_changes();
    let output = if code_changes == 0 {
        source.to_string()
    } else {
        Printer::print(&arena, root)
    };
    RewriteResult {
        output,
        diagnostics: compiler.take_diagnostics(),
        warnings: compiler.take_warnings(),
        code_changes,
    }
}

fn build_exclude_set(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).with_context(|| format!("invalid exclude pattern '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build exclude patterns")
}

fn is_js_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "js")
}

/// Expand `inputs` into a sorted list of files.
///
/// Files named directly are always included; directories contribute their
/// `.js` files that match none of the `exclude` globs.
pub fn discover_inputs(inputs: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let excluded = build_exclude_set(exclude)?;
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            bail!("input not found: {}", input.display());
        }
        for entry in WalkDir::new(input)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !entry.file_type().is_file() || !is_js_file(path) {
                continue;
            }
            let relative = path.strip_prefix(input).unwrap_or(path);
            if excluded.is_match(relative) || excluded.is_match(path) {
                continue;
            }
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn process_file(path: &Path, config: &ExtConfig) -> Result<FileOutcome> {
    let file_name = path.display().to_string();
    let _span = info_span!("file", path = %file_name).entered();
    let source =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let result = rewrite_source(&file_name, &source, config);
    Ok(FileOutcome {
        path: path.to_path_buf(),
        file_name,
        source,
        result,
    })
}

/// Where `path` goes under `out_dir`: its path relative to `cwd` when it
/// lies inside it, its file name otherwise.
pub fn output_path(out_dir: &Path, path: &Path, cwd: &Path) -> PathBuf {
    let relative = if path.is_absolute() {
        path.strip_prefix(cwd).ok().map(Path::to_path_buf)
    } else {
        Some(path.to_path_buf())
    };
    let relative = relative
        .filter(|p| p.components().all(|c| matches!(c, std::path::Component::Normal(_))))
        .or_else(|| path.file_name().map(PathBuf::from))
        .unwrap_or_default();
    out_dir.join(relative)
}

fn write_outputs(out_dir: &Path, outcomes: &[FileOutcome], cwd: &Path) -> Result<()> {
    outcomes.par_iter().try_for_each(|outcome| -> Result<()> {
        let target = output_path(out_dir, &outcome.path, cwd);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(&target, &outcome.result.output)
            .with_context(|| format!("failed to write {}", target.display()))?;
        Ok(())
    })
}

/// Rewrite every input. Outputs are written when `--out-dir` is given.
pub fn run(args: &CliArgs, cwd: &Path) -> Result<RunSummary> {
    let config = resolve_config(args, cwd);
    debug!(?config, "resolved configuration");

    let inputs: Vec<PathBuf> = args
        .inputs
        .iter()
        .map(|p| if p.is_absolute() { p.clone() } else { cwd.join(p) })
        .collect();
    let files = discover_inputs(&inputs, &config.exclude)?;
    debug!(files = files.len(), "discovered inputs");

    let outcomes = files
        .par_iter()
        .map(|path| process_file(path, &config))
        .collect::<Result<Vec<_>>>()?;

    if let Some(out_dir) = &args.out_dir {
        let out_dir = if out_dir.is_absolute() { out_dir.clone() } else { cwd.join(out_dir) };
        write_outputs(&out_dir, &outcomes, cwd)?;
    }

    Ok(RunSummary { config, outcomes })
}
