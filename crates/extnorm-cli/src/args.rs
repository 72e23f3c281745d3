use clap::{Parser, ValueEnum};
use extnorm_common::LanguageMode;
use std::path::PathBuf;

/// CLI arguments for the extnorm binary.
#[derive(Parser, Debug)]
#[command(
    name = "extnorm",
    version,
    about = "Rewrite Ext.define/Ext.create class definitions into constructor/prototype form"
)]
pub struct CliArgs {
    /// Files or directories to rewrite. Directories are searched for `.js` files.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Path to an `extnorm.json` or `.properties` configuration file.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    // ==================== Pass Options ====================
    /// Name of the framework root object (default `Ext`).
    #[arg(long = "ext-base", alias = "extBase")]
    pub ext_base: Option<String>,

    /// Language mode used to validate class names.
    #[arg(long = "language-mode", alias = "languageMode", value_enum, ignore_case = true)]
    pub language_mode: Option<LanguageModeArg>,

    /// Only accept named class definitions as top-level statements.
    #[arg(long = "require-file-scope", alias = "requireFileScope")]
    pub require_file_scope: bool,

    // ==================== Output ====================
    /// Write rewritten files under this directory instead of printing them.
    #[arg(short = 'o', long = "out-dir", alias = "outDir")]
    pub out_dir: Option<PathBuf>,

    /// How diagnostics are printed.
    #[arg(long, value_enum, default_value_t = DiagnosticsFormat::Pretty)]
    pub diagnostics: DiagnosticsFormat,

    /// Disable colored diagnostics.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Glob patterns of files to skip while searching directories.
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LanguageModeArg {
    Es3,
    Es5,
    Es5Strict,
}

impl From<LanguageModeArg> for LanguageMode {
    fn from(value: LanguageModeArg) -> Self {
        match value {
            LanguageModeArg::Es3 => LanguageMode::EcmaScript3,
            LanguageModeArg::Es5 => LanguageMode::EcmaScript5,
            LanguageModeArg::Es5Strict => LanguageMode::EcmaScript5Strict,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DiagnosticsFormat {
    /// `file:line:col - error EXT2002: message` with a source snippet.
    #[default]
    Pretty,
    /// One JSON document with every diagnostic and warning.
    Json,
}
