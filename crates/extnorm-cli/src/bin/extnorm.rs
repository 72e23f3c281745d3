#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{IsTerminal, Write};

use extnorm_cli::args::{CliArgs, DiagnosticsFormat};
use extnorm_cli::driver::{self, RunSummary};
use extnorm_cli::reporter::Reporter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_ERRORS: i32 = 1;

fn main() -> Result<()> {
    // Initialize tracing if EXTNORM_LOG or RUST_LOG is set.
    extnorm_cli::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let summary = driver::run(&args, &cwd)?;

    report(&args, &summary)?;
    if args.out_dir.is_none() {
        print_outputs(&summary)?;
    }

    std::process::exit(if summary.has_errors() { EXIT_ERRORS } else { EXIT_SUCCESS });
}

fn report(args: &CliArgs, summary: &RunSummary) -> Result<()> {
    let color = !args.no_color && std::io::stderr().is_terminal();
    let mut reporter = Reporter::new(color);
    for outcome in &summary.outcomes {
        reporter.add_source(&outcome.file_name, &outcome.source);
    }

    let diagnostics: Vec<_> = summary
        .outcomes
        .iter()
        .flat_map(|o| o.result.diagnostics.iter().cloned())
        .collect();
    let warnings: Vec<_> = summary
        .outcomes
        .iter()
        .flat_map(|o| o.result.warnings.iter().cloned())
        .collect();

    match args.diagnostics {
        DiagnosticsFormat::Json => {
            let json = reporter
                .render_json(&diagnostics, &warnings)
                .context("failed to serialize diagnostics")?;
            eprintln!("{json}");
        }
        DiagnosticsFormat::Pretty => {
            for warning in &warnings {
                eprintln!("{}", reporter.format_warning(warning));
            }
            if !diagnostics.is_empty() {
                eprintln!("{}", reporter.render(&diagnostics));
            }
        }
    }
    Ok(())
}

fn print_outputs(summary: &RunSummary) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let with_headers = summary.outcomes.len() > 1;
    for outcome in &summary.outcomes {
        if with_headers {
            writeln!(out, "// {}", outcome.file_name).context("failed to write output")?;
        }
        out.write_all(outcome.result.output.as_bytes())
            .context("failed to write output")?;
        if !outcome.result.output.ends_with('\n') {
            writeln!(out).context("failed to write output")?;
        }
    }
    Ok(())
}
