//! DECLDIFF command-line interface.
//!
//! This is the main entry point for the decldiff CLI tool. It uses clap for
//! argument parsing and wires together the library modules to diff two
//! declaration-tree files.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use decldiff::{
    apply_filters, compare_units, format_report, parse_file, FilterConfig, OutputFormat,
    OutputOptions, Report,
};
use std::path::PathBuf;
use std::process;

/// DECLDIFF - Semantic structural diff for declaration trees
///
/// Compares two versions of a parsed source document and reports added,
/// removed, renamed, retyped, and reordered declarations instead of
/// line-level textual changes.
#[derive(Parser)]
#[command(name = "decldiff")]
#[command(version)]
#[command(about = "Semantic structural diff for declaration trees", long_about = None)]
struct Cli {
    /// Older version of the declaration tree
    #[arg(value_name = "FROM_FILE")]
    from_file: PathBuf,

    /// Newer version of the declaration tree
    #[arg(value_name = "TO_FILE")]
    to_file: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal")]
    format: OutputFormatArg,

    /// Ignore changes inside scopes matching this pattern (repeatable)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Show only changes inside scopes matching this pattern (repeatable)
    #[arg(long, value_name = "PATTERN")]
    only: Vec<String>,

    /// Hide source positions in the output
    #[arg(long)]
    no_positions: bool,

    /// Hide scope paths in the output
    #[arg(long)]
    no_paths: bool,

    /// Verbose output (show parsing progress)
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (only show changes, suppress summary)
    #[arg(short, long)]
    quiet: bool,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.verbose {
        eprintln!("Parsing {}...", cli.from_file.display());
    }

    let from = parse_file(&cli.from_file)
        .with_context(|| format!("Failed to parse from-file: {}", cli.from_file.display()))?;

    if cli.verbose {
        eprintln!("Parsing {}...", cli.to_file.display());
    }

    let to = parse_file(&cli.to_file)
        .with_context(|| format!("Failed to parse to-file: {}", cli.to_file.display()))?;

    if cli.verbose {
        eprintln!("Computing diff...");
    }

    let mut report = Report::new();
    compare_units(&from, &to, &mut report);

    let mut filters = FilterConfig::new();
    for pattern in &cli.ignore {
        filters = filters.ignore(pattern);
    }
    for pattern in &cli.only {
        filters = filters.only(pattern);
    }
    let report = apply_filters(report, &filters);

    if cli.verbose {
        eprintln!("Formatting output...");
    }

    let output_options = OutputOptions {
        show_positions: !cli.no_positions,
        show_paths: !cli.no_paths,
    };

    let output_format: OutputFormat = cli.format.into();
    let output = format_report(&report, &output_format, &output_options)
        .context("Failed to format diff output")?;

    if !cli.quiet {
        println!("{}", output);
    } else {
        for line in output.lines() {
            if !line.starts_with("Summary:") && !line.trim().is_empty() {
                println!("{}", line);
            }
        }
    }

    if report.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_conversion() {
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Terminal),
            OutputFormat::Terminal
        );
        assert_eq!(OutputFormat::from(OutputFormatArg::Json), OutputFormat::Json);
        assert_eq!(
            OutputFormat::from(OutputFormatArg::Plain),
            OutputFormat::Plain
        );
    }
}
