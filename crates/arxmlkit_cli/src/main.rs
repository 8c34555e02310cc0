//! # arxml2xlsx
//!
//! Flatten an AUTOSAR ARXML file into an Excel workbook, one sheet per
//! top-level `AR-PACKAGE`.
//!
//! ## Usage
//!
//! ```bash
//! # Write Signals.xlsx next to the input file
//! arxml2xlsx path/to/Signals.arxml -o Signals.xlsx
//!
//! # Refuse to replace an existing workbook
//! arxml2xlsx path/to/Signals.arxml -o /tmp/out.xlsx --no-overwrite
//!
//! # Prompt for both paths
//! arxml2xlsx
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use arxmlkit_arxml::{ReportConvert, SpecConvertOptions, convert_arxml_to_xlsx, resolve_output_path};
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("arxml2xlsx")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Flatten an AUTOSAR ARXML file into an XLSX workbook, one sheet per package")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("ARXML file to convert (prompted for when omitted)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output workbook; relative paths are placed next to INPUT (prompted for when omitted)"),
        )
        .arg(
            Arg::new("no-overwrite")
                .long("no-overwrite")
                .action(ArgAction::SetTrue)
                .help("Fail instead of replacing an existing output file"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only print warnings and errors"),
        )
}

/// Print `label` and read one trimmed, non-empty line from stdin.
fn prompt_line(label: &str) -> Result<String, anyhow::Error> {
    print!("{label}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut c_line = String::new();
    let n_read = io::stdin()
        .lock()
        .read_line(&mut c_line)
        .context("Failed to read from stdin")?;
    let c_value = c_line.trim();
    if n_read == 0 || c_value.is_empty() {
        return Err(anyhow!("No value given for: {}", label.trim_end_matches([':', ' '])));
    }
    Ok(c_value.to_string())
}

fn resolve_paths(matches: &ArgMatches) -> Result<(PathBuf, PathBuf), anyhow::Error> {
    let path_file_in = match matches.get_one::<String>("input") {
        Some(c_input) => PathBuf::from(c_input),
        None => PathBuf::from(prompt_line("ARXML input file: ")?),
    };
    let path_file_out = match matches.get_one::<String>("output") {
        Some(c_output) => PathBuf::from(c_output),
        None => PathBuf::from(prompt_line("Output XLSX file name: ")?),
    };
    let path_file_out = resolve_output_path(&path_file_in, &path_file_out);
    Ok((path_file_in, path_file_out))
}

fn print_report(report: &ReportConvert, if_quiet: bool) {
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }
    if if_quiet {
        return;
    }
    for summary in &report.tables {
        println!(
            "Sheet '{}' written: {} rows, {} columns.",
            summary.table_name, summary.n_rows, summary.n_cols
        );
    }
    println!("{report}");
    if let Some(path_file_out) = &report.file_out {
        println!("Saved workbook to {}", path_file_out.display());
    }
}

fn run(matches: &ArgMatches) -> Result<(), anyhow::Error> {
    let (path_file_in, path_file_out) = resolve_paths(matches)?;
    let options = SpecConvertOptions {
        if_overwrite: !matches.get_flag("no-overwrite"),
        ..Default::default()
    };

    let report = convert_arxml_to_xlsx(&path_file_in, &path_file_out, &options)
        .with_context(|| format!("Failed to convert {}", path_file_in.display()))?;
    print_report(&report, matches.get_flag("quiet"));
    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
