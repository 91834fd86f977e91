//! gn-parse: Parse GN build files and report syntax errors.
//!
//! Usage:
//!   gn-parse [options] [file...]
//!
//! Reads standard input when no file is given. Exits with 0 on a clean
//! parse, 1 when an input or the configuration cannot be loaded, and 2 when
//! any file has syntax errors.

use bumpalo::Bump;
use clap::Parser as ClapParser;
use gn_core::Error;
use gn_diagnostics::Diagnostic;
use gn_options::{parse_options_file, ParseOptions};
use gn_parser::parse_file;
use gn_scanner::TokenInfo;
use miette::{miette, IntoDiagnostic, LabeledSpan, NamedSource, Severity};
use rayon::prelude::*;
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser, Debug)]
#[command(name = "gn-parse", version, about = "Parse GN build files and report syntax errors")]
struct Cli {
    /// GN files to parse. Standard input is read when none are given.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Print each syntax tree as an S-expression.
    #[arg(long)]
    sexp: bool,

    /// Print each file's token stream, trivia included.
    #[arg(long, conflicts_with = "sexp")]
    tokens: bool,

    /// Print only the summary line.
    #[arg(short, long)]
    quiet: bool,

    /// Parse options file (JSON).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum nesting depth; overrides the options file.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    max_depth: Option<u32>,

    /// Raise the log level (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored diagnostic output.
    #[arg(long)]
    no_color: bool,
}

/// What to print for each parsed file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Diagnostics,
    Sexp,
    Tokens,
}

/// One loaded input.
struct Input {
    name: String,
    text: String,
}

/// Everything printed for one file, computed off the main thread.
struct FileReport {
    output: String,
    diagnostics: Vec<Diagnostic>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        let _ = miette::set_hook(Box::new(|_| {
            Box::new(miette::MietteHandlerOpts::new().color(false).build())
        }));
    }

    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(report) => {
            eprintln!("{:?}", report);
            1
        }
    };
    process::exit(exit_code);
}

/// `GN_PARSE_LOG` picks the filter unless `-v` asks for a level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    };
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env("GN_PARSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> miette::Result<i32> {
    let start = Instant::now();
    let options = load_options(cli).into_diagnostic()?;
    let inputs = read_inputs(&cli.files).into_diagnostic()?;

    let mode = if cli.sexp {
        OutputMode::Sexp
    } else if cli.tokens {
        OutputMode::Tokens
    } else {
        OutputMode::Diagnostics
    };
    debug!(files = inputs.len(), ?mode, ?options, "starting parse");

    // One arena per file; reports come back in input order.
    let reports: Vec<FileReport> = inputs
        .par_iter()
        .map(|input| parse_input(input, &options, mode))
        .collect();

    let mut errors = 0;
    let mut warnings = 0;
    for (input, report) in inputs.iter().zip(&reports) {
        if !report.output.is_empty() {
            if inputs.len() > 1 {
                println!(";; {}", input.name);
            }
            println!("{}", report.output);
        }
        for diagnostic in &report.diagnostics {
            if diagnostic.is_error() {
                errors += 1;
            } else {
                warnings += 1;
            }
            if !cli.quiet {
                eprintln!("{:?}", render_diagnostic(diagnostic, input));
            }
        }
    }

    eprintln!(
        "Parsed {} file{}: {} error{}, {} warning{} in {:.2?}.",
        inputs.len(),
        plural(inputs.len()),
        errors,
        plural(errors),
        warnings,
        plural(warnings),
        start.elapsed()
    );

    Ok(if errors > 0 { 2 } else { 0 })
}

/// The options file first, then command-line overrides.
fn load_options(cli: &Cli) -> Result<ParseOptions, gn_options::OptionsError> {
    let mut options = match cli.config {
        Some(ref path) => parse_options_file(path)?,
        None => ParseOptions::default(),
    };
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    if cli.tokens && !options.collect_trivia {
        debug!("--tokens turns trivia collection back on");
        options = options.with_collect_trivia(true);
    }
    Ok(options)
}

fn read_inputs(files: &[PathBuf]) -> gn_core::Result<Vec<Input>> {
    if files.is_empty() {
        let mut bytes = Vec::new();
        let path = PathBuf::from("<stdin>");
        std::io::stdin()
            .read_to_end(&mut bytes)
            .map_err(|source| Error::Io { path: path.clone(), source })?;
        return Ok(vec![decode(&path, &bytes)?]);
    }
    files
        .par_iter()
        .map(|path| {
            let bytes = std::fs::read(path).map_err(|source| Error::Io { path: path.clone(), source })?;
            decode(path, &bytes)
        })
        .collect()
}

fn decode(path: &Path, bytes: &[u8]) -> gn_core::Result<Input> {
    let text = simdutf8::basic::from_utf8(bytes)
        .map_err(|_| Error::InvalidUtf8 { path: path.to_path_buf() })?;
    Ok(Input {
        name: path.display().to_string(),
        text: text.to_owned(),
    })
}

fn parse_input(input: &Input, options: &ParseOptions, mode: OutputMode) -> FileReport {
    let arena = Bump::new();
    let result = parse_file(&arena, &input.name, &input.text, options);
    let file = &result.source_file;
    info!(
        file = %input.name,
        statements = file.statements.len(),
        diagnostics = result.diagnostics.len(),
        "parsed"
    );

    let output = match mode {
        OutputMode::Diagnostics => String::new(),
        OutputMode::Sexp => file.to_sexp(),
        OutputMode::Tokens => {
            let mut out = String::new();
            for token in file.tokens.iter() {
                let info = TokenInfo::from_token(token, file.text);
                let _ = writeln!(out, "{}..{} {:?} {:?}", info.pos, info.end, info.kind, info.text);
            }
            out.truncate(out.trim_end().len());
            out
        }
    };

    FileReport {
        output,
        diagnostics: result.diagnostics.into_diagnostics(),
    }
}

fn render_diagnostic(diagnostic: &Diagnostic, input: &Input) -> miette::Report {
    let severity = if diagnostic.is_error() {
        Severity::Error
    } else {
        Severity::Warning
    };
    let labels: Vec<LabeledSpan> = diagnostic
        .span
        .map(|span| LabeledSpan::underline(span.to_range()))
        .into_iter()
        .collect();
    miette!(
        severity = severity,
        code = diagnostic.code_string(),
        labels = labels,
        "{}",
        diagnostic.message_text
    )
    .with_source_code(NamedSource::new(&input.name, input.text.clone()))
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
