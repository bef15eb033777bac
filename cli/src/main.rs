mod output;
mod signature_file;

use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use sigparse::{Arguments, BoundParser, DocstringStyle, InvocationError};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output::{CheckReport, OutputFormat, ValueFormat, format_arguments, format_reports};
use crate::signature_file::SignatureFile;

#[derive(Debug, Parser)]
#[command(name = "sigparse", version)]
#[command(about = "Derive command-line parsers from declared signatures")]
#[command(disable_help_subcommand = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). SIGPARSE_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse tokens against a signature file and print the resulting arguments.
    Run(RunArgs),
    /// Print the help text generated for a signature file.
    Help(FileArgs),
    /// Print the usage line generated for a signature file.
    Usage(FileArgs),
    /// Compile signature files and summarize their arguments.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Signature file (.yaml, .yml or .json).
    file: PathBuf,
    /// Tokens handed to the generated parser (after `--`).
    #[arg(last = true)]
    tokens: Vec<String>,
    /// Output format for the parsed arguments.
    #[arg(long, default_value = "json")]
    format: ValueFormat,
    /// Docstring dialect, overriding the file's `docstring_style`.
    #[arg(long)]
    docstring_style: Option<DocstringStyle>,
}

#[derive(Debug, Args)]
struct FileArgs {
    /// Signature file (.yaml, .yml or .json).
    file: PathBuf,
    /// Docstring dialect, overriding the file's `docstring_style`.
    #[arg(long)]
    docstring_style: Option<DocstringStyle>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Signature files to compile.
    #[arg(required = true)]
    files: Vec<PathBuf>,
    /// Output format for the summary.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Run(args) => run_run(args),
        Command::Help(args) => run_help(args),
        Command::Usage(args) => run_usage(args),
        Command::Check(args) => run_check(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("SIGPARSE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn compile_file(
    path: &Path,
    docstring_style: Option<DocstringStyle>,
) -> Result<BoundParser<Arguments>, String> {
    let mut file = SignatureFile::load(path).map_err(|e| e.to_string())?;
    if docstring_style.is_some() {
        file.docstring_style = docstring_style;
    }
    file.compile().map_err(|e| e.to_string())
}

fn run_run(args: RunArgs) -> Result<(), String> {
    let parser = compile_file(&args.file, args.docstring_style)?;
    debug!(file = %args.file.display(), tokens = args.tokens.len(), "running parser");

    let arguments = match parser.parse(&args.tokens) {
        Ok(arguments) => arguments,
        // clap renders its own diagnostic (exit 2) or the help text (exit 0).
        Err(InvocationError::Parse(err)) => err.exit(),
        Err(err) => return Err(err.to_string()),
    };

    let rendered = format_arguments(&arguments, args.format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}

fn run_help(args: FileArgs) -> Result<(), String> {
    let parser = compile_file(&args.file, args.docstring_style)?;
    print!("{}", parser.format_help());
    Ok(())
}

fn run_usage(args: FileArgs) -> Result<(), String> {
    let parser = compile_file(&args.file, args.docstring_style)?;
    parser
        .print_usage()
        .map_err(|err| format!("Failed to write usage: {err}"))
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        reports.push(check_file(path));
    }

    let rendered = format_reports(&reports, args.format)?;
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }

    let failed = reports.iter().filter(|report| !report.ok).count();
    if failed > 0 {
        return Err(format!(
            "{failed} of {} signature file(s) failed to compile",
            reports.len()
        ));
    }
    Ok(())
}

fn check_file(path: &Path) -> CheckReport {
    let file = path.display().to_string();
    let loaded = match SignatureFile::load(path) {
        Ok(loaded) => loaded,
        Err(err) => {
            return CheckReport {
                file,
                command: None,
                ok: false,
                error: Some(err.to_string()),
                arguments: Vec::new(),
            };
        }
    };

    let command = Some(loaded.name.clone());
    match loaded.compile() {
        Ok(parser) => CheckReport {
            file,
            command,
            ok: true,
            error: None,
            arguments: parser.declarations().to_vec(),
        },
        Err(err) => CheckReport {
            file,
            command,
            ok: false,
            error: Some(err.to_string()),
            arguments: Vec::new(),
        },
    }
}
