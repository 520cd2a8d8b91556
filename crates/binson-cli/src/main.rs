/// Binson command-line tool — inspect and validate Binson binary
/// documents without writing custom decoding code.
///
/// # Command overview
///
/// ```text
/// binson <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print a human-readable tree of a Binson file
///   validate   Check a Binson file for structural correctness
///   help       Print help information
///
/// Global options:
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid file, etc.) |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The Binson command-line tool.
#[derive(Parser)]
#[command(name = "binson", version, about = "Binson binary document CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print a human-readable tree of every item in a Binson file.
    Inspect(InspectArgs),
    /// Check a Binson file for structural correctness.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `binson inspect`.
///
/// Streams through the file with the cursor decoder and prints an
/// indented tree of fields and values. Strings and byte blobs longer
/// than the truncation limit are elided with a length note, so the
/// output stays readable for documents carrying large payloads.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the Binson file to inspect.
    pub file: PathBuf,

    /// Truncate String and Bytes values to this many characters/bytes.
    #[arg(long, default_value_t = 64)]
    pub truncate: usize,
}

/// Arguments for `binson validate`.
///
/// Performs a full structural walk of the document and reports either a
/// set of success checkmarks or a diagnostic error. The process exits
/// with code 0 on success and code 1 on any structural problem.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the Binson file to validate.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
