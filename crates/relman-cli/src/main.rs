//! # relman CLI entry point
//!
//! Parses command-line arguments, initialises logging and dispatches to the
//! subcommand handlers. Logs go to stderr; stdout carries only the report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use relman_cli::resolve_corpus_root;
use relman_cli::validate::{run_validate, ValidateArgs};

/// relman: release manifest corpus validator.
///
/// Checks `config.yml`, `manifests/` and `notes/` for structural errors and
/// cross-file inconsistencies, and reports every problem found.
#[derive(Parser, Debug)]
#[command(name = "relman", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a release corpus, or a single manifest or notes file.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    tracing::debug!("relman CLI v{} starting", env!("CARGO_PKG_VERSION"));

    // Walk up from CWD looking for `config.yml` next to `manifests/`.
    let corpus_root = resolve_corpus_root().unwrap_or_else(|| {
        tracing::debug!("no corpus root above current directory; using current directory");
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &corpus_root),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn init_tracing(verbose: u8, json: bool) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relman_cli::validate::OutputFormat;

    #[test]
    fn parse_validate_defaults() {
        let cli = Cli::try_parse_from(["relman", "validate"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(!cli.log_json);
        let Commands::Validate(args) = cli.command;
        assert!(args.root.is_none());
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.as_of.is_none());
        assert!(args.path.is_none());
    }

    #[test]
    fn parse_validate_all_options() {
        let cli = Cli::try_parse_from([
            "relman",
            "-vv",
            "validate",
            "--root",
            "/srv/corpus",
            "--format",
            "json",
            "--as-of",
            "2026-06-01T00:00:00Z",
            "manifests/pos--live.yml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Validate(args) = cli.command;
        assert_eq!(args.root, Some(PathBuf::from("/srv/corpus")));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.as_of.as_deref(), Some("2026-06-01T00:00:00Z"));
        assert_eq!(args.path, Some(PathBuf::from("manifests/pos--live.yml")));
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["relman", "validate", "-vvv", "--log-json"]).unwrap();
        assert_eq!(cli.verbose, 3);
        assert!(cli.log_json);
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["relman", "validate", "--format", "xml"]).is_err());
    }

    #[test]
    fn requires_subcommand() {
        assert!(Cli::try_parse_from(["relman"]).is_err());
    }
}
