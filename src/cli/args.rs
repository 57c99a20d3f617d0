//! Command line argument parsing for the ftmatch CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::full_text::Predicate;

/// ftmatch - inspect positional full-text matching over index-scan records
#[derive(Parser, Debug, Clone)]
#[command(name = "ftmatch")]
#[command(about = "Evaluate phrase and co-occurrence predicates over index-scan records")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FtMatchArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FtMatchArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Evaluate a predicate for every candidate node
    Eval(EvalArgs),

    /// List candidate nodes and their per-token position counts
    Candidates(CandidatesArgs),
}

/// Arguments for evaluating a predicate
#[derive(Args, Debug, Clone)]
pub struct EvalArgs {
    /// JSON file with scan records per query token
    #[arg(short, long)]
    pub input: PathBuf,

    /// Predicate to evaluate
    #[arg(short, long, default_value = "phrase")]
    pub mode: EvalMode,

    /// Distance between consecutive phrase tokens
    #[arg(short, long, default_value_t = 1)]
    pub gap: i32,

    /// Report positions grouped per query token
    #[arg(long)]
    pub groups: bool,

    /// Treat the tokens as a negated sub-expression
    #[arg(long)]
    pub negated: bool,

    /// Minimum candidate count for parallel evaluation
    #[arg(long, default_value_t = 64)]
    pub parallel_threshold: usize,
}

impl EvalArgs {
    /// Predicate selected by the mode and gap arguments.
    pub fn predicate(&self) -> Predicate {
        match self.mode {
            EvalMode::Phrase => Predicate::Phrase { gap: self.gap },
            EvalMode::AllOf => Predicate::AllOf,
        }
    }
}

/// Arguments for listing candidates
#[derive(Args, Debug, Clone)]
pub struct CandidatesArgs {
    /// JSON file with scan records per query token
    #[arg(short, long)]
    pub input: PathBuf,
}

/// Predicate modes
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    /// Tokens adjacent in query order
    Phrase,
    /// All tokens anywhere in the node
    AllOf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eval_command() {
        let args = FtMatchArgs::try_parse_from([
            "ftmatch",
            "eval",
            "--input",
            "scan.json",
            "--mode",
            "all-of",
            "--groups",
        ])
        .unwrap();

        if let Command::Eval(eval_args) = args.command {
            assert_eq!(eval_args.input, PathBuf::from("scan.json"));
            assert_eq!(eval_args.mode, EvalMode::AllOf);
            assert_eq!(eval_args.predicate(), Predicate::AllOf);
            assert!(eval_args.groups);
            assert!(!eval_args.negated);
        } else {
            panic!("Expected Eval command");
        }
    }

    #[test]
    fn test_eval_phrase_gap() {
        let args =
            FtMatchArgs::try_parse_from(["ftmatch", "eval", "-i", "scan.json", "--gap", "2"])
                .unwrap();

        if let Command::Eval(eval_args) = args.command {
            assert_eq!(eval_args.predicate(), Predicate::Phrase { gap: 2 });
            assert_eq!(eval_args.parallel_threshold, 64);
        } else {
            panic!("Expected Eval command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = FtMatchArgs::try_parse_from(["ftmatch", "candidates", "-i", "a.json"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        // Multiple verbose flags
        let args =
            FtMatchArgs::try_parse_from(["ftmatch", "-vv", "candidates", "-i", "a.json"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        // Quiet flag
        let args =
            FtMatchArgs::try_parse_from(["ftmatch", "--quiet", "candidates", "-i", "a.json"])
                .unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args = FtMatchArgs::try_parse_from([
            "ftmatch", "--format", "json", "candidates", "-i", "a.json",
        ])
        .unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
