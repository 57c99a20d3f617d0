//! Command implementations for the ftmatch CLI.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::full_text::{Evaluator, EvaluatorConfig, ScanInput};

/// Execute a CLI command.
pub fn execute_command(args: FtMatchArgs) -> Result<()> {
    match &args.command {
        Command::Eval(eval_args) => eval_predicate(eval_args.clone(), &args),
        Command::Candidates(candidates_args) => list_candidates(candidates_args.clone(), &args),
    }
}

/// Read scan input from a JSON file.
///
/// I/O failures carry the offending path.
pub fn load_scan_input(path: &Path) -> Result<ScanInput> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scan input {}", path.display()))?;
    ScanInput::from_json(&content)
}

/// Evaluate the predicate for all candidates of a scan input.
pub fn run_eval(input: &ScanInput, args: &EvalArgs) -> Result<EvalResults> {
    let start = Instant::now();

    let config = EvaluatorConfig::new(args.predicate())
        .with_groups(args.groups)
        .with_negated(args.negated)
        .with_parallel_threshold(args.parallel_threshold);
    let evaluator = Evaluator::new(config)?.with_token_texts(input.token_texts());

    let candidates = input.candidates()?;
    let candidate_count = candidates.len();
    let matches = evaluator.evaluate_batch(candidates)?;

    Ok(EvalResults {
        predicate: format!("{:?}", args.predicate()),
        candidates: candidate_count,
        matches,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Summarize the candidate nodes of a scan input.
pub fn run_candidates(input: &ScanInput) -> Result<CandidateListing> {
    let candidates = input
        .candidates()?
        .into_iter()
        .filter_map(|entries| {
            let node_id = entries.first()?.node_id();
            Some(CandidateSummary {
                node_id,
                position_counts: entries.iter().map(|e| e.len()).collect(),
            })
        })
        .collect();

    Ok(CandidateListing {
        tokens: input.token_texts(),
        candidates,
    })
}

/// Evaluate a predicate over a scan input file.
fn eval_predicate(args: EvalArgs, cli_args: &FtMatchArgs) -> Result<()> {
    info!("Loading scan input from: {}", args.input.display());
    let input = load_scan_input(&args.input)?;

    let results = run_eval(&input, &args)?;
    info!(
        "{} of {} candidates matched",
        results.matches.len(),
        results.candidates
    );

    output_eval_results(&results, cli_args)
}

/// List candidate nodes of a scan input file.
fn list_candidates(args: CandidatesArgs, cli_args: &FtMatchArgs) -> Result<()> {
    info!("Loading scan input from: {}", args.input.display());
    let input = load_scan_input(&args.input)?;

    let listing = run_candidates(&input)?;
    output_candidate_listing(&listing, cli_args)
}
