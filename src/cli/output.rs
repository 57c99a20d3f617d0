//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{FtMatchArgs, OutputFormat};
use crate::error::Result;
use crate::full_text::{CandidateResult, NodeId};

/// Result structure for predicate evaluation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvalResults {
    pub predicate: String,
    pub candidates: usize,
    pub matches: Vec<CandidateResult>,
    pub duration_ms: u64,
}

/// One candidate node with the number of positions per query token.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub node_id: NodeId,
    pub position_counts: Vec<usize>,
}

/// Result structure for candidate listing.
#[derive(Debug, Serialize, Deserialize)]
pub struct CandidateListing {
    pub tokens: Vec<String>,
    pub candidates: Vec<CandidateSummary>,
}

/// Output evaluation results in the selected format.
pub fn output_eval_results(results: &EvalResults, args: &FtMatchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(results, args),
        OutputFormat::Human => {
            println!("Predicate: {}", results.predicate);
            println!(
                "Matched {} of {} candidates",
                results.matches.len(),
                results.candidates
            );
            for result in &results.matches {
                println!();
                println!("Node {}: positions {:?}", result.node_id, result.positions);
                if let Some(pointers) = &result.pointers {
                    println!("  pointers: {pointers:?}");
                }
                if let Some(groups) = &result.groups {
                    for (index, group) in groups.iter().enumerate() {
                        let label = result
                            .tokens
                            .get(index)
                            .map(String::as_str)
                            .unwrap_or("?");
                        println!("  token {} ({label}): {group:?}", index + 1);
                    }
                }
            }
            if args.verbosity() > 1 {
                println!();
                println!("Evaluation time: {}ms", results.duration_ms);
            }
            Ok(())
        }
    }
}

/// Output a candidate listing in the selected format.
pub fn output_candidate_listing(listing: &CandidateListing, args: &FtMatchArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(listing, args),
        OutputFormat::Human => {
            println!("Tokens: {}", listing.tokens.join(" "));
            for candidate in &listing.candidates {
                println!(
                    "Node {}: {:?}",
                    candidate.node_id, candidate.position_counts
                );
            }
            println!("Total candidates: {}", listing.candidates.len());
            Ok(())
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FtMatchArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
