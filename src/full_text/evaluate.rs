//! Per-candidate evaluation of full-text predicates.
//!
//! The evaluator folds one match per query token through the merge engine,
//! left to right in query order, and stops at the first failed merge. Each
//! candidate node is evaluated independently, so batches can be spread over
//! the rayon thread pool.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FtMatchError, Result};
use crate::full_text::config::EvaluatorConfig;
use crate::full_text::ft_match::{FtMatch, MAX_TOKEN_ORDINAL};
use crate::full_text::group::group_by_token;
use crate::full_text::merge::merge;
use crate::full_text::scan::ScanEntry;
use crate::full_text::token::TokenRef;
use crate::full_text::{NodeId, Position};

/// Outcome of a successful predicate evaluation for one candidate node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateResult {
    /// The matching node.
    pub node_id: NodeId,
    /// Positions of the combined match.
    pub positions: Vec<Position>,
    /// Token ordinals parallel to `positions`.
    pub pointers: Option<Vec<u32>>,
    /// Texts of the contributing query tokens, when known.
    pub tokens: Vec<String>,
    /// Positions per query token, when grouping is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<Vec<Position>>>,
}

/// Evaluates a full-text predicate over candidate nodes.
#[derive(Debug, Clone)]
pub struct Evaluator {
    config: EvaluatorConfig,
    token_texts: Vec<String>,
}

impl Evaluator {
    /// Create a new evaluator.
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Evaluator {
            config,
            token_texts: Vec::new(),
        })
    }

    /// Attach the query token texts, in query order, for provenance reporting.
    pub fn with_token_texts(mut self, token_texts: Vec<String>) -> Self {
        self.token_texts = token_texts;
        self
    }

    /// Get the configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Fold the token matches of one node into a single match.
    ///
    /// Returns `None` for empty input, for a single match without positions,
    /// or as soon as one merge fails.
    pub fn evaluate(&self, matches: Vec<FtMatch>) -> Option<FtMatch> {
        let window = self.config.predicate.window();
        let mut iter = matches.into_iter();
        let mut acc = iter.next()?;
        for next in iter {
            acc = merge(acc, next, window)?;
        }
        (acc.remaining() > 0).then_some(acc)
    }

    /// Build the token matches of one candidate node from its scan entries.
    ///
    /// Entry `i` becomes the match of the query token with ordinal `i + 1`.
    pub fn token_matches(&self, entries: Vec<ScanEntry>) -> Result<Vec<FtMatch>> {
        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let ordinal = u32::try_from(index + 1)
                    .ok()
                    .filter(|&ordinal| ordinal <= MAX_TOKEN_ORDINAL)
                    .ok_or_else(|| {
                        FtMatchError::invalid_argument(format!(
                            "more than {MAX_TOKEN_ORDINAL} query tokens"
                        ))
                    })?;
                let m = FtMatch::from_scan(entry, ordinal).with_negated(self.config.negated);
                Ok(match self.token_texts.get(index) {
                    Some(text) => m.with_tokens(vec![TokenRef::new(ordinal, text.clone())]),
                    None => m,
                })
            })
            .collect()
    }

    /// Evaluate the predicate for one candidate node.
    pub fn evaluate_candidate(&self, entries: Vec<ScanEntry>) -> Result<Option<CandidateResult>> {
        let matches = self.token_matches(entries)?;
        let Some(m) = self.evaluate(matches) else {
            return Ok(None);
        };

        let tokens = m
            .tokens()
            .map(|tokens| tokens.iter().map(|t| t.text.clone()).collect())
            .unwrap_or_default();
        let pointers = m.pointers().map(|p| p.ordinals().to_vec());
        let positions = m.positions().to_vec();
        let node_id = m.node_id();
        let groups = if self.config.collect_groups {
            Some(group_by_token(m)?)
        } else {
            None
        };

        Ok(Some(CandidateResult {
            node_id,
            positions,
            pointers,
            tokens,
            groups,
        }))
    }

    /// Evaluate the predicate for many candidate nodes.
    ///
    /// Results keep the input order and include only matching candidates.
    pub fn evaluate_batch(&self, candidates: Vec<Vec<ScanEntry>>) -> Result<Vec<CandidateResult>> {
        let start = Instant::now();
        let total = candidates.len();
        let parallel = total >= self.config.parallel_threshold;

        let outcomes: Vec<Result<Option<CandidateResult>>> = if parallel {
            candidates
                .into_par_iter()
                .map(|entries| self.evaluate_candidate(entries))
                .collect()
        } else {
            candidates
                .into_iter()
                .map(|entries| self.evaluate_candidate(entries))
                .collect()
        };

        let results = outcomes
            .into_iter()
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "evaluated {} candidates ({}) in {:?}: {} matched",
            total,
            if parallel { "parallel" } else { "inline" },
            start.elapsed(),
            results.len()
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::full_text::config::Predicate;

    fn entries(node_id: NodeId, tokens: &[&[Position]]) -> Vec<ScanEntry> {
        tokens
            .iter()
            .map(|positions| ScanEntry::new(node_id, positions.to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn test_three_token_phrase() {
        let evaluator = Evaluator::new(EvaluatorConfig::new(Predicate::Phrase { gap: 1 })).unwrap();
        let result = evaluator
            .evaluate_candidate(entries(3, &[&[1, 10], &[2, 11], &[12]]))
            .unwrap()
            .unwrap();

        assert_eq!(result.node_id, 3);
        assert_eq!(result.positions, vec![11, 12]);
        assert_eq!(result.pointers, Some(vec![2, 3]));
    }

    #[test]
    fn test_phrase_breaks_on_missing_link() {
        let evaluator = Evaluator::new(EvaluatorConfig::default()).unwrap();
        let result = evaluator
            .evaluate_candidate(entries(3, &[&[1], &[5], &[6]]))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_all_of_with_groups() {
        let config = EvaluatorConfig::new(Predicate::AllOf).with_groups(true);
        let evaluator = Evaluator::new(config)
            .unwrap()
            .with_token_texts(vec!["xml".to_string(), "database".to_string()]);

        let result = evaluator
            .evaluate_candidate(entries(8, &[&[4, 20], &[9]]))
            .unwrap()
            .unwrap();

        assert_eq!(result.positions, vec![4, 9, 20]);
        assert_eq!(result.tokens, vec!["xml", "database"]);
        assert_eq!(result.groups, Some(vec![vec![4, 20], vec![9]]));
    }

    #[test]
    fn test_single_token() {
        let evaluator = Evaluator::new(EvaluatorConfig::default()).unwrap();
        let result = evaluator
            .evaluate_candidate(entries(2, &[&[7]]))
            .unwrap()
            .unwrap();
        assert_eq!(result.positions, vec![7]);

        assert!(evaluator.evaluate_candidate(entries(2, &[&[]])).unwrap().is_none());
        assert!(evaluator.evaluate(Vec::new()).is_none());
    }

    #[test]
    fn test_negated_tokens_still_merge() {
        let config = EvaluatorConfig::new(Predicate::AllOf).with_negated(true);
        let evaluator = Evaluator::new(config).unwrap();
        let matches = evaluator
            .token_matches(entries(2, &[&[1], &[3]]))
            .unwrap();
        let m = evaluator.evaluate(matches).unwrap();
        assert!(m.is_negated());
    }

    #[test]
    fn test_batch_inline_and_parallel_agree() {
        let candidates: Vec<Vec<ScanEntry>> = (0..20)
            .map(|node| {
                let base = node as Position;
                entries(node, &[&[base, base + 5], &[base + 1 + (node as Position % 2)]])
            })
            .collect();

        let inline = Evaluator::new(EvaluatorConfig::default().with_parallel_threshold(1000))
            .unwrap()
            .evaluate_batch(candidates.clone())
            .unwrap();
        let parallel = Evaluator::new(EvaluatorConfig::default().with_parallel_threshold(1))
            .unwrap()
            .evaluate_batch(candidates)
            .unwrap();

        assert_eq!(inline, parallel);
        assert_eq!(inline.len(), 10);
        assert!(inline.iter().all(|r| r.node_id % 2 == 0));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EvaluatorConfig::new(Predicate::Phrase { gap: -2 });
        assert!(Evaluator::new(config).is_err());
    }

    #[test]
    fn test_token_matches_rejects_ordinal_overflow() {
        let evaluator = Evaluator::new(EvaluatorConfig::default()).unwrap();
        let entries =
            vec![ScanEntry::new(1, vec![0]).unwrap(); MAX_TOKEN_ORDINAL as usize + 1];
        assert!(matches!(
            evaluator.token_matches(entries),
            Err(FtMatchError::Other(_))
        ));
    }
}
