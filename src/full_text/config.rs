//! Configuration for full-text predicate evaluation.

use serde::{Deserialize, Serialize};

use crate::error::{FtMatchError, Result};

/// The full-text predicate verified for each candidate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Predicate {
    /// Tokens occur in query order, each `gap` positions after the previous one.
    Phrase { gap: i32 },

    /// All tokens occur in the node, in any order.
    AllOf,
}

impl Predicate {
    /// Window passed to the merge engine for each consecutive token pair.
    pub fn window(&self) -> i32 {
        match self {
            Predicate::Phrase { gap } => *gap,
            Predicate::AllOf => 0,
        }
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Predicate::Phrase { gap: 1 }
    }
}

/// Configuration for the [`Evaluator`](crate::full_text::evaluate::Evaluator).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Predicate to verify.
    pub predicate: Predicate,

    /// Whether to compute per-token position groups for successful candidates.
    pub collect_groups: bool,

    /// Minimum number of candidates before a batch is evaluated on the
    /// rayon thread pool instead of inline.
    pub parallel_threshold: usize,

    /// Whether the token matches belong to a negated sub-expression.
    pub negated: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            predicate: Predicate::default(),
            collect_groups: false,
            parallel_threshold: 64,
            negated: false,
        }
    }
}

impl EvaluatorConfig {
    /// Create a configuration for the given predicate.
    pub fn new(predicate: Predicate) -> Self {
        Self {
            predicate,
            ..Default::default()
        }
    }

    /// Enable or disable per-token grouping.
    pub fn with_groups(mut self, collect_groups: bool) -> Self {
        self.collect_groups = collect_groups;
        self
    }

    /// Set the parallel batch threshold.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Mark token matches as negated.
    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    /// Check the configuration for values the evaluator cannot use.
    pub fn validate(&self) -> Result<()> {
        if let Predicate::Phrase { gap } = self.predicate
            && gap < 0
        {
            return Err(FtMatchError::invalid_config(format!(
                "phrase gap must not be negative, got {gap}"
            )));
        }
        if self.parallel_threshold == 0 {
            return Err(FtMatchError::invalid_config(
                "parallel_threshold must be at least 1",
            ));
        }
        Ok(())
    }
}
