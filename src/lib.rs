//! # ftmatch
//!
//! The positional full-text match engine of an XML document database.
//!
//! ## Features
//!
//! - Streaming two-cursor merge of per-token position lists
//! - Phrase adjacency with configurable gaps and co-occurrence (AND) matching
//! - Provenance tracking of the query token behind every position
//! - Negation-aware merge eligibility
//! - Per-token position grouping for highlighting
//! - Batch evaluation of candidate nodes on a thread pool

pub mod cli;
pub mod error;
pub mod full_text;

pub mod prelude {
    pub use crate::error::{FtMatchError, Result};
    pub use crate::full_text::{
        CandidateResult, Evaluator, EvaluatorConfig, FtMatch, MAX_TOKEN_ORDINAL, NodeId, Pointers,
        Position, Predicate, ScanEntry, ScanInput, TokenRef, group_by_token, merge,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
