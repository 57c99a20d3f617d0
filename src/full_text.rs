//! Positional full-text matching.
//!
//! This module merges per-token position lists of a node into combined
//! occurrence records that satisfy phrase-adjacency or co-occurrence
//! predicates, while tracking which query token contributed each position.
//!
//! # Module Structure
//!
//! - `ft_match`: the match record and its read cursor
//! - `cursor`: forward-only cursor state machine
//! - `merge`: two-cursor streaming merge
//! - `group`: per-token position grouping
//! - `scan`: index-scan record input
//! - `evaluate`: predicate folding over candidate nodes
//! - `config`: evaluator configuration
//! - `token`: query-token provenance metadata

pub mod config;
pub mod cursor;
pub mod evaluate;
pub mod ft_match;
pub mod group;
pub mod merge;
pub mod scan;
pub mod token;

/// Identity of an indexed node.
pub type NodeId = u64;

/// Token position within a node.
pub type Position = u32;

pub use config::{EvaluatorConfig, Predicate};
pub use cursor::{CursorState, PositionCursor};
pub use evaluate::{CandidateResult, Evaluator};
pub use ft_match::{FtMatch, MAX_TOKEN_ORDINAL, MatchSource, Pointers};
pub use group::group_by_token;
pub use merge::merge;
pub use scan::{ScanEntry, ScanInput, TokenScan};
pub use token::TokenRef;
