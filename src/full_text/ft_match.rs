//! Full-text match records.
//!
//! An [`FtMatch`] is the accumulated occurrence state of one node for one or
//! more query tokens: the node id, the positions at which the tokens occur,
//! a parallel array of provenance pointers naming the token behind each
//! position, and a forward-only read cursor.

use std::fmt;

use crate::error::{FtMatchError, Result};
use crate::full_text::cursor::PositionCursor;
use crate::full_text::scan::ScanEntry;
use crate::full_text::token::TokenRef;
use crate::full_text::{NodeId, Position};

/// Largest query-token ordinal a pointer may carry.
pub const MAX_TOKEN_ORDINAL: u32 = u16::MAX as u32;

/// Provenance pointers parallel to a match's positions.
///
/// `lead` is the number of distinct query tokens that contributed to the
/// match so far. Each entry of `ordinals` is the 1-based ordinal of the
/// token that produced the position at the same index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pointers {
    lead: u32,
    ordinals: Vec<u32>,
}

impl Pointers {
    /// Create pointers from a lead value and explicit ordinals.
    pub fn new(lead: u32, ordinals: Vec<u32>) -> Self {
        Pointers { lead, ordinals }
    }

    /// Pointers for `len` positions that all come from the same token.
    pub fn uniform(token_ordinal: u32, len: usize) -> Self {
        Pointers {
            lead: token_ordinal,
            ordinals: vec![token_ordinal; len],
        }
    }

    /// Create an empty pointer array with room for `capacity` ordinals.
    pub(crate) fn with_capacity(lead: u32, capacity: usize) -> Self {
        Pointers {
            lead,
            ordinals: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, ordinal: u32) {
        self.ordinals.push(ordinal);
    }

    /// The leading value: number of contributing tokens.
    pub fn lead(&self) -> u32 {
        self.lead
    }

    /// The ordinals, parallel to the positions.
    pub fn ordinals(&self) -> &[u32] {
        &self.ordinals
    }

    /// Number of ordinals.
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    /// Check whether there are no ordinals.
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// Raw form with the lead value in front: `[lead, ord_1, ..., ord_k]`.
    pub fn to_record(&self) -> Vec<u32> {
        let mut record = Vec::with_capacity(self.ordinals.len() + 1);
        record.push(self.lead);
        record.extend_from_slice(&self.ordinals);
        record
    }
}

/// How a match was constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// A node id without positions.
    Empty,
    /// A single scan record; every position carries `token_ordinal`.
    FromScan { token_ordinal: u32 },
    /// A scan record with a precomputed pointer array.
    Precomputed,
    /// A scan record without provenance tracking.
    Untracked,
    /// The output of a merge with the given window.
    FromMerge { window: i32 },
}

/// One node's full-text occurrence state.
#[derive(Debug, Clone)]
pub struct FtMatch {
    node_id: NodeId,
    positions: Vec<Position>,
    pointers: Option<Pointers>,
    negated: bool,
    cursor: PositionCursor,
    tokens: Option<Vec<TokenRef>>,
    source: MatchSource,
}

impl FtMatch {
    /// Create a match for a node without any positions.
    pub fn empty(node_id: NodeId) -> Self {
        FtMatch {
            node_id,
            positions: Vec::new(),
            pointers: None,
            negated: false,
            cursor: PositionCursor::new(),
            tokens: None,
            source: MatchSource::Empty,
        }
    }

    /// Create a match from a single-token scan entry.
    ///
    /// Every position is attributed to `token_ordinal`, which also becomes
    /// the lead pointer value.
    pub fn from_scan(entry: ScanEntry, token_ordinal: u32) -> Self {
        let pointers = Pointers::uniform(token_ordinal, entry.len());
        FtMatch {
            node_id: entry.node_id(),
            positions: entry.into_positions(),
            pointers: Some(pointers),
            negated: false,
            cursor: PositionCursor::new(),
            tokens: None,
            source: MatchSource::FromScan { token_ordinal },
        }
    }

    /// Create a match from a scan entry and a precomputed pointer array.
    ///
    /// Fails if the pointer array is not parallel to the positions, if the
    /// lead exceeds [`MAX_TOKEN_ORDINAL`], or if an ordinal lies outside
    /// `1..=lead`.
    pub fn with_pointers(entry: ScanEntry, pointers: Pointers) -> Result<Self> {
        if pointers.len() != entry.len() {
            return Err(FtMatchError::pointer_length(entry.len(), pointers.len()));
        }
        let lead = pointers.lead();
        if lead > MAX_TOKEN_ORDINAL {
            return Err(FtMatchError::provenance(format!(
                "lead pointer {lead} of node {} exceeds {MAX_TOKEN_ORDINAL}",
                entry.node_id()
            )));
        }
        if let Some(ordinal) = pointers.ordinals().iter().find(|&&o| o == 0 || o > lead) {
            return Err(FtMatchError::provenance(format!(
                "pointer {ordinal} of node {} outside 1..={lead}",
                entry.node_id()
            )));
        }
        Ok(FtMatch {
            node_id: entry.node_id(),
            positions: entry.into_positions(),
            pointers: Some(pointers),
            negated: false,
            cursor: PositionCursor::new(),
            tokens: None,
            source: MatchSource::Precomputed,
        })
    }

    /// Create a match from a scan entry without provenance pointers.
    pub fn untracked(entry: ScanEntry) -> Self {
        FtMatch {
            node_id: entry.node_id(),
            positions: entry.into_positions(),
            pointers: None,
            negated: false,
            cursor: PositionCursor::new(),
            tokens: None,
            source: MatchSource::Untracked,
        }
    }

    pub(crate) fn from_merge(
        node_id: NodeId,
        positions: Vec<Position>,
        pointers: Option<Pointers>,
        negated: bool,
        tokens: Option<Vec<TokenRef>>,
        window: i32,
    ) -> Self {
        debug_assert!(pointers.as_ref().is_none_or(|p| p.len() == positions.len()));
        FtMatch {
            node_id,
            positions,
            pointers,
            negated,
            cursor: PositionCursor::new(),
            tokens,
            source: MatchSource::FromMerge { window },
        }
    }

    /// Mark this match as belonging to a negated sub-expression.
    pub fn with_negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    /// Attach the query tokens this match was built from.
    pub fn with_tokens(mut self, tokens: Vec<TokenRef>) -> Self {
        self.tokens = Some(tokens);
        self
    }

    /// Get the node id.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Get all stored positions, regardless of the cursor.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Get the provenance pointers, if tracked.
    pub fn pointers(&self) -> Option<&Pointers> {
        self.pointers.as_ref()
    }

    /// Get the lead pointer value, if pointers are tracked.
    pub fn lead_pointer(&self) -> Option<u32> {
        self.pointers.as_ref().map(Pointers::lead)
    }

    /// Number of query tokens that contributed to this match.
    ///
    /// Zero when provenance is not tracked.
    pub fn num_tokens(&self) -> u32 {
        self.lead_pointer().unwrap_or(0)
    }

    /// Check whether this match belongs to a negated sub-expression.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Get the contributing query tokens, if attached.
    pub fn tokens(&self) -> Option<&[TokenRef]> {
        self.tokens.as_deref()
    }

    pub(crate) fn take_tokens(&mut self) -> Option<Vec<TokenRef>> {
        self.tokens.take()
    }

    /// Get how this match was constructed.
    pub fn source(&self) -> MatchSource {
        self.source
    }

    /// Number of stored positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check whether this match stores no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Advance the cursor and report whether it landed on a position.
    ///
    /// Keeps returning `false` once the positions are exhausted.
    pub fn has_next(&mut self) -> bool {
        self.cursor.advance(self.positions.len())
    }

    /// Number of positions the cursor has not reached yet.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining(self.positions.len())
    }

    /// Get the position under the cursor, if it is on one.
    pub fn try_current(&self) -> Option<Position> {
        self.cursor.index().map(|i| self.positions[i])
    }

    /// Get the position under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if called before a successful [`has_next`](Self::has_next) or
    /// after the cursor is exhausted.
    pub fn current(&self) -> Position {
        match self.try_current() {
            Some(pos) => pos,
            None => panic!(
                "FtMatch::current() on node {} without a position under the cursor",
                self.node_id
            ),
        }
    }

    /// Get the pointer parallel to the current position, if available.
    pub fn try_current_pointer(&self) -> Option<u32> {
        let index = self.cursor.index()?;
        self.pointers.as_ref().map(|p| p.ordinals[index])
    }

    /// Get the pointer parallel to the current position.
    ///
    /// # Panics
    ///
    /// Panics if pointers are not tracked or the cursor is not on a position.
    pub fn current_pointer(&self) -> u32 {
        match self.try_current_pointer() {
            Some(ordinal) => ordinal,
            None => panic!(
                "FtMatch::current_pointer() on node {} without pointers or cursor position",
                self.node_id
            ),
        }
    }

    /// Raw form of the match: `[node_id, pos_1, ..., pos_k]`.
    pub fn to_record(&self) -> Vec<u64> {
        let mut record = Vec::with_capacity(self.positions.len() + 1);
        record.push(self.node_id);
        record.extend(self.positions.iter().map(|&pos| pos as u64));
        record
    }

    /// Split the match into its node id, positions and pointers.
    pub fn into_parts(self) -> (NodeId, Vec<Position>, Option<Pointers>) {
        (self.node_id, self.positions, self.pointers)
    }
}

impl fmt::Display for FtMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FtMatch [node={}; pos={:?}; poi=", self.node_id, self.positions)?;
        match &self.pointers {
            Some(pointers) => write!(f, "{:?}]", pointers.to_record()),
            None => write!(f, "-]"),
        }
    }
}
