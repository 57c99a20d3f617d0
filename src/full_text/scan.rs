//! Index-scan records: the input contract of the match engine.
//!
//! The index scan hands over one record per query token and candidate node,
//! shaped as `[node_id, pos_1, pos_2, ..., pos_k]` with strictly ascending
//! positions. [`ScanEntry`] is the validated, typed form of such a record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FtMatchError, Result};
use crate::full_text::{NodeId, Position};

/// One validated index-scan record for a single query token and node.
///
/// Serializes as the raw `[node_id, pos_1, ..., pos_k]` record; deserializing
/// goes through the same validation as [`ScanEntry::from_record`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u64>", into = "Vec<u64>")]
pub struct ScanEntry {
    node_id: NodeId,
    positions: Vec<Position>,
}

impl ScanEntry {
    /// Create a scan entry, checking that positions are strictly ascending.
    pub fn new(node_id: NodeId, positions: Vec<Position>) -> Result<Self> {
        if let Some(window) = positions.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FtMatchError::invalid_record(format!(
                "positions of node {node_id} not strictly ascending: {} followed by {}",
                window[0], window[1]
            )));
        }
        Ok(ScanEntry { node_id, positions })
    }

    /// Parse a raw `[node_id, pos_1, ..., pos_k]` record.
    pub fn from_record(record: &[u64]) -> Result<Self> {
        let (&node_id, rest) = record
            .split_first()
            .ok_or_else(|| FtMatchError::invalid_record("record is empty"))?;

        let positions = rest
            .iter()
            .map(|&pos| {
                Position::try_from(pos).map_err(|_| {
                    FtMatchError::invalid_record(format!(
                        "position {pos} of node {node_id} out of range"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(node_id, positions)
    }

    /// Convert back into the raw record form.
    pub fn to_record(&self) -> Vec<u64> {
        let mut record = Vec::with_capacity(self.positions.len() + 1);
        record.push(self.node_id);
        record.extend(self.positions.iter().map(|&pos| pos as u64));
        record
    }

    /// Get the node the positions belong to.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Get the positions, strictly ascending.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Take the positions out of the entry.
    pub fn into_positions(self) -> Vec<Position> {
        self.positions
    }

    /// Number of positions in this entry.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Check whether the entry carries no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl TryFrom<Vec<u64>> for ScanEntry {
    type Error = FtMatchError;

    fn try_from(record: Vec<u64>) -> Result<Self> {
        ScanEntry::from_record(&record)
    }
}

impl From<ScanEntry> for Vec<u64> {
    fn from(entry: ScanEntry) -> Self {
        entry.to_record()
    }
}

/// Scan results for one query token across all nodes it occurs in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenScan {
    /// The token text.
    pub text: String,
    /// Raw `[node_id, pos...]` records, one per node.
    pub records: Vec<Vec<u64>>,
}

/// Scan input for a whole query: one [`TokenScan`] per query token, in query order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanInput {
    /// Token scans in query order.
    pub tokens: Vec<TokenScan>,
}

impl ScanInput {
    /// Load scan input from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the token texts in query order.
    pub fn token_texts(&self) -> Vec<String> {
        self.tokens.iter().map(|t| t.text.clone()).collect()
    }

    /// Group the records by candidate node.
    ///
    /// A candidate node is a node id that occurs in the records of every token.
    /// Candidates come back in ascending node order, each with one entry per
    /// token in query order.
    pub fn candidates(&self) -> Result<Vec<Vec<ScanEntry>>> {
        if self.tokens.is_empty() {
            return Ok(Vec::new());
        }

        let token_count = self.tokens.len();
        let mut by_node: BTreeMap<NodeId, Vec<Option<ScanEntry>>> = BTreeMap::new();

        for (index, token) in self.tokens.iter().enumerate() {
            for record in &token.records {
                let entry = ScanEntry::from_record(record)?;
                let slots = by_node
                    .entry(entry.node_id)
                    .or_insert_with(|| vec![None; token_count]);
                if slots[index].is_some() {
                    return Err(FtMatchError::invalid_record(format!(
                        "token '{}' has more than one record for node {}",
                        token.text, entry.node_id
                    )));
                }
                slots[index] = Some(entry);
            }
        }

        Ok(by_node
            .into_values()
            .filter_map(|slots| slots.into_iter().collect::<Option<Vec<_>>>())
            .collect())
    }
}
