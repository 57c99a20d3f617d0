//! Grouping of match positions by the query token that produced them.

use crate::error::{FtMatchError, Result};
use crate::full_text::ft_match::{FtMatch, MAX_TOKEN_ORDINAL};
use crate::full_text::Position;

/// Split a match's positions into one bucket per contributing query token.
///
/// Bucket `i` holds the positions whose pointer is `i + 1`, in their original
/// order. The number of buckets is the match's lead pointer value, which may
/// not exceed [`MAX_TOKEN_ORDINAL`]. The match is consumed; grouping always
/// covers every stored position, independent of how far its cursor has been
/// advanced.
pub fn group_by_token(m: FtMatch) -> Result<Vec<Vec<Position>>> {
    let node_id = m.node_id();
    let (_, positions, pointers) = m.into_parts();
    let pointers = pointers.ok_or_else(|| {
        FtMatchError::provenance(format!("node {node_id} has no provenance pointers"))
    })?;

    let lead = pointers.lead();
    if lead > MAX_TOKEN_ORDINAL {
        return Err(FtMatchError::provenance(format!(
            "lead pointer {lead} of node {node_id} exceeds {MAX_TOKEN_ORDINAL}"
        )));
    }
    if let Some((pos, ordinal)) = positions
        .iter()
        .zip(pointers.ordinals())
        .find(|&(_, &ordinal)| ordinal == 0 || ordinal > lead)
    {
        return Err(FtMatchError::provenance(format!(
            "pointer {ordinal} at position {pos} of node {node_id} outside 1..={lead}"
        )));
    }

    let mut groups: Vec<Vec<Position>> = vec![Vec::new(); lead as usize];
    for (&pos, &ordinal) in positions.iter().zip(pointers.ordinals()) {
        groups[ordinal as usize - 1].push(pos);
    }

    Ok(groups)
}
