//! Two-cursor streaming merge of full-text matches.
//!
//! [`merge`] combines the matches of two query tokens for the same node. The
//! `window` selects the predicate being verified:
//!
//! - `window == 0`: co-occurrence (AND). Every position of both inputs is kept,
//!   positions shared by both are kept once.
//! - `window > 0`: phrase adjacency. A pair is kept when the position from `b`
//!   lies exactly `window` positions after the one from `a`; both positions of
//!   each such pair are emitted.
//! - `window < 0`: positions are compared but never emitted, except for exact
//!   hits at `d == 0`, and no tail is drained.
//!
//! Failing to match is the common case and is reported as `None`.

use std::cmp::Ordering;

use log::trace;

use crate::full_text::ft_match::{FtMatch, Pointers};
use crate::full_text::token::TokenRef;
use crate::full_text::Position;

/// Output buffers of a merge in progress.
struct MergeOutput {
    positions: Vec<Position>,
    pointers: Option<Pointers>,
}

impl MergeOutput {
    fn new(a: &FtMatch, b: &FtMatch) -> Self {
        let capacity = a.remaining() + b.remaining();
        let pointers = match (a.lead_pointer(), b.lead_pointer()) {
            (Some(lead_a), Some(lead_b)) => {
                Some(Pointers::with_capacity(lead_a.max(lead_b), capacity))
            }
            _ => None,
        };
        MergeOutput {
            positions: Vec::with_capacity(capacity),
            pointers,
        }
    }

    /// Append the position under `m`'s cursor, with its pointer.
    fn emit(&mut self, m: &FtMatch) {
        self.positions.push(m.current());
        if let Some(pointers) = &mut self.pointers {
            pointers.push(m.current_pointer());
        }
    }
}

/// Merge two matches of the same node.
///
/// Both matches are consumed. Returns `None` if the matches belong to
/// different nodes, disagree on negation, either has no position left, or no
/// position satisfies the window.
pub fn merge(mut a: FtMatch, mut b: FtMatch, window: i32) -> Option<FtMatch> {
    if a.is_negated() != b.is_negated() {
        trace!(
            "merge of node {} and {}: negation mismatch",
            a.node_id(),
            b.node_id()
        );
        return None;
    }
    if a.node_id() != b.node_id() {
        return None;
    }

    let mut out = MergeOutput::new(&a, &b);

    let mut more_a = a.has_next();
    let mut more_b = b.has_next();
    if !(more_a && more_b) {
        return None;
    }

    while more_a && more_b {
        let d = a.current() as i64 - b.current() as i64 + window as i64;
        match d.cmp(&0) {
            Ordering::Equal => {
                out.emit(&a);
                if window > 0 {
                    out.emit(&b);
                }
                more_a = a.has_next();
                more_b = b.has_next();
            }
            Ordering::Less => {
                if window == 0 {
                    out.emit(&a);
                }
                more_a = a.has_next();
            }
            Ordering::Greater => {
                if window == 0 {
                    out.emit(&b);
                }
                more_b = b.has_next();
            }
        }
    }

    if window == 0 {
        while more_a {
            out.emit(&a);
            more_a = a.has_next();
        }
        while more_b {
            out.emit(&b);
            more_b = b.has_next();
        }
    }

    let tokens = concat_tokens(a.take_tokens(), b.take_tokens());

    trace!(
        "merge of node {} with window {}: {} positions",
        a.node_id(),
        window,
        out.positions.len()
    );

    if out.positions.is_empty() {
        return None;
    }

    Some(FtMatch::from_merge(
        a.node_id(),
        out.positions,
        out.pointers,
        a.is_negated(),
        tokens,
        window,
    ))
}

fn concat_tokens(a: Option<Vec<TokenRef>>, b: Option<Vec<TokenRef>>) -> Option<Vec<TokenRef>> {
    match (a, b) {
        (None, None) => None,
        (a, b) => {
            let mut tokens = a.unwrap_or_default();
            tokens.extend(b.unwrap_or_default());
            Some(tokens)
        }
    }
}
