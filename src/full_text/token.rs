//! Query-token provenance metadata carried alongside a match.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A reference to the query token that contributed positions to a match.
///
/// The ordinal is the 1-based position of the token in the query and is the
/// same value stored in a match's pointer array for that token's positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    /// 1-based ordinal of the token in the query.
    pub ordinal: u32,
    /// The token text as it appeared in the query.
    pub text: String,
}

impl TokenRef {
    /// Create a new token reference.
    pub fn new<S: Into<String>>(ordinal: u32, text: S) -> Self {
        TokenRef {
            ordinal,
            text: text.into(),
        }
    }
}

impl fmt::Display for TokenRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.text, self.ordinal)
    }
}
