//! Single-pass, forward-only cursor over a match's positions.
//!
//! The cursor follows an advance-then-read protocol: `advance` must succeed
//! before the slot can be read. It starts in front of the first position and
//! saturates in an explicit exhausted state, so advancing past the end any
//! number of times is harmless.

/// State of a [`PositionCursor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Not yet advanced; nothing can be read.
    Start,
    /// Positioned on the given slot.
    At(usize),
    /// Moved past the last slot.
    Exhausted,
}

/// A forward-only read position into a sequence of `len` slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionCursor {
    state: CursorState,
}

impl PositionCursor {
    /// Create a cursor positioned in front of the first slot.
    pub fn new() -> Self {
        PositionCursor {
            state: CursorState::Start,
        }
    }

    /// Move to the next slot of a sequence with `len` slots.
    ///
    /// Returns `true` if the new slot is within bounds.
    pub fn advance(&mut self, len: usize) -> bool {
        let next = match self.state {
            CursorState::Start => 0,
            CursorState::At(index) => index + 1,
            CursorState::Exhausted => return false,
        };

        if next < len {
            self.state = CursorState::At(next);
            true
        } else {
            self.state = CursorState::Exhausted;
            false
        }
    }

    /// Get the current slot, if the cursor is positioned on one.
    pub fn index(&self) -> Option<usize> {
        match self.state {
            CursorState::At(index) => Some(index),
            _ => None,
        }
    }

    /// Get the cursor state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Check whether the cursor has moved past the last slot.
    pub fn is_exhausted(&self) -> bool {
        self.state == CursorState::Exhausted
    }

    /// Number of slots not yet visited in a sequence with `len` slots.
    ///
    /// The slot the cursor is currently on counts as visited.
    pub fn remaining(&self, len: usize) -> usize {
        match self.state {
            CursorState::Start => len,
            CursorState::At(index) => len.saturating_sub(index + 1),
            CursorState::Exhausted => 0,
        }
    }
}

impl Default for PositionCursor {
    fn default() -> Self {
        Self::new()
    }
}
