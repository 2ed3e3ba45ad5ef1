use serde::{Deserialize, Serialize};

use crate::PieceKind;

/// The hold slot with its once-per-piece lockout.
///
/// `used` is set by a successful [`swap`](Self::swap) and cleared only by
/// [`reset_turn`](Self::reset_turn), which the session calls when a locked
/// piece is replaced through the normal lock cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldSlot {
    held: Option<PieceKind>,
    used: bool,
}

impl HoldSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn held(&self) -> Option<PieceKind> {
        self.held
    }

    #[must_use]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Stores `current` and returns the previously held piece.
    ///
    /// Returns `None` (and stores nothing) if the slot was already used this
    /// turn; returns `Some(None)` when the slot was empty, in which case the
    /// caller draws from the piece supply instead.
    #[must_use]
    pub fn swap(&mut self, current: PieceKind) -> Option<Option<PieceKind>> {
        if self.used {
            return None;
        }
        self.used = true;
        Some(self.held.replace(current))
    }

    pub fn reset_turn(&mut self) {
        self.used = false;
    }
}
