use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    /// Exposed safe cell, carrying the number of adjacent hazards.
    Revealed(u8),
    /// Only ever set on hazard cells, all at once, when the game is lost.
    ExposedHazard,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    pub const fn adjacent_count(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
