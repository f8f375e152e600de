#![no_std]

extern crate alloc;

use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use geometry::*;
pub use outcome::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod geometry;
mod outcome;
mod reveal;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: Coord,
    pub hazards: CellCount,
}

impl GameConfig {
    pub const DEFAULT: Self = Self::new_unchecked(10, 15);

    pub const fn new_unchecked(grid_size: Coord, hazards: CellCount) -> Self {
        Self { grid_size, hazards }
    }

    /// Clamps the grid to at least one cell and the hazards to at most one per cell.
    pub fn new(grid_size: Coord, hazards: CellCount) -> Self {
        let grid_size = grid_size.max(1);
        let total_cells = mult(grid_size, grid_size);
        if hazards > total_cells {
            log::warn!(
                "Requested {} hazards but a {}x{} grid only fits {}",
                hazards,
                grid_size,
                grid_size,
                total_cells
            );
        }
        Self::new_unchecked(grid_size, hazards.min(total_cells))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fixed set of hazard cells for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHazardLayout")]
pub struct HazardLayout {
    grid_size: Coord,
    hazards: BTreeSet<CellIndex>,
}

/// Unvalidated wire form, checked by [`HazardLayout::from_hazard_indices`].
#[derive(Deserialize)]
struct RawHazardLayout {
    grid_size: Coord,
    hazards: BTreeSet<CellIndex>,
}

impl TryFrom<RawHazardLayout> for HazardLayout {
    type Error = GameError;

    fn try_from(raw: RawHazardLayout) -> Result<Self> {
        Self::from_hazard_indices(raw.grid_size, raw.hazards)
    }
}

impl HazardLayout {
    pub fn from_hazard_indices(
        grid_size: Coord,
        hazards: impl IntoIterator<Item = CellIndex>,
    ) -> Result<Self> {
        if grid_size == 0 {
            return Err(GameError::InvalidBoardShape);
        }

        let total_cells = mult(grid_size, grid_size);
        let mut hazard_set = BTreeSet::new();
        for index in hazards {
            if index >= total_cells {
                return Err(GameError::OutOfRange);
            }
            hazard_set.insert(index);
        }

        Ok(Self::from_parts_unchecked(grid_size, hazard_set))
    }

    pub(crate) fn from_parts_unchecked(grid_size: Coord, hazards: BTreeSet<CellIndex>) -> Self {
        Self { grid_size, hazards }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.grid_size, self.hazard_count())
    }

    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if index < self.total_cells() {
            Ok(index)
        } else {
            Err(GameError::OutOfRange)
        }
    }

    pub fn grid_size(&self) -> Coord {
        self.grid_size
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.grid_size, self.grid_size)
    }

    pub fn hazard_count(&self) -> CellCount {
        // bounded by total_cells, which fits
        self.hazards.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.hazard_count()
    }

    pub fn hazards(&self) -> &BTreeSet<CellIndex> {
        &self.hazards
    }

    pub fn contains_hazard(&self, index: CellIndex) -> bool {
        self.hazards.contains(&index)
    }

    pub fn adjacent_hazard_count(&self, index: CellIndex) -> Result<u8> {
        let index = self.validate_index(index)?;
        Ok(self.hazards_around(index))
    }

    /// Same as [`Self::adjacent_hazard_count`] for an index already known to be valid.
    pub(crate) fn hazards_around(&self, index: CellIndex) -> u8 {
        // at most eight neighbors
        self.iter_neighbors(index)
            .filter(|neighbor| self.hazards.contains(neighbor))
            .count() as u8
    }

    pub(crate) fn iter_neighbors(&self, index: CellIndex) -> NeighborIter {
        NeighborIter::new(split_index(index, self.grid_size), self.grid_size)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Continue,
    Win,
    Loss,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Continue => true,
            Win => true,
            Loss => true,
        }
    }
}
