use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything needed to rebuild a [`Board`], plus the front end's elapsed-time counter.
///
/// `cells` is in linear index order. The core never reads `elapsed_secs`, it is carried
/// through so a saved game resumes with its clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub grid_size: Coord,
    pub hazards: BTreeSet<CellIndex>,
    pub cells: Vec<CellState>,
    pub elapsed_secs: u64,
}

impl BoardSnapshot {
    pub fn capture(board: &Board, elapsed_secs: u64) -> Self {
        Self {
            grid_size: board.grid_size(),
            hazards: board.hazards().clone(),
            cells: board.cells().map(|(_, cell)| cell).collect(),
            elapsed_secs,
        }
    }

    pub fn restore(&self) -> Result<Board> {
        let layout = HazardLayout::from_hazard_indices(self.grid_size, self.hazards.iter().copied())?;

        let side = usize::from(self.grid_size);
        let cells = Array2::from_shape_vec((side, side), self.cells.clone())
            .map_err(|_| GameError::InvalidBoardShape)?;

        self.check_consistency(&layout)?;
        Ok(Board::from_parts(layout, cells))
    }

    fn check_consistency(&self, layout: &HazardLayout) -> Result<()> {
        let mut exposed = 0;
        for (index, &cell) in self.cells.iter().enumerate() {
            let index = index as CellIndex;
            let consistent = match cell {
                CellState::Hidden | CellState::Flagged => true,
                CellState::Revealed(count) => {
                    !layout.contains_hazard(index) && count == layout.hazards_around(index)
                }
                CellState::ExposedHazard => {
                    exposed += 1;
                    layout.contains_hazard(index)
                }
            };
            if !consistent {
                return Err(GameError::InconsistentSnapshot);
            }
        }

        // hazards are exposed all at once or not at all
        if exposed != 0 && exposed != self.hazards.len() {
            return Err(GameError::InconsistentSnapshot);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn played_board() -> Board {
        let mut board = Board::from_layout(HazardLayout::from_hazard_indices(4, [5, 15]).unwrap());
        board.select(0).unwrap();
        board.select(3).unwrap();
        board.toggle_flag(15).unwrap();
        board.toggle_flag(9).unwrap();
        board
    }

    #[test]
    fn restore_rebuilds_identical_board() {
        let board = played_board();

        let snapshot = BoardSnapshot::capture(&board, 73);

        assert_eq!(snapshot.elapsed_secs, 73);
        assert_eq!(snapshot.restore(), Ok(board));
    }

    #[test]
    fn json_round_trip_keeps_state_and_counter() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut board = Board::new(GameConfig::new(6, 5), &mut rng);
        let safe = (0..36).find(|index| !board.hazards().contains(index)).unwrap();
        board.select(safe).unwrap();

        let snapshot = BoardSnapshot::capture(&board, 12);
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: BoardSnapshot = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.restore(), Ok(board));
    }

    #[test]
    fn lost_board_round_trips() {
        let mut board = played_board();
        board.select(5).unwrap();

        let restored = BoardSnapshot::capture(&board, 0).restore().unwrap();

        assert!(restored.is_loss());
        assert_eq!(restored, board);
    }

    #[test]
    fn restore_rejects_wrong_cell_count() {
        let mut snapshot = BoardSnapshot::capture(&played_board(), 0);
        snapshot.cells.pop();

        assert_eq!(snapshot.restore(), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn restore_rejects_out_of_range_hazard() {
        let mut snapshot = BoardSnapshot::capture(&played_board(), 0);
        snapshot.hazards.insert(16);

        assert_eq!(snapshot.restore(), Err(GameError::OutOfRange));
    }

    #[test]
    fn restore_rejects_states_contradicting_layout() {
        let revealed_hazard = BoardSnapshot {
            grid_size: 2,
            hazards: BTreeSet::from([0]),
            cells: vec![CellState::Revealed(0), CellState::Hidden, CellState::Hidden, CellState::Hidden],
            elapsed_secs: 0,
        };
        assert_eq!(revealed_hazard.restore(), Err(GameError::InconsistentSnapshot));

        let wrong_count = BoardSnapshot {
            cells: vec![CellState::Hidden, CellState::Revealed(3), CellState::Hidden, CellState::Hidden],
            ..revealed_hazard.clone()
        };
        assert_eq!(wrong_count.restore(), Err(GameError::InconsistentSnapshot));

        let partial_exposure = BoardSnapshot {
            hazards: BTreeSet::from([0, 3]),
            cells: vec![CellState::ExposedHazard, CellState::Hidden, CellState::Hidden, CellState::Hidden],
            ..revealed_hazard
        };
        assert_eq!(partial_exposure.restore(), Err(GameError::InconsistentSnapshot));
    }
}
