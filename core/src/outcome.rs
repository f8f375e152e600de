use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// True once any hazard has been exposed.
pub fn is_loss(board: &Board) -> bool {
    board
        .cells()
        .any(|(_, cell)| matches!(cell, CellState::ExposedHazard))
}

/// True when nothing is hidden and the flagged cells are exactly the hazards.
pub fn is_win(board: &Board) -> bool {
    let mut correct_flags: CellCount = 0;
    for (index, cell) in board.cells() {
        match cell {
            CellState::Hidden | CellState::ExposedHazard => return false,
            CellState::Flagged if !board.hazards().contains(&index) => return false,
            CellState::Flagged => correct_flags += 1,
            CellState::Revealed(_) => {}
        }
    }
    correct_flags == board.hazard_count()
}

pub fn evaluate(board: &Board) -> GameStatus {
    if is_loss(board) {
        GameStatus::Lost
    } else if is_win(board) {
        GameStatus::Won
    } else {
        GameStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(grid_size: Coord, hazards: &[CellIndex]) -> Board {
        Board::from_layout(HazardLayout::from_hazard_indices(grid_size, hazards.iter().copied()).unwrap())
    }

    /// Reveals every safe cell directly, leaving hazards hidden.
    fn reveal_all_safe(board: &mut Board) {
        for index in 0..board.total_cells() {
            if !board.hazards().contains(&index) {
                board.select(index).unwrap();
            }
        }
    }

    #[test]
    fn fresh_board_is_neither_won_nor_lost() {
        let board = board(3, &[0, 1, 3]);

        assert!(!is_win(&board));
        assert!(!is_loss(&board));
        assert_eq!(evaluate(&board), GameStatus::Active);
    }

    #[test]
    fn win_requires_every_hazard_flagged() {
        let mut board = board(3, &[0, 1, 3]);
        reveal_all_safe(&mut board);
        board.toggle_flag(0).unwrap();
        board.toggle_flag(1).unwrap();

        assert!(!is_win(&board));

        board.toggle_flag(3).unwrap();
        assert!(is_win(&board));
        assert_eq!(evaluate(&board), GameStatus::Won);

        // removing a correct flag undoes the win
        board.toggle_flag(1).unwrap();
        assert!(!is_win(&board));
    }

    #[test]
    fn win_compares_membership_not_just_counts() {
        // a flag on a safe cell can never balance a hidden hazard
        let mut board = board(2, &[0, 1]);
        board.toggle_flag(0).unwrap();
        board.toggle_flag(2).unwrap();
        board.select(3).unwrap();

        assert_eq!(board.flags_placed(), board.hazard_count());
        assert!(!is_win(&board));
    }

    #[test]
    fn full_hazard_board_is_won_by_flags_alone() {
        let mut board = board(2, &[0, 1, 2, 3]);
        for index in 0..4 {
            board.toggle_flag(index).unwrap();
        }

        assert!(is_win(&board));
    }

    #[test]
    fn loss_takes_precedence() {
        let mut board = board(3, &[4]);
        board.select(4).unwrap();

        assert!(is_loss(&board));
        assert!(!is_win(&board));
        assert_eq!(evaluate(&board), GameStatus::Lost);
        assert!(evaluate(&board).is_finished());
    }
}
