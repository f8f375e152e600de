use std::fmt;

use sweeper_core::{Board, CellState};

use crate::command::ROW_LABELS;

const WALL_VERTICAL: char = '|';
const WALL_HORIZONTAL: char = '-';
const HIDDEN: char = '~';
const FLAG: char = '♥';
const HAZARD: char = '☺';

/// Text grid with numbered columns and lettered rows.
pub struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let grid_size = usize::from(board.grid_size());

        let mut header = String::from("  ");
        for column in 1..=grid_size {
            header.push(WALL_VERTICAL);
            header.push_str(&format!(" {column:<2}"));
        }
        header.push(WALL_VERTICAL);
        let rule: String = std::iter::repeat_n(WALL_HORIZONTAL, header.len() + 1).collect();

        writeln!(f, "{header}")?;
        let mut cells = board.cells();
        for label in ROW_LABELS.chars().take(grid_size) {
            writeln!(f, "{rule}")?;
            write!(f, "{label} ")?;
            for (_, cell) in cells.by_ref().take(grid_size) {
                write!(f, "{WALL_VERTICAL} {} ", cell_symbol(cell))?;
            }
            writeln!(f, "{WALL_VERTICAL}")?;
        }
        write!(f, "{rule}")
    }
}

fn cell_symbol(cell: CellState) -> char {
    match cell {
        CellState::Hidden => HIDDEN,
        CellState::Flagged => FLAG,
        CellState::ExposedHazard => HAZARD,
        // counts never exceed 8
        CellState::Revealed(count) => char::from(b'0' + count),
    }
}

pub fn status_line(board: &Board, elapsed_secs: u64) -> String {
    format!(
        "Hazards left: {}    Flags placed: {}    Time elapsed: {}m {}s",
        board.hazards_unflagged(),
        board.flags_placed(),
        elapsed_secs / 60,
        elapsed_secs % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::HazardLayout;

    fn board(grid_size: u8, hazards: &[u16]) -> Board {
        Board::from_layout(HazardLayout::from_hazard_indices(grid_size, hazards.iter().copied()).unwrap())
    }

    #[test]
    fn renders_hidden_grid() {
        let rendered = BoardView(&board(2, &[0])).to_string();

        let expected = "  | 1 | 2 |\n\
                        ------------\n\
                        A | ~ | ~ |\n\
                        ------------\n\
                        B | ~ | ~ |\n\
                        ------------";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn renders_each_cell_state() {
        let mut board = board(3, &[0, 8]);
        board.toggle_flag(8).unwrap();
        board.select(2).unwrap();

        let rendered = BoardView(&board).to_string();
        assert!(rendered.contains("A | ~ | 1 | 0 |"));
        assert!(rendered.contains("B | ~ | 2 | 1 |"));
        assert!(rendered.contains("C | ~ | ~ | ♥ |"));

        board.select(0).unwrap();
        let rendered = BoardView(&board).to_string();
        assert!(rendered.contains("A | ☺ | 1 | 0 |"));
        assert!(rendered.contains("C | ~ | ~ | ☺ |"));
    }

    #[test]
    fn status_line_counts_flags_and_time() {
        let mut board = board(3, &[0, 8]);
        board.toggle_flag(4).unwrap();

        assert_eq!(
            status_line(&board, 125),
            "Hazards left: 1    Flags placed: 1    Time elapsed: 2m 5s"
        );

        board.toggle_flag(0).unwrap();
        board.toggle_flag(1).unwrap();
        assert_eq!(
            status_line(&board, 59),
            "Hazards left: -1    Flags placed: 3    Time elapsed: 0m 59s"
        );
    }
}
