use crate::*;

/// The eight compass directions around a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::UpLeft,
        Self::UpRight,
        Self::DownLeft,
        Self::DownRight,
    ];

    /// `(row, col)` displacement of one step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
            Self::UpLeft => (-1, -1),
            Self::UpRight => (-1, 1),
            Self::DownLeft => (1, -1),
            Self::DownRight => (1, 1),
        }
    }

    /// Applies one step to `position`, returning a value only when it remains inside the grid.
    pub fn step(self, (row, col): Position, grid_size: Coord) -> Option<Position> {
        let (d_row, d_col) = self.delta();

        let next_row = row.checked_add_signed(d_row)?;
        if next_row >= grid_size {
            return None;
        }

        let next_col = col.checked_add_signed(d_col)?;
        if next_col >= grid_size {
            return None;
        }

        Some((next_row, next_col))
    }
}

pub fn position_to_index(position: Position, grid_size: Coord) -> Result<CellIndex> {
    let (row, col) = position;
    if row < grid_size && col < grid_size {
        Ok(join_position(position, grid_size))
    } else {
        Err(GameError::OutOfRange)
    }
}

pub fn index_to_position(index: CellIndex, grid_size: Coord) -> Result<Position> {
    if index < mult(grid_size, grid_size) {
        Ok(split_index(index, grid_size))
    } else {
        Err(GameError::OutOfRange)
    }
}

/// Index of the cell one step from `index`, if both are on the grid.
pub fn index_in_direction(index: CellIndex, direction: Direction, grid_size: Coord) -> Option<CellIndex> {
    let position = index_to_position(index, grid_size).ok()?;
    let next = direction.step(position, grid_size)?;
    Some(join_position(next, grid_size))
}

pub fn neighbors(index: CellIndex, grid_size: Coord) -> Result<NeighborIter> {
    let center = index_to_position(index, grid_size)?;
    Ok(NeighborIter::new(center, grid_size))
}

// Both helpers assume the input already lies on the grid.
pub(crate) fn join_position((row, col): Position, grid_size: Coord) -> CellIndex {
    CellIndex::from(row) * CellIndex::from(grid_size) + CellIndex::from(col)
}

pub(crate) fn split_index(index: CellIndex, grid_size: Coord) -> Position {
    let size = CellIndex::from(grid_size);
    ((index / size) as Coord, (index % size) as Coord)
}

/// Iterates over the in-bounds neighbors of a cell as linear indices.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Position,
    grid_size: Coord,
    next_direction: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Position, grid_size: Coord) -> Self {
        Self {
            center,
            grid_size,
            next_direction: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&direction) = Direction::ALL.get(usize::from(self.next_direction)) {
            self.next_direction += 1;

            if let Some(position) = direction.step(self.center, self.grid_size) {
                return Some(join_position(position, self.grid_size));
            }
        }
        None
    }
}
