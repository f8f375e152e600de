/// Single coordinate axis used for the grid size and row/column positions.
pub type Coord = u8;

/// Linear cell index, `row * grid_size + col`.
pub type CellIndex = u16;

/// Count type used for hazard counts and total-cell counts.
pub type CellCount = u16;

/// Grid position `(row, col)`.
pub type Position = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Position {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}
