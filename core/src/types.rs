/// Single coordinate axis, used for row/column indices and board dimensions.
pub type Coord = usize;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0, self.1]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    a.saturating_mul(b)
}

/// Exclusive upper bound on the number of mines a `rows x cols` board may hold: a third of the cells, rounded up.
pub const fn max_mines((rows, cols): Coord2) -> CellCount {
    mult(rows, cols).div_ceil(3)
}
