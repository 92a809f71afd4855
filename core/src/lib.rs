#![no_std]

extern crate alloc;

use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod snapshot;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board dimensions as `(rows, cols)`.
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Builds a config, clamping the dimensions to at least one cell and the mine count below
    /// [`max_mines`].
    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let size = (rows.max(1), cols.max(1));
        let mines = mines.min(max_mines(size) - 1);
        Self::new_unchecked(size, mines)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((16, 30), 99)
    }

    /// Parses a JSON config such as `{"size":[9,9],"mines":10}` and validates it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|err| {
            log::warn!("Rejected game config: {}", err);
            GameError::InvalidConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.mines >= max_mines(self.size) {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Where the mines are.
///
/// Dimensions are fixed at construction. The mine count is fixed too, but only matches the number of mined
/// cells right after construction from mine data or after [`MineLayout::populate`]: a layout created with
/// [`MineLayout::empty`] or wiped with [`MineLayout::clear`] holds no mines while still reporting its target
/// count.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows == 0 || cols == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    /// Copies row-major mine data, `rows[r][c]` being whether `(r, c)` holds a mine.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        if cols == 0 {
            return Err(GameError::EmptyBoard);
        }
        if rows.iter().any(|row| row.as_ref().len() != cols) {
            return Err(GameError::InvalidBoardShape);
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();
        let mine_mask = Array2::from_shape_vec((rows.len(), cols), cells)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_mine_mask(mine_mask)
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    /// Creates a layout without mines that will hold `mine_count` mines once populated.
    pub fn empty(size: Coord2, mine_count: CellCount) -> Result<Self> {
        Self::from_config(&GameConfig::new_unchecked(size, mine_count))
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            mine_mask: Array2::default(config.size.to_nd_index()),
            mine_count: config.mines,
        })
    }

    /// Clears the layout, then places exactly `mine_count` mines on distinct random cells, never on `avoid`.
    pub fn populate<R: rand::Rng>(&mut self, avoid: Coord2, rng: &mut R) -> Result<()> {
        use rand::prelude::*;

        let avoid = self.validate_coords(avoid)?;
        let size = self.size();
        // Rejection sampling only terminates quickly while free cells dominate.
        if self.mine_count >= max_mines(size) {
            return Err(GameError::TooManyMines);
        }

        self.clear();

        let (rows, cols) = size;
        let mut placed = 0;
        let mut attempts: usize = 0;
        while placed < self.mine_count {
            attempts += 1;
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            if coords == avoid || self[coords] {
                continue;
            }
            self[coords] = true;
            placed += 1;
        }

        log::debug!(
            "Populated {}x{} layout with {} mines avoiding {:?} after {} attempts",
            rows,
            cols,
            placed,
            avoid,
            attempts
        );
        Ok(())
    }

    /// Removes every mine, leaving dimensions and the mine count untouched.
    pub fn clear(&mut self) {
        self.mine_mask.fill(false);
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn in_range(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_range(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Dimensions as `(rows, cols)`.
    pub fn size(&self) -> Coord2 {
        self.mine_mask.dim()
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn has_mine(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    /// Number of mines among the up to eight cells around `coords`, not counting `coords` itself.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.count_adjacent(coords))
    }

    pub(crate) fn count_adjacent(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    /// The in-bounds cells of the 3x3 block centered on `(row, col)`, minus the center.
    pub(crate) fn iter_neighbors(
        &self,
        (row, col): Coord2,
    ) -> impl Iterator<Item = Coord2> + use<> {
        let (rows, cols) = self.size();
        let row_span = row.saturating_sub(1)..=(row + 1).min(rows - 1);
        let col_span = col.saturating_sub(1)..=(col + 1).min(cols - 1);
        row_span
            .flat_map(move |r| col_span.clone().map(move |c| (r, c)))
            .filter(move |&pos| pos != (row, col))
    }

    pub(crate) fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was already uncovered
    NoChange,
    Safe,
    Won,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Whether the revealed cell was free of mines.
    pub const fn is_safe(self) -> bool {
        !matches!(self, Self::HitMine)
    }
}
