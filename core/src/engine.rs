use alloc::collections::VecDeque;
use core::borrow::{Borrow, BorrowMut};
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player can see of a [`MineLayout`], plus the bookkeeping of one game on it.
///
/// The layout is held through [`Borrow`], so it can be owned, borrowed or shared (`Rc<MineLayout>`) by the
/// caller. The state only reads the layout, except through [`VisibleState::start_at`] which needs it mutably.
///
/// `flag_count` is the net number of flags placed with [`VisibleState::cycle_flag`]; revealing or
/// finishing the game never changes it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisibleState<L = MineLayout> {
    layout: L,
    board: Array2<CellStatus>,
    revealed_count: CellCount,
    flag_count: CellCount,
    game_over: bool,
    triggered_mine: Option<Coord2>,
}

impl<L: Borrow<MineLayout>> VisibleState<L> {
    pub fn new(layout: L) -> Self {
        let mines: &MineLayout = layout.borrow();
        let size = mines.size();
        Self {
            layout,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flag_count: 0,
            game_over: false,
            triggered_mine: None,
        }
    }

    /// Covers every cell again and clears the counters. The layout is left as is.
    pub fn reset(&mut self) {
        self.board.fill(CellStatus::Covered);
        self.revealed_count = 0;
        self.flag_count = 0;
        self.game_over = false;
        self.triggered_mine = None;
        log::debug!("Board reset");
    }

    pub fn layout(&self) -> &MineLayout {
        self.layout.borrow()
    }

    pub fn into_layout(self) -> L {
        self.layout
    }

    pub fn size(&self) -> Coord2 {
        self.layout().size()
    }

    pub fn board(&self) -> &Array2<CellStatus> {
        &self.board
    }

    pub fn status(&self, coords: Coord2) -> Result<CellStatus> {
        let coords = self.layout().validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn is_uncovered(&self, coords: Coord2) -> Result<bool> {
        self.status(coords).map(CellStatus::is_uncovered)
    }

    /// Mines minus flags placed; negative when the player flagged more cells than there are mines.
    pub fn mines_remaining(&self) -> isize {
        (self.layout().mine_count() as isize) - (self.flag_count as isize)
    }

    pub fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.game_over && self.triggered_mine.is_none()
    }

    /// The mine that lost the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Cycles a covered cell through covered, flagged and questioned. Uncovered cells are left alone.
    pub fn cycle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use CellStatus::*;
        use MarkOutcome::*;

        let coords = self.layout().validate_coords(coords)?;
        self.check_not_finished()?;

        let cell = &mut self.board[coords.to_nd_index()];
        Ok(match *cell {
            Covered => {
                *cell = Flagged;
                self.flag_count += 1;
                Changed
            }
            Flagged => {
                *cell = Questioned;
                self.flag_count -= 1;
                Changed
            }
            Questioned => {
                *cell = Covered;
                Changed
            }
            _ => NoChange,
        })
    }

    /// Uncovers `coords`, flooding through every connected cell without adjacent mines.
    ///
    /// Hitting a mine ends the game and exposes the rest of the layout. Uncovering the last safe cell wins
    /// the game and flags every remaining mine.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout().validate_coords(coords)?;
        self.check_not_finished()?;

        if self.layout()[coords] {
            self.board[coords.to_nd_index()] = CellStatus::ExplodedMine;
            self.game_over = true;
            self.triggered_mine = Some(coords);
            self.expose_mines();
            log::debug!("Hit mine at {:?}, game lost", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {} cells from {:?}", opened, coords);

        Ok(if self.check_won() {
            RevealOutcome::Won
        } else if opened == 0 {
            RevealOutcome::NoChange
        } else {
            RevealOutcome::Safe
        })
    }

    /// Work-list flood fill, returns how many cells it uncovered.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let layout: &MineLayout = self.layout.borrow();
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.board[visit_coords.to_nd_index()];
            if cell.is_uncovered() {
                continue;
            }

            let adjacent_mines = layout.count_adjacent(visit_coords);
            *cell = CellStatus::Revealed(adjacent_mines);
            opened += 1;
            log::trace!(
                "Flood revealed {:?}, adjacent mines: {}",
                visit_coords,
                adjacent_mines
            );

            // numbered cells form the boundary of the region
            if adjacent_mines == 0 {
                to_visit.extend(
                    layout
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.board[pos.to_nd_index()].is_covered()),
                );
            }
        }

        self.revealed_count += opened;
        opened
    }

    fn check_won(&mut self) -> bool {
        let layout: &MineLayout = self.layout.borrow();
        if self.revealed_count != layout.safe_cell_count() {
            return false;
        }

        self.game_over = true;
        Zip::from(&mut self.board)
            .and(layout.mine_mask())
            .for_each(|cell, &mine| {
                if mine {
                    *cell = CellStatus::Flagged;
                }
            });
        log::debug!("All safe cells revealed, game won");
        true
    }

    /// Marks wrong flags and shows every mine that was neither flagged nor exploded.
    fn expose_mines(&mut self) {
        use CellStatus::*;

        let layout: &MineLayout = self.layout.borrow();
        Zip::from(&mut self.board)
            .and(layout.mine_mask())
            .for_each(|cell, &mine| match (*cell, mine) {
                (Flagged, false) => *cell = IncorrectFlag,
                (Covered | Questioned, true) => *cell = Mine,
                _ => {}
            });
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.game_over {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl<L: BorrowMut<MineLayout>> VisibleState<L> {
    /// Starts a fresh game with a first move that is never a mine: resets the board, repopulates the
    /// layout around `coords`, then reveals it.
    pub fn start_at<R: rand::Rng>(
        &mut self,
        coords: Coord2,
        rng: &mut R,
    ) -> Result<RevealOutcome> {
        let coords = self.layout().validate_coords(coords)?;
        self.reset();
        let layout: &mut MineLayout = self.layout.borrow_mut();
        layout.populate(coords, rng)?;
        self.reveal(coords)
    }
}
