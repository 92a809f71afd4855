use core::borrow::Borrow;
use core::fmt;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything a presentation layer needs to draw the board, detached from the state it was taken from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord2,
    pub mines_remaining: isize,
    pub game_over: bool,
    pub cells: Array2<CellStatus>,
}

impl BoardSnapshot {
    pub fn new(
        size: Coord2,
        mines_remaining: isize,
        game_over: bool,
        cells: Array2<CellStatus>,
    ) -> Result<Self> {
        let snapshot = Self {
            size,
            mines_remaining,
            game_over,
            cells,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_state<L: Borrow<MineLayout>>(state: &VisibleState<L>) -> Self {
        Self {
            size: state.size(),
            mines_remaining: state.mines_remaining(),
            game_over: state.is_game_over(),
            cells: state.board().clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyBoard);
        }
        if self.cells.dim() != self.size {
            return Err(GameError::InvalidBoardShape);
        }
        if let Some(count) = self.cells.iter().find_map(|cell| match cell {
            CellStatus::Revealed(count) if *count > 8 => Some(*count),
            _ => None,
        }) {
            log::warn!("Snapshot holds impossible adjacent count {}", count);
            return Err(GameError::InvalidBoardShape);
        }
        Ok(())
    }

    pub fn status(&self, coords: Coord2) -> Option<CellStatus> {
        self.cells.get(coords.to_nd_index()).copied()
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn from_state_captures_board_and_counters() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        let mut state = VisibleState::new(layout);

        state.reveal((1, 1)).unwrap();
        state.cycle_flag((0, 0)).unwrap();
        state.cycle_flag((0, 2)).unwrap();
        state.cycle_flag((0, 2)).unwrap();

        let snapshot = BoardSnapshot::from_state(&state);

        assert_eq!(snapshot.size, (2, 3));
        assert_eq!(snapshot.mines_remaining, 0);
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.status((1, 1)), Some(CellStatus::Revealed(1)));
        assert_eq!(snapshot.status((0, 0)), Some(CellStatus::Flagged));
        assert_eq!(snapshot.status((2, 0)), None);
        assert_eq!(snapshot.to_string(), "F#?\n#1#\n");
    }

    #[test]
    fn display_shows_loss() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0), (1, 1)]).unwrap();
        let mut state = VisibleState::new(layout);
        state.cycle_flag((0, 1)).unwrap();
        state.reveal((0, 0)).unwrap();

        let snapshot = BoardSnapshot::from_state(&state);

        assert!(snapshot.game_over);
        assert_eq!(snapshot.to_string(), "!X\n#*\n");
    }

    #[test]
    fn json_keeps_every_status_distinct() {
        let cells = Array2::from_shape_vec(
            (1, 4),
            alloc::vec![
                CellStatus::Revealed(0),
                CellStatus::Revealed(7),
                CellStatus::IncorrectFlag,
                CellStatus::Questioned,
            ],
        )
        .unwrap();
        let snapshot = BoardSnapshot::new((1, 4), 3, true, cells).unwrap();

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#"{"Revealed":7}"#));
        assert!(json.contains(r#""IncorrectFlag""#));

        let back: BoardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn validate_rejects_shape_mismatch() {
        let snapshot = BoardSnapshot {
            size: (2, 2),
            mines_remaining: 1,
            game_over: false,
            cells: Array2::from_elem([1, 2], CellStatus::Covered),
        };
        assert_eq!(snapshot.validate(), Err(GameError::InvalidBoardShape));

        let impossible = Array2::from_elem([1, 1], CellStatus::Revealed(9));
        assert_eq!(
            BoardSnapshot::new((1, 1), 0, false, impossible),
            Err(GameError::InvalidBoardShape)
        );
    }
}
