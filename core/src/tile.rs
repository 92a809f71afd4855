use core::fmt;
use serde::{Deserialize, Serialize};

/// Player-visible status of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    /// Initial state of every cell
    Covered,
    /// Player marked the cell as a mine
    Flagged,
    /// Player marked the cell as uncertain
    Questioned,
    /// Opened safe cell with its adjacent mine count, 0 to 8
    Revealed(u8),
    /// Unflagged mine shown after a loss
    Mine,
    /// Flag on a safe cell, shown after a loss
    IncorrectFlag,
    /// The mine whose reveal lost the game
    ExplodedMine,
}

impl CellStatus {
    /// Whether the cell still hides its content, regardless of any marker on it.
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered | Self::Flagged | Self::Questioned)
    }

    pub const fn is_uncovered(self) -> bool {
        !self.is_covered()
    }

    pub const fn symbol(self) -> char {
        use CellStatus::*;
        match self {
            Covered => '#',
            Flagged => 'F',
            Questioned => '?',
            Revealed(0) => '.',
            Revealed(count) => match char::from_digit(count as u32, 10) {
                Some(digit) => digit,
                None => '+',
            },
            Mine => '*',
            IncorrectFlag => 'X',
            ExplodedMine => '!',
        }
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Covered
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        f.write_char(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn covered_family_is_not_uncovered() {
        assert!(!CellStatus::Covered.is_uncovered());
        assert!(!CellStatus::Flagged.is_uncovered());
        assert!(!CellStatus::Questioned.is_uncovered());
        assert!(CellStatus::Revealed(0).is_uncovered());
        assert!(CellStatus::Mine.is_uncovered());
        assert!(CellStatus::IncorrectFlag.is_uncovered());
        assert!(CellStatus::ExplodedMine.is_uncovered());
    }

    #[test]
    fn symbols_distinguish_every_status() {
        let mut all = alloc::vec![
            CellStatus::Covered,
            CellStatus::Flagged,
            CellStatus::Questioned,
            CellStatus::Mine,
            CellStatus::IncorrectFlag,
            CellStatus::ExplodedMine,
        ];
        all.extend((0..=8).map(CellStatus::Revealed));
        let mut symbols: alloc::vec::Vec<char> = all.iter().map(|s| s.symbol()).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), 15);
        assert_eq!(CellStatus::Revealed(3).to_string(), "3");
    }
}
