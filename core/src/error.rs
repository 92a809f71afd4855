use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines, must be fewer than a third of the cells")]
    TooManyMines,
    #[error("Mine data rows have different lengths")]
    InvalidBoardShape,
    #[error("Board must have at least one row and one column")]
    EmptyBoard,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Game config could not be parsed")]
    InvalidConfig,
}

pub type Result<T> = core::result::Result<T, GameError>;
