use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Index or position is outside the grid")]
    OutOfRange,
    #[error("Cell state does not allow this action")]
    InvalidTransition,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Saved cell states contradict the hazard layout")]
    InconsistentSnapshot,
}

pub type Result<T> = core::result::Result<T, GameError>;
