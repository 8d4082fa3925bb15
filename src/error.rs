use thiserror::Error;

/// Why a proposed move was refused. Every variant is a recoverable outcome
/// reported to the caller; the board is never modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    #[error("invalid coordinates")]
    InvalidCoordinates,
    #[error("source and target squares are the same")]
    SameSquare,
    #[error("no piece at source square")]
    NoPieceAtSource,
    #[error("piece does not belong to player")]
    WrongOwner,
    #[error("cannot capture own piece")]
    OwnPieceAtTarget,
    #[error("invalid move for piece type")]
    IllegalPattern,
    #[error("move would result in check")]
    SelfCheck,
}
