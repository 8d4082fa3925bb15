use std::fmt::{self, Display, Formatter};

use crate::{
    board::Board,
    castling_right::{CastlingRights, CastlingSide},
    color::Color,
    coord::{Coord, pawn_promotion_rank},
    piece::PieceKind,
    validate::{Validated, validate_move},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Suffix {
    #[default]
    None,
    Check,
    Checkmate,
}
impl Display for Suffix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Suffix::None => (),
            Suffix::Check => write!(f, "+")?,
            Suffix::Checkmate => write!(f, "#")?,
        }
        Ok(())
    }
}
/// What is written between the piece letter and the target to tell apart
/// pieces of the same kind that could all legally reach the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disambiguation {
    #[default]
    None,
    File(Coord),
    Rank(Coord),
    Square(Coord),
}
impl Display for Disambiguation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Disambiguation::None => (),
            Disambiguation::File(position) => write!(f, "{}", position.file())?,
            Disambiguation::Rank(position) => write!(f, "{}", position.rank())?,
            Disambiguation::Square(position) => write!(f, "{position}")?,
        }
        Ok(())
    }
}

/// Standard Algebraic Notation of a single ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notation {
    Castle {
        side: CastlingSide,
        suffix: Suffix,
    },
    Move {
        kind: PieceKind,
        source: Coord,
        target: Coord,
        disambiguation: Disambiguation,
        capture: bool,
        promotion: bool,
        suffix: Suffix,
    },
}
impl Notation {
    /// Describes an already validated move against the board it is played on.
    /// Returns `None` when `source` is empty.
    pub fn new(
        board: &Board,
        source: Coord,
        target: Coord,
        rights: CastlingRights,
        validated: Validated,
    ) -> Option<Self> {
        let suffix = if validated.delivers_check {
            Suffix::Check
        } else {
            Suffix::None
        };
        if let Some(side) = validated.castling {
            return Some(Notation::Castle { side, suffix });
        }
        let piece = board.get(source)?;
        Some(Notation::Move {
            kind: piece.kind,
            source,
            target,
            disambiguation: disambiguate(board, source, target, piece.color, piece.kind, rights),
            capture: !board.is_empty_at(target),
            promotion: piece.kind == PieceKind::Pawn
                && target.row == pawn_promotion_rank(piece.color),
            suffix,
        })
    }
    /// Upgrades a check to a checkmate.
    #[must_use]
    pub fn into_checkmate(self) -> Self {
        match self {
            Notation::Castle { side, .. } => Notation::Castle {
                side,
                suffix: Suffix::Checkmate,
            },
            Notation::Move {
                kind,
                source,
                target,
                disambiguation,
                capture,
                promotion,
                ..
            } => Notation::Move {
                kind,
                source,
                target,
                disambiguation,
                capture,
                promotion,
                suffix: Suffix::Checkmate,
            },
        }
    }
}
impl Display for Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Castle { side, suffix } => write!(f, "{}{suffix}", side.notation())?,
            Notation::Move {
                kind,
                source,
                target,
                disambiguation,
                capture,
                promotion,
                suffix,
            } => {
                match kind.notation_letter() {
                    Some(letter) => write!(f, "{letter}{disambiguation}")?,
                    // pawn captures always name the file they leave
                    None if *capture => write!(f, "{}", source.file())?,
                    None => (),
                }
                if *capture {
                    write!(f, "x")?;
                }
                write!(f, "{target}")?;
                if *promotion {
                    write!(f, "=Q")?;
                }
                write!(f, "{suffix}")?;
            }
        }
        Ok(())
    }
}
fn disambiguate(
    board: &Board,
    source: Coord,
    target: Coord,
    color: Color,
    kind: PieceKind,
    rights: CastlingRights,
) -> Disambiguation {
    if kind == PieceKind::Pawn {
        return Disambiguation::None;
    }
    let rivals: Vec<_> = board
        .pieces_of(color)
        .filter(|(position, piece)| *position != source && piece.kind == kind)
        .filter(|(position, _)| validate_move(board, *position, target, color, rights).is_ok())
        .map(|(position, _)| position)
        .collect();
    if rivals.is_empty() {
        Disambiguation::None
    } else if rivals.iter().all(|rival| rival.col != source.col) {
        Disambiguation::File(source)
    } else if rivals.iter().all(|rival| rival.row != source.row) {
        Disambiguation::Rank(source)
    } else {
        Disambiguation::Square(source)
    }
}
