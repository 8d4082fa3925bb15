use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParsePieceError {
    #[error("expected a piece letter, found nothing")]
    Empty,
    #[error(
        "found `{0}`, expected one of `p`, `n`, `b`, `r`, `q`, `k`, or uppercase forms of these letters"
    )]
    UnknownLetter(char),
    #[error("unexpected `{0}`, only one piece letter is expected")]
    Unexpected(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}
impl PieceKind {
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    /// Letter used in algebraic notation, pawns have none.
    pub fn notation_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            kind => Some(kind.uppercase()),
        }
    }
}
impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "pawn")?,
            PieceKind::Knight => write!(f, "knight")?,
            PieceKind::Bishop => write!(f, "bishop")?,
            PieceKind::Rook => write!(f, "rook")?,
            PieceKind::Queen => write!(f, "queen")?,
            PieceKind::King => write!(f, "king")?,
        }
        Ok(())
    }
}
impl TryFrom<char> for PieceKind {
    type Error = ParsePieceError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let kind = match value {
            'p' | 'P' => PieceKind::Pawn,
            'n' | 'N' => PieceKind::Knight,
            'b' | 'B' => PieceKind::Bishop,
            'r' | 'R' => PieceKind::Rook,
            'q' | 'Q' => PieceKind::Queen,
            'k' | 'K' => PieceKind::King,
            c => return Err(ParsePieceError::UnknownLetter(c)),
        };
        Ok(kind)
    }
}
impl FromStr for PieceKind {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut characters = s.chars();
        let kind = characters
            .next()
            .ok_or(ParsePieceError::Empty)?
            .try_into()?;
        if let Some(c) = characters.next() {
            return Err(ParsePieceError::Unexpected(c));
        }
        Ok(kind)
    }
}

/// An occupied square: what stands there and whose it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}
impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece { kind, color }
    }
    /// FEN letter, uppercase for white.
    pub fn fen(self) -> char {
        match self.color {
            Color::White => self.kind.uppercase(),
            Color::Black => self.kind.lowercase(),
        }
    }
    pub fn from_fen(c: char) -> Result<Self, ParsePieceError> {
        let kind = PieceKind::try_from(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Ok(Piece { kind, color })
    }
}
impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)?;
        Ok(())
    }
}
