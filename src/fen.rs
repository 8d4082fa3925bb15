use std::{
    fmt::{self, Display, Formatter},
    iter::Peekable,
    num::ParseIntError,
    str::FromStr,
};

use thiserror::Error;

use crate::{
    board::Board,
    castling_right::{CastlingRights, InvalidCastlingCharacter},
    color::{Color, ParseColorError},
    coord::{Coord, ParseCoordError},
    piece::{ParsePieceError, Piece},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFenError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {0} does not describe exactly 8 squares")]
    RankWidth(u8),
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("unexpected trailing field `{0}`")]
    TrailingField(String),
    #[error(transparent)]
    Piece(#[from] ParsePieceError),
    #[error(transparent)]
    Color(#[from] ParseColorError),
    #[error(transparent)]
    Castling(#[from] InvalidCastlingCharacter),
    #[error("invalid en passant target: {0}")]
    EnPassant(#[from] ParseCoordError),
    #[error("invalid move counter: {0}")]
    Counter(#[from] ParseIntError),
}

/// Full game position in Forsyth-Edwards Notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: Board,
    pub current_player: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Coord>,
    pub half_move: u32,
    pub full_move: u32,
}
impl Fen {
    pub fn starting_position() -> Self {
        Fen {
            board: Board::starting_position(),
            current_player: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
            half_move: 0,
            full_move: 1,
        }
    }
}
impl Default for Fen {
    fn default() -> Self {
        Fen::starting_position()
    }
}
impl Display for Fen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, row) in self.board.rows().iter().enumerate() {
            if i != 0 {
                write!(f, "/")?;
            }
            for cell in CellIter(row.iter().copied().peekable()) {
                write!(f, "{cell}")?;
            }
        }
        write!(f, " {}", self.current_player.lowercase())?;
        write!(f, " {}", self.castling_rights)?;
        match self.en_passant_target {
            Some(position) if position.is_valid() => write!(f, " {position}")?,
            _ => write!(f, " -")?,
        }
        write!(f, " {} {}", self.half_move, self.full_move.max(1))?;
        Ok(())
    }
}
impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut fields = s.split_whitespace();
        let placement = fields
            .next()
            .ok_or(ParseFenError::MissingField("piece placement"))?;
        let board = parse_placement(placement)?;
        let current_player = fields
            .next()
            .ok_or(ParseFenError::MissingField("active color"))?
            .parse()?;
        let castling_rights = fields
            .next()
            .ok_or(ParseFenError::MissingField("castling"))?
            .parse()?;
        let en_passant_target = match fields
            .next()
            .ok_or(ParseFenError::MissingField("en passant"))?
        {
            "-" => None,
            square => Some(square.parse()?),
        };
        // the move counters are commonly left out
        let half_move = fields.next().map(str::parse).transpose()?.unwrap_or(0);
        let full_move = fields.next().map(str::parse).transpose()?.unwrap_or(1);
        if let Some(field) = fields.next() {
            return Err(ParseFenError::TrailingField(field.to_owned()));
        }
        Ok(Fen {
            board,
            current_player,
            castling_rights,
            en_passant_target,
            half_move,
            full_move,
        })
    }
}
fn parse_placement(placement: &str) -> Result<Board, ParseFenError> {
    let ranks: Vec<_> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ParseFenError::RankCount(ranks.len()));
    }
    let mut squares = [[None; 8]; 8];
    for ((row, rank), squares) in (0..).zip(ranks).zip(&mut squares) {
        let width_error = ParseFenError::RankWidth(8 - row);
        let mut col = 0;
        for c in rank.chars() {
            if let Some(skip) = c.to_digit(10).filter(|skip| (1..=8).contains(skip)) {
                col += skip as usize;
            } else {
                let piece = Piece::from_fen(c)?;
                *squares.get_mut(col).ok_or(width_error.clone())? = Some(piece);
                col += 1;
            }
            if col > 8 {
                return Err(width_error);
            }
        }
        if col != 8 {
            return Err(width_error);
        }
    }
    Ok(Board::from_rows(squares))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Cell {
    Piece(Piece),
    Space(u8),
}
impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Piece(piece) => write!(f, "{}", piece.fen())?,
            Cell::Space(space) => write!(f, "{space}")?,
        }
        Ok(())
    }
}
/// Run-length encodes the empty squares of a rank.
struct CellIter<T>(Peekable<T>)
where
    T: Iterator;

impl<T> Iterator for CellIter<T>
where
    T: Iterator<Item = Option<Piece>>,
{
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|piece| match piece {
            Some(piece) => Cell::Piece(piece),
            None => {
                let mut count = 1;
                while self.0.peek().is_some_and(Option::is_none) {
                    self.0.next();
                    count += 1;
                }
                Cell::Space(count)
            }
        })
    }
}
