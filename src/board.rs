use std::ops::Index;

use crate::{
    color::Color,
    coord::{Coord, home_rank, pawn_home_rank},
    piece::{Piece, PieceKind},
};

/// The 8x8 grid. Row 0 is rank 8; col 0 is file a.
///
/// `Board` is `Copy`: every hypothetical move is tried on a copy and the
/// caller's board is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}
impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in (0..).zip(PieceKind::STARTING_CONFIGURATION) {
                board.put(Coord::new(home_rank(color), col), Some(Piece { kind, color }));
                board.put(
                    Coord::new(pawn_home_rank(color), col),
                    Some(Piece::new(PieceKind::Pawn, color)),
                );
            }
        }
        board
    }
    pub fn from_rows(squares: [[Option<Piece>; 8]; 8]) -> Self {
        Board { squares }
    }
    /// Returns the board with `piece` placed on `position`. Out-of-range
    /// positions leave the board unchanged.
    #[must_use]
    pub fn with_piece(mut self, position: Coord, piece: Piece) -> Self {
        if position.is_valid() {
            self.put(position, Some(piece));
        }
        self
    }
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }
    /// Content of `position`, `None` for empty squares and for positions
    /// off the board.
    pub fn get(&self, position: Coord) -> Option<Piece> {
        if position.is_valid() {
            self[position]
        } else {
            None
        }
    }
    pub fn is_own_piece(&self, position: Coord, color: Color) -> bool {
        self.get(position).is_some_and(|piece| piece.color == color)
    }
    pub fn is_empty_at(&self, position: Coord) -> bool {
        self.get(position).is_none()
    }
    pub fn square_contains(&self, position: Coord, color: Color, kind: PieceKind) -> bool {
        self.get(position) == Some(Piece { kind, color })
    }
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        Coord::all().filter_map(move |position| self[position].map(|piece| (position, piece)))
    }
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }
    /// Position of the first king of `color` in scan order.
    pub fn king_of(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }
    pub(crate) fn put(&mut self, position: Coord, piece: Option<Piece>) {
        self.squares[position.row as usize][position.col as usize] = piece;
    }
    pub(crate) fn take(&mut self, position: Coord) -> Option<Piece> {
        self.squares[position.row as usize][position.col as usize].take()
    }
}
impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}
impl Index<Coord> for Board {
    type Output = Option<Piece>;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.squares[index.row as usize][index.col as usize]
    }
}
