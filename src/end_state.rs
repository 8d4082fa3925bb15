use std::fmt::{self, Display, Formatter};

use crate::{
    attack::is_square_under_attack,
    board::Board,
    castling_right::CastlingRights,
    color::Color,
    coord::Coord,
    validate::validate_move,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndState {
    Win(Color),
    Draw,
}
impl EndState {
    /// Machine-readable result handed to session layers.
    pub fn code(self) -> &'static str {
        match self {
            EndState::Win(Color::White) => "white_win",
            EndState::Win(Color::Black) => "black_win",
            EndState::Draw => "draw",
        }
    }
}
impl Display for EndState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EndState::Win(color) => write!(f, "{color} wins")?,
            EndState::Draw => write!(f, "draw")?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEnd {
    Checkmate { winner: Color },
    Stalemate,
}
impl GameEnd {
    pub fn result(self) -> EndState {
        match self {
            GameEnd::Checkmate { winner } => EndState::Win(winner),
            GameEnd::Stalemate => EndState::Draw,
        }
    }
    pub fn reason(self) -> &'static str {
        match self {
            GameEnd::Checkmate { .. } => "checkmate",
            GameEnd::Stalemate => "stalemate",
        }
    }
}
impl Display for GameEnd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.result(), self.reason())?;
        Ok(())
    }
}

/// Whether the king of `color` is attacked. A side without a king is never
/// in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_of(color)
        .is_some_and(|king| is_square_under_attack(board, king, !color))
}
/// Every (source, target) pair the validator accepts for `color`, found by
/// trying each own piece against all 64 squares.
pub fn legal_moves(
    board: &Board,
    color: Color,
    rights: CastlingRights,
) -> impl Iterator<Item = (Coord, Coord)> + '_ {
    board.pieces_of(color).flat_map(move |(source, _)| {
        Coord::all()
            .filter(move |target| validate_move(board, source, *target, color, rights).is_ok())
            .map(move |target| (source, target))
    })
}
pub fn has_legal_moves(board: &Board, color: Color, rights: CastlingRights) -> bool {
    legal_moves(board, color, rights).next().is_some()
}
/// Checkmate or stalemate for the side about to move, `None` while the game
/// goes on. Other draws are not detected.
pub fn check_game_end(
    board: &Board,
    current_player: Color,
    rights: CastlingRights,
) -> Option<GameEnd> {
    if has_legal_moves(board, current_player, rights) {
        None
    } else if is_in_check(board, current_player) {
        Some(GameEnd::Checkmate {
            winner: !current_player,
        })
    } else {
        Some(GameEnd::Stalemate)
    }
}
