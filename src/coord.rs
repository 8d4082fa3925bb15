use std::{
    fmt::{self, Display, Formatter},
    ops::{Mul, Sub},
    str::FromStr,
};

use thiserror::Error;

use crate::color::Color;

/// Builds a [`Coord`] from a square name at compile time, e.g. `coord!("e4")`.
#[macro_export]
macro_rules! coord {
    ($square:literal) => {
        const { $crate::coord::Coord::from_algebraic($square) }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseCoordError {
    #[error("found `{0}`, characters from `a` to `h` were expected instead")]
    InvalidFile(char),
    #[error("found `{0}`, characters from `1` to `8` were expected instead")]
    InvalidRank(char),
    #[error("provided string have length of {0} characters, 2 were expected")]
    NotEnoughCharacter(u8),
    #[error("unexpected `{0}`")]
    Unexpected(char),
}

/// A (row, col) pair. Row 0 is rank 8 and col 0 is file a.
///
/// Fields are public so out-of-range pairs coming from outside can be
/// represented and rejected; anything that indexes the board checks
/// [`Coord::is_valid`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}
impl Coord {
    pub const fn new(row: u8, col: u8) -> Self {
        Coord { row, col }
    }
    pub const fn from_algebraic(square: &str) -> Self {
        let bytes = square.as_bytes();
        assert!(bytes.len() == 2, "expected a square such as `e4`");
        let file = bytes[0];
        let rank = bytes[1];
        assert!(file >= b'a' && file <= b'h', "file must be from `a` to `h`");
        assert!(rank >= b'1' && rank <= b'8', "rank must be from `1` to `8`");
        Coord {
            row: 7 - (rank - b'1'),
            col: file - b'a',
        }
    }
    pub fn from_chars(file: char, rank: char) -> Result<Self, ParseCoordError> {
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return Err(ParseCoordError::InvalidFile(file)),
        };
        let row = match rank {
            '1'..='8' => 7 - (rank as u8 - b'1'),
            _ => return Err(ParseCoordError::InvalidRank(rank)),
        };
        Ok(Coord { row, col })
    }
    pub fn new_checked(row: u8, col: u8) -> Option<Self> {
        Some(Coord { row, col }).filter(|position| position.is_valid())
    }
    pub fn is_valid(self) -> bool {
        self.row < 8 && self.col < 8
    }
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|row| (0..8).map(move |col| Coord { row, col }))
    }
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Self::new_checked(
            self.row.checked_add_signed(movement.row)?,
            self.col.checked_add_signed(movement.col)?,
        )
    }
    pub fn file(self) -> char {
        (self.col + b'a') as char
    }
    pub fn rank(self) -> char {
        (b'8' - self.row) as char
    }
    /// Squares strictly between `self` and `other` when both are on the
    /// board and share a rank, file, or diagonal; `None` otherwise.
    pub fn between(self, other: Self) -> Option<impl Iterator<Item = Self>> {
        if !self.is_valid() || !other.is_valid() {
            return None;
        }
        let difference = other - self;
        let direction = difference.as_unit();
        if difference == Vector::ZERO || !direction.is_aligned(difference) {
            return None;
        }
        Some(
            (1..)
                .map_while(move |distance| self.move_by(direction * distance))
                .take_while(move |position| *position != other),
        )
    }
}
pub fn home_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}
pub fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}
pub fn pawn_promotion_rank(color: Color) -> u8 {
    home_rank(!color)
}
pub fn pawn_direction(color: Color) -> i8 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}
impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", self.file(), self.rank())?;
        } else {
            write!(f, "({}, {})", self.row, self.col)?;
        }
        Ok(())
    }
}
impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(file) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(0));
        };
        let Some(rank) = chars.next() else {
            return Err(ParseCoordError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseCoordError::Unexpected(c));
        }
        Coord::from_chars(file.to_ascii_lowercase(), rank)
    }
}
impl Sub<Self> for Coord {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            row: self.row.cast_signed() - rhs.row.cast_signed(),
            col: self.col.cast_signed() - rhs.col.cast_signed(),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vector {
    pub row: i8,
    pub col: i8,
}
impl Vector {
    pub const ZERO: Self = Vector { row: 0, col: 0 };

    pub fn pawn_single_move(color: Color) -> Self {
        Vector {
            row: pawn_direction(color),
            col: 0,
        }
    }
    pub fn pawn_double_move(color: Color) -> Self {
        Vector::pawn_single_move(color) * 2
    }
    pub fn is_aligned(self, other: Self) -> bool {
        self.as_unit() == other.as_unit() && self.row * other.col == other.row * self.col
    }
    pub fn is_straight(self) -> bool {
        self != Vector::ZERO && (self.row == 0 || self.col == 0)
    }
    pub fn is_diagonal(self) -> bool {
        self != Vector::ZERO && self.row.unsigned_abs() == self.col.unsigned_abs()
    }
    pub fn is_king_move(self) -> bool {
        self != Vector::ZERO && self.row.unsigned_abs() <= 1 && self.col.unsigned_abs() <= 1
    }
    pub fn is_knight_move(self) -> bool {
        let row = self.row.unsigned_abs();
        let col = self.col.unsigned_abs();
        (row == 1 && col == 2) || (row == 2 && col == 1)
    }
    /// Whether a pawn of `color` standing at the origin of this vector
    /// attacks its tip.
    pub fn is_pawn_attack(self, color: Color) -> bool {
        self.col.unsigned_abs() == 1 && self.row == pawn_direction(color)
    }
    pub fn as_unit(self) -> Self {
        Vector {
            row: self.row.signum(),
            col: self.col.signum(),
        }
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector {
            row: self.row * rhs,
            col: self.col * rhs,
        }
    }
}
#[cfg(test)]
mod test {
    use crate::coord::{Coord, ParseCoordError, Vector};

    #[test]
    fn algebraic_maps_onto_rows_and_cols() {
        assert_eq!(coord!("a8"), Coord::new(0, 0));
        assert_eq!(coord!("h1"), Coord::new(7, 7));
        assert_eq!(coord!("e4"), Coord::new(4, 4));
        assert_eq!(coord!("e4").to_string(), "e4");
        assert_eq!("c6".parse(), Ok(coord!("c6")));
    }
    #[test]
    fn every_square_round_trips() {
        for position in Coord::all() {
            assert_eq!(position.to_string().parse(), Ok(position));
        }
    }
    #[test]
    fn parse_errors() {
        assert_eq!("i1".parse::<Coord>(), Err(ParseCoordError::InvalidFile('i')));
        assert_eq!("a9".parse::<Coord>(), Err(ParseCoordError::InvalidRank('9')));
        assert_eq!("a".parse::<Coord>(), Err(ParseCoordError::NotEnoughCharacter(1)));
        assert_eq!("a1b".parse::<Coord>(), Err(ParseCoordError::Unexpected('b')));
    }
    #[test]
    fn adjacent_squares_have_nothing_between() {
        assert_eq!(coord!("e4").between(coord!("e5")).unwrap().next(), None);
    }
    #[test]
    fn between_walks_diagonals_and_lines() {
        let diagonal: Vec<_> = coord!("a1").between(coord!("d4")).unwrap().collect();
        assert_eq!(diagonal, [coord!("b2"), coord!("c3")]);
        let file: Vec<_> = coord!("e8").between(coord!("e5")).unwrap().collect();
        assert_eq!(file, [coord!("e7"), coord!("e6")]);
        assert!(coord!("a1").between(coord!("b3")).is_none());
        assert!(coord!("a1").between(coord!("a1")).is_none());
    }
    #[test]
    fn nothing_between_off_board_squares() {
        assert!(Coord::new(127, 0).between(Coord::new(128, 0)).is_none());
        assert!(coord!("a8").between(Coord::new(128, 0)).is_none());
        assert!(Coord::new(8, 0).between(coord!("a1")).is_none());
    }
    #[test]
    fn out_of_range_is_not_valid() {
        assert!(!Coord::new(8, 0).is_valid());
        assert!(coord!("h8").move_by(Vector { row: -1, col: 0 }).is_none());
    }
}
