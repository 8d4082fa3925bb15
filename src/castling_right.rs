use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use thiserror::Error;

use crate::color::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("found `{0}`, expected one of `K`, `Q`, `k`, `q`, or `-`")]
pub struct InvalidCastlingCharacter(pub char);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    pub const ALL: [Self; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    pub fn rook_origin_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }
    pub fn king_destination_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }
    pub fn rook_destination_col(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }
    /// Side implied by a two-file king step from `from_col` to `to_col`.
    pub fn from_king_step(from_col: u8, to_col: u8) -> Self {
        if to_col > from_col {
            CastlingSide::Kingside
        } else {
            CastlingSide::Queenside
        }
    }
    pub fn notation(self) -> &'static str {
        match self {
            CastlingSide::Kingside => "O-O",
            CastlingSide::Queenside => "O-O-O",
        }
    }
}
impl Display for CastlingSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CastlingSide::Kingside => write!(f, "kingside")?,
            CastlingSide::Queenside => write!(f, "queenside")?,
        }
        Ok(())
    }
}

// Bit structure: 0000qkQK
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub fn none() -> Self {
        CastlingRights(0)
    }
    pub fn all() -> Self {
        CastlingRights(0b_1111)
    }
    fn bit(color: Color, side: CastlingSide) -> u8 {
        let offset = match (color, side) {
            (Color::White, CastlingSide::Kingside) => 0,
            (Color::White, CastlingSide::Queenside) => 1,
            (Color::Black, CastlingSide::Kingside) => 2,
            (Color::Black, CastlingSide::Queenside) => 3,
        };
        0b_1 << offset
    }
    pub fn get(self, color: Color, side: CastlingSide) -> bool {
        self.0 & Self::bit(color, side) != 0
    }
    pub fn add(&mut self, color: Color, side: CastlingSide) {
        self.0 |= Self::bit(color, side);
    }
    pub fn remove(&mut self, color: Color, side: CastlingSide) {
        self.0 &= !Self::bit(color, side);
    }
    pub fn to_removed(self, color: Color, side: CastlingSide) -> Self {
        let mut new = self;
        new.remove(color, side);
        new
    }
    pub fn clear(&mut self, color: Color) {
        for side in CastlingSide::ALL {
            self.remove(color, side);
        }
    }
    pub fn to_cleared(self, color: Color) -> Self {
        let mut new = self;
        new.clear(color);
        new
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}
impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::all()
    }
}
impl Display for CastlingRights {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (color, side, c) in [
            (Color::White, CastlingSide::Kingside, 'K'),
            (Color::White, CastlingSide::Queenside, 'Q'),
            (Color::Black, CastlingSide::Kingside, 'k'),
            (Color::Black, CastlingSide::Queenside, 'q'),
        ] {
            if self.get(color, side) {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
impl FromStr for CastlingRights {
    type Err = InvalidCastlingCharacter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rights = CastlingRights::none();
        for c in s.chars() {
            match c {
                'K' => rights.add(Color::White, CastlingSide::Kingside),
                'Q' => rights.add(Color::White, CastlingSide::Queenside),
                'k' => rights.add(Color::Black, CastlingSide::Kingside),
                'q' => rights.add(Color::Black, CastlingSide::Queenside),
                '-' => (),
                c => return Err(InvalidCastlingCharacter(c)),
            }
        }
        Ok(rights)
    }
}
#[cfg(test)]
mod test {
    use rstest::rstest;

    use crate::{
        castling_right::{CastlingRights, CastlingSide, InvalidCastlingCharacter},
        color::Color,
    };

    #[rstest]
    #[case("KQkq")]
    #[case("Kq")]
    #[case("k")]
    #[case("-")]
    fn display_round_trips(#[case] text: &str) {
        let rights: CastlingRights = text.parse().unwrap();
        assert_eq!(rights.to_string(), text);
    }
    #[test]
    fn flags_are_independent() {
        let rights = CastlingRights::all().to_removed(Color::White, CastlingSide::Queenside);
        assert!(rights.get(Color::White, CastlingSide::Kingside));
        assert!(!rights.get(Color::White, CastlingSide::Queenside));
        assert!(rights.get(Color::Black, CastlingSide::Queenside));
        assert_eq!(rights.to_cleared(Color::Black).to_string(), "K");
    }
    #[test]
    fn rejects_shredder_files() {
        assert_eq!(
            "HAha".parse::<CastlingRights>(),
            Err(InvalidCastlingCharacter('H'))
        );
    }
}
