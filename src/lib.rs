#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    reason = "rule functions are pure and their errors are self-describing"
)]

//! Rule engine for standard chess: move validation, attack detection,
//! castling, check, checkmate and stalemate on an 8x8 mailbox board.
//!
//! En passant captures and underpromotion are not supported. A pawn reaching
//! the far rank always becomes a queen.

pub mod coord;

pub mod attack;
pub mod board;
pub mod castling;
pub mod castling_right;
pub mod color;
pub mod disambiguate;
pub mod end_state;
pub mod error;
pub mod execute;
pub mod fen;
pub mod fuzz;
pub mod game;
mod misc;
pub mod notation;
pub mod piece;
pub mod repl;
pub mod validate;
