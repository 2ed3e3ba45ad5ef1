//! Engine of a falling-block puzzle game.
//!
//! - [`core`] holds plain data: shapes, the falling [`Piece`], the [`Board`] and
//!   the rotation system with wall kicks.
//! - [`engine`] holds the [`GameSession`] that owns all state of one game and
//!   routes every command through placement validation, locking, scoring and
//!   the piece supply.
//!
//! The engine performs no I/O and keeps no global state. Rendering, input and
//! persistence belong to the caller.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding at the requested position")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("piece colliding at the requested position")]
    PieceCollision(PieceCollisionError),
    #[display("game is paused or over")]
    NotPlaying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HoldError {
    #[display("hold already used in this turn")]
    HoldAlreadyUsed,
    #[display("game is paused or over")]
    NotPlaying,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("grid width {width} out of range {min}..={max}")]
    InvalidWidth { width: usize, min: usize, max: usize },
    #[display("grid height {height} out of range {min}..={max}")]
    InvalidHeight {
        height: usize,
        min: usize,
        max: usize,
    },
}
