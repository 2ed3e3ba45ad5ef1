//! Core data structures: shapes, the falling piece, the board and rotation.

pub use self::{board::*, piece::*, rotation::*, shape::*};

pub(crate) mod board;
pub(crate) mod piece;
pub(crate) mod rotation;
pub(crate) mod shape;
