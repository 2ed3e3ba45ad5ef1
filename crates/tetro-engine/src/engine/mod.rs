//! Game engine logic and state management.
//!
//! This module orchestrates the core data structures into a playable game:
//!
//! - [`GameSession`] - one game: board, falling piece, supply, hold and score
//! - [`GameConfig`] - board size, seed, mode and kill screen of a new game
//! - [`PieceBuffer`] - 7-bag piece supply
//! - [`GameSeed`] / [`GameRng`] - reproducible randomness
//! - [`HoldSlot`] - once-per-piece hold
//! - [`ScoreState`] / [`MessageLog`] - scoring, levels and notifications
//! - [`GameMode`] - initial obstacles and board growth
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`] from a [`GameConfig`]
//! 2. The caller forwards elapsed time with [`GameSession::tick`] and player
//!    commands (move, rotate, hold, drop)
//! 3. A failed downward move locks the piece, clears full rows, scores and
//!    spawns the next piece
//! 4. The game is over when a spawned piece does not fit
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use tetro_engine::{DropOutcome, GameConfig, GameSeed, GameSession};
//!
//! let config = GameConfig {
//!     seed: Some(GameSeed::from(7)),
//!     ..GameConfig::default()
//! };
//! let mut session = GameSession::new(config).unwrap();
//!
//! session.move_left().ok();
//! session.rotate_cw().ok();
//! assert!(matches!(session.hard_drop(), DropOutcome::Locked(_)));
//!
//! // One second at level 1 is one gravity step
//! assert_eq!(session.tick(Duration::from_secs(1)), Some(DropOutcome::Moved));
//! ```

pub use self::{config::*, game_session::*, hold::*, obstacle::*, piece_buffer::*, scoring::*};

mod config;
mod game_session;
mod hold;
mod obstacle;
mod piece_buffer;
mod scoring;
