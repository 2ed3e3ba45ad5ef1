//! Game modes and the board rules that come with them.
//!
//! Modes only differ in how the board is seeded before the first piece spawns
//! and, for [`GameMode::Expanse`], in a growth rule applied on lock. Seeding
//! uses the same placement validation as normal play.

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{
    Block, Board, Orientation, Piece, Position,
    engine::{
        config::MAX_GRID_HEIGHT,
        piece_buffer::{GameRng, PieceBuffer},
    },
};

/// Clutter placement stops at the first piece that would land at or above this row.
const CLUTTER_STOP_ROW: i32 = 8;
/// Topmost row filled with garbage.
const GARBAGE_TOP_ROW: usize = 10;
/// Locking with the anchor at or above this row grows an Expanse board.
const EXPANSE_TRIGGER_ROW: i32 = 6;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Normal,
    /// Low, randomly gapped pieces pre-placed near the floor.
    Cleanup,
    /// Pre-filled rows, each missing exactly one cell.
    GarbageRemoval,
    /// The board grows whenever the stack gets close to the top.
    Expanse,
}

impl GameMode {
    pub const ALL: [Self; 4] = [
        GameMode::Normal,
        GameMode::Cleanup,
        GameMode::GarbageRemoval,
        GameMode::Expanse,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GameMode::Normal => "Normal",
            GameMode::Cleanup => "Cleanup",
            GameMode::GarbageRemoval => "Garbage Removal",
            GameMode::Expanse => "Expanse",
        }
    }

    /// Applies this mode's initial obstacles to a fresh board.
    pub fn seed_board(self, board: &mut Board, buffer: &mut PieceBuffer, rng: &mut GameRng) {
        match self {
            GameMode::Normal | GameMode::Expanse => {}
            GameMode::Cleanup => seed_clutter(board, buffer, rng),
            GameMode::GarbageRemoval => seed_garbage(board, rng),
        }
    }
}

/// Drops pieces from the supply onto the board until one would land too high.
///
/// Each piece gets a random orientation among the first three and a random
/// column that keeps its footprint centred on the board. The first piece whose
/// landing row is at or above row 8 (or that cannot enter the board at all) is
/// discarded and ends the seeding; it is still consumed from the supply.
pub fn seed_clutter(board: &mut Board, buffer: &mut PieceBuffer, rng: &mut GameRng) {
    let grid_width = i32::try_from(board.width()).unwrap_or(i32::MAX);
    loop {
        let kind = buffer.pop_next(rng);
        let orientation = Orientation::ALL[rng.random_range(0..3)];
        let shape = kind.shape();
        let width = i32::from(shape.width(orientation));
        let lo = width / 2;
        let hi = (2 * grid_width - width) / 2;
        let x = if lo < hi { rng.random_range(lo..hi) } else { lo };
        let (_, center_y) = shape.pivot(orientation);

        let piece = Piece::new(kind, Position::new(x, center_y), orientation);
        if !board.is_valid_position(&piece) {
            break;
        }
        let landed = board.drop_position(&piece);
        if landed.position().y() <= CLUTTER_STOP_ROW {
            break;
        }
        board.write_piece(&landed);
    }
}

/// Fills every row from the floor up to row 10 with garbage, leaving one random
/// empty column per row.
pub fn seed_garbage(board: &mut Board, rng: &mut GameRng) {
    for y in (GARBAGE_TOP_ROW..board.height()).rev() {
        let air = rng.random_range(0..board.width());
        for x in 0..board.width() {
            if x != air {
                board.set(x, y, Block::Garbage);
            }
        }
    }
}

/// Grows the board under a piece that just locked near the top.
///
/// When the lock anchor is at or above row 6 and the board is shorter than the
/// height cap, empty rows as tall as the piece are added at the top. Returns the
/// number of rows added.
pub fn expand_for_lock(board: &mut Board, piece: &Piece) -> usize {
    if piece.position().y() > EXPANSE_TRIGGER_ROW || board.height() >= MAX_GRID_HEIGHT {
        return 0;
    }
    let rows = usize::from(piece.shape().height(piece.orientation()));
    board.grow(rows);
    rows
}
