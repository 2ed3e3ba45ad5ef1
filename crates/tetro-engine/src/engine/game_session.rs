use std::time::Duration;

use rand::Rng as _;
use serde::Serialize;

use crate::{
    ConfigError, HoldError, MoveError, PieceCollisionError,
    core::{
        board::Board,
        piece::Piece,
        shape::{PieceKind, RotationDirection},
    },
};

use super::{
    config::GameConfig,
    hold::HoldSlot,
    obstacle::{GameMode, expand_for_lock},
    piece_buffer::{GameRng, GameSeed, PieceBuffer},
    scoring::{MessageKind, MessageLog, ScoreState},
};

/// Gravity interval at level 1.
const BASE_GRAVITY_MILLIS: i64 = 1000;
/// Interval shortening per level.
const GRAVITY_STEP_MILLIS: i64 = 50;
/// Shortest interval when the kill screen is disabled (speed factor 0.2).
const MIN_GRAVITY_MILLIS: i64 = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Result of one lock, returned by the command that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockReport {
    pub cleared_rows: usize,
    pub points: u64,
    pub level_up: bool,
    /// Rows added by Expanse growth.
    pub grown_rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The piece moved down one row.
    Moved,
    /// The piece could not move down and was locked.
    Locked(LockReport),
    /// The game is paused or over.
    Ignored,
}

/// Returns the time between two gravity steps at `level`.
///
/// The interval is `1000 ms × (1 − (level − 1) × 0.05)`. Without the kill
/// screen it never drops below 200 ms; with it, it keeps shrinking until
/// gravity fires on every tick.
#[must_use]
pub fn gravity_interval(level: u32, kill_screen: bool) -> Duration {
    let millis = BASE_GRAVITY_MILLIS - GRAVITY_STEP_MILLIS * i64::from(level.saturating_sub(1));
    let floor = if kill_screen { 0 } else { MIN_GRAVITY_MILLIS };
    Duration::from_millis(millis.max(floor).unsigned_abs())
}

/// One game, from the first spawn to game over.
///
/// The session exclusively owns the board, the falling piece, the piece
/// supply with its random generator, the hold slot and the score. Every
/// mutation goes through its commands; rejected commands leave the state
/// untouched and report why.
#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    seed: GameSeed,
    rng: GameRng,
    board: Board,
    falling_piece: Piece,
    drop_preview: Piece,
    piece_buffer: PieceBuffer,
    hold: HoldSlot,
    score: ScoreState,
    messages: MessageLog,
    session_state: SessionState,
    since_gravity: Duration,
}

impl GameSession {
    /// Starts a new game: validates the configuration, seeds the board for the
    /// selected mode and spawns the first piece.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = seed.rng();
        let mut board = Board::new(config.grid_width, config.grid_height);
        let mut piece_buffer = PieceBuffer::new();
        config
            .mode
            .seed_board(&mut board, &mut piece_buffer, &mut rng);
        let first = piece_buffer.pop_next(&mut rng);
        let spawned = Piece::spawn(first, board.width());

        let mut this = Self {
            score: ScoreState::new(config.best_score),
            config,
            seed,
            rng,
            board,
            falling_piece: spawned,
            drop_preview: spawned,
            piece_buffer,
            hold: HoldSlot::new(),
            messages: MessageLog::new(),
            session_state: SessionState::Playing,
            since_gravity: Duration::ZERO,
        };
        this.spawn(first);
        Ok(this)
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed actually used, also when the configuration left it open.
    #[must_use]
    pub fn seed(&self) -> GameSeed {
        self.seed
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> &Piece {
        &self.falling_piece
    }

    /// Where the falling piece would land if dropped now.
    #[must_use]
    pub fn drop_preview(&self) -> &Piece {
        &self.drop_preview
    }

    #[must_use]
    pub fn held_piece(&self) -> Option<PieceKind> {
        self.hold.held()
    }

    #[must_use]
    pub fn is_hold_used(&self) -> bool {
        self.hold.is_used()
    }

    pub fn next_pieces(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.piece_buffer.next_pieces()
    }

    #[must_use]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[must_use]
    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    /// Mutable access for the presentation layer, which ages the messages.
    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    #[must_use]
    pub fn session_state(&self) -> &SessionState {
        &self.session_state
    }

    #[must_use]
    pub fn completed_pieces(&self) -> usize {
        self.score.completed_pieces()
    }

    #[must_use]
    pub fn line_cleared_counter(&self) -> &[usize; 5] {
        self.score.line_cleared_counter()
    }

    /// Current gravity interval for the session's level and kill screen setting.
    #[must_use]
    pub fn gravity_interval(&self) -> Duration {
        gravity_interval(self.score.level(), self.config.kill_screen)
    }

    /// Returns a serializable view of the whole query surface.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            seed: self.seed,
            mode: self.config.mode,
            state: &self.session_state,
            board: &self.board,
            falling_piece: self.falling_piece,
            drop_preview: self.drop_preview,
            held_piece: self.hold.held(),
            next_pieces: self.next_pieces().take(5).collect(),
            score: &self.score,
            messages: self.messages.iter().map(|m| m.kind()).collect(),
        }
    }

    pub fn pause(&mut self) {
        if self.session_state.is_playing() {
            self.session_state = SessionState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.session_state.is_paused() {
            self.session_state = SessionState::Playing;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver,
        };
    }

    /// Advances the gravity clock by `elapsed`.
    ///
    /// Fires at most one gravity step per call however much time passed, and
    /// restarts the clock when it does.
    pub fn tick(&mut self, elapsed: Duration) -> Option<DropOutcome> {
        if !self.session_state.is_playing() {
            return None;
        }
        self.since_gravity += elapsed;
        if self.since_gravity < self.gravity_interval() {
            return None;
        }
        self.since_gravity = Duration::ZERO;
        Some(self.soft_drop())
    }

    pub fn move_left(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.try_set_falling_piece(self.falling_piece.left())
    }

    pub fn move_right(&mut self) -> Result<(), MoveError> {
        self.ensure_playing()?;
        self.try_set_falling_piece(self.falling_piece.right())
    }

    pub fn rotate_cw(&mut self) -> Result<(), MoveError> {
        self.rotate(RotationDirection::Clockwise)
    }

    pub fn rotate_ccw(&mut self) -> Result<(), MoveError> {
        self.rotate(RotationDirection::CounterClockwise)
    }

    fn rotate(&mut self, direction: RotationDirection) -> Result<(), MoveError> {
        self.ensure_playing()?;
        let piece = self
            .falling_piece
            .rotated_on(&self.board, direction)
            .ok_or(MoveError::PieceCollision(PieceCollisionError))?;
        self.falling_piece = piece;
        self.update_drop_preview();
        Ok(())
    }

    /// Moves the piece down one row, locking it if it cannot move.
    pub fn soft_drop(&mut self) -> DropOutcome {
        if !self.session_state.is_playing() {
            return DropOutcome::Ignored;
        }
        let piece = self.falling_piece.down();
        if self.board.is_valid_position(&piece) {
            self.falling_piece = piece;
            return DropOutcome::Moved;
        }
        DropOutcome::Locked(self.lock())
    }

    /// Repeats [`soft_drop`](Self::soft_drop) until the piece locks.
    pub fn hard_drop(&mut self) -> DropOutcome {
        loop {
            match self.soft_drop() {
                DropOutcome::Moved => {}
                outcome => return outcome,
            }
        }
    }

    /// Swaps the falling piece with the hold slot, once per piece.
    ///
    /// With an empty slot the replacement comes from the piece supply. The new
    /// piece restarts at the spawn position; if it does not fit, the game is over.
    pub fn hold(&mut self) -> Result<(), HoldError> {
        if !self.session_state.is_playing() {
            return Err(HoldError::NotPlaying);
        }
        let previous = self
            .hold
            .swap(self.falling_piece.kind())
            .ok_or(HoldError::HoldAlreadyUsed)?;
        let next = previous.unwrap_or_else(|| self.piece_buffer.pop_next(&mut self.rng));
        self.spawn(next);
        Ok(())
    }

    fn ensure_playing(&self) -> Result<(), MoveError> {
        if self.session_state.is_playing() {
            Ok(())
        } else {
            Err(MoveError::NotPlaying)
        }
    }

    fn try_set_falling_piece(&mut self, piece: Piece) -> Result<(), MoveError> {
        if !self.board.is_valid_position(&piece) {
            return Err(MoveError::PieceCollision(PieceCollisionError));
        }
        self.falling_piece = piece;
        self.update_drop_preview();
        Ok(())
    }

    fn update_drop_preview(&mut self) {
        self.drop_preview = self.board.drop_position(&self.falling_piece);
    }

    fn lock(&mut self) -> LockReport {
        let piece = self.falling_piece;
        self.board.write_piece(&piece);
        let grown_rows = if self.config.mode == GameMode::Expanse {
            expand_for_lock(&mut self.board, &piece)
        } else {
            0
        };
        let cleared_rows = self.board.clear_full_rows();
        let level = self.score.level();
        let points = self.score.award_points(cleared_rows, &mut self.messages);

        let next = self.piece_buffer.pop_next(&mut self.rng);
        self.hold.reset_turn();
        self.spawn(next);

        LockReport {
            cleared_rows,
            points,
            level_up: self.score.level() > level,
            grown_rows,
        }
    }

    fn spawn(&mut self, kind: PieceKind) {
        let piece = Piece::spawn(kind, self.board.width());
        self.falling_piece = piece;
        if self.board.is_valid_position(&piece) {
            self.update_drop_preview();
        } else {
            self.drop_preview = piece;
            self.session_state = SessionState::GameOver;
        }
    }
}

/// Serializable view of a [`GameSession`].
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot<'a> {
    pub seed: GameSeed,
    pub mode: GameMode,
    pub state: &'a SessionState,
    pub board: &'a Board,
    pub falling_piece: Piece,
    pub drop_preview: Piece,
    pub held_piece: Option<PieceKind>,
    pub next_pieces: Vec<PieceKind>,
    pub score: &'a ScoreState,
    pub messages: Vec<MessageKind>,
}
