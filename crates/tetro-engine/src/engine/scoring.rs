use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of frames a message stays in the log.
pub const MESSAGE_LIFETIME_FRAMES: u32 = 90;

/// Cleared rows needed per level.
pub const ROWS_PER_LEVEL: usize = 5;

/// Notification kinds emitted by the scoring controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Four or more rows in one lock.
    Tetro,
    Triple,
    Double,
    NewHighScore,
    LevelUp,
}

impl MessageKind {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            MessageKind::Tetro => "Tetro!",
            MessageKind::Triple => "Triple Clear!",
            MessageKind::Double => "Double Clear!",
            MessageKind::NewHighScore => "New Highscore!",
            MessageKind::LevelUp => "Level Up!",
        }
    }

    /// RGB colour the message is drawn in.
    #[must_use]
    pub const fn color(self) -> (u8, u8, u8) {
        match self {
            MessageKind::Tetro => (0x09, 0xc6, 0x00),
            MessageKind::Triple | MessageKind::Double => (0x00, 0x00, 0x00),
            MessageKind::NewHighScore => (0xff, 0x79, 0x05),
            MessageKind::LevelUp => (0x2c, 0x89, 0xf4),
        }
    }
}

/// A pending notification and the number of frames it has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    kind: MessageKind,
    age: u32,
}

impl Message {
    #[must_use]
    pub const fn new(kind: MessageKind) -> Self {
        Self { kind, age: 0 }
    }

    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.kind
    }

    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }
}

/// Side-effect list of notifications, oldest first.
///
/// The engine only appends. Ageing and display belong to the presentation
/// layer, which calls [`advance_frame`](Self::advance_frame) once per frame.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLog {
    messages: VecDeque<Message>,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: MessageKind) {
        self.messages.push_back(Message::new(kind));
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Message> + '_ {
        self.messages.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Ages every message by one frame and drops the expired ones.
    pub fn advance_frame(&mut self) {
        for message in &mut self.messages {
            message.age += 1;
        }
        self.messages
            .retain(|message| message.age < MESSAGE_LIFETIME_FRAMES);
    }
}

/// Score, level and lock statistics of one session.
///
/// # Scoring
///
/// Each lock scores `500 × rows² + 2000 × multiplier`. The turn multiplier
/// counts consecutive clearing locks: a clear increments it before scoring, a
/// lock without a clear resets it to 0. The level rises every
/// [`ROWS_PER_LEVEL`] cumulative cleared rows.
///
/// # Example
///
/// ```
/// use tetro_engine::{MessageKind, MessageLog, ScoreState};
///
/// let mut score = ScoreState::new(0);
/// let mut messages = MessageLog::new();
///
/// assert_eq!(score.award_points(4, &mut messages), 10_000);
/// assert_eq!(score.award_points(1, &mut messages), 4_500);
/// assert_eq!(score.level(), 2);
///
/// let kinds: Vec<_> = messages.iter().map(|m| m.kind()).collect();
/// assert_eq!(kinds, [MessageKind::Tetro, MessageKind::NewHighScore, MessageKind::LevelUp]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    points: u64,
    recorded_best: u64,
    cleared_rows: usize,
    level: u32,
    turn_multiplier: u64,
    completed_pieces: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for ScoreState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ScoreState {
    /// Creates a fresh score at level 1, measured against `recorded_best`.
    #[must_use]
    pub const fn new(recorded_best: u64) -> Self {
        Self {
            points: 0,
            recorded_best,
            cleared_rows: 0,
            level: 1,
            turn_multiplier: 0,
            completed_pieces: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn points(&self) -> u64 {
        self.points
    }

    /// Best score including the current session.
    #[must_use]
    pub fn best(&self) -> u64 {
        self.points.max(self.recorded_best)
    }

    #[must_use]
    pub const fn is_new_best(&self) -> bool {
        self.points > self.recorded_best
    }

    #[must_use]
    pub const fn cleared_rows(&self) -> usize {
        self.cleared_rows
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub const fn turn_multiplier(&self) -> u64 {
        self.turn_multiplier
    }

    /// Returns the total number of pieces that have been locked.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    /// Returns a histogram of locks by rows cleared.
    ///
    /// Index `n` counts the locks that cleared `n` rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Scores one lock that cleared `rows` rows and returns the points earned.
    ///
    /// Notifications are appended to `messages` in this order: clear size,
    /// new high score, level up.
    pub fn award_points(&mut self, rows: usize, messages: &mut MessageLog) -> u64 {
        match rows {
            0 | 1 => {}
            2 => messages.push(MessageKind::Double),
            3 => messages.push(MessageKind::Triple),
            _ => messages.push(MessageKind::Tetro),
        }

        if rows == 0 {
            self.turn_multiplier = 0;
        } else {
            self.turn_multiplier += 1;
        }

        let rows_u64 = rows as u64;
        let earned = 500 * rows_u64 * rows_u64 + 2000 * self.turn_multiplier;
        let new_points = self.points + earned;
        if self.points <= self.recorded_best && new_points > self.recorded_best {
            messages.push(MessageKind::NewHighScore);
        }
        self.points = new_points;

        let new_total = self.cleared_rows + rows;
        let gained = new_total / ROWS_PER_LEVEL - self.cleared_rows / ROWS_PER_LEVEL;
        for _ in 0..gained {
            self.level += 1;
            messages.push(MessageKind::LevelUp);
        }
        self.cleared_rows = new_total;

        self.completed_pieces += 1;
        self.line_cleared_counter[rows.min(4)] += 1;

        earned
    }
}
