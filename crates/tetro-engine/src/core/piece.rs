use serde::{Deserialize, Serialize};

use super::shape::{Orientation, PieceKind, Shape};

/// The falling piece: a shape kind at a board-space anchor and orientation.
///
/// Pieces are immutable values - movement and rotation return new `Piece`
/// instances, and the session decides whether to commit them after validation.
///
/// # Coordinate System
///
/// - `(0, 0)` is the top-left cell of the board
/// - X increases rightward (columns), Y increases downward (rows)
/// - The anchor may sit above the board (`y < 0`) while spawning or kicking
///
/// # Example
///
/// ```
/// use tetro_engine::{Piece, PieceKind};
///
/// let piece = Piece::spawn(PieceKind::T, 10);
/// let moved = piece.right();
/// let rotated = moved.rotated_cw();
/// assert_eq!(rotated.position().x(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: Position,
    orientation: Orientation,
    kind: PieceKind,
}

impl Serialize for Piece {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: "kind#orientation@x,y" (e.g., "S#1@4,-1")
        let s = format!(
            "{}#{}@{},{}",
            self.kind.as_char(),
            self.orientation.index(),
            self.position.x,
            self.position.y
        );
        serializer.serialize_str(&s)
    }
}

impl<'de> Deserialize<'de> for Piece {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let (kind_str, rest) = s.split_once('#').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing '#' in format 'kind#orientation@x,y', got '{s}'"
            ))
        })?;
        let mut kind_chars = kind_str.chars();
        let (Some(kind_char), None) = (kind_chars.next(), kind_chars.next()) else {
            return Err(serde::de::Error::custom(format!(
                "piece kind must be single character, got '{kind_str}'"
            )));
        };
        let kind = PieceKind::from_char(kind_char)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid piece kind: {kind_char}")))?;

        let (orientation_str, position_str) = rest.split_once('@').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing '@' in format 'kind#orientation@x,y', got '{s}'"
            ))
        })?;
        let orientation = orientation_str
            .parse::<u8>()
            .ok()
            .and_then(Orientation::new)
            .ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "orientation must be 0-3, got '{orientation_str}'"
                ))
            })?;

        let (x_str, y_str) = position_str.split_once(',').ok_or_else(|| {
            serde::de::Error::custom(format!(
                "missing ',' in format 'kind#orientation@x,y', got '{s}'"
            ))
        })?;
        let x = x_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid x position: {x_str} ({e})")))?;
        let y = y_str
            .parse::<i32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid y position: {y_str} ({e})")))?;

        Ok(Piece {
            position: Position::new(x, y),
            orientation,
            kind,
        })
    }
}

impl Piece {
    #[must_use]
    pub const fn new(kind: PieceKind, position: Position, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
            kind,
        }
    }

    /// Creates a piece at the spawn position of a board `grid_width` columns wide.
    ///
    /// The anchor is the horizontal center of the board, and the vertical anchor
    /// puts the top of the orientation-0 bounding box on row 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let orientation = Orientation::default();
        let (_, center_y) = kind.shape().pivot(orientation);
        let x = i32::try_from(grid_width / 2).unwrap_or(i32::MAX);
        Self::new(kind, Position::new(x, center_y), orientation)
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape()
    }

    /// Returns an iterator over the board cells covered by this piece.
    ///
    /// Cells may lie outside the board; bounds are the placement validator's concern.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + use<> {
        let shape = self.kind.shape();
        let (center_x, center_y) = shape.pivot(self.orientation);
        let origin_x = self.position.x - center_x;
        let origin_y = self.position.y - center_y;
        shape
            .tiles(self.orientation)
            .map(move |(dx, dy)| (origin_x + i32::from(dx), origin_y + i32::from(dy)))
    }

    /// Returns this piece translated by `(dx, dy)`.
    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: Position::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    #[must_use]
    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..*self
        }
    }

    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        self.with_orientation(self.orientation.rotated_cw())
    }

    #[must_use]
    pub fn rotated_ccw(&self) -> Self {
        self.with_orientation(self.orientation.rotated_ccw())
    }
}

/// Board-space anchor of a piece.
///
/// Stored as signed integers: pieces may hang above row 0, and candidate
/// positions left of column 0 must be representable so they can be rejected.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }
}
