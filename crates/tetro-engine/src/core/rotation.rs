//! Rotation with generic wall kicks.
//!
//! Instead of a per-shape kick table, the candidate translations are derived
//! from the footprint of the piece at its target orientation: every horizontal
//! shift up to half its width, then every vertical shift up to half its height,
//! tried nearest first.

use arrayvec::ArrayVec;

use super::{
    board::Board,
    piece::Piece,
    shape::{Orientation, PieceKind, RotationDirection},
};

/// Returns the kick offsets tried for `kind` arriving at `orientation`.
///
/// Offsets are ordered by Manhattan distance. Ties keep generation order:
/// horizontal before vertical, each in ascending offset value.
///
/// # Example
///
/// ```
/// use tetro_engine::{Orientation, PieceKind, kick_offsets};
///
/// let offsets = kick_offsets(PieceKind::I, Orientation::default());
/// assert_eq!(offsets.as_slice(), &[(-1, 0), (1, 0), (-2, 0), (2, 0)]);
/// ```
#[must_use]
pub fn kick_offsets(kind: PieceKind, orientation: Orientation) -> ArrayVec<(i32, i32), 8> {
    let shape = kind.shape();
    let half_width = i32::from(shape.width(orientation) / 2);
    let half_height = i32::from(shape.height(orientation) / 2);

    let mut offsets = ArrayVec::new();
    offsets.extend(
        (-half_width..=half_width)
            .filter(|&dx| dx != 0)
            .map(|dx| (dx, 0)),
    );
    offsets.extend(
        (-half_height..=half_height)
            .filter(|&dy| dy != 0)
            .map(|dy| (0, dy)),
    );
    // stable
    offsets.sort_by_key(|&(dx, dy): &(i32, i32)| dx.abs() + dy.abs());
    offsets
}

impl Piece {
    /// Rotates the piece one step, kicking it to the nearest valid anchor if the
    /// unmodified anchor collides.
    ///
    /// Returns `None` if no candidate fits; the piece is left untouched.
    #[must_use]
    pub fn rotated_on(&self, board: &Board, direction: RotationDirection) -> Option<Self> {
        let orientation = self.orientation().rotated(direction);
        let rotated = self.with_orientation(orientation);
        if board.is_valid_position(&rotated) {
            return Some(rotated);
        }
        kick_offsets(self.kind(), orientation)
            .into_iter()
            .map(|(dx, dy)| rotated.shifted(dx, dy))
            .find(|candidate| board.is_valid_position(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::piece::Position;

    fn orientation(index: u8) -> Orientation {
        Orientation::new(index).unwrap()
    }

    #[test]
    fn test_kick_offsets_order() {
        assert_eq!(
            kick_offsets(PieceKind::T, orientation(0)).as_slice(),
            &[(-1, 0), (1, 0), (0, -1), (0, 1)]
        );
        assert_eq!(
            kick_offsets(PieceKind::I, orientation(1)).as_slice(),
            &[(0, -1), (0, 1), (0, -2), (0, 2)]
        );
        assert_eq!(
            kick_offsets(PieceKind::O, orientation(3)).as_slice(),
            &[(-1, 0), (1, 0), (0, -1), (0, 1)]
        );
        // T at orientation 1 is 2 wide and 3 tall
        assert_eq!(
            kick_offsets(PieceKind::T, orientation(1)).as_slice(),
            &[(-1, 0), (1, 0), (0, -1), (0, 1)]
        );
    }

    #[test]
    fn test_rotation_without_kick_keeps_anchor() {
        let board = Board::new(10, 22);
        let piece = Piece::new(PieceKind::T, Position::new(4, 5), orientation(0));
        let rotated = piece
            .rotated_on(&board, RotationDirection::Clockwise)
            .unwrap();
        assert_eq!(rotated.position(), piece.position());
        assert_eq!(rotated.orientation(), orientation(1));

        let rotated = piece
            .rotated_on(&board, RotationDirection::CounterClockwise)
            .unwrap();
        assert_eq!(rotated.orientation(), orientation(3));
    }

    #[test]
    fn test_wall_kick_picks_nearest_valid_offset() {
        let board = Board::new(10, 22);
        // Vertical I hugging the left wall: column 0
        let piece = Piece::new(PieceKind::I, Position::new(-1, 5), orientation(1));
        assert!(board.is_valid_position(&piece));

        // Orientation 2 spans x-1..=x+2; shifts of -1, +1 and -2 still cross the wall
        let rotated = piece
            .rotated_on(&board, RotationDirection::Clockwise)
            .unwrap();
        assert_eq!(rotated.orientation(), orientation(2));
        assert_eq!(rotated.position(), Position::new(1, 5));
    }

    #[test]
    fn test_floor_kick_moves_up() {
        let board = Board::new(10, 22);
        let piece = Piece::new(PieceKind::I, Position::new(5, 21), orientation(0));
        let rotated = piece
            .rotated_on(&board, RotationDirection::Clockwise)
            .unwrap();
        // Up one still touches row 22, up two is the nearest fit
        assert_eq!(rotated.position(), Position::new(5, 19));
        assert!(board.is_valid_position(&rotated));
    }

    #[test]
    fn test_wall_kick_prefers_distance_one() {
        let board = Board::from_ascii(&[
            "..........", //
            "..........",
            "..........",
            "..........",
            "..........",
            "..........",
        ]);
        // T at orientation 1 against the right wall: rotating to 2 widens it past column 9
        let piece = Piece::new(PieceKind::T, Position::new(9, 3), orientation(1));
        assert!(board.is_valid_position(&piece));
        let rotated = piece
            .rotated_on(&board, RotationDirection::Clockwise)
            .unwrap();
        assert_eq!(rotated.orientation(), orientation(2));
        assert_eq!(rotated.position(), Position::new(8, 3));
    }

    #[test]
    fn test_blocked_rotation_is_rejected() {
        let board = Board::from_ascii(&[
            ".....", //
            ".....",
            ".....",
            ".....",
            "#####",
            ".....",
        ]);
        let piece = Piece::new(PieceKind::I, Position::new(1, 5), orientation(0));
        assert!(board.is_valid_position(&piece));
        assert_eq!(
            piece.rotated_on(&board, RotationDirection::Clockwise),
            None
        );
    }
}
