use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// The discriminant order matches the order pieces are put into a fresh bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// J-piece.
    J = 1,
    /// L-piece.
    L = 2,
    /// O-piece.
    O = 3,
    /// S-piece.
    S = 4,
    /// T-piece.
    T = 5,
    /// Z-piece.
    Z = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in bag order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Returns the immutable shape definition of this piece kind.
    #[must_use]
    pub fn shape(self) -> &'static Shape {
        &SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetro_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::T => 'T',
            PieceKind::Z => 'Z',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetro_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('Z'), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'T' => Some(PieceKind::T),
            'Z' => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Direction of a single 90° rotation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    /// Orientation index + 1.
    Clockwise,
    /// Orientation index − 1.
    CounterClockwise,
}

/// Rotation state of a piece.
///
/// One of four states read clockwise in 90° steps:
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation(u8);

impl Orientation {
    pub const ALL: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Creates an orientation from its index, or `None` if it is not in `0..4`.
    #[must_use]
    pub const fn new(index: u8) -> Option<Self> {
        if index < 4 { Some(Self(index)) } else { None }
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Odd orientations swap the base width and height.
    #[must_use]
    pub const fn is_odd(self) -> bool {
        self.0 % 2 != 0
    }

    #[must_use]
    pub const fn rotated(self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotated_cw(),
            RotationDirection::CounterClockwise => self.rotated_ccw(),
        }
    }

    #[must_use]
    pub const fn rotated_cw(self) -> Self {
        Self((self.0 + 1) % 4)
    }

    #[must_use]
    pub const fn rotated_ccw(self) -> Self {
        Self((self.0 + 3) % 4)
    }
}

/// Immutable geometry of one tetromino.
///
/// A shape is stored once, at orientation 0, as a `height × width` bitmap.
/// Every other orientation is derived on the fly by [`Shape::has_tile`], so no
/// rotated copies exist. Each orientation also carries an explicit pivot that
/// anchors the footprint on the board.
#[derive(Debug)]
pub struct Shape {
    kind: PieceKind,
    width: u8,
    height: u8,
    pivots: [(i8, i8); 4],
    tiles: &'static [&'static [bool]],
}

impl Shape {
    /// Builds a shape, checking that the bitmap matches the declared size.
    ///
    /// # Panics
    ///
    /// Panics if `tiles` is not exactly `height` rows of `width` cells, or if no
    /// cell is occupied. For the built-in shapes this is checked at compile time.
    #[must_use]
    pub const fn new(
        kind: PieceKind,
        width: u8,
        height: u8,
        pivots: [(i8, i8); 4],
        tiles: &'static [&'static [bool]],
    ) -> Self {
        assert!(width > 0 && height > 0, "shape must not be empty");
        assert!(
            tiles.len() == height as usize,
            "bitmap row count must equal the declared height"
        );
        let mut occupied = 0;
        let mut y = 0;
        while y < tiles.len() {
            assert!(
                tiles[y].len() == width as usize,
                "bitmap row length must equal the declared width"
            );
            let mut x = 0;
            while x < tiles[y].len() {
                if tiles[y][x] {
                    occupied += 1;
                }
                x += 1;
            }
            y += 1;
        }
        assert!(occupied > 0, "shape must occupy at least one cell");
        Self {
            kind,
            width,
            height,
            pivots,
            tiles,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Width of the footprint at the given orientation.
    #[must_use]
    pub const fn width(&self, orientation: Orientation) -> u8 {
        if orientation.is_odd() {
            self.height
        } else {
            self.width
        }
    }

    /// Height of the footprint at the given orientation.
    #[must_use]
    pub const fn height(&self, orientation: Orientation) -> u8 {
        if orientation.is_odd() {
            self.width
        } else {
            self.height
        }
    }

    /// Pivot `(center_x, center_y)` of the footprint at the given orientation.
    ///
    /// A piece anchored at `(x, y)` places footprint cell `(fx, fy)` on the board
    /// at `(x - center_x + fx, y - center_y + fy)`.
    #[must_use]
    pub fn pivot(&self, orientation: Orientation) -> (i32, i32) {
        let (x, y) = self.pivots[usize::from(orientation.index())];
        (i32::from(x), i32::from(y))
    }

    /// Returns whether footprint cell `(x, y)` is occupied at the given orientation.
    ///
    /// The query cell is mapped back into the orientation-0 bitmap:
    ///
    /// - `0`: `(x, y)`
    /// - `1`: `(w - 1 - y, x)`
    /// - `2`: `(w - 1 - x, h - 1 - y)`
    /// - `3`: `(y, h - 1 - x)`
    ///
    /// Cells outside the footprint are never occupied.
    #[must_use]
    pub fn has_tile(&self, x: u8, y: u8, orientation: Orientation) -> bool {
        if x >= self.width(orientation) || y >= self.height(orientation) {
            return false;
        }
        let (w, h) = (self.width, self.height);
        let (real_x, real_y) = match orientation.index() {
            0 => (x, y),
            1 => (w - 1 - y, x),
            2 => (w - 1 - x, h - 1 - y),
            _ => (y, h - 1 - x),
        };
        self.tiles[usize::from(real_y)][usize::from(real_x)]
    }

    /// Returns an iterator over the occupied footprint cells at the given orientation.
    pub fn tiles(&self, orientation: Orientation) -> impl Iterator<Item = (u8, u8)> + '_ {
        let width = self.width(orientation);
        (0..self.height(orientation)).flat_map(move |y| {
            (0..width)
                .filter(move |&x| self.has_tile(x, y, orientation))
                .map(move |x| (x, y))
        })
    }
}

const DEFAULT_PIVOTS: [(i8, i8); 4] = [(1, 1), (1, 1), (1, 0), (0, 1)];

static SHAPES: [Shape; PieceKind::LEN] = {
    const X: bool = true;
    const E: bool = false;
    [
        Shape::new(
            PieceKind::I,
            4,
            1,
            [(1, 0), (-1, 1), (1, -1), (0, 1)],
            &[&[X, X, X, X]],
        ),
        Shape::new(PieceKind::J, 3, 2, DEFAULT_PIVOTS, &[&[X, E, E], &[X, X, X]]),
        Shape::new(PieceKind::L, 3, 2, DEFAULT_PIVOTS, &[&[E, E, X], &[X, X, X]]),
        Shape::new(PieceKind::O, 2, 2, [(1, 1); 4], &[&[X, X], &[X, X]]),
        Shape::new(PieceKind::S, 3, 2, DEFAULT_PIVOTS, &[&[E, X, X], &[X, X, E]]),
        Shape::new(PieceKind::T, 3, 2, DEFAULT_PIVOTS, &[&[E, X, E], &[X, X, X]]),
        Shape::new(PieceKind::Z, 3, 2, DEFAULT_PIVOTS, &[&[X, X, E], &[E, X, X]]),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    fn footprint(shape: &Shape, orientation: Orientation) -> Vec<(u8, u8)> {
        shape.tiles(orientation).collect()
    }

    #[test]
    fn test_shape_table_order_matches_kind() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.shape().kind(), kind);
        }
    }

    #[test]
    fn test_every_shape_has_four_tiles_at_every_orientation() {
        for kind in PieceKind::ALL {
            for orientation in Orientation::ALL {
                assert_eq!(
                    kind.shape().tiles(orientation).count(),
                    4,
                    "{kind:?} at {orientation:?}"
                );
            }
        }
    }

    #[test]
    fn test_width_height_swap_on_odd_orientation() {
        let shape = PieceKind::I.shape();
        assert_eq!(
            (shape.width(Orientation(0)), shape.height(Orientation(0))),
            (4, 1)
        );
        assert_eq!(
            (shape.width(Orientation(1)), shape.height(Orientation(1))),
            (1, 4)
        );
        assert_eq!(
            (shape.width(Orientation(2)), shape.height(Orientation(2))),
            (4, 1)
        );
        assert_eq!(
            (shape.width(Orientation(3)), shape.height(Orientation(3))),
            (1, 4)
        );
    }

    #[test]
    fn test_t_piece_rotations() {
        let shape = PieceKind::T.shape();
        // .X.
        // XXX
        assert_eq!(
            footprint(shape, Orientation(0)),
            vec![(1, 0), (0, 1), (1, 1), (2, 1)]
        );
        // .X
        // XX
        // .X
        assert_eq!(
            footprint(shape, Orientation(1)),
            vec![(1, 0), (0, 1), (1, 1), (1, 2)]
        );
        // XXX
        // .X.
        assert_eq!(
            footprint(shape, Orientation(2)),
            vec![(0, 0), (1, 0), (2, 0), (1, 1)]
        );
        // X.
        // XX
        // X.
        assert_eq!(
            footprint(shape, Orientation(3)),
            vec![(0, 0), (0, 1), (1, 1), (0, 2)]
        );
    }

    /// Turns a footprint by one orientation step: `(x, y) -> (y, width - 1 - x)`.
    fn quarter_turn(footprint: &[(u8, u8)], width: u8) -> Vec<(u8, u8)> {
        let mut turned: Vec<_> = footprint.iter().map(|&(x, y)| (y, width - 1 - x)).collect();
        turned.sort_by_key(|&(x, y)| (y, x));
        turned
    }

    #[test]
    fn test_clockwise_step_is_a_quarter_turn_of_the_footprint() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            for orientation in Orientation::ALL {
                let turned = quarter_turn(&footprint(shape, orientation), shape.width(orientation));
                assert_eq!(
                    turned,
                    footprint(shape, orientation.rotated_cw()),
                    "{kind:?} from {orientation:?}"
                );
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_return_to_original_footprint() {
        for kind in PieceKind::ALL {
            let shape = kind.shape();
            for start in Orientation::ALL {
                let original = footprint(shape, start);
                let mut cells = original.clone();
                let mut orientation = start;
                for _ in 0..4 {
                    cells = quarter_turn(&cells, shape.width(orientation));
                    orientation = orientation.rotated_cw();
                    assert_eq!(cells, footprint(shape, orientation), "{kind:?} at {orientation:?}");
                }
                assert_eq!(orientation, start);
                assert_eq!(cells, original, "{kind:?} from {start:?}");
                assert_eq!(orientation.rotated_cw().rotated_ccw(), start);
            }
        }
    }

    #[test]
    fn test_has_tile_outside_footprint_is_false() {
        let shape = PieceKind::O.shape();
        assert!(!shape.has_tile(2, 0, Orientation(0)));
        assert!(!shape.has_tile(0, 2, Orientation(3)));
        let shape = PieceKind::I.shape();
        assert!(!shape.has_tile(1, 0, Orientation(1)));
    }

    #[test]
    fn test_orientation_wraps() {
        assert_eq!(Orientation(3).rotated_cw(), Orientation(0));
        assert_eq!(Orientation(0).rotated_ccw(), Orientation(3));
        assert_eq!(
            Orientation(2).rotated(RotationDirection::CounterClockwise),
            Orientation(1)
        );
        assert_eq!(Orientation::new(4), None);
    }

    #[test]
    #[should_panic(expected = "bitmap row length must equal the declared width")]
    fn test_malformed_shape_is_rejected() {
        static TILES: &[&[bool]] = &[&[true, true], &[true, true]];
        let _ = Shape::new(PieceKind::O, 3, 2, [(1, 1); 4], TILES);
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('x'), None);
    }
}
