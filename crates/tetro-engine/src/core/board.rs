use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{piece::Piece, shape::PieceKind};

/// A single cell of the board.
///
/// The filled-cell marker doubles as the render colour: a cell holding
/// [`Block::Piece`] is drawn in that piece's colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Block {
    /// Empty cell.
    #[default]
    Empty,
    /// Pre-filled obstacle cell not belonging to any piece.
    Garbage,
    /// Locked piece of a specific type.
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }

    #[must_use]
    pub fn is_filled(self) -> bool {
        !self.is_empty()
    }

    /// Returns the character used by the text form of a board.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Block::Empty => '.',
            Block::Garbage => '#',
            Block::Piece(kind) => kind.as_char(),
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Block::Empty),
            '#' => Some(Block::Garbage),
            _ => match PieceKind::from_char(c) {
                Some(kind) => Some(Block::Piece(kind)),
                None => None,
            },
        }
    }
}

/// One row of cells, `width` entries long.
pub type BoardRow = ArrayVec<Block, { Board::MAX_WIDTH }>;

/// The playfield: a `width × height` grid of [`Block`]s.
///
/// Row 0 is the top of the board. Pieces may hang above it (negative rows),
/// but every filled cell stored here lies inside `[0, width) × [0, height)`.
///
/// # Example
///
/// ```
/// use tetro_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::new(10, 22);
/// let piece = Piece::spawn(PieceKind::O, board.width());
/// let landed = board.drop_position(&piece);
/// board.write_piece(&landed);
/// assert!(board.cell_at(5, 21).is_filled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    rows: Vec<BoardRow>,
}

impl Board {
    /// Narrowest board on which every piece spawns inside the walls.
    pub const MIN_WIDTH: usize = 5;
    pub const MAX_WIDTH: usize = 16;

    /// Creates an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `width` is outside `MIN_WIDTH..=MAX_WIDTH`. Session
    /// configuration is validated before a board is built.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            (Self::MIN_WIDTH..=Self::MAX_WIDTH).contains(&width),
            "board width {width} out of range"
        );
        Self {
            width,
            rows: vec![Self::empty_row(width); height],
        }
    }

    fn empty_row(width: usize) -> BoardRow {
        (0..width).map(|_| Block::Empty).collect()
    }

    /// Builds a board from rows of text, `.` for empty, `#` for garbage and a
    /// piece letter for piece cells.
    ///
    /// # Panics
    ///
    /// Panics on an unknown character or rows of unequal width.
    #[must_use]
    pub fn from_ascii(lines: &[&str]) -> Self {
        let width = lines.first().map_or(0, |line| line.chars().count());
        let mut board = Self::new(width, 0);
        for line in lines {
            let row: BoardRow = line
                .chars()
                .map(|c| Block::from_char(c).unwrap_or_else(|| panic!("invalid board char {c:?}")))
                .collect();
            assert_eq!(row.len(), width, "ragged board row {line:?}");
            board.rows.push(row);
        }
        board
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.rows.iter().map(ArrayVec::as_slice)
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// Bounds are the caller's responsibility.
    ///
    /// # Panics
    ///
    /// Panics if the cell lies outside the board.
    #[must_use]
    pub fn cell_at(&self, x: usize, y: usize) -> Block {
        self.rows[y][x]
    }

    /// Returns the cell at a signed coordinate, or `None` outside the board.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Option<Block> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.rows.get(y)?.get(x).copied()
    }

    pub fn set(&mut self, x: usize, y: usize, block: Block) {
        self.rows[y][x] = block;
    }

    /// Writes the piece's cells into the board with the piece's colour.
    ///
    /// Must only be called with a position accepted by
    /// [`is_valid_position`](Self::is_valid_position). Cells above row 0 have
    /// nowhere to go and are dropped.
    pub fn write_piece(&mut self, piece: &Piece) {
        let block = Block::Piece(piece.kind());
        for (x, y) in piece.cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) {
                self.rows[y][x] = block;
            }
        }
    }

    /// Returns whether every cell of the piece lies within the side and bottom
    /// walls on an empty cell.
    ///
    /// Rows above the board (`y < 0`) are accepted.
    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        let width = i32::try_from(self.width).unwrap_or(i32::MAX);
        let height = i32::try_from(self.height()).unwrap_or(i32::MAX);
        piece.cells().all(|(x, y)| {
            if x < 0 || x >= width || y >= height {
                return false;
            }
            y < 0 || self.get(x, y).is_some_and(Block::is_empty)
        })
    }

    /// Returns the lowest position the piece reaches by moving straight down.
    ///
    /// The piece itself is returned if it cannot move at all.
    #[must_use]
    pub fn drop_position(&self, piece: &Piece) -> Piece {
        let mut current = *piece;
        loop {
            let next = current.down();
            if !self.is_valid_position(&next) {
                return current;
            }
            current = next;
        }
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|b| b.is_filled())
    }

    /// Returns the indices of all full rows, bottom row first.
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height())
            .rev()
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Removes the given rows and lets every row above settle down.
    ///
    /// Remaining rows keep their relative order; the vacated rows at the top
    /// are emptied. Indices may be given in any order.
    pub fn clear_and_collapse(&mut self, rows: &[usize]) {
        let height = self.height();
        let mut count = 0;
        for y in (0..height).rev() {
            if rows.contains(&y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y].clone();
            }
        }
        let empty = Self::empty_row(self.width);
        self.rows[..count.min(height)].fill(empty);
    }

    /// Clears every full row and returns how many were cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let full = self.full_rows();
        self.clear_and_collapse(&full);
        full.len()
    }

    /// Adds `rows` empty rows at the top of the board.
    ///
    /// Existing rows keep their distance from the floor.
    pub fn grow(&mut self, rows: usize) {
        let mut grown = vec![Self::empty_row(self.width); rows];
        grown.append(&mut self.rows);
        self.rows = grown;
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for block in row {
                write!(f, "{}", block.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Rows as strings, top first (e.g., ["..........", "IIII#....."])
        serializer.collect_seq(
            self.rows
                .iter()
                .map(|row| row.iter().map(|b| b.as_char()).collect::<String>()),
        )
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let lines = Vec::<String>::deserialize(deserializer)?;
        let width = lines.first().map_or(0, |line| line.chars().count());
        if !(Self::MIN_WIDTH..=Self::MAX_WIDTH).contains(&width) {
            return Err(serde::de::Error::custom(format!(
                "board width must be {}-{}, got {width}",
                Self::MIN_WIDTH,
                Self::MAX_WIDTH
            )));
        }
        let mut rows = Vec::with_capacity(lines.len());
        for line in &lines {
            let row = line
                .chars()
                .map(|c| {
                    Block::from_char(c).ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid board char: {c}"))
                    })
                })
                .collect::<Result<BoardRow, _>>()?;
            if row.len() != width {
                return Err(serde::de::Error::custom(format!(
                    "board rows must all be {width} wide, got '{line}'"
                )));
            }
            rows.push(row);
        }
        Ok(Self { width, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{piece::Position, shape::Orientation};

    fn piece(kind: PieceKind, x: i32, y: i32, orientation: u8) -> Piece {
        Piece::new(kind, Position::new(x, y), Orientation::new(orientation).unwrap())
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 22);
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 22);
        assert!(board.rows().flatten().all(|b| b.is_empty()));
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new(5, 4);
        assert_eq!(board.get(0, 0), Some(Block::Empty));
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(5, 0), None);
        assert_eq!(board.get(0, 4), None);
    }

    #[test]
    fn test_spawn_position_is_valid_for_every_shape() {
        for width in Board::MIN_WIDTH..=Board::MAX_WIDTH {
            let board = Board::new(width, 22);
            for kind in PieceKind::ALL {
                let piece = Piece::spawn(kind, width);
                assert!(
                    board.is_valid_position(&piece),
                    "{kind:?} on width {width}: {:?}",
                    piece.cells().collect::<Vec<_>>()
                );
            }
        }
    }

    #[test]
    #[should_panic(expected = "board width 4 out of range")]
    fn test_board_narrower_than_horizontal_i_spawn() {
        let _ = Board::new(4, 22);
    }

    #[test]
    fn test_is_valid_position_bounds() {
        let board = Board::new(10, 22);
        // I-piece horizontal: cells x-1..=x+2
        assert!(board.is_valid_position(&piece(PieceKind::I, 1, 5, 0)));
        assert!(!board.is_valid_position(&piece(PieceKind::I, 0, 5, 0)));
        assert!(board.is_valid_position(&piece(PieceKind::I, 7, 5, 0)));
        assert!(!board.is_valid_position(&piece(PieceKind::I, 8, 5, 0)));
        assert!(board.is_valid_position(&piece(PieceKind::I, 5, 21, 0)));
        assert!(!board.is_valid_position(&piece(PieceKind::I, 5, 22, 0)));
        // Above the top edge is allowed
        assert!(board.is_valid_position(&piece(PieceKind::I, 5, -3, 0)));
    }

    #[test]
    fn test_is_valid_position_rejects_overlap() {
        let board = Board::from_ascii(&[
            ".....", //
            ".....",
            "..#..",
            ".....",
        ]);
        // O-piece pivot (1, 1): anchor (2, 2) covers (1..=2, 1..=2)
        assert!(!board.is_valid_position(&piece(PieceKind::O, 2, 2, 0)));
        assert!(board.is_valid_position(&piece(PieceKind::O, 2, 1, 0)));
        assert!(board.is_valid_position(&piece(PieceKind::O, 1, 2, 0)));
    }

    #[test]
    fn test_write_piece_skips_cells_above_board() {
        let mut board = Board::new(5, 4);
        board.write_piece(&piece(PieceKind::I, 1, 0, 1));
        // I at orientation 1, pivot (-1, 1): column 2, rows -1..=2
        let expected = Board::from_ascii(&[
            "..I..", //
            "..I..",
            "..I..",
            ".....",
        ]);
        assert_eq!(board, expected);
    }

    #[test]
    fn test_drop_position() {
        let board = Board::from_ascii(&[
            ".....", //
            ".....",
            ".....",
            ".....",
            "#....",
            "#####",
        ]);
        let landed = board.drop_position(&piece(PieceKind::O, 2, 1, 0));
        assert_eq!(landed.position(), Position::new(2, 4));
        let landed = board.drop_position(&piece(PieceKind::O, 1, 1, 0));
        assert_eq!(landed.position(), Position::new(1, 3));
    }

    #[test]
    fn test_full_rows_bottom_first() {
        let board = Board::from_ascii(&[
            ".....", //
            "IIII#",
            "#.###",
            "#####",
        ]);
        assert_eq!(board.full_rows(), vec![3, 1]);
    }

    #[test]
    fn test_clear_and_collapse_two_rows() {
        let mut board = Board::from_ascii(&[
            "J....", //
            ".L...",
            "#####",
            "..S..",
            "IIII#",
            "...Z.",
        ]);
        board.clear_and_collapse(&[2, 4]);
        let expected = Board::from_ascii(&[
            ".....", //
            ".....",
            "J....",
            ".L...",
            "..S..",
            "...Z.",
        ]);
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_full_rows_counts() {
        let mut board = Board::from_ascii(&[
            ".....", //
            "T....",
            "TTT##",
            "#####",
        ]);
        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(
            board,
            Board::from_ascii(&[
                ".....", //
                ".....",
                ".....",
                "T....",
            ])
        );
        assert_eq!(board.clear_full_rows(), 0);
    }

    #[test]
    fn test_grow_adds_rows_at_top() {
        let mut board = Board::from_ascii(&[
            ".....", //
            "#.###",
        ]);
        board.grow(2);
        assert_eq!(
            board,
            Board::from_ascii(&[
                ".....", //
                ".....",
                ".....",
                "#.###",
            ])
        );
    }

    #[test]
    fn test_board_serialization() {
        let board = Board::from_ascii(&[
            ".....", //
            "I#.Z.",
        ]);
        let serialized = serde_json::to_string(&board).unwrap();
        assert_eq!(serialized, r#"[".....","I#.Z."]"#);
        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);

        assert!(serde_json::from_str::<Board>(r#"[".....","...."]"#).is_err());
        assert!(serde_json::from_str::<Board>(r#"["....x"]"#).is_err());
        assert!(serde_json::from_str::<Board>(r#"["...."]"#).is_err());
    }
}
