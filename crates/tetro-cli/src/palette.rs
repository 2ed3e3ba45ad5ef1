//! Colour designs selectable from the menu.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use tetro_engine::{Block, PieceKind};

// `as u8` keeps the low byte of each channel.
#[expect(clippy::cast_possible_truncation)]
const fn rgb(hex: u32) -> Color {
    Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

const GARBAGE: Color = rgb(0x59_56_50);

/// Outline colour, then one colour per piece in `I J L O S T Z` order.
type Colors = (Option<Color>, [Color; PieceKind::LEN]);

const VIBRANT: Colors = (
    Some(rgb(0x96_96_96)),
    [
        rgb(0x77_77_ff),
        rgb(0x00_00_ff),
        rgb(0xff_77_00),
        rgb(0xdd_dd_00),
        rgb(0x00_ff_00),
        rgb(0x77_00_ff),
        rgb(0xff_00_00),
    ],
);

const GRAYSCALE: Colors = (
    Some(rgb(0x00_00_00)),
    [
        rgb(0x72_72_72),
        rgb(0x72_72_72),
        rgb(0x56_56_56),
        rgb(0x72_72_72),
        rgb(0x56_56_56),
        rgb(0x72_72_72),
        rgb(0x56_56_56),
    ],
);

const GOOGLE: Colors = (
    Some(rgb(0xff_ff_ff)),
    [
        rgb(0x00_87_44),
        rgb(0x00_57_e7),
        rgb(0xd6_2d_20),
        rgb(0xff_a7_00),
        rgb(0x00_87_44),
        rgb(0x00_57_e7),
        rgb(0xd6_2d_20),
    ],
);

const NO_OUTLINES: Colors = (None, VIBRANT.1);

const PASTEL: Colors = (
    Some(rgb(0x96_96_96)),
    [
        rgb(0xfe_a3_aa),
        rgb(0xf8_b8_8b),
        rgb(0xfa_f8_84),
        rgb(0xba_ed_91),
        rgb(0xb2_ce_fe),
        rgb(0xf2_a2_e8),
        rgb(0xfa_f8_84),
    ],
);

/// A named colour scheme for pieces, garbage and the board grid.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
pub enum Design {
    #[default]
    Vibrant,
    Grayscale,
    Google,
    #[display("No Outlines")]
    NoOutlines,
    Pastel,
}

impl Design {
    pub const ALL: [Self; 5] = [
        Self::Vibrant,
        Self::Grayscale,
        Self::Google,
        Self::NoOutlines,
        Self::Pastel,
    ];

    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn colors(self) -> &'static Colors {
        match self {
            Self::Vibrant => &VIBRANT,
            Self::Grayscale => &GRAYSCALE,
            Self::Google => &GOOGLE,
            Self::NoOutlines => &NO_OUTLINES,
            Self::Pastel => &PASTEL,
        }
    }

    /// Colour of the board grid and border; `None` draws no grid.
    #[must_use]
    pub fn outline(self) -> Option<Color> {
        self.colors().0
    }

    #[must_use]
    pub fn piece_color(self, kind: PieceKind) -> Color {
        let index = match kind {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        };
        self.colors().1[index]
    }

    /// Fill colour of a board cell, `None` for empty cells.
    #[must_use]
    pub fn block_color(self, block: Block) -> Option<Color> {
        match block {
            Block::Empty => None,
            Block::Garbage => Some(GARBAGE),
            Block::Piece(kind) => Some(self.piece_color(kind)),
        }
    }
}
