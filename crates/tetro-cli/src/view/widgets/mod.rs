use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_hint_display::*, message_display::*,
    piece_display::*, piece_stack_display::*, session_display::*, session_stats_display::*,
};

mod block_display;
mod board_display;
mod key_hint_display;
mod message_display;
mod piece_display;
mod piece_stack_display;
mod session_display;
mod session_stats_display;

pub mod style {
    use ratatui::style::{Color, Style};

    pub const DEFAULT: Style = Style::new().fg(Color::White).bg(Color::Black);
    pub const EMPTY: Style = Style::new().fg(Color::Black).bg(Color::Black);
    pub const DIMMED: Style = Style::new().fg(Color::DarkGray).bg(Color::DarkGray);
    pub const HINT: Style = Style::new().fg(Color::DarkGray);

    pub const fn filled(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const fn on_black(color: Color) -> Style {
        Style::new().fg(color).bg(Color::Black)
    }
}

fn saturating_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}
