use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};
use tetro_engine::{GameSession, SessionState};

use crate::{
    palette::Design,
    view::widgets::{
        BoardDisplay, MessageDisplay, PieceDisplay, PieceStackDisplay, SessionStatsDisplay, style,
    },
};

const NEXT_PIECES: usize = 5;
const MESSAGE_LINES: u16 = 4;

/// Whole game view: hold and stats, board, upcoming pieces and messages.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    design: Design,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession, design: Design) -> Self {
        Self { session, design }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session;
        let padding = Padding::horizontal(1);
        let border_color = match session.session_state() {
            SessionState::Playing => self.design.outline().unwrap_or(Color::White),
            SessionState::Paused => Color::Yellow,
            SessionState::GameOver => Color::Red,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(padding)
                .border_style(border_color)
                .style(style::DEFAULT)
        };

        let board = BoardDisplay::new(session.board(), self.design)
            .falling_piece(*session.falling_piece())
            .ghost(*session.drop_preview())
            .block(
                Block::bordered()
                    .border_style(border_color)
                    .style(style::DEFAULT),
            );
        let hold = PieceDisplay::new(self.design)
            .piece(session.held_piece())
            .dimmed(session.is_hold_used())
            .block(panel("HOLD"));
        let stats = SessionStatsDisplay::new(session).block(panel("STATS"));
        let next = PieceStackDisplay::new(session.next_pieces().take(NEXT_PIECES), self.design)
            .block(panel("NEXT"));
        let messages = MessageDisplay::new(session.messages(), MESSAGE_LINES).block(
            Block::bordered()
                .padding(padding)
                .border_style(border_color)
                .style(style::DEFAULT),
        );

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold.width(), stats.width())),
            Constraint::Length(board.width()),
            Constraint::Length(u16::max(next.width(), 18)),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold.height()),
            Constraint::Length(stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold.width())]).flex(Flex::End),
        )[0];

        let [next_area, message_area] = Layout::vertical([
            Constraint::Length(next.height()),
            Constraint::Length(messages.height()),
        ])
        .spacing(1)
        .areas(right_column);
        let next_area = next_area
            .layout::<1>(&Layout::horizontal([Constraint::Length(next.width())]))[0];

        let [board_area] =
            Layout::vertical([Constraint::Length(board.height())]).areas(center_column);
        let board_width = board.width();

        hold.render(hold_area, buf);
        stats.render(stats_area, buf);
        board.render(board_area, buf);
        next.render(next_area, buf);
        messages.render(message_area, buf);

        let popup = match session.session_state() {
            SessionState::Playing => None,
            SessionState::Paused => Some(("Paused", Style::new().fg(Color::Black).bg(Color::Yellow))),
            SessionState::GameOver => {
                Some(("Game Over", Style::new().fg(Color::White).bg(Color::Red)))
            }
        };
        if let Some((title, style)) = popup {
            let block = Block::new().style(style);
            let text = Text::from(vec![Line::from(title), Line::from("Press Enter to quit")])
                .style(style)
                .centered();
            let area = board_area.centered(Constraint::Length(board_width), Constraint::Length(4));
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(2)), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use tetro_engine::{GameConfig, GameSeed};

    use super::*;

    fn screen_text(session: &GameSession) -> String {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        SessionDisplay::new(session, Design::Vibrant).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn new_session() -> GameSession {
        GameSession::new(GameConfig {
            seed: Some(GameSeed::from(1)),
            ..GameConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_panels_are_drawn() {
        let text = screen_text(&new_session());
        for title in ["HOLD", "STATS", "NEXT", "SCORE:", "LEVEL:"] {
            assert!(text.contains(title), "missing {title}");
        }
        assert!(!text.contains("Paused"));
    }

    #[test]
    fn test_overlay_follows_session_state() {
        let mut session = new_session();
        session.pause();
        let text = screen_text(&session);
        assert!(text.contains("Paused"));
        assert!(text.contains("Press Enter to quit"));

        session.resume();
        while !session.session_state().is_game_over() {
            session.hard_drop();
        }
        assert!(screen_text(&session).contains("Game Over"));
    }
}
