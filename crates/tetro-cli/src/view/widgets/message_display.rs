use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};
use tetro_engine::{MessageKind, MessageLog};

/// Clear and level notifications, newest first.
#[derive(Debug)]
pub struct MessageDisplay<'a> {
    messages: &'a MessageLog,
    lines: u16,
    block: Option<BlockWidget<'a>>,
}

impl<'a> MessageDisplay<'a> {
    pub fn new(messages: &'a MessageLog, lines: u16) -> Self {
        Self {
            messages,
            lines,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        self.lines + super::block_vertical_margin(self.block.as_ref())
    }
}

fn message_style(kind: MessageKind) -> Style {
    // Black notifications would vanish on the black background.
    match kind.color() {
        (0, 0, 0) => Style::new().fg(Color::White),
        (r, g, b) => Style::new().fg(Color::Rgb(r, g, b)),
    }
}

impl Widget for MessageDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let lines: Vec<Line> = self
            .messages
            .iter()
            .rev()
            .take(usize::from(self.lines))
            .map(|message| Line::styled(message.kind().text(), message_style(message.kind())))
            .collect();
        Text::from(lines).centered().render(area, buf);
    }
}
