use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Key and the action it triggers, e.g. `("Esc", "Pause")`.
pub type KeyHint = (&'static str, &'static str);

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const ACTION_STYLE: Style = Style::new().fg(Color::Gray);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);

/// One centered line of key hints.
#[derive(Debug)]
pub struct KeyHintDisplay<'a> {
    hints: &'a [KeyHint],
}

impl<'a> KeyHintDisplay<'a> {
    pub fn new(hints: &'a [KeyHint]) -> Self {
        Self { hints }
    }
}

impl Widget for KeyHintDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans = self
            .hints
            .iter()
            .enumerate()
            .flat_map(|(i, (key, action))| {
                let separator = (i > 0).then(|| Span::styled(" | ", SEPARATOR_STYLE));
                separator.into_iter().chain([
                    Span::styled(*key, KEY_STYLE),
                    Span::raw(" "),
                    Span::styled(*action, ACTION_STYLE),
                ])
            });
        Line::from_iter(spans).centered().render(area, buf);
    }
}
