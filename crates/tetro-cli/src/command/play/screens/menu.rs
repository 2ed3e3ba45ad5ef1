use std::{rc::Rc, time::Duration};

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::Block,
};
use tetro_engine::{GameConfig, GameMode, GameSeed, PieceKind};

use crate::{
    command::play::screens::GameScreen,
    settings::SharedSettings,
    tui::{RenderMode, Runtime, Screen, ScreenTransition},
    view::widgets::{KeyHint, KeyHintDisplay, style},
};

const SEED_DIGITS: usize = 32;

const HINTS: &[KeyHint] = &[
    ("↑ ↓", "Select"),
    ("← →", "Change"),
    ("0-9 a-f", "Seed"),
    ("Enter", "Confirm"),
    ("Esc", "Quit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Start,
    Mode,
    Seed,
    KillScreen,
    Design,
    Quit,
}

impl MenuItem {
    const ALL: [Self; 6] = [
        Self::Start,
        Self::Mode,
        Self::Seed,
        Self::KillScreen,
        Self::Design,
        Self::Quit,
    ];
}

/// Title menu: game options and the start button.
#[derive(Debug)]
pub struct MenuScreen {
    config: GameConfig,
    seed_input: String,
    selected: usize,
    settings: SharedSettings,
    status: Option<String>,
}

impl MenuScreen {
    pub fn new(config: GameConfig, settings: SharedSettings) -> Self {
        Self {
            seed_input: config.seed.map(|seed| seed.to_string()).unwrap_or_default(),
            config,
            selected: 0,
            settings,
            status: None,
        }
    }

    fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    fn move_selection(&mut self, forward: bool) {
        let len = MenuItem::ALL.len();
        self.selected = if forward {
            (self.selected + 1) % len
        } else {
            (self.selected + len - 1) % len
        };
    }

    fn change(&mut self, forward: bool) {
        match self.selected() {
            MenuItem::Mode => {
                let modes = GameMode::ALL;
                let index = modes.iter().position(|m| *m == self.config.mode).unwrap_or(0);
                let index = if forward {
                    (index + 1) % modes.len()
                } else {
                    (index + modes.len() - 1) % modes.len()
                };
                self.config.mode = modes[index];
            }
            MenuItem::KillScreen => self.config.kill_screen = !self.config.kill_screen,
            MenuItem::Design => {
                let mut settings = self.settings.borrow_mut();
                let design = settings.settings().design;
                let design = if forward { design.next() } else { design.prev() };
                self.status = settings.set_design(design).err().map(|e| format!("{e:#}"));
            }
            MenuItem::Start | MenuItem::Seed | MenuItem::Quit => {}
        }
    }

    fn edit_seed(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_hexdigit() && self.seed_input.len() < SEED_DIGITS => {
                self.seed_input.push(c.to_ascii_lowercase());
            }
            KeyCode::Backspace => _ = self.seed_input.pop(),
            _ => {}
        }
    }

    /// Builds the game of the current options. An empty seed draws a fresh one.
    fn start(&mut self) -> ScreenTransition {
        let seed = if self.seed_input.is_empty() {
            None
        } else {
            match self.seed_input.parse::<GameSeed>() {
                Ok(seed) => Some(seed),
                Err(e) => {
                    self.status = Some(e.to_string());
                    return ScreenTransition::Stay;
                }
            }
        };
        let config = GameConfig {
            seed,
            best_score: self.settings.borrow().settings().best_score,
            ..self.config.clone()
        };
        match GameScreen::new(config, Rc::clone(&self.settings)) {
            Ok(screen) => {
                self.status = None;
                ScreenTransition::Push(Box::new(screen))
            }
            Err(e) => {
                self.status = Some(e.to_string());
                ScreenTransition::Stay
            }
        }
    }

    fn item_line(&self, item: MenuItem) -> Line<'static> {
        let settings = self.settings.borrow();
        let (label, value) = match item {
            MenuItem::Start => ("Start", None),
            MenuItem::Mode => ("Game Mode", Some(format!("< {} >", self.config.mode.name()))),
            MenuItem::Seed => {
                let seed = if self.seed_input.is_empty() {
                    "random".to_owned()
                } else {
                    self.seed_input.clone()
                };
                ("Seed", Some(seed))
            }
            MenuItem::KillScreen => {
                let value = if self.config.kill_screen { "On" } else { "Off" };
                ("Kill Screen", Some(value.to_owned()))
            }
            MenuItem::Design => ("Design", Some(format!("< {} >", settings.settings().design))),
            MenuItem::Quit => ("Quit", None),
        };

        let label_style = if item == self.selected() {
            Style::new()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            style::DEFAULT
        };
        let mut spans = vec![Span::styled(format!(" {label} "), label_style)];
        if let Some(value) = value {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(value, Style::new().fg(Color::Cyan)));
        }
        Line::from(spans).centered()
    }

    fn design_preview(&self) -> Line<'static> {
        let design = self.settings.borrow().settings().design;
        let spans = PieceKind::ALL.into_iter().flat_map(|kind| {
            [
                Span::styled("  ", style::filled(design.piece_color(kind))),
                Span::raw(" "),
            ]
        });
        Line::from_iter(spans).centered()
    }
}

impl Screen for MenuScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(None);
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_press_event() else {
            return ScreenTransition::Stay;
        };
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ScreenTransition::Exit;
            }
            KeyCode::Esc => return ScreenTransition::Exit,
            KeyCode::Up => self.move_selection(false),
            KeyCode::Down => self.move_selection(true),
            KeyCode::Left => self.change(false),
            KeyCode::Right => self.change(true),
            KeyCode::Enter => match self.selected() {
                MenuItem::Start => return self.start(),
                MenuItem::Quit => return ScreenTransition::Exit,
                _ => self.change(true),
            },
            code if self.selected() == MenuItem::Seed => self.edit_seed(code),
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn update(&mut self, _runtime: &mut Runtime, _elapsed: Duration) {}

    fn draw(&self, frame: &mut Frame) {
        let best = self.settings.borrow().settings().best_score;
        let mut lines = vec![
            Line::styled("T E T R O", Style::new().add_modifier(Modifier::BOLD)).centered(),
            Line::styled(format!("Best score: {best}"), style::HINT).centered(),
            Line::default(),
        ];
        for item in MenuItem::ALL {
            lines.push(self.item_line(item));
            lines.push(Line::default());
        }
        lines.push(self.design_preview());
        if let Some(status) = &self.status {
            lines.push(Line::default());
            lines.push(Line::styled(status.clone(), Style::new().fg(Color::Red)).centered());
        }

        let [main_area, hint_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let text = Text::from(lines);
        let text_area = main_area.centered_vertically(Constraint::Length(
            u16::try_from(text.height()).unwrap_or(u16::MAX),
        ));
        frame.render_widget(Block::new().style(style::DEFAULT), main_area);
        frame.render_widget(text, text_area);
        frame.render_widget(KeyHintDisplay::new(HINTS), hint_area);
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, env, fs, process};

    use crossterm::event::KeyEvent;

    use super::*;
    use crate::{palette::Design, settings::SettingsStore};

    fn menu(name: &str) -> MenuScreen {
        let path = env::temp_dir()
            .join(format!("tetro-menu-{}", process::id()))
            .join(name)
            .join("settings.json");
        _ = fs::remove_file(&path);
        let settings = Rc::new(RefCell::new(SettingsStore::load(path).unwrap()));
        MenuScreen::new(GameConfig::default(), settings)
    }

    fn press(menu: &mut MenuScreen, code: KeyCode) -> ScreenTransition {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        menu.handle_event(&mut Runtime::new(), &event)
    }

    fn select(menu: &mut MenuScreen, item: MenuItem) {
        while menu.selected() != item {
            press(menu, KeyCode::Down);
        }
    }

    #[test]
    fn test_selection_wraps() {
        let mut menu = menu("wrap");
        press(&mut menu, KeyCode::Up);
        assert_eq!(menu.selected(), MenuItem::Quit);
        press(&mut menu, KeyCode::Down);
        assert_eq!(menu.selected(), MenuItem::Start);
    }

    #[test]
    fn test_mode_cycles_both_ways() {
        let mut menu = menu("mode");
        select(&mut menu, MenuItem::Mode);
        press(&mut menu, KeyCode::Right);
        assert_eq!(menu.config.mode, GameMode::Cleanup);
        press(&mut menu, KeyCode::Left);
        press(&mut menu, KeyCode::Left);
        assert_eq!(menu.config.mode, GameMode::Expanse);
    }

    #[test]
    fn test_seed_accepts_hex_digits_only() {
        let mut menu = menu("seed");
        select(&mut menu, MenuItem::Seed);
        for c in ['1', 'A', 'g', 'f', ' '] {
            press(&mut menu, KeyCode::Char(c));
        }
        assert_eq!(menu.seed_input, "1af");
        press(&mut menu, KeyCode::Backspace);
        assert_eq!(menu.seed_input, "1a");

        for _ in 0..40 {
            press(&mut menu, KeyCode::Char('0'));
        }
        assert_eq!(menu.seed_input.len(), SEED_DIGITS);
    }

    #[test]
    fn test_start_pushes_seeded_game() {
        let mut menu = menu("start");
        select(&mut menu, MenuItem::Seed);
        press(&mut menu, KeyCode::Char('7'));
        select(&mut menu, MenuItem::Start);
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            ScreenTransition::Push(_)
        ));
        assert!(menu.status.is_none());
    }

    #[test]
    fn test_design_change_is_saved() {
        let mut menu = menu("design");
        select(&mut menu, MenuItem::Design);
        press(&mut menu, KeyCode::Right);
        assert_eq!(menu.settings.borrow().settings().design, Design::Grayscale);
        assert!(menu.status.is_none());
    }

    #[test]
    fn test_kill_screen_toggles_on_enter() {
        let mut menu = menu("kill");
        select(&mut menu, MenuItem::KillScreen);
        press(&mut menu, KeyCode::Enter);
        assert!(!menu.config.kill_screen);
    }

    #[test]
    fn test_escape_and_quit_exit() {
        let mut menu = menu("quit");
        assert!(matches!(
            press(&mut menu, KeyCode::Esc),
            ScreenTransition::Exit
        ));
        select(&mut menu, MenuItem::Quit);
        assert!(matches!(
            press(&mut menu, KeyCode::Enter),
            ScreenTransition::Exit
        ));
    }
}
