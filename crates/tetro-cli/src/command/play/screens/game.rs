use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};
use tetro_engine::{ConfigError, GameConfig, GameSession, SessionState};

use crate::{
    settings::SharedSettings,
    tui::{RenderMode, Runtime, Screen, ScreenTransition},
    view::widgets::{KeyHint, KeyHintDisplay, SessionDisplay, style},
};

const FPS: f64 = 60.0;

const PLAYING_HINTS: &[KeyHint] = &[
    ("← →", "Move"),
    ("↓", "Soft Drop"),
    ("Space", "Hard Drop"),
    ("Q E", "Rotate"),
    ("Tab", "Hold"),
    ("Esc", "Pause"),
];
const PAUSED_HINTS: &[KeyHint] = &[("Esc", "Resume"), ("Enter", "Quit")];
const GAME_OVER_HINTS: &[KeyHint] = &[("Enter", "Quit")];

/// A running game. Returns to the menu when quit.
#[derive(Debug)]
pub struct GameScreen {
    session: GameSession,
    settings: SharedSettings,
    score_recorded: bool,
    status: Option<String>,
}

impl GameScreen {
    pub fn new(config: GameConfig, settings: SharedSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            session: GameSession::new(config)?,
            settings,
            score_recorded: false,
            status: None,
        })
    }

    fn apply_key(&mut self, code: KeyCode) {
        let session = &mut self.session;
        match code {
            KeyCode::Esc => session.toggle_pause(),
            KeyCode::Left => _ = session.move_left(),
            KeyCode::Right => _ = session.move_right(),
            KeyCode::Down => _ = session.soft_drop(),
            KeyCode::Char(' ') => _ = session.hard_drop(),
            KeyCode::Char('q' | 'Q') => _ = session.rotate_cw(),
            KeyCode::Char('e' | 'E') => _ = session.rotate_ccw(),
            KeyCode::Tab => _ = session.hold(),
            _ => {}
        }
    }

    /// Saves the best score once, when the game ends.
    fn record_score_on_game_over(&mut self) {
        if self.score_recorded || !self.session.session_state().is_game_over() {
            return;
        }
        self.score_recorded = true;
        let points = self.session.score().points();
        if let Err(e) = self.settings.borrow_mut().record_score(points) {
            self.status = Some(format!("{e:#}"));
        }
    }
}

impl Screen for GameScreen {
    fn on_active(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(FPS));
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
    }

    fn handle_event(&mut self, _runtime: &mut Runtime, event: &Event) -> ScreenTransition {
        let Some(key) = event.as_key_press_event() else {
            return ScreenTransition::Stay;
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ScreenTransition::Exit;
        }
        if key.code == KeyCode::Enter && !self.session.session_state().is_playing() {
            return ScreenTransition::Pop;
        }
        self.apply_key(key.code);
        self.record_score_on_game_over();
        ScreenTransition::Stay
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
        self.session.tick(elapsed);
        if self.session.session_state().is_playing() {
            self.session.messages_mut().advance_frame();
        }
        self.record_score_on_game_over();
    }

    fn draw(&self, frame: &mut Frame) {
        let design = self.settings.borrow().settings().design;
        let hints = match self.session.session_state() {
            SessionState::Playing => PLAYING_HINTS,
            SessionState::Paused => PAUSED_HINTS,
            SessionState::GameOver => GAME_OVER_HINTS,
        };
        let status = self.status.clone().unwrap_or_else(|| {
            format!(
                "{} | Seed {}",
                self.session.config().mode.name(),
                self.session.seed()
            )
        });

        let [main_area, status_area, hint_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        frame.render_widget(SessionDisplay::new(&self.session, design), main_area);
        frame.render_widget(
            Line::styled(status, style::HINT).centered(),
            status_area,
        );
        frame.render_widget(KeyHintDisplay::new(hints), hint_area);
    }
}
