use std::{fmt, time::Duration};

use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::{App, Runtime};

/// One screen of the application (menu, game).
///
/// A screen becomes active when it is first shown and again whenever the
/// screen above it is popped. Screens configure the [`Runtime`] tick and
/// render rates in [`on_active`](Self::on_active), since the runtime is
/// shared by the whole stack.
pub trait Screen: fmt::Debug {
    fn on_active(&mut self, runtime: &mut Runtime);

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) -> ScreenTransition;

    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration);

    fn draw(&self, frame: &mut Frame);
}

#[derive(Debug)]
pub enum ScreenTransition {
    Stay,
    /// Show a new screen on top of the current one.
    Push(Box<dyn Screen>),
    /// Drop the current screen and reactivate the one below.
    Pop,
    Exit,
}

/// Stack of screens; only the topmost one receives events.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_exit: bool,
}

impl ScreenStack {
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, runtime: &mut Runtime, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}
            ScreenTransition::Push(mut screen) => {
                screen.on_active(runtime);
                self.screens.push(screen);
            }
            ScreenTransition::Pop => {
                self.screens.pop();
                if let Some(screen) = self.screens.last_mut() {
                    screen.on_active(runtime);
                }
            }
            ScreenTransition::Exit => {
                self.screens.clear();
                self.should_exit = true;
            }
        }
    }
}

impl App for ScreenStack {
    fn init(&mut self, runtime: &mut Runtime) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active(runtime);
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(runtime, &event);
            self.apply_transition(runtime, transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }

    fn update(&mut self, runtime: &mut Runtime, elapsed: Duration) {
        if let Some(current) = self.screens.last_mut() {
            current.update(runtime, elapsed);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    #[derive(Debug, Clone, Default)]
    struct CallLog {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl CallLog {
        fn log(&self, msg: impl Into<String>) {
            self.calls.borrow_mut().push(msg.into());
        }

        fn take(&self) -> Vec<String> {
            self.calls.take()
        }
    }

    #[derive(Debug)]
    struct TestScreen {
        name: &'static str,
        log: CallLog,
        next: Option<ScreenTransition>,
    }

    impl TestScreen {
        fn boxed(name: &'static str, log: &CallLog) -> Box<Self> {
            Box::new(Self {
                name,
                log: log.clone(),
                next: None,
            })
        }

        fn then(mut self: Box<Self>, transition: ScreenTransition) -> Box<Self> {
            self.next = Some(transition);
            self
        }
    }

    impl Screen for TestScreen {
        fn on_active(&mut self, _runtime: &mut Runtime) {
            self.log.log(format!("{}: active", self.name));
        }

        fn handle_event(&mut self, _runtime: &mut Runtime, _event: &Event) -> ScreenTransition {
            self.log.log(format!("{}: event", self.name));
            self.next.take().unwrap_or(ScreenTransition::Stay)
        }

        fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) {
            self.log
                .log(format!("{}: update {}ms", self.name, elapsed.as_millis()));
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let log = CallLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("menu", &log));
        stack.init(&mut Runtime::new());
        assert_eq!(log.take(), ["menu: active"]);
    }

    #[test]
    fn test_push_then_pop_reactivates_previous_screen() {
        let log = CallLog::default();
        let game = TestScreen::boxed("game", &log).then(ScreenTransition::Pop);
        let menu = TestScreen::boxed("menu", &log).then(ScreenTransition::Push(game));
        let mut stack = ScreenStack::new(menu);
        let mut runtime = Runtime::new();
        stack.init(&mut runtime);
        log.take();

        stack.handle_event(&mut runtime, key());
        assert_eq!(log.take(), ["menu: event", "game: active"]);

        stack.handle_event(&mut runtime, key());
        assert_eq!(log.take(), ["game: event", "menu: active"]);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_update_reaches_only_top_screen() {
        let log = CallLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("menu", &log));
        let mut runtime = Runtime::new();
        stack.apply_transition(
            &mut runtime,
            ScreenTransition::Push(TestScreen::boxed("game", &log)),
        );
        log.take();

        stack.update(&mut runtime, Duration::from_millis(16));
        assert_eq!(log.take(), ["game: update 16ms"]);
    }

    #[test]
    fn test_stay_keeps_stack() {
        let log = CallLog::default();
        let mut stack = ScreenStack::new(TestScreen::boxed("menu", &log));
        let mut runtime = Runtime::new();
        stack.handle_event(&mut runtime, key());
        stack.handle_event(&mut runtime, key());
        assert_eq!(log.take(), ["menu: event", "menu: event"]);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_exit_and_popping_last_screen_end_the_app() {
        let log = CallLog::default();
        let mut stack =
            ScreenStack::new(TestScreen::boxed("menu", &log).then(ScreenTransition::Exit));
        stack.handle_event(&mut Runtime::new(), key());
        assert!(stack.should_exit());

        let mut stack =
            ScreenStack::new(TestScreen::boxed("menu", &log).then(ScreenTransition::Pop));
        stack.handle_event(&mut Runtime::new(), key());
        assert!(stack.should_exit());
    }
}
