use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::tui::event::TuiEvent;

/// Rendering trigger mode.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// Render after state changes (tick or crossterm event).
    #[default]
    OnDirty,
    /// Render after state changes, at most once per interval.
    ///
    /// Changes arriving faster than the interval are batched into one render.
    Throttled(Duration),
}

impl RenderMode {
    /// Creates `Throttled` mode from frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Event loop state.
///
/// Without a tick interval no tick is generated. The first tick after the
/// interval is (re)configured fires immediately with zero elapsed time, so
/// time spent on another screen never reaches the game clock.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    last_tick: Option<Instant>,
    last_render: Option<Instant>,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            last_tick: None,
            last_render: None,
            dirty: true,
        }
    }

    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        self.last_tick = None;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
        self.dirty = true;
    }

    /// Returns the next event.
    ///
    /// Blocks until a tick or render is due or a crossterm event occurs.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(tick) = self.due_tick(now) {
                self.last_tick = Some(now);
                self.dirty = true;
                return Ok(tick);
            }

            if self.render_due(now) {
                self.last_render = Some(now);
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    fn due_tick(&self, now: Instant) -> Option<TuiEvent> {
        let interval = self.tick_interval?;
        let Some(last_tick) = self.last_tick else {
            return Some(TuiEvent::Tick(Duration::ZERO));
        };
        let elapsed = now.duration_since(last_tick);
        (elapsed >= interval).then_some(TuiEvent::Tick(elapsed))
    }

    fn render_due(&self, now: Instant) -> bool {
        match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty
                    && self
                        .last_render
                        .is_none_or(|last| now.duration_since(last) >= interval)
            }
        }
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self
            .tick_interval
            .map(|interval| self.last_tick.map_or(now, |last| last + interval));
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self
                .dirty
                .then(|| self.last_render.map_or(now, |last| last + interval)),
        };
        let next_timeout_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_timeout_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_zero_elapsed() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_secs(3600)));
        assert_eq!(events.next().unwrap(), TuiEvent::Tick(Duration::ZERO));
        assert_eq!(events.next().unwrap(), TuiEvent::Render);
    }

    #[test]
    fn test_reconfiguring_ticks_restarts_the_clock() {
        let mut events = EventLoop::new();
        events.set_tick_interval(Some(Duration::from_millis(1)));
        assert_eq!(events.next().unwrap(), TuiEvent::Tick(Duration::ZERO));

        events.set_tick_interval(Some(Duration::from_secs(3600)));
        assert_eq!(events.next().unwrap(), TuiEvent::Tick(Duration::ZERO));
    }

    #[test]
    fn test_timeout_waits_for_next_tick() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        events.set_tick_interval(Some(Duration::from_millis(100)));
        events.last_tick = Some(now);
        events.dirty = false;

        let timeout = events.compute_timeout(now).unwrap();
        assert_eq!(timeout, Duration::from_millis(100));
        assert_eq!(events.due_tick(now), None);
        assert_eq!(
            events.due_tick(now + Duration::from_millis(150)),
            Some(TuiEvent::Tick(Duration::from_millis(150)))
        );
    }

    #[test]
    fn test_no_timeout_without_ticks_or_pending_render() {
        let mut events = EventLoop::new();
        events.dirty = false;
        assert_eq!(events.compute_timeout(Instant::now()), None);
    }

    #[test]
    fn test_throttled_render_waits_for_interval() {
        let mut events = EventLoop::new();
        let now = Instant::now();
        events.set_render_mode(RenderMode::Throttled(Duration::from_millis(20)));
        assert!(events.render_due(now));

        events.last_render = Some(now);
        assert!(!events.render_due(now + Duration::from_millis(5)));
        assert!(events.render_due(now + Duration::from_millis(20)));
    }
}
