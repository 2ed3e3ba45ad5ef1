//! Tick-driven terminal runtime.
//!
//! [`Runtime`] owns the event loop and drives an [`App`]; [`ScreenStack`] is
//! the [`App`] used by the game, routing events to the topmost [`Screen`].

pub use self::{
    app::App,
    event_loop::RenderMode,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod event;
mod event_loop;
mod runtime;
mod screen;
