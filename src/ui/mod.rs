//! Terminal user interface.
//!
//! A thin presentation layer: it forwards one normalized keystroke at a time
//! into the engine and re-renders whatever the engine produces. All decision
//! logic lives in [`crate::engine`].

mod app;
mod clipboard;
mod flash;

pub use app::run;

use crossterm::event::KeyEvent;

/// Events feeding the main UI loop.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the input thread.
    Key(KeyEvent),
    /// The terminal was resized; redraw only.
    Redraw,
    /// A pending invalid flash ran out. The generation ties the expiry to
    /// the rejection that scheduled it.
    FlashEnded(u64),
}
