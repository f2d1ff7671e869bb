//! Terminal events consumed by the UI loop.

use crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::io;
use std::time::Duration;

/// Application event read from the terminal.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Terminal was resized; redraw.
    Resize,
}

/// Wait up to `timeout` for the next relevant terminal event.
///
/// Key releases and repeats are dropped so each press is handled once.
pub fn next_event(timeout: Duration) -> io::Result<Option<AppEvent>> {
    if !crossterm::event::poll(timeout)? {
        return Ok(None);
    }
    let event = match crossterm::event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Input(key)),
        CrosstermEvent::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    };
    Ok(event)
}
