use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Terminal input the app reacts to.
#[derive(Debug, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Wait up to `timeout` for input. `None` means the wait timed out or the
/// event is one the app ignores (key releases, mouse, focus, paste).
pub fn next_event(timeout: Duration) -> io::Result<Option<AppEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

fn translate(event: Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}
