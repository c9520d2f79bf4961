use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Polls the terminal without blocking the thread, so the poll loop and
/// in-flight submissions keep running between key presses.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub async fn next(&self) -> Result<AppEvent> {
        if event::poll(Duration::ZERO)? {
            return Ok(match event::read()? {
                Event::Key(key) => AppEvent::Key(key),
                Event::Resize(..) => AppEvent::Resize,
                _ => AppEvent::Tick,
            });
        }
        tokio::time::sleep(self.tick_rate).await;
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPane,
    PrevPane,
    FocusInput,
    Select,
    Close,
    OpenInBrowser,
    None,
}
