use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    ScrollUp,
    ScrollDown,
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(AppEvent::Key(key));
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => return Ok(AppEvent::ScrollUp),
                    MouseEventKind::ScrollDown => return Ok(AppEvent::ScrollDown),
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    NextPane,
    LoadComments,
    LoadMore,
    OpenInBrowser,
    None,
}
