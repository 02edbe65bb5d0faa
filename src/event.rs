use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::action::Action;
use crate::config::{Config, normalize_key_event};

pub enum Event {
  Key(KeyEvent),
  Resize(u16, u16),
}

/// Blocks on the terminal one event at a time. Everything happens on the
/// calling thread.
#[derive(Default)]
pub struct EventLoop;

impl EventLoop {
  pub fn new() -> Self {
    Self
  }

  pub fn next(&self) -> Result<Event> {
    loop {
      match event::read()? {
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => return Ok(Event::Key(key)),
        CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
        _ => {}
      }
    }
  }
}

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
  Normal,
  /// A prompt line is open; keys feed its editor.
  Prompt,
  /// A modal is shown; any key dismisses it.
  Popup,
}

pub fn map_key(key: KeyEvent, mode: InputMode, config: &Config) -> Action {
  match mode {
    InputMode::Popup => Action::PopupClose,
    InputMode::Prompt => Action::PromptKey(key),
    InputMode::Normal => {
      let kb = normalize_key_event(key);
      config.normal_keys.get(&kb).cloned().unwrap_or(Action::None)
    }
  }
}
