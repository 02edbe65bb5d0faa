use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

/// What a key did to the line being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
  Continue,
  Commit(String),
  Cancel,
}

/// Single-line text input with a cursor. Used for every prompt: batch
/// destinations, rename, new entry, delete confirmation.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
  buffer: Vec<char>,
  cursor: usize,
  width: u16,
}

/// Horizontal placement of a prompt line that may not fit its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollWindow {
  /// Display columns cut from the left of `prompt + buffer`.
  pub offset: usize,
  /// Cursor column relative to the visible row.
  pub cursor_col: u16,
}

impl LineEditor {
  pub fn new(width: u16) -> Self {
    Self {
      buffer: Vec::new(),
      cursor: 0,
      width,
    }
  }

  /// Editor pre-filled with `text`, cursor at the end.
  pub fn with_text(text: &str, width: u16) -> Self {
    let buffer: Vec<char> = text.chars().collect();
    let cursor = buffer.len();
    Self {
      buffer,
      cursor,
      width,
    }
  }

  pub fn text(&self) -> String {
    self.buffer.iter().collect()
  }

  pub fn chars(&self) -> &[char] {
    &self.buffer
  }

  pub fn cursor(&self) -> usize {
    self.cursor
  }

  pub fn width(&self) -> u16 {
    self.width
  }

  pub fn resize(&mut self, width: u16) {
    self.width = width;
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> EditOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
      KeyCode::Enter => return EditOutcome::Commit(self.text()),
      KeyCode::Esc => return EditOutcome::Cancel,
      KeyCode::Char('c' | 'g') if ctrl => return EditOutcome::Cancel,
      KeyCode::Backspace => {
        if self.cursor > 0 {
          self.cursor -= 1;
          self.buffer.remove(self.cursor);
        }
      }
      KeyCode::Delete => {
        if self.cursor < self.buffer.len() {
          self.buffer.remove(self.cursor);
        }
      }
      KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Right => self.cursor = (self.cursor + 1).min(self.buffer.len()),
      KeyCode::Home => self.cursor = 0,
      KeyCode::End => self.cursor = self.buffer.len(),
      KeyCode::Char(c) if !ctrl && c >= ' ' => {
        self.buffer.insert(self.cursor, c);
        self.cursor += 1;
      }
      _ => {}
    }
    EditOutcome::Continue
  }
}

fn char_width(c: char) -> usize {
  c.width().unwrap_or(0)
}

/// Scrolls `prompt + buffer` so the cursor stays visible in a row of
/// `width` columns. The last column is kept free for the cursor when it
/// sits at the end of the text.
pub fn scroll_window(buffer: &[char], cursor: usize, prompt_width: usize, width: u16) -> ScrollWindow {
  let cursor = cursor.min(buffer.len());
  let before: usize = buffer[..cursor].iter().map(|&c| char_width(c)).sum();
  let total = prompt_width + buffer.iter().map(|&c| char_width(c)).sum::<usize>();
  let cursor_abs = prompt_width + before;

  let avail = usize::from(width.max(1)) - 1;
  let offset = total.saturating_sub(avail).min(cursor_abs);
  let cursor_col = (cursor_abs - offset).min(avail);

  ScrollWindow {
    offset,
    cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::{KeyEventKind, KeyEventState};

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn ctrl(c: char) -> KeyEvent {
    KeyEvent {
      code: KeyCode::Char(c),
      modifiers: KeyModifiers::CONTROL,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn type_str(editor: &mut LineEditor, text: &str) {
    for c in text.chars() {
      assert_eq!(editor.handle_key(key(KeyCode::Char(c))), EditOutcome::Continue);
    }
  }

  #[test]
  fn test_type_backspace_commit() {
    let mut ed = LineEditor::new(80);
    type_str(&mut ed, "abc");
    ed.handle_key(key(KeyCode::Backspace));
    ed.handle_key(key(KeyCode::Backspace));
    assert_eq!(ed.handle_key(key(KeyCode::Enter)), EditOutcome::Commit("a".to_string()));
  }

  #[test]
  fn test_empty_commit_is_valid() {
    let mut ed = LineEditor::new(80);
    assert_eq!(ed.handle_key(key(KeyCode::Enter)), EditOutcome::Commit(String::new()));
  }

  #[test]
  fn test_cancel_keys() {
    let mut ed = LineEditor::new(80);
    type_str(&mut ed, "x");
    assert_eq!(ed.handle_key(key(KeyCode::Esc)), EditOutcome::Cancel);
    assert_eq!(ed.handle_key(ctrl('c')), EditOutcome::Cancel);
    assert_eq!(ed.handle_key(ctrl('g')), EditOutcome::Cancel);
  }

  #[test]
  fn test_cursor_movement_and_insert() {
    let mut ed = LineEditor::new(80);
    type_str(&mut ed, "ac");
    ed.handle_key(key(KeyCode::Left));
    type_str(&mut ed, "b");
    assert_eq!(ed.text(), "abc");
    assert_eq!(ed.cursor(), 2);

    ed.handle_key(key(KeyCode::Home));
    ed.handle_key(key(KeyCode::Left));
    assert_eq!(ed.cursor(), 0);
    ed.handle_key(key(KeyCode::Delete));
    assert_eq!(ed.text(), "bc");

    ed.handle_key(key(KeyCode::End));
    ed.handle_key(key(KeyCode::Right));
    assert_eq!(ed.cursor(), 2);
    ed.handle_key(key(KeyCode::Delete));
    assert_eq!(ed.text(), "bc");
  }

  #[test]
  fn test_backspace_at_start_is_noop() {
    let mut ed = LineEditor::with_text("ab", 80);
    ed.handle_key(key(KeyCode::Home));
    ed.handle_key(key(KeyCode::Backspace));
    assert_eq!(ed.text(), "ab");
    assert_eq!(ed.cursor(), 0);
  }

  #[test]
  fn test_control_chars_not_inserted() {
    let mut ed = LineEditor::new(80);
    ed.handle_key(ctrl('a'));
    ed.handle_key(key(KeyCode::Char('\u{7}')));
    ed.handle_key(key(KeyCode::Tab));
    assert_eq!(ed.text(), "");
  }

  #[test]
  fn test_seeded_text_cursor_at_end() {
    let mut ed = LineEditor::with_text("old.txt", 80);
    assert_eq!(ed.cursor(), 7);
    type_str(&mut ed, "2");
    assert_eq!(ed.text(), "old.txt2");
  }

  #[test]
  fn test_resize_keeps_buffer() {
    let mut ed = LineEditor::with_text("hello", 80);
    ed.handle_key(key(KeyCode::Left));
    ed.resize(10);
    assert_eq!(ed.width(), 10);
    assert_eq!(ed.text(), "hello");
    assert_eq!(ed.cursor(), 4);
  }

  #[test]
  fn test_scroll_window_fits() {
    let buf: Vec<char> = "abc".chars().collect();
    let w = scroll_window(&buf, 3, 5, 80);
    assert_eq!(w, ScrollWindow { offset: 0, cursor_col: 8 });
  }

  #[test]
  fn test_scroll_window_overflow_keeps_cursor_visible() {
    let buf: Vec<char> = "0123456789".chars().collect();
    // prompt 4 + text 10 = 14 columns in a row of 8.
    let w = scroll_window(&buf, 10, 4, 8);
    assert_eq!(w.offset, 7);
    assert_eq!(w.cursor_col, 7);

    // Cursor near the start pulls the window back.
    let w = scroll_window(&buf, 1, 4, 8);
    assert_eq!(w.offset, 5);
    assert_eq!(w.cursor_col, 0);
  }

  #[test]
  fn test_scroll_window_wide_chars() {
    let buf: Vec<char> = "日本語".chars().collect();
    let w = scroll_window(&buf, 3, 2, 80);
    assert_eq!(w.cursor_col, 8);
    let w = scroll_window(&buf, 1, 2, 80);
    assert_eq!(w.cursor_col, 4);
  }

  #[test]
  fn test_scroll_window_cursor_always_in_row() {
    let buf: Vec<char> = "a long line of text".chars().collect();
    for width in 1..30u16 {
      for cursor in 0..=buf.len() {
        let w = scroll_window(&buf, cursor, 6, width);
        assert!(w.cursor_col < width, "width {width} cursor {cursor}");
      }
    }
  }
}
