use std::path::{Path, PathBuf};

use crate::error::{OpError, OpResult};
use crate::fs::FileEntry;
use crate::fs::listing::read_entries;

/// The directory being browsed and where the cursor sits in it.
#[derive(Debug)]
pub struct Navigator {
  pub cwd: PathBuf,
  pub entries: Vec<FileEntry>,
  pub cursor: usize,
  pub scroll_offset: usize,
  pub show_hidden: bool,
  /// Rows of the list area, borders included.
  pub viewport_height: usize,
}

impl Navigator {
  pub fn new(cwd: PathBuf, show_hidden: bool) -> OpResult<Self> {
    let mut nav = Self {
      cwd,
      entries: Vec::new(),
      cursor: 0,
      scroll_offset: 0,
      show_hidden,
      viewport_height: 20,
    };
    nav.reload()?;
    Ok(nav)
  }

  /// Re-list the current directory. A directory that became unreadable or
  /// vanished is left for its parent, repeatedly if needed. Returns whether
  /// that happened.
  pub fn reload(&mut self) -> OpResult<bool> {
    let mut ascended = false;
    loop {
      match read_entries(&self.cwd, self.show_hidden) {
        Ok(entries) => {
          self.entries = entries;
          self.clamp_cursor();
          return Ok(ascended);
        }
        Err(OpError::AccessDenied(_) | OpError::NotFound(_)) if self.cwd.parent().is_some() => {
          let left = self.cwd.clone();
          let parent = left.parent().map(Path::to_path_buf).unwrap_or_default();
          tracing::warn!("cannot list {}, moving up to {}", left.display(), parent.display());
          self.cwd = parent;
          self.cursor = 0;
          self.scroll_offset = 0;
          ascended = true;
          if let Ok(entries) = read_entries(&self.cwd, self.show_hidden) {
            self.entries = entries;
            self.reposition_to(&left);
            return Ok(true);
          }
        }
        Err(e) => {
          self.entries.clear();
          self.clamp_cursor();
          return Err(e);
        }
      }
    }
  }

  pub fn selected(&self) -> Option<&FileEntry> {
    self.entries.get(self.cursor)
  }

  pub fn move_cursor(&mut self, delta: isize) {
    if self.entries.is_empty() {
      return;
    }
    let last = self.entries.len() - 1;
    self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    self.adjust_scroll();
  }

  pub fn go_to_top(&mut self) {
    self.cursor = 0;
    self.scroll_offset = 0;
  }

  pub fn go_to_bottom(&mut self) {
    self.cursor = self.entries.len().saturating_sub(1);
    self.adjust_scroll();
  }

  /// Switch to `dir`. The result of the listing decides where the browser
  /// actually ends up.
  pub fn change_dir(&mut self, dir: PathBuf) -> OpResult<()> {
    let previous = std::mem::replace(&mut self.cwd, dir);
    self.cursor = 0;
    self.scroll_offset = 0;
    self.reload()?;
    // Landing on the parent of the old location points at where we were.
    if previous.parent() == Some(self.cwd.as_path()) {
      self.reposition_to(&previous);
    }
    Ok(())
  }

  /// Go up one level with the cursor on the directory just left. Returns
  /// `false` at the filesystem root.
  pub fn go_parent(&mut self) -> OpResult<bool> {
    let Some(parent) = self.cwd.parent().map(Path::to_path_buf) else {
      return Ok(false);
    };
    self.change_dir(parent)?;
    Ok(true)
  }

  pub fn toggle_hidden(&mut self) -> OpResult<()> {
    let current = self.selected().map(|e| e.path.clone());
    self.show_hidden = !self.show_hidden;
    self.reload()?;
    if let Some(path) = current {
      self.reposition_to(&path);
    }
    Ok(())
  }

  pub fn reposition_to(&mut self, path: &Path) {
    if let Some(pos) = self.entries.iter().position(|e| !e.is_parent() && e.path == path) {
      self.cursor = pos;
    }
    self.clamp_cursor();
  }

  pub fn set_viewport(&mut self, height: usize) {
    self.viewport_height = height;
    self.adjust_scroll();
  }

  pub fn visible_rows(&self) -> usize {
    self.viewport_height.saturating_sub(2) // borders
  }

  fn clamp_cursor(&mut self) {
    self.cursor = self.cursor.min(self.entries.len().saturating_sub(1));
    self.adjust_scroll();
  }

  fn adjust_scroll(&mut self) {
    let visible = self.visible_rows();
    if visible == 0 {
      return;
    }
    if self.cursor < self.scroll_offset {
      self.scroll_offset = self.cursor;
    } else if self.cursor >= self.scroll_offset + visible {
      self.scroll_offset = self.cursor - visible + 1;
    }
  }
}
