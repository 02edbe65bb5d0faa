use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::action::Action;
use crate::batch::{ActionTag, BatchRun, Clipboard, MarkMap, Report};
use crate::config::Config;
use crate::error::{OpError, OpResult};
use crate::event::InputMode;
use crate::fs::Transfer;
use crate::fs::ops;
use crate::line_editor::{EditOutcome, LineEditor};
use crate::nav::Navigator;
use crate::opener;

/// Rows taken by the header, footer and prompt line.
const CHROME_ROWS: u16 = 3;

/// What a committed prompt answer is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
  Rename { original: PathBuf },
  NewName,
  NewKind { name: String },
  ConfirmDelete { targets: Vec<String> },
  /// Destination question asked by the running batch.
  Batch,
}

pub struct Prompt {
  pub kind: PromptKind,
  pub label: String,
  pub editor: LineEditor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
  Help,
  Message(Vec<String>),
}

pub struct App {
  pub nav: Navigator,
  pub marks: MarkMap,
  pub selection: BTreeSet<String>,
  pub clipboard: Clipboard,
  pub prompt: Option<Prompt>,
  pub popup: Option<Popup>,
  pub batch: Option<BatchRun>,
  pub status_message: Option<String>,
  pub should_quit: bool,
  pub width: u16,
}

impl App {
  pub fn new(start_dir: PathBuf, config: &Config) -> Result<Self> {
    let nav = Navigator::new(start_dir, config.show_hidden)?;
    Ok(Self {
      nav,
      marks: MarkMap::new(),
      selection: BTreeSet::new(),
      clipboard: Clipboard::new(),
      prompt: None,
      popup: None,
      batch: None,
      status_message: None,
      should_quit: false,
      width: 80,
    })
  }

  pub fn input_mode(&self) -> InputMode {
    if self.popup.is_some() {
      InputMode::Popup
    } else if self.prompt.is_some() {
      InputMode::Prompt
    } else {
      InputMode::Normal
    }
  }

  pub fn update(&mut self, action: Action) -> Result<()> {
    if !matches!(action, Action::Resize(..) | Action::None) {
      self.status_message = None;
    }
    match action {
      Action::Quit => self.should_quit = true,
      Action::MoveDown => self.nav.move_cursor(1),
      Action::MoveUp => self.nav.move_cursor(-1),
      Action::MoveLeft => {
        let before = self.nav.cwd.clone();
        let result = self.nav.go_parent().map(|_| ());
        self.after_navigation(&before, result);
      }
      Action::MoveRight => self.open_selected(),
      Action::GoToTop => self.nav.go_to_top(),
      Action::GoToBottom => self.nav.go_to_bottom(),
      Action::ToggleHidden => {
        let before = self.nav.cwd.clone();
        let result = self.nav.toggle_hidden();
        self.after_navigation(&before, result);
      }
      Action::ToggleSelection => {
        if let Some(entry) = self.nav.selected()
          && !entry.is_parent()
        {
          let name = entry.name.clone();
          if !self.selection.remove(&name) {
            self.selection.insert(name);
          }
        }
      }
      Action::MarkCopy => self.toggle_mark(ActionTag::Copy),
      Action::MarkMove => self.toggle_mark(ActionTag::Move),
      Action::MarkDelete => self.toggle_mark(ActionTag::Delete),
      Action::ApplyMarks => self.apply_marks(),
      Action::ClearClipboard => {
        self.clipboard.clear();
        self.status_message = Some("Clipboard cleared".to_string());
      }
      Action::StageCopy => self.stage(Transfer::Copy),
      Action::StageMove => self.stage(Transfer::Move),
      Action::Paste => self.paste(),
      Action::RenameStart => {
        if let Some(entry) = self.nav.selected()
          && !entry.is_parent()
        {
          let label = format!("Rename {} to: ", entry.name);
          let editor = LineEditor::with_text(&entry.name, self.width);
          let kind = PromptKind::Rename { original: entry.path.clone() };
          self.prompt = Some(Prompt { kind, label, editor });
        }
      }
      Action::NewEntryStart => {
        self.open_prompt(PromptKind::NewName, "Name of new file/directory: ".to_string());
      }
      Action::DeleteStart => {
        let targets = self.target_names();
        if targets.is_empty() {
          self.show_message(vec!["Nothing to delete".to_string()]);
        } else {
          let label = format!("Delete {}? (y/n): ", targets.join(", "));
          self.open_prompt(PromptKind::ConfirmDelete { targets }, label);
        }
      }
      Action::ToggleHelp => {
        self.popup = Some(Popup::Help);
      }
      Action::PromptKey(key) => {
        let Some(prompt) = self.prompt.as_mut() else {
          return Ok(());
        };
        let answer = match prompt.editor.handle_key(key) {
          EditOutcome::Continue => return Ok(()),
          EditOutcome::Commit(text) => Some(text),
          EditOutcome::Cancel => None,
        };
        if let Some(prompt) = self.prompt.take() {
          self.finish_prompt(prompt.kind, answer);
        }
      }
      Action::PopupClose => {
        self.popup = None;
      }
      Action::Resize(w, h) => {
        self.width = w;
        self.nav.set_viewport(h.saturating_sub(CHROME_ROWS) as usize);
        if let Some(prompt) = self.prompt.as_mut() {
          prompt.editor.resize(w);
        }
      }
      Action::None => {}
    }
    Ok(())
  }

  /// Show `lines` in the modal, appending to one that is already open.
  pub fn show_message(&mut self, lines: Vec<String>) {
    match self.popup.as_mut() {
      Some(Popup::Message(existing)) => {
        existing.push(String::new());
        existing.extend(lines);
      }
      _ => self.popup = Some(Popup::Message(lines)),
    }
  }

  fn open_prompt(&mut self, kind: PromptKind, label: String) {
    let editor = LineEditor::new(self.width);
    self.prompt = Some(Prompt { kind, label, editor });
  }

  fn toggle_mark(&mut self, tag: ActionTag) {
    if let Some(entry) = self.nav.selected() {
      let name = entry.name.clone();
      self.marks.toggle(&name, tag);
    }
  }

  /// Marks and selection belong to one directory; they go whenever the
  /// browser ends up somewhere else.
  fn after_navigation(&mut self, before: &Path, result: OpResult<()>) {
    if self.nav.cwd != before {
      self.marks.clear();
      self.selection.clear();
    }
    if let Err(e) = result {
      tracing::warn!("listing {} failed: {e}", self.nav.cwd.display());
      self.show_message(vec![format!("Cannot list {}: {e}", self.nav.cwd.display())]);
    }
  }

  fn reload(&mut self) {
    let before = self.nav.cwd.clone();
    let result = self.nav.reload().map(|_| ());
    self.after_navigation(&before, result);
  }

  fn open_selected(&mut self) {
    let Some(entry) = self.nav.selected().cloned() else {
      return;
    };
    if entry.is_dir() {
      let before = self.nav.cwd.clone();
      let result = if entry.is_parent() {
        self.nav.go_parent().map(|_| ())
      } else {
        self.nav.change_dir(entry.path.clone())
      };
      self.after_navigation(&before, result);
    } else if let Err(e) = opener::open_default(&entry.path) {
      tracing::warn!("open {} failed: {e}", entry.path.display());
      self.show_message(vec![format!("Could not open {}: {e}", entry.name)]);
    }
  }

  /// Names the single-item actions work on: the selection, or the entry
  /// under the cursor when nothing is selected. Never `..`.
  fn target_names(&self) -> Vec<String> {
    if self.selection.is_empty() {
      self
        .nav
        .selected()
        .filter(|e| !e.is_parent())
        .map(|e| vec![e.name.clone()])
        .unwrap_or_default()
    } else {
      self.selection.iter().filter(|n| *n != "..").cloned().collect()
    }
  }

  fn stage(&mut self, op: Transfer) {
    let names = self.target_names();
    if names.is_empty() {
      let what = match op {
        Transfer::Copy => "Nothing to copy",
        Transfer::Move => "Nothing to cut",
      };
      self.show_message(vec![what.to_string()]);
      return;
    }
    let paths: Vec<PathBuf> = names.iter().map(|n| self.nav.cwd.join(n)).collect();
    let count = paths.len();
    self.clipboard.stage(paths, op);
    self.selection.clear();
    self.status_message = Some(format!("{count} item(s) staged for {}", op.label().to_lowercase()));
  }

  fn paste(&mut self) {
    if self.clipboard.is_empty() {
      self.show_message(vec!["Clipboard is empty".to_string()]);
      return;
    }
    let cwd = self.nav.cwd.clone();
    let report = self.clipboard.paste(&cwd);
    self.reload();
    self.show_report(&report, "Paste completed");
  }

  fn apply_marks(&mut self) {
    if self.marks.is_empty() {
      if self.clipboard.is_empty() {
        self.show_message(vec!["Nothing to do".to_string()]);
      } else {
        self.paste();
      }
      return;
    }
    let Some(run) = BatchRun::start(&self.marks, &self.nav.cwd) else {
      return;
    };
    self.batch = Some(run);
    self.advance_batch();
  }

  /// Ask the running batch's next question, or wrap it up once it has none.
  fn advance_batch(&mut self) {
    let Some(run) = self.batch.as_ref() else {
      return;
    };
    if let Some(question) = run.question() {
      self.open_prompt(PromptKind::Batch, question);
      return;
    }
    if !run.is_finished() {
      return;
    }
    if let Some(run) = self.batch.take() {
      let report = run.into_report();
      self.marks.clear();
      self.reload();
      self.show_report(&report, "Operations completed successfully");
    }
  }

  fn show_report(&mut self, report: &Report, success: &str) {
    self.show_message(report.summary(success));
  }

  fn finish_prompt(&mut self, kind: PromptKind, answer: Option<String>) {
    match kind {
      PromptKind::Batch => {
        if let Some(run) = self.batch.as_mut() {
          run.answer(answer);
        }
        self.advance_batch();
      }
      PromptKind::Rename { original } => {
        let Some(new_name) = answer.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()) else {
          return;
        };
        self.rename(&original, &new_name);
      }
      PromptKind::NewName => {
        let Some(name) = answer.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()) else {
          return;
        };
        self.open_prompt(PromptKind::NewKind { name }, "File (f) or directory (d)? ".to_string());
      }
      PromptKind::NewKind { name } => {
        let choice = answer.unwrap_or_default().trim().to_lowercase();
        let path = self.nav.cwd.join(&name);
        let result = match choice.as_str() {
          "f" => ops::create_file(&path),
          "d" => ops::create_dir(&path),
          _ => {
            self.status_message = Some("Creation cancelled".to_string());
            return;
          }
        };
        match result {
          Ok(()) => {
            tracing::info!("created {}", path.display());
            self.reload();
            self.nav.reposition_to(&path);
            self.status_message = Some(format!("Created {name}"));
          }
          Err(e) => self.show_message(vec![format!("Could not create {name}: {e}")]),
        }
      }
      PromptKind::ConfirmDelete { targets } => {
        let confirmed = answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y"));
        if confirmed {
          self.delete_targets(&targets);
        } else {
          self.status_message = Some("Delete cancelled".to_string());
        }
      }
    }
  }

  fn rename(&mut self, original: &Path, new_name: &str) {
    let old_name = original
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default();
    match ops::rename_path(original, new_name) {
      Ok(renamed) => {
        tracing::info!("renamed {} -> {}", original.display(), renamed.display());
        self.clipboard.rename(original, &renamed);
        if let Some(tag) = self.marks.remove(&old_name) {
          self.marks.set(new_name, tag);
        }
        if self.selection.remove(&old_name) {
          self.selection.insert(new_name.to_string());
        }
        self.reload();
        self.nav.reposition_to(&renamed);
        self.status_message = Some(format!("Renamed to {new_name}"));
      }
      Err(e) => self.show_message(vec![format!("Rename failed: {e}")]),
    }
  }

  fn delete_targets(&mut self, targets: &[String]) {
    let mut report = Report::default();
    for name in targets {
      let path = self.nav.cwd.join(name);
      match ops::delete_path(&path) {
        Ok(()) => {
          tracing::info!("deleted {}", path.display());
          self.clipboard.forget(&path);
          self.marks.remove(name);
          report.completed += 1;
        }
        Err(e) => report.record(ActionTag::Delete.label(), name.clone(), OpError::from_io(e, &path)),
      }
    }
    self.selection.clear();
    self.reload();
    if report.is_success() {
      self.status_message = Some(format!("Deleted {} item(s)", report.completed));
    } else {
      self.show_report(&report, "");
    }
  }
}
