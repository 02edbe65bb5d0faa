use std::path::PathBuf;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::action::Action;
use crate::app::{App, Popup};
use crate::batch::{ActionTag, BatchStep};
use crate::config::Config;
use crate::fs::{EntryKind, Transfer};
use crate::line_editor::scroll_window;

/// How a row is highlighted. The cursor wins over the selection, the
/// selection over a mark, a mark over the entry's own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
  Cursor,
  Selected,
  Marked(ActionTag),
  Directory,
  Symlink,
  Executable,
  Plain,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
  pub label: String,
  pub class: RowClass,
  /// Staged on the clipboard for a move.
  pub cut: bool,
}

/// The visible tail of the prompt line and where the terminal cursor goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
  pub text: String,
  pub cursor_col: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupView {
  /// (keys, description) pairs built from the active keymap.
  Help(Vec<(String, String)>),
  Message(Vec<String>),
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRequest {
  pub header: String,
  pub title: String,
  pub rows: Vec<Row>,
  pub prompt: Option<PromptLine>,
  pub footer: String,
  pub popup: Option<PopupView>,
}

const HELP_ENTRIES: &[(Action, &str)] = &[
  (Action::MoveUp, "Move up"),
  (Action::MoveDown, "Move down"),
  (Action::MoveLeft, "Parent directory"),
  (Action::MoveRight, "Enter directory / open file"),
  (Action::GoToTop, "Go to top"),
  (Action::GoToBottom, "Go to bottom"),
  (Action::ToggleHidden, "Show / hide hidden files"),
  (Action::ToggleSelection, "Select file"),
  (Action::MarkCopy, "Mark for copy"),
  (Action::MarkMove, "Mark for move"),
  (Action::MarkDelete, "Mark for delete"),
  (Action::ApplyMarks, "Apply marks (or paste)"),
  (Action::StageCopy, "Copy to clipboard"),
  (Action::StageMove, "Cut to clipboard"),
  (Action::Paste, "Paste clipboard"),
  (Action::ClearClipboard, "Clear clipboard"),
  (Action::RenameStart, "Rename"),
  (Action::NewEntryStart, "New file / directory"),
  (Action::DeleteStart, "Delete"),
  (Action::ToggleHelp, "Help"),
  (Action::Quit, "Quit"),
];

pub fn build(app: &App, config: &Config) -> DrawRequest {
  DrawRequest {
    header: header(app),
    title: title(app),
    rows: rows(app),
    prompt: prompt_line(app),
    footer: footer(app),
    popup: app.popup.as_ref().map(|p| match p {
      Popup::Help => PopupView::Help(help_entries(config)),
      Popup::Message(lines) => PopupView::Message(lines.clone()),
    }),
  }
}

fn header(app: &App) -> String {
  let mut header = format!(" GFD - {}", app.nav.cwd.display());
  if let Some(op) = app.clipboard.op() {
    header.push_str(&format!(
      " | Clipboard: {} item(s) [{}]",
      app.clipboard.len(),
      op.label().to_lowercase()
    ));
  }
  header
}

fn title(app: &App) -> String {
  let mut title = String::from(" Files ");
  if app.nav.show_hidden {
    title.push_str("[hidden: on] ");
  }
  if !app.marks.is_empty() {
    title.push_str(&format!("[{} marked] ", app.marks.len()));
  }
  title
}

fn rows(app: &App) -> Vec<Row> {
  let nav = &app.nav;
  let start = nav.scroll_offset.min(nav.entries.len());
  let end = (start + nav.visible_rows()).min(nav.entries.len());
  let cut_paths: &[PathBuf] = match app.clipboard.op() {
    Some(Transfer::Move) => app.clipboard.paths(),
    _ => &[],
  };

  nav.entries[start..end]
    .iter()
    .enumerate()
    .map(|(i, entry)| {
      let tag = app.marks.get(&entry.name);
      let label = match tag {
        Some(tag) => format!("{} {}", entry.name, tag.badge()),
        None => entry.name.clone(),
      };
      let class = if start + i == nav.cursor {
        RowClass::Cursor
      } else if app.selection.contains(&entry.name) {
        RowClass::Selected
      } else if let Some(tag) = tag {
        RowClass::Marked(tag)
      } else {
        match entry.kind() {
          EntryKind::Parent | EntryKind::Directory => RowClass::Directory,
          EntryKind::Symlink => RowClass::Symlink,
          EntryKind::Executable => RowClass::Executable,
          EntryKind::Regular => RowClass::Plain,
        }
      };
      let cut = !entry.is_parent() && cut_paths.contains(&entry.path);
      Row { label, class, cut }
    })
    .collect()
}

fn prompt_line(app: &App) -> Option<PromptLine> {
  let prompt = app.prompt.as_ref()?;
  let editor = &prompt.editor;
  let window = scroll_window(editor.chars(), editor.cursor(), prompt.label.width(), editor.width());
  let full: String = prompt.label.chars().chain(editor.chars().iter().copied()).collect();
  let (text, skipped) = skip_columns(&full, window.offset);
  // A wide character cut by the offset is dropped whole, shifting the text left.
  let overshoot = u16::try_from(skipped - window.offset).unwrap_or(u16::MAX);
  Some(PromptLine {
    text,
    cursor_col: window.cursor_col.saturating_sub(overshoot),
  })
}

/// Drops leading characters until at least `cols` display columns are gone.
/// Returns the rest and the columns actually dropped.
fn skip_columns(text: &str, cols: usize) -> (String, usize) {
  let mut skipped = 0;
  let mut chars = text.chars();
  while skipped < cols {
    let Some(c) = chars.next() else {
      break;
    };
    skipped += c.width().unwrap_or(0);
  }
  (chars.collect(), skipped.max(cols))
}

fn footer(app: &App) -> String {
  if let Some(msg) = &app.status_message {
    return format!(" {msg}");
  }
  if let Some(run) = &app.batch {
    return match run.step() {
      BatchStep::CollectDestination(op) => format!(" Batch: {} destination", op.label()),
      BatchStep::ResolvePerFile { op, index } => format!(" Batch: {} item {}", op.label(), index + 1),
      BatchStep::Execute | BatchStep::Report => " Batch: running".to_string(),
    };
  }
  let position = if app.nav.entries.is_empty() {
    "empty".to_string()
  } else {
    format!("{}/{}", app.nav.cursor + 1, app.nav.entries.len())
  };
  let mut footer = format!(" {position}");
  if !app.selection.is_empty() {
    footer.push_str(&format!(" | {} selected", app.selection.len()));
  }
  footer.push_str(" | ? help");
  footer
}

fn help_entries(config: &Config) -> Vec<(String, String)> {
  let lookup = config.reverse_lookup();
  HELP_ENTRIES
    .iter()
    .filter_map(|(action, desc)| {
      lookup
        .get(action)
        .map(|keys| (keys.join(" / "), desc.to_string()))
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fs::ops::tests::test_dir;
  use crate::line_editor::LineEditor;
  use std::fs;

  fn setup_test_dir() -> PathBuf {
    let dir = test_dir("view");
    fs::create_dir_all(dir.join("docs")).unwrap();
    fs::write(dir.join("a.txt"), "a").unwrap();
    fs::write(dir.join("b.txt"), "b").unwrap();
    dir
  }

  fn new_app(dir: &std::path::Path) -> App {
    App::new(dir.to_path_buf(), &Config::default()).unwrap()
  }

  fn row<'a>(req: &'a DrawRequest, name: &str) -> &'a Row {
    req.rows.iter().find(|r| r.label.starts_with(name)).unwrap()
  }

  #[test]
  fn test_header_shows_clipboard() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    let req = build(&app, &Config::default());
    assert_eq!(req.header, format!(" GFD - {}", dir.display()));

    app.nav.reposition_to(&dir.join("a.txt"));
    app.update(Action::StageCopy).unwrap();
    let req = build(&app, &Config::default());
    assert!(req.header.ends_with("| Clipboard: 1 item(s) [copy]"), "{}", req.header);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_row_classes_and_badges() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    app.nav.reposition_to(&dir.join("a.txt"));
    app.update(Action::MarkDelete).unwrap();
    app.update(Action::ToggleSelection).unwrap();
    app.nav.reposition_to(&dir.join("b.txt"));
    app.update(Action::MarkCopy).unwrap();
    app.update(Action::GoToTop).unwrap();

    let req = build(&app, &Config::default());
    assert_eq!(row(&req, "..").class, RowClass::Cursor);
    assert_eq!(row(&req, "a.txt").class, RowClass::Selected);
    assert_eq!(row(&req, "a.txt").label, "a.txt [D]");
    assert_eq!(row(&req, "b.txt").class, RowClass::Marked(ActionTag::Copy));
    assert_eq!(row(&req, "b.txt").label, "b.txt [C]");
    assert_eq!(row(&req, "docs").class, RowClass::Directory);
    assert!(!row(&req, "b.txt").cut);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_cut_rows_flagged() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    app.nav.reposition_to(&dir.join("b.txt"));
    app.update(Action::StageMove).unwrap();
    let req = build(&app, &Config::default());
    assert!(row(&req, "b.txt").cut);
    assert!(!row(&req, "a.txt").cut);

    app.update(Action::StageCopy).unwrap();
    let req = build(&app, &Config::default());
    assert!(!row(&req, "b.txt").cut);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_rows_limited_to_viewport() {
    let dir = setup_test_dir();
    for i in 0..30 {
      fs::write(dir.join(format!("f{i:02}")), "").unwrap();
    }
    let mut app = new_app(&dir);
    app.update(Action::Resize(80, 13)).unwrap();
    app.update(Action::GoToBottom).unwrap();

    let req = build(&app, &Config::default());
    assert_eq!(req.rows.len(), 8);
    assert_eq!(req.rows.last().unwrap().class, RowClass::Cursor);
    assert_eq!(req.rows.last().unwrap().label, "f29");
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_prompt_line_scrolls_to_cursor() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    app.width = 10;
    app.prompt = Some(crate::app::Prompt {
      kind: crate::app::PromptKind::NewName,
      label: "Name: ".to_string(),
      editor: LineEditor::with_text("abcdefgh", 10),
    });
    let req = build(&app, &Config::default());
    let line = req.prompt.unwrap();
    // 14 columns of text in a 10 column row, one kept for the cursor
    assert_eq!(line.text, " abcdefgh");
    assert_eq!(line.cursor_col, 9);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_skip_columns_wide_chars() {
    assert_eq!(skip_columns("日本語", 2), ("本語".to_string(), 2));
    assert_eq!(skip_columns("日本語", 3), ("語".to_string(), 4));
    assert_eq!(skip_columns("abc", 0), ("abc".to_string(), 0));
    assert_eq!(skip_columns("abc", 10), (String::new(), 10));
  }

  #[test]
  fn test_prompt_cursor_after_split_wide_char() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    app.prompt = Some(crate::app::Prompt {
      kind: crate::app::PromptKind::NewName,
      label: String::new(),
      editor: LineEditor::with_text("日本語", 4),
    });
    let line = build(&app, &Config::default()).prompt.unwrap();
    assert_eq!(line.text, "語");
    assert_eq!(line.cursor_col, 2);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_help_popup_lists_active_keys() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    app.update(Action::ToggleHelp).unwrap();
    let req = build(&app, &Config::default());
    let Some(PopupView::Help(entries)) = req.popup else {
      panic!("expected help popup");
    };
    assert!(entries.contains(&("q".to_string(), "Quit".to_string())));
    assert!(entries.iter().any(|(keys, desc)| desc == "Mark for copy" && keys == "c"));
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_footer_during_batch() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    app.nav.reposition_to(&dir.join("a.txt"));
    app.update(Action::MarkMove).unwrap();
    app.update(Action::ApplyMarks).unwrap();
    let req = build(&app, &Config::default());
    assert_eq!(req.footer, " Batch: Move destination");
    assert!(req.prompt.unwrap().text.starts_with("Destination for MOVE"));
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_footer_prefers_status_message() {
    let dir = setup_test_dir();
    let mut app = new_app(&dir);
    let req = build(&app, &Config::default());
    assert_eq!(req.footer, " 1/4 | ? help");
    app.status_message = Some("Clipboard cleared".to_string());
    let req = build(&app, &Config::default());
    assert_eq!(req.footer, " Clipboard cleared");
    let _ = fs::remove_dir_all(&dir);
  }
}
