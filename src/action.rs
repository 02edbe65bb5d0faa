use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  Quit,
  MoveUp,
  MoveDown,
  MoveLeft,
  MoveRight,
  GoToTop,
  GoToBottom,
  ToggleHidden,
  ToggleSelection,
  MarkCopy,
  MarkMove,
  MarkDelete,
  ApplyMarks,
  ClearClipboard,
  StageCopy,
  StageMove,
  Paste,
  RenameStart,
  NewEntryStart,
  DeleteStart,
  ToggleHelp,
  /// A key typed while a prompt line is open.
  PromptKey(KeyEvent),
  PopupClose,
  Resize(u16, u16),
  None,
}

impl Action {
  pub fn from_name(name: &str) -> Option<Action> {
    match name {
      "quit" => Some(Action::Quit),
      "move_up" => Some(Action::MoveUp),
      "move_down" => Some(Action::MoveDown),
      "move_left" => Some(Action::MoveLeft),
      "move_right" => Some(Action::MoveRight),
      "go_to_top" => Some(Action::GoToTop),
      "go_to_bottom" => Some(Action::GoToBottom),
      "toggle_hidden" => Some(Action::ToggleHidden),
      "toggle_selection" => Some(Action::ToggleSelection),
      "mark_copy" => Some(Action::MarkCopy),
      "mark_move" => Some(Action::MarkMove),
      "mark_delete" => Some(Action::MarkDelete),
      "apply_marks" => Some(Action::ApplyMarks),
      "clear_clipboard" => Some(Action::ClearClipboard),
      "stage_copy" => Some(Action::StageCopy),
      "stage_move" => Some(Action::StageMove),
      "paste" => Some(Action::Paste),
      "rename_start" => Some(Action::RenameStart),
      "new_entry_start" => Some(Action::NewEntryStart),
      "delete_start" => Some(Action::DeleteStart),
      "toggle_help" => Some(Action::ToggleHelp),
      "none" => Some(Action::None),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_name_bindable_actions() {
    assert_eq!(Action::from_name("quit"), Some(Action::Quit));
    assert_eq!(Action::from_name("move_up"), Some(Action::MoveUp));
    assert_eq!(Action::from_name("move_down"), Some(Action::MoveDown));
    assert_eq!(Action::from_name("move_left"), Some(Action::MoveLeft));
    assert_eq!(Action::from_name("move_right"), Some(Action::MoveRight));
    assert_eq!(Action::from_name("go_to_top"), Some(Action::GoToTop));
    assert_eq!(Action::from_name("go_to_bottom"), Some(Action::GoToBottom));
    assert_eq!(Action::from_name("toggle_hidden"), Some(Action::ToggleHidden));
    assert_eq!(Action::from_name("toggle_selection"), Some(Action::ToggleSelection));
    assert_eq!(Action::from_name("mark_copy"), Some(Action::MarkCopy));
    assert_eq!(Action::from_name("mark_move"), Some(Action::MarkMove));
    assert_eq!(Action::from_name("mark_delete"), Some(Action::MarkDelete));
    assert_eq!(Action::from_name("apply_marks"), Some(Action::ApplyMarks));
    assert_eq!(Action::from_name("clear_clipboard"), Some(Action::ClearClipboard));
    assert_eq!(Action::from_name("stage_copy"), Some(Action::StageCopy));
    assert_eq!(Action::from_name("stage_move"), Some(Action::StageMove));
    assert_eq!(Action::from_name("paste"), Some(Action::Paste));
    assert_eq!(Action::from_name("rename_start"), Some(Action::RenameStart));
    assert_eq!(Action::from_name("new_entry_start"), Some(Action::NewEntryStart));
    assert_eq!(Action::from_name("delete_start"), Some(Action::DeleteStart));
    assert_eq!(Action::from_name("toggle_help"), Some(Action::ToggleHelp));
  }

  #[test]
  fn test_from_name_none() {
    assert_eq!(Action::from_name("none"), Some(Action::None));
  }

  #[test]
  fn test_from_name_invalid() {
    assert_eq!(Action::from_name("garbage"), None);
    assert_eq!(Action::from_name(""), None);
  }

  #[test]
  fn test_from_name_unbindable() {
    assert_eq!(Action::from_name("prompt_key"), None);
    assert_eq!(Action::from_name("popup_close"), None);
    assert_eq!(Action::from_name("resize"), None);
  }
}
