use std::collections::HashMap;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
  pub code: KeyCode,
  pub modifiers: KeyModifiers,
}

impl KeyBinding {
  pub fn display_key(&self) -> String {
    let key_name = match self.code {
      KeyCode::Char(' ') => "Space".to_string(),
      KeyCode::Char(c) => c.to_string(),
      KeyCode::Enter => "Enter".to_string(),
      KeyCode::Esc => "Esc".to_string(),
      KeyCode::Backspace => "Backspace".to_string(),
      KeyCode::Delete => "Delete".to_string(),
      KeyCode::Tab => "Tab".to_string(),
      KeyCode::Home => "Home".to_string(),
      KeyCode::End => "End".to_string(),
      KeyCode::PageUp => "PageUp".to_string(),
      KeyCode::PageDown => "PageDown".to_string(),
      KeyCode::Up => "Up".to_string(),
      KeyCode::Down => "Down".to_string(),
      KeyCode::Left => "Left".to_string(),
      KeyCode::Right => "Right".to_string(),
      KeyCode::F(n) => format!("F{n}"),
      _ => format!("{:?}", self.code),
    };

    if self.modifiers.contains(KeyModifiers::CONTROL) {
      format!("Ctrl+{key_name}")
    } else if self.modifiers.contains(KeyModifiers::ALT) {
      format!("Alt+{key_name}")
    } else {
      key_name
    }
  }
}

pub const DEFAULT_LAST_DIR_FILE: &str = ".tui_fm_last_dir";
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

pub struct Config {
  pub show_hidden: bool,
  /// File name under the home directory holding the last visited directory.
  pub last_dir_file: String,
  pub log_level: String,
  pub normal_keys: HashMap<KeyBinding, Action>,
}

#[derive(Deserialize, Default)]
struct TomlConfig {
  general: Option<GeneralConfig>,
  keys: Option<KeysConfig>,
}

#[derive(Deserialize, Default)]
struct GeneralConfig {
  show_hidden: Option<bool>,
  last_dir_file: Option<String>,
  log_level: Option<String>,
}

#[derive(Deserialize, Default)]
struct KeysConfig {
  normal: Option<HashMap<String, String>>,
}

pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
  if s.is_empty() {
    return None;
  }

  let parts: Vec<&str> = s.split('+').collect();

  if parts.len() == 1 {
    let key = parts[0];
    if let Some(code) = named_key(key) {
      return Some(KeyBinding { code, modifiers: KeyModifiers::NONE });
    }
    let chars: Vec<char> = key.chars().collect();
    if chars.len() == 1 {
      return Some(KeyBinding { code: KeyCode::Char(chars[0]), modifiers: KeyModifiers::NONE });
    }
    return None;
  }

  if parts.len() == 2 {
    let modifier_str = parts[0].to_lowercase();
    let key_str = parts[1];

    let modifiers = match modifier_str.as_str() {
      "ctrl" => KeyModifiers::CONTROL,
      "shift" => {
        let chars: Vec<char> = key_str.chars().collect();
        if chars.len() == 1 {
          let c = chars[0].to_uppercase().next().unwrap_or(chars[0]);
          return Some(KeyBinding { code: KeyCode::Char(c), modifiers: KeyModifiers::NONE });
        }
        if let Some(code) = named_key(key_str) {
          return Some(KeyBinding { code, modifiers: KeyModifiers::SHIFT });
        }
        return None;
      }
      "alt" => KeyModifiers::ALT,
      _ => return None,
    };

    if let Some(code) = named_key(key_str) {
      return Some(KeyBinding { code, modifiers });
    }
    let chars: Vec<char> = key_str.chars().collect();
    if chars.len() == 1 {
      return Some(KeyBinding { code: KeyCode::Char(chars[0]), modifiers });
    }
    return None;
  }

  None
}

fn named_key(s: &str) -> Option<KeyCode> {
  match s.to_lowercase().as_str() {
    "enter" => Some(KeyCode::Enter),
    "space" => Some(KeyCode::Char(' ')),
    "esc" => Some(KeyCode::Esc),
    "up" => Some(KeyCode::Up),
    "down" => Some(KeyCode::Down),
    "left" => Some(KeyCode::Left),
    "right" => Some(KeyCode::Right),
    "backspace" => Some(KeyCode::Backspace),
    "delete" => Some(KeyCode::Delete),
    "tab" => Some(KeyCode::Tab),
    "home" => Some(KeyCode::Home),
    "end" => Some(KeyCode::End),
    "pageup" => Some(KeyCode::PageUp),
    "pagedown" => Some(KeyCode::PageDown),
    s if s.starts_with('f') && s.len() > 1 => {
      s[1..].parse::<u8>().ok().filter(|&n| (1..=24).contains(&n)).map(KeyCode::F)
    }
    _ => None,
  }
}

pub fn normalize_key_event(key: KeyEvent) -> KeyBinding {
  let mut modifiers = key.modifiers;
  if let KeyCode::Char(c) = key.code
    && c.is_uppercase()
  {
    modifiers -= KeyModifiers::SHIFT;
  }
  KeyBinding { code: key.code, modifiers }
}

impl Default for Config {
  fn default() -> Self {
    let mut config = Config::empty();
    let mut errors = Vec::new();
    config.apply_toml_str(Config::default_toml(), &mut errors);
    config
  }
}

impl Config {
  fn empty() -> Self {
    Config {
      show_hidden: false,
      last_dir_file: DEFAULT_LAST_DIR_FILE.to_string(),
      log_level: "info".to_string(),
      normal_keys: HashMap::new(),
    }
  }

  fn apply_toml_str(&mut self, s: &str, errors: &mut Vec<String>) {
    let toml_config: TomlConfig = match toml::from_str(s) {
      Ok(c) => c,
      Err(e) => {
        errors.push(format!("failed to parse config.toml: {e}"));
        return;
      }
    };

    if let Some(general) = toml_config.general {
      if let Some(show_hidden) = general.show_hidden {
        self.show_hidden = show_hidden;
      }
      if let Some(file) = general.last_dir_file {
        if file.trim().is_empty() {
          errors.push("last_dir_file cannot be empty".to_string());
        } else {
          self.last_dir_file = file;
        }
      }
      if let Some(level) = general.log_level {
        let level = level.to_lowercase();
        if LOG_LEVELS.contains(&level.as_str()) {
          self.log_level = level;
        } else {
          errors.push(format!("invalid log_level: {level:?}"));
        }
      }
    }

    if let Some(keys) = toml_config.keys
      && let Some(normal) = keys.normal
    {
      self.normal_keys.clear();
      for (key_str, action_str) in &normal {
        let Some(kb) = parse_key_binding(key_str) else {
          errors.push(format!("invalid key binding: {key_str:?}"));
          continue;
        };
        let Some(action) = Action::from_name(action_str) else {
          errors.push(format!("invalid action: {action_str:?}"));
          continue;
        };
        self.normal_keys.insert(kb, action);
      }
    }
  }

  pub fn default_toml() -> &'static str {
    r#"[general]
show_hidden = false                 # list dotfiles on startup
last_dir_file = ".tui_fm_last_dir"  # under $HOME, written on exit
log_level = "info"                  # trace, debug, info, warn, error

[keys.normal]
j = "move_down"
k = "move_up"
h = "move_left"
l = "move_right"
down = "move_down"
up = "move_up"
left = "move_left"
right = "move_right"
enter = "move_right"
g = "go_to_top"
"shift+g" = "go_to_bottom"
"." = "toggle_hidden"
space = "toggle_selection"
c = "mark_copy"
m = "mark_move"
d = "mark_delete"
p = "apply_marks"
x = "clear_clipboard"
"ctrl+c" = "stage_copy"
"ctrl+x" = "stage_move"
"ctrl+v" = "paste"
r = "rename_start"
n = "new_entry_start"
delete = "delete_start"
"?" = "toggle_help"
q = "quit"
"#
  }

  pub fn reverse_lookup(&self) -> HashMap<Action, Vec<String>> {
    let mut map: HashMap<Action, Vec<String>> = HashMap::new();
    for (kb, action) in &self.normal_keys {
      map.entry(action.clone()).or_default().push(kb.display_key());
    }
    // Sort keys for deterministic display
    for keys in map.values_mut() {
      keys.sort();
    }
    map
  }

  pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gfd"))
  }

  pub fn load() -> (Config, Vec<String>) {
    let mut errors = Vec::new();

    let content = Self::config_dir()
      .map(|d| d.join("config.toml"))
      .and_then(|p| std::fs::read_to_string(p).ok());

    let config = match content {
      Some(s) => Self::load_from_str_with_errors(&s, &mut errors),
      None => Config::default(),
    };

    (config, errors)
  }

  #[cfg(test)]
  pub fn load_from_str(s: &str) -> Config {
    let mut errors = Vec::new();
    Self::load_from_str_with_errors(s, &mut errors)
  }

  fn load_from_str_with_errors(s: &str, errors: &mut Vec<String>) -> Config {
    let mut config = Config::default();
    config.apply_toml_str(s, errors);
    config
  }
}
