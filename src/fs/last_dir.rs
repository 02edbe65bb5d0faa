use std::io;
use std::path::{Path, PathBuf};

/// Location of the "last directory" file: `file_name` inside the home
/// directory. A shell wrapper can `cd` into its content after exit.
pub fn last_dir_file(file_name: &str) -> Option<PathBuf> {
  dirs::home_dir().map(|home| home.join(file_name))
}

pub fn read_last_dir(file: &Path) -> Option<PathBuf> {
  let content = std::fs::read_to_string(file).ok()?;
  let trimmed = content.trim();
  if trimmed.is_empty() {
    None
  } else {
    Some(PathBuf::from(trimmed))
  }
}

/// Writes `end` into `file` when the session finished somewhere other than
/// where it started. `previous` is what the file held at startup; an
/// identical value is not rewritten. Returns whether the file was written.
pub fn persist_last_dir(
  file: &Path,
  start: &Path,
  end: &Path,
  previous: Option<&Path>,
) -> io::Result<bool> {
  if start == end || previous == Some(end) {
    return Ok(false);
  }
  std::fs::write(file, end.to_string_lossy().as_bytes())?;
  Ok(true)
}
