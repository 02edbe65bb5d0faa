use std::path::Path;

use super::entry::FileEntry;
use crate::error::{OpError, OpResult};

/// Lists `dir` sorted by name, with a leading `..` row unless `dir` is a
/// filesystem root.
pub fn read_entries(dir: &Path, show_hidden: bool) -> OpResult<Vec<FileEntry>> {
  let read_dir = std::fs::read_dir(dir).map_err(|e| OpError::from_io(e, dir))?;

  let mut children: Vec<FileEntry> = read_dir
    .flatten()
    .map(|entry| FileEntry::from_path(entry.path()))
    .filter(|entry| show_hidden || !entry.is_hidden())
    .collect();
  children.sort_by(|a, b| a.name.cmp(&b.name));

  let mut entries = Vec::with_capacity(children.len() + 1);
  if let Some(parent) = dir.parent() {
    entries.push(FileEntry::parent(parent.to_path_buf()));
  }
  entries.extend(children);
  Ok(entries)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fs::ops::tests::test_dir;
  use std::fs;

  fn names(entries: &[FileEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.name.as_str()).collect()
  }

  #[test]
  fn test_sorted_with_parent_first() {
    let dir = test_dir("listing_sorted");
    fs::write(dir.join("b.txt"), "").unwrap();
    fs::create_dir_all(dir.join("c_dir")).unwrap();
    fs::write(dir.join("a.txt"), "").unwrap();

    let entries = read_entries(&dir, false).unwrap();
    assert_eq!(names(&entries), vec!["..", "a.txt", "b.txt", "c_dir"]);
    assert_eq!(entries[0].path, dir.parent().unwrap());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_hidden_filter() {
    let dir = test_dir("listing_hidden");
    fs::write(dir.join(".secret"), "").unwrap();
    fs::write(dir.join("shown"), "").unwrap();

    assert_eq!(names(&read_entries(&dir, false).unwrap()), vec!["..", "shown"]);
    assert_eq!(names(&read_entries(&dir, true).unwrap()), vec!["..", ".secret", "shown"]);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_missing_dir_is_not_found() {
    let dir = test_dir("listing_missing");
    let err = read_entries(&dir.join("gone"), false).unwrap_err();
    assert!(matches!(err, OpError::NotFound(_)));
    let _ = fs::remove_dir_all(&dir);
  }
}
