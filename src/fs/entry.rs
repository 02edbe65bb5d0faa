use std::path::PathBuf;

pub const PARENT_NAME: &str = "..";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  Parent,
  Directory,
  Symlink,
  Executable,
  Regular,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
  pub path: PathBuf,
  pub name: String,
}

impl FileEntry {
  pub fn from_path(path: PathBuf) -> Self {
    let name = path
      .file_name()
      .map(|n| n.to_string_lossy().to_string())
      .unwrap_or_default();
    Self { path, name }
  }

  /// The synthetic `..` row pointing at `parent`.
  pub fn parent(parent: PathBuf) -> Self {
    Self {
      path: parent,
      name: PARENT_NAME.to_string(),
    }
  }

  pub fn is_parent(&self) -> bool {
    self.name == PARENT_NAME
  }

  pub fn is_hidden(&self) -> bool {
    !self.is_parent() && self.name.starts_with('.')
  }

  /// Queried from the filesystem on every call; a directory reached
  /// through a symlink counts as a directory.
  pub fn kind(&self) -> EntryKind {
    if self.is_parent() {
      return EntryKind::Parent;
    }
    if self.path.is_dir() {
      return EntryKind::Directory;
    }
    if self.path.symlink_metadata().is_ok_and(|m| m.is_symlink()) {
      return EntryKind::Symlink;
    }
    if is_executable(&self.path) {
      return EntryKind::Executable;
    }
    EntryKind::Regular
  }

  pub fn is_dir(&self) -> bool {
    matches!(self.kind(), EntryKind::Parent | EntryKind::Directory)
  }
}

#[cfg(unix)]
fn is_executable(path: &std::path::Path) -> bool {
  use std::os::unix::fs::PermissionsExt;
  path.metadata().is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(_path: &std::path::Path) -> bool {
  false
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fs::ops::tests::test_dir;
  use std::fs;

  #[test]
  fn test_from_path_file() {
    let dir = test_dir("entry_file");
    let file = dir.join("test.txt");
    fs::write(&file, "hello").unwrap();

    let entry = FileEntry::from_path(file.clone());
    assert_eq!(entry.name, "test.txt");
    assert_eq!(entry.path, file);
    assert_eq!(entry.kind(), EntryKind::Regular);
    assert!(!entry.is_dir());
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_kind_dir_and_parent() {
    let dir = test_dir("entry_dir");
    fs::create_dir_all(dir.join("sub")).unwrap();
    assert_eq!(FileEntry::from_path(dir.join("sub")).kind(), EntryKind::Directory);

    let parent = FileEntry::parent(dir.clone());
    assert!(parent.is_parent());
    assert_eq!(parent.kind(), EntryKind::Parent);
    assert!(parent.is_dir());
    assert!(!parent.is_hidden());
    let _ = fs::remove_dir_all(&dir);
  }

  #[cfg(unix)]
  #[test]
  fn test_kind_symlink_and_executable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = test_dir("entry_kinds");
    let script = dir.join("run.sh");
    fs::write(&script, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    assert_eq!(FileEntry::from_path(script.clone()).kind(), EntryKind::Executable);

    let link = dir.join("link.txt");
    fs::write(dir.join("real.txt"), "x").unwrap();
    std::os::unix::fs::symlink(dir.join("real.txt"), &link).unwrap();
    assert_eq!(FileEntry::from_path(link).kind(), EntryKind::Symlink);

    let dir_link = dir.join("dir_link");
    std::os::unix::fs::symlink(&dir, &dir_link).unwrap();
    assert_eq!(FileEntry::from_path(dir_link).kind(), EntryKind::Directory);
    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_is_hidden() {
    assert!(FileEntry::from_path(PathBuf::from("/x/.gitignore")).is_hidden());
    assert!(!FileEntry::from_path(PathBuf::from("/x/README.md")).is_hidden());
  }
}
