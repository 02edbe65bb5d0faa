use std::fs::{self, FileTimes, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{OpError, OpResult};

/// How a source reaches its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transfer {
  Copy,
  Move,
}

impl Transfer {
  pub fn label(self) -> &'static str {
    match self {
      Transfer::Copy => "Copy",
      Transfer::Move => "Move",
    }
  }
}

/// Delete a path permanently. Directories are removed recursively;
/// symlinks are removed without following them.
pub fn delete_path(path: &Path) -> io::Result<()> {
  let meta = fs::symlink_metadata(path)?;
  if meta.is_dir() {
    fs::remove_dir_all(path)
  } else {
    fs::remove_file(path)
  }
}

/// Returns a unique destination path by appending `_copy`, `_copy1`,
/// `_copy2`, ... to the file stem if the path already exists.
pub fn unique_dest_path(dest: &Path) -> PathBuf {
  if !exists(dest) {
    return dest.to_path_buf();
  }

  let stem = dest
    .file_stem()
    .map(|s| s.to_string_lossy().to_string())
    .unwrap_or_default();
  let ext = dest.extension().map(|e| e.to_string_lossy().to_string());
  let parent = dest.parent().unwrap_or(Path::new("."));

  let make_name = |suffix: &str| -> PathBuf {
    match &ext {
      Some(e) => parent.join(format!("{stem}{suffix}.{e}")),
      None => parent.join(format!("{stem}{suffix}")),
    }
  };

  let first = make_name("_copy");
  if !exists(&first) {
    return first;
  }

  let mut n = 1u32;
  loop {
    let candidate = make_name(&format!("_copy{n}"));
    if !exists(&candidate) {
      return candidate;
    }
    n += 1;
  }
}

/// Existence without following a dangling symlink into "absent".
pub fn exists(path: &Path) -> bool {
  fs::symlink_metadata(path).is_ok()
}

/// Copy a file or directory to `dest`. Directories are copied recursively,
/// files keep their permissions and timestamps.
pub fn copy_path(source: &Path, dest: &Path) -> io::Result<()> {
  if source.is_dir() {
    fs::create_dir(dest)?;
    let dest_root = dest.canonicalize()?;
    copy_dir_recursive(source, dest, &dest_root)
  } else {
    copy_file_preserving(source, dest)
  }
}

/// Recursively copy a directory's contents into an existing `dest`.
/// `dest_root` is skipped when met inside `source`, so copying a directory
/// into one of its own subdirectories terminates.
fn copy_dir_recursive(source: &Path, dest: &Path, dest_root: &Path) -> io::Result<()> {
  let entries: Vec<fs::DirEntry> = fs::read_dir(source)?.collect::<Result<_, _>>()?;
  for entry in entries {
    let src_path = entry.path();
    let dst_path = dest.join(entry.file_name());
    let ft = entry.file_type()?;

    if ft.is_symlink() {
      copy_symlink(&src_path, &dst_path)?;
    } else if ft.is_dir() {
      if src_path.canonicalize().is_ok_and(|p| p == dest_root) {
        continue;
      }
      fs::create_dir(&dst_path)?;
      copy_dir_recursive(&src_path, &dst_path, dest_root)?;
    } else {
      copy_file_preserving(&src_path, &dst_path)?;
    }
  }
  Ok(())
}

#[cfg(unix)]
fn copy_symlink(source: &Path, dest: &Path) -> io::Result<()> {
  let target = fs::read_link(source)?;
  std::os::unix::fs::symlink(target, dest)
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, dest: &Path) -> io::Result<()> {
  copy_file_preserving(source, dest)
}

fn copy_file_preserving(source: &Path, dest: &Path) -> io::Result<()> {
  fs::copy(source, dest)?;
  let meta = fs::metadata(source)?;
  let mut times = FileTimes::new();
  if let Ok(modified) = meta.modified() {
    times = times.set_modified(modified);
  }
  if let Ok(accessed) = meta.accessed() {
    times = times.set_accessed(accessed);
  }
  // The copy may already be read-only.
  let file = OpenOptions::new()
    .write(true)
    .open(dest)
    .or_else(|_| fs::File::open(dest))?;
  file.set_times(times)
}

/// Move with rename semantics; across filesystems falls back to
/// copy-then-delete.
pub fn move_path(source: &Path, dest: &Path) -> io::Result<()> {
  match fs::rename(source, dest) {
    Ok(()) => Ok(()),
    Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_then_delete(source, dest),
    Err(e) => Err(e),
  }
}

/// Cross-device half of `move_path`. A symlink stays a symlink.
fn copy_then_delete(source: &Path, dest: &Path) -> io::Result<()> {
  if fs::symlink_metadata(source)?.is_symlink() {
    copy_symlink(source, dest)?;
  } else {
    copy_path(source, dest)?;
  }
  delete_path(source)
}

/// Canonical form of a path that may not exist yet: the parent is resolved
/// and the final component appended.
pub fn canonical_lossy(path: &Path) -> PathBuf {
  if let Ok(p) = path.canonicalize() {
    return p;
  }
  match (path.parent(), path.file_name()) {
    (Some(parent), Some(name)) => canonical_lossy(parent).join(name),
    _ => path.to_path_buf(),
  }
}

/// True when `dest` is `source` itself or lies somewhere below it.
pub fn is_self_contained(source: &Path, dest: &Path) -> bool {
  let source = canonical_lossy(source);
  let dest = canonical_lossy(dest);
  dest.starts_with(&source)
}

/// Copy or move `source` to `dest` after the shared checks: the source
/// must exist, the destination's parent must be a directory, a move may
/// not land inside its own source, and a taken name gets a `_copy` suffix.
/// Returns the path actually written.
pub fn transfer_to(source: &Path, dest: &Path, op: Transfer) -> OpResult<PathBuf> {
  if !exists(source) {
    return Err(OpError::NotFound(source.to_path_buf()));
  }

  let parent = dest.parent().unwrap_or(Path::new("."));
  if !parent.is_dir() {
    return Err(OpError::DestinationInvalid(parent.to_path_buf()));
  }

  if op == Transfer::Move && is_self_contained(source, dest) {
    let name = source.file_name().map(PathBuf::from).unwrap_or_else(|| source.to_path_buf());
    return Err(OpError::SelfContainment(name));
  }

  let dest = unique_dest_path(dest);
  let result = match op {
    Transfer::Copy => copy_path(source, &dest),
    Transfer::Move => move_path(source, &dest),
  };
  result.map_err(|e| transfer_error(e, source, &dest))?;
  Ok(dest)
}

/// Blame the source only when it is really gone; anything else went wrong
/// on the way to `dest`.
fn transfer_error(err: io::Error, source: &Path, dest: &Path) -> OpError {
  if !exists(source) {
    return OpError::NotFound(source.to_path_buf());
  }
  match err.kind() {
    io::ErrorKind::PermissionDenied => OpError::AccessDenied(dest.to_path_buf()),
    _ => OpError::Io(io::Error::new(err.kind(), format!("{}: {err}", dest.display()))),
  }
}

pub fn create_file(path: &Path) -> OpResult<()> {
  fs::File::create_new(path).map_err(|e| OpError::from_io(e, path))?;
  Ok(())
}

pub fn create_dir(path: &Path) -> OpResult<()> {
  fs::create_dir(path).map_err(|e| OpError::from_io(e, path))
}

/// Rename within the same directory. Refuses to clobber an existing entry.
pub fn rename_path(source: &Path, new_name: &str) -> OpResult<PathBuf> {
  let parent = source.parent().unwrap_or(Path::new("."));
  let target = parent.join(new_name);
  if target != source && exists(&target) {
    return Err(OpError::Io(io::Error::new(
      io::ErrorKind::AlreadyExists,
      format!("{new_name} already exists"),
    )));
  }
  fs::rename(source, &target).map_err(|e| OpError::from_io(e, source))?;
  Ok(target)
}
