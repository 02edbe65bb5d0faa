use std::io;
use std::path::Path;

use crate::error::{OpError, OpResult};

/// Hand `path` to the platform's default application without waiting for it.
pub fn open_default(path: &Path) -> OpResult<()> {
  open::that_detached(path).map_err(|e| classify(e, path))?;
  tracing::info!("opened {}", path.display());
  Ok(())
}

/// A missing launcher binary (xdg-open and friends) means the platform has
/// no handler at all.
fn classify(err: io::Error, path: &Path) -> OpError {
  match err.kind() {
    io::ErrorKind::NotFound if path.exists() => OpError::Unsupported,
    _ => OpError::from_io(err, path),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fs::ops::tests::test_dir;

  #[test]
  fn test_missing_launcher_is_unsupported() {
    let dir = test_dir("opener");
    let file = dir.join("a.txt");
    std::fs::write(&file, "x").unwrap();
    let err = classify(io::Error::new(io::ErrorKind::NotFound, "xdg-open"), &file);
    assert!(matches!(err, OpError::Unsupported));
    let _ = std::fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_other_errors_keep_their_kind() {
    let path = Path::new("/nowhere/a.txt");
    let err = classify(io::Error::new(io::ErrorKind::NotFound, "gone"), path);
    assert!(matches!(err, OpError::NotFound(_)));
    let err = classify(io::Error::new(io::ErrorKind::PermissionDenied, "no"), path);
    assert!(matches!(err, OpError::AccessDenied(_)));
  }
}
