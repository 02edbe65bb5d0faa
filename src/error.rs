use std::io;
use std::path::{Path, PathBuf};

/// Failure of a single filesystem item (or of a listing / open request).
///
/// Batch and clipboard operations collect these per item into a
/// [`crate::batch::Report`]; none of them aborts the remaining work.
#[derive(Debug, thiserror::Error)]
pub enum OpError {
  #[error("access denied: {}", .0.display())]
  AccessDenied(PathBuf),

  #[error("not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("destination directory does not exist: {}", .0.display())]
  DestinationInvalid(PathBuf),

  #[error("cannot move {} into itself", .0.display())]
  SelfContainment(PathBuf),

  #[error("skipped")]
  Cancelled,

  #[error("no default application handler for this platform")]
  Unsupported,

  #[error(transparent)]
  Io(#[from] io::Error),
}

pub type OpResult<T> = Result<T, OpError>;

impl OpError {
  /// Classify an I/O error raised while touching `path`.
  pub fn from_io(err: io::Error, path: &Path) -> Self {
    match err.kind() {
      io::ErrorKind::NotFound => OpError::NotFound(path.to_path_buf()),
      io::ErrorKind::PermissionDenied => OpError::AccessDenied(path.to_path_buf()),
      _ => OpError::Io(err),
    }
  }
}
