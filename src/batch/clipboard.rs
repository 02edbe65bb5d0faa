use std::path::{Path, PathBuf};

use super::report::Report;
use crate::fs::Transfer;
use crate::fs::ops::transfer_to;

/// Absolute paths staged for a later paste, all sharing one transfer kind.
/// Survives directory changes.
#[derive(Debug, Default, Clone)]
pub struct Clipboard {
  paths: Vec<PathBuf>,
  op: Option<Transfer>,
}

impl Clipboard {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the content wholesale. Staging nothing clears it.
  pub fn stage(&mut self, paths: Vec<PathBuf>, op: Transfer) {
    if paths.is_empty() {
      self.clear();
      return;
    }
    tracing::debug!("staged {} path(s) for {}", paths.len(), op.label());
    self.paths = paths;
    self.op = Some(op);
  }

  pub fn clear(&mut self) {
    self.paths.clear();
    self.op = None;
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty()
  }

  pub fn len(&self) -> usize {
    self.paths.len()
  }

  pub fn op(&self) -> Option<Transfer> {
    self.op
  }

  pub fn paths(&self) -> &[PathBuf] {
    &self.paths
  }

  /// Drop a path that no longer exists (and anything staged below it).
  pub fn forget(&mut self, path: &Path) {
    self.paths.retain(|p| !p.starts_with(path));
    if self.paths.is_empty() {
      self.op = None;
    }
  }

  /// Follow a rename of `old` to `new`, including staged paths below it.
  pub fn rename(&mut self, old: &Path, new: &Path) {
    for p in &mut self.paths {
      if let Ok(rest) = p.strip_prefix(old) {
        *p = if rest.as_os_str().is_empty() {
          new.to_path_buf()
        } else {
          new.join(rest)
        };
      }
    }
  }

  /// Copy or move every staged path into `cwd` under its own name. A move
  /// paste empties the clipboard afterwards whatever the outcome.
  pub fn paste(&mut self, cwd: &Path) -> Report {
    let mut report = Report::default();
    let Some(op) = self.op else {
      return report;
    };

    for source in &self.paths {
      let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| source.display().to_string());
      match transfer_to(source, &cwd.join(&name), op) {
        Ok(dest) => {
          tracing::debug!("pasted {} -> {}", source.display(), dest.display());
          report.completed += 1;
        }
        Err(e) => report.record(op.label(), name, e),
      }
    }
    tracing::info!(
      done = report.completed,
      failed = report.failures.len(),
      "paste ({}) into {}",
      op.label(),
      cwd.display()
    );

    if op == Transfer::Move {
      self.clear();
    }
    report
  }
}
