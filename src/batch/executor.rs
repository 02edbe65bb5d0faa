use std::path::{Path, PathBuf};

use super::marks::{MarkMap, Partition};
use super::report::Report;
use crate::error::OpError;
use crate::fs::Transfer;
use crate::fs::ops::{self, exists, transfer_to};

/// Where a batch run currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStep {
  /// Waiting for the optional shared destination of one transfer kind.
  CollectDestination(Transfer),
  /// Waiting for the destination of the `index`th file of `op`.
  ResolvePerFile { op: Transfer, index: usize },
  /// Filesystem work in progress; never observed between answers.
  Execute,
  /// Everything ran; the report is ready.
  Report,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Copy,
  Move,
  Delete,
  Done,
}

/// One application of the mark set. Created from the marks, fed answers
/// one at a time, finished when `step()` is `BatchStep::Report`.
#[derive(Debug)]
pub struct BatchRun {
  cwd: PathBuf,
  plan: Partition,
  copy_dest: Option<PathBuf>,
  move_dest: Option<PathBuf>,
  pending_shared: Vec<Transfer>,
  phase: Phase,
  index: usize,
  step: BatchStep,
  report: Report,
}

impl BatchRun {
  /// Returns `None` when nothing is marked.
  pub fn start(marks: &MarkMap, cwd: &Path) -> Option<Self> {
    let plan = marks.partition();
    if plan.is_empty() {
      return None;
    }

    let mut pending_shared = Vec::new();
    if !plan.copy.is_empty() {
      pending_shared.push(Transfer::Copy);
    }
    if !plan.moves.is_empty() {
      pending_shared.push(Transfer::Move);
    }
    tracing::info!(
      copy = plan.copy.len(),
      moves = plan.moves.len(),
      delete = plan.delete.len(),
      "batch started in {}",
      cwd.display()
    );

    let mut run = Self {
      cwd: cwd.to_path_buf(),
      plan,
      copy_dest: None,
      move_dest: None,
      pending_shared,
      phase: Phase::Copy,
      index: 0,
      step: BatchStep::Execute,
      report: Report::default(),
    };
    run.next_shared_question();
    Some(run)
  }

  pub fn step(&self) -> BatchStep {
    self.step
  }

  pub fn is_finished(&self) -> bool {
    self.step == BatchStep::Report
  }

  /// Text of the prompt the run is waiting on, if any.
  pub fn question(&self) -> Option<String> {
    match self.step {
      BatchStep::CollectDestination(op) => Some(format!(
        "Destination for {} (leave blank to ask per file): ",
        op.label().to_uppercase()
      )),
      BatchStep::ResolvePerFile { op, index } => {
        let name = self.names(op).get(index)?;
        let verb = match op {
          Transfer::Copy => "copy",
          Transfer::Move => "move",
        };
        Some(format!("Where to {verb} {name}? (directory): "))
      }
      BatchStep::Execute | BatchStep::Report => None,
    }
  }

  /// Feed the answer to the pending question. `None` means the prompt was
  /// cancelled.
  pub fn answer(&mut self, answer: Option<String>) {
    match self.step {
      BatchStep::CollectDestination(op) => {
        // A cancelled shared prompt means the same as a blank one.
        let dest = answer.and_then(|a| self.resolve(&a));
        match op {
          Transfer::Copy => self.copy_dest = dest,
          Transfer::Move => self.move_dest = dest,
        }
        self.next_shared_question();
      }
      BatchStep::ResolvePerFile { op, index } => {
        let Some(name) = self.names(op).get(index).cloned() else {
          self.advance();
          self.drive();
          return;
        };
        match answer.and_then(|a| self.resolve(&a)) {
          Some(dir) => self.transfer_one(op, &name, &dir),
          None => self.report.record(op.label(), name, OpError::Cancelled),
        }
        self.advance();
        self.drive();
      }
      BatchStep::Execute | BatchStep::Report => {}
    }
  }

  /// Consume the finished run. Unanswered work is not performed.
  pub fn into_report(self) -> Report {
    tracing::info!(
      done = self.report.completed,
      failed = self.report.failures.len(),
      "batch finished"
    );
    self.report
  }

  fn next_shared_question(&mut self) {
    if self.pending_shared.is_empty() {
      self.phase = Phase::Copy;
      self.index = 0;
      self.drive();
    } else {
      let op = self.pending_shared.remove(0);
      self.step = BatchStep::CollectDestination(op);
    }
  }

  fn names(&self, op: Transfer) -> &[String] {
    match op {
      Transfer::Copy => &self.plan.copy,
      Transfer::Move => &self.plan.moves,
    }
  }

  fn shared_dest(&self, op: Transfer) -> Option<&PathBuf> {
    match op {
      Transfer::Copy => self.copy_dest.as_ref(),
      Transfer::Move => self.move_dest.as_ref(),
    }
  }

  /// Blank answers resolve to nothing; `~` is the home directory and
  /// relative paths hang off the browsed directory.
  fn resolve(&self, answer: &str) -> Option<PathBuf> {
    let answer = answer.trim();
    if answer.is_empty() {
      return None;
    }
    let path = match answer.strip_prefix('~') {
      Some(rest) if rest.is_empty() || rest.starts_with('/') => {
        let home = dirs::home_dir()?;
        home.join(rest.trim_start_matches('/'))
      }
      _ => PathBuf::from(answer),
    };
    Some(if path.is_absolute() { path } else { self.cwd.join(path) })
  }

  fn advance(&mut self) {
    self.index += 1;
  }

  /// Runs everything that needs no answer, stopping at the next per-file
  /// question or at the end.
  fn drive(&mut self) {
    self.step = BatchStep::Execute;
    loop {
      match self.phase {
        Phase::Copy | Phase::Move => {
          let op = if self.phase == Phase::Copy {
            Transfer::Copy
          } else {
            Transfer::Move
          };
          let Some(name) = self.names(op).get(self.index).cloned() else {
            self.phase = if op == Transfer::Copy {
              Phase::Move
            } else {
              Phase::Delete
            };
            self.index = 0;
            continue;
          };

          let source = self.cwd.join(&name);
          if !exists(&source) {
            self.report.record(op.label(), name, OpError::NotFound(source));
            self.advance();
            continue;
          }
          match self.shared_dest(op).cloned() {
            Some(dir) => {
              self.transfer_one(op, &name, &dir);
              self.advance();
            }
            None => {
              self.step = BatchStep::ResolvePerFile {
                op,
                index: self.index,
              };
              return;
            }
          }
        }
        Phase::Delete => {
          let names = std::mem::take(&mut self.plan.delete);
          for name in &names {
            self.delete_one(name);
          }
          self.plan.delete = names;
          self.phase = Phase::Done;
        }
        Phase::Done => {
          self.step = BatchStep::Report;
          return;
        }
      }
    }
  }

  fn transfer_one(&mut self, op: Transfer, name: &str, dir: &Path) {
    let source = self.cwd.join(name);
    match transfer_to(&source, &dir.join(name), op) {
      Ok(dest) => {
        tracing::debug!("{} {} -> {}", op.label(), source.display(), dest.display());
        self.report.completed += 1;
      }
      Err(e) => self.report.record(op.label(), name, e),
    }
  }

  fn delete_one(&mut self, name: &str) {
    let path = self.cwd.join(name);
    if !exists(&path) {
      self.report.record("Delete", name, OpError::NotFound(path));
      return;
    }
    match ops::delete_path(&path) {
      Ok(()) => {
        tracing::debug!("deleted {}", path.display());
        self.report.completed += 1;
      }
      Err(e) => self.report.record("Delete", name, OpError::from_io(e, &path)),
    }
  }
}
