use crate::error::OpError;

#[derive(Debug)]
pub struct Failure {
  pub label: &'static str,
  pub name: String,
  pub error: OpError,
}

impl Failure {
  pub fn message(&self) -> String {
    format!("{} {}: {}", self.label, self.name, self.error)
  }
}

/// Outcome of a batch run or a paste: what succeeded and what did not.
#[derive(Debug, Default)]
pub struct Report {
  pub completed: usize,
  pub failures: Vec<Failure>,
}

impl Report {
  pub fn record(&mut self, label: &'static str, name: impl Into<String>, error: OpError) {
    let name = name.into();
    tracing::warn!("{label} {name} failed: {error}");
    self.failures.push(Failure { label, name, error });
  }

  pub fn is_success(&self) -> bool {
    self.failures.is_empty()
  }

  pub fn messages(&self) -> Vec<String> {
    self.failures.iter().map(Failure::message).collect()
  }

  /// Lines for the modal shown once the operation is over.
  pub fn summary(&self, success: &str) -> Vec<String> {
    if self.is_success() {
      return vec![success.to_string()];
    }
    let mut lines = vec!["Errors:".to_string()];
    lines.extend(self.messages());
    lines
  }
}
