use std::collections::BTreeMap;

use crate::fs::entry::PARENT_NAME;

/// Pending action attached to a file in the current directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTag {
  Copy,
  Move,
  Delete,
}

impl ActionTag {
  pub fn label(self) -> &'static str {
    match self {
      ActionTag::Copy => "Copy",
      ActionTag::Move => "Move",
      ActionTag::Delete => "Delete",
    }
  }

  /// Short form shown next to a marked name.
  pub fn badge(self) -> &'static str {
    match self {
      ActionTag::Copy => "[C]",
      ActionTag::Move => "[M]",
      ActionTag::Delete => "[D]",
    }
  }
}

/// Filename -> tag for the directory being browsed. Kept ordered by name so
/// batch phases run in a stable order.
#[derive(Debug, Default, Clone)]
pub struct MarkMap {
  tags: BTreeMap<String, ActionTag>,
}

/// Mark names split by tag, each in name order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Partition {
  pub copy: Vec<String>,
  pub moves: Vec<String>,
  pub delete: Vec<String>,
}

impl Partition {
  pub fn is_empty(&self) -> bool {
    self.copy.is_empty() && self.moves.is_empty() && self.delete.is_empty()
  }
}

impl MarkMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Tag `name` with `tag`; the same tag again removes it, a different tag
  /// replaces it. The parent row is never tagged.
  pub fn toggle(&mut self, name: &str, tag: ActionTag) {
    if name == PARENT_NAME {
      return;
    }
    if self.tags.get(name) == Some(&tag) {
      self.tags.remove(name);
    } else {
      self.tags.insert(name.to_string(), tag);
    }
  }

  /// Tag `name` unconditionally. The parent row is never tagged.
  pub fn set(&mut self, name: &str, tag: ActionTag) {
    if name != PARENT_NAME {
      self.tags.insert(name.to_string(), tag);
    }
  }

  pub fn get(&self, name: &str) -> Option<ActionTag> {
    self.tags.get(name).copied()
  }

  pub fn remove(&mut self, name: &str) -> Option<ActionTag> {
    self.tags.remove(name)
  }

  pub fn clear(&mut self) {
    self.tags.clear();
  }

  pub fn is_empty(&self) -> bool {
    self.tags.is_empty()
  }

  pub fn len(&self) -> usize {
    self.tags.len()
  }

  pub fn partition(&self) -> Partition {
    let mut partition = Partition::default();
    for (name, tag) in &self.tags {
      match tag {
        ActionTag::Copy => partition.copy.push(name.clone()),
        ActionTag::Move => partition.moves.push(name.clone()),
        ActionTag::Delete => partition.delete.push(name.clone()),
      }
    }
    partition
  }
}
