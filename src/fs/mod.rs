pub mod entry;
pub mod last_dir;
pub mod listing;
pub mod ops;

pub use entry::{EntryKind, FileEntry};
pub use ops::Transfer;
