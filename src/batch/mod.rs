pub mod clipboard;
pub mod executor;
pub mod marks;
pub mod report;

pub use clipboard::Clipboard;
pub use executor::{BatchRun, BatchStep};
pub use marks::{ActionTag, MarkMap};
pub use report::Report;
