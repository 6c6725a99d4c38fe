pub mod editor;
pub mod history;
pub mod term;

pub use editor::{LineEditor, ReadOutcome};
pub use history::HistoryRing;
