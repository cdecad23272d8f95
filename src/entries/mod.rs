pub mod storage;
pub mod types;

pub use storage::{load_entries, save_entries};
pub use types::{Entry, EntryLog};
