pub mod storage;
pub mod types;

pub use storage::{append_history, load_history, load_wins, save_wins, HistoryRow};
pub use types::{coerce_wins, WinsRow, WinsTable};
