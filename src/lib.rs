// TodoStore - In-memory to-do list with status tabs, due dates and sorted views

pub mod config;
pub mod filter;
pub mod models;
pub mod render;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use filter::{Filter, SortKey};
pub use models::{Status, TodoId, TodoItem, now_ms, parse_due_date};
pub use session::{Event, Outcome, Session, Snapshot};
pub use store::{TabCounts, TodoStore, is_overdue, is_overdue_on};
