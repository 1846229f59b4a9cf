//! Local persistence.
//!
//! A single SQLite database in the config directory backs a small
//! key-value table; the only durable value today is the search history.

mod db;
mod history;

pub use db::Database;
pub use history::{HISTORY_KEY, MAX_HISTORY};
