//! Flat-file statistics persistence.
//!
//! One line per known human contestant, `name;wins;losses;drawn;`.

mod error;
mod record;
mod store;

pub use error::StoreError;
pub use record::{StoredLine, format_record, parse_line};
pub use store::{Discard, StatsStore};
