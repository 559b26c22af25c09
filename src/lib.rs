//! vanilla-sort - stable, deterministic, multi-key sorting
//!
//! ```ignore
//! use vanilla_sort::{using, Direction};
//!
//! let sorted = using(cities)
//!     .by_field("country", Direction::Ascending)
//!     .by_field("population", Direction::Descending)
//!     .get()?;
//! ```

pub mod cli;
pub mod observability;
pub mod sort;

pub use sort::{
    sort_json, using, using_json, Direction, OrderingRule, Record, SortError, SortKey,
    SortResult, SortSession, SortSpec, Sorted,
};
