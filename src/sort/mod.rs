//! Stable multi-key sorting
//!
//! # Flow
//!
//! 1. `using(...)` snapshots the input; positions become the tie-break
//! 2. `by_*` calls normalize rules into directed comparators, in priority order
//! 3. `get()` merge sorts snapshot positions with the composite comparison
//! 4. Values are emitted in output order, each with its original key
//!
//! # Invariants
//!
//! - A rule is consulted only when every earlier rule reported equal
//! - Elements equal under every rule keep their input order
//! - Output is a permutation of the input, identical across repeated `get()`

mod errors;
mod json;
mod loose;
mod merge;
mod record;
mod rule;
mod session;

pub use errors::{BoxError, SortError, SortResult};
pub use json::{sort_json, using_json, JsonKey, JsonShape};
pub use loose::{loose_cmp, loose_cmp_opt, truthy, Natural, SortKey};
pub use record::{FieldProbe, Record};
pub use rule::{
    normalize, Direction, FieldReader, KeyExtractor, KeyRule, NormalizedComparator,
    OrderingRule, SortSpec,
};
pub use session::{using, SortSession, SortStats, Sorted};
