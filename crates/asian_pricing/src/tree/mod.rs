//! Exact binomial path enumeration.
//!
//! Deterministic: no randomness, cost `O(2^n · n)` time and `O(1)` space per
//! path (paths are never retained).

mod enumerator;

pub use enumerator::{PathEnumerator, ENUMERATION_BLOCK, MAX_ENUMERATION_STEPS};
