//! Collection types used across Formwork.
//!
//! Callback tables and lookup maps are keyed by small integer ids, so the
//! faster AHash hasher is used everywhere instead of SipHash.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};
