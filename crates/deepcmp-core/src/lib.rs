//! Core value model for structural comparison
//!
//! This crate provides the fundamental types used by the deepcmp comparator:
//! Value (a dynamic tagged union over null, booleans, numbers, strings,
//! sequences, and keyed mappings) and Kind (its per-call runtime
//! discriminant). Composite values are reference-counted shared cells, so
//! values can be aliased and self-referential.

mod kind;
mod value;

pub use kind::Kind;
pub use value::{CyclicValueError, Value};
