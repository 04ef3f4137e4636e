//! Structural deep-equality comparison
//!
//! This crate compares two arbitrary runtime values — "expected" and
//! "actual" — and reports either success or a precise description of the
//! first structural difference found: kind confusion, array/object/null
//! shape confusion, sequence length divergence, mapping key-set divergence,
//! or a leaf value mismatch, always with the full dotted key path to the
//! divergence.
//!
//! Reference cycles are detected and treated as equal once re-entered, so
//! comparing self-referential structures terminates. Each top-level
//! comparison is independent: no state is shared across calls.

mod compare;
mod error;
mod path;
mod runner;

pub use compare::{compare, Comparison};
pub use error::{CompareError, Shape};
pub use path::{KeyPath, Segment};
pub use runner::{run, run_all, run_suite, RunSummary, TestCase};

pub use deepcmp_core::{CyclicValueError, Kind, Value};
