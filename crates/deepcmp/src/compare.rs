//! Recursive structural comparison with cycle detection

use std::collections::HashSet;
use std::rc::Rc;

use deepcmp_core::Value;
use serde_json::Number;
use tracing::{debug, trace};

use crate::error::{CompareError, Shape};
use crate::path::KeyPath;

/// Reference-identity pairs already entered during one top-level comparison
///
/// Once a pair is recorded it is never re-evaluated: a re-entered pair is
/// treated as equal, which is what terminates recursion on cyclic graphs.
/// Scoped strictly to one `compare` call.
type VisitedPairs = HashSet<(*const (), *const ())>;

/// Result of one top-level comparison
#[derive(Debug)]
pub struct Comparison {
    /// The caller-supplied label for this comparison
    pub message: String,
    /// Success, or the first structural difference found
    pub outcome: Result<(), CompareError>,
    rendered_expected: String,
}

impl Comparison {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&CompareError> {
        self.outcome.as_ref().err()
    }

    /// Flatten the outcome into one displayable line
    pub fn summary(&self) -> String {
        match &self.outcome {
            Ok(()) => format!("✅ {} - PASS ({})", self.message, self.rendered_expected),
            Err(err) => format!("❌ {} - FAIL: {}", self.message, err),
        }
    }
}

/// Compare two values structurally, reporting the first difference
///
/// Descends depth-first over both values in lockstep, tracking the key path
/// for diagnostics. Reference cycles terminate: a pair of composites already
/// entered during this call is treated as equal rather than re-compared.
/// Inputs are assumed not to be mutated for the duration of the call.
pub fn compare(message: &str, expected: &Value, actual: &Value) -> Comparison {
    let mut path = KeyPath::new();
    let mut visited = VisitedPairs::new();
    let outcome = compare_at(&mut path, &mut visited, expected, actual);
    if let Err(err) = &outcome {
        debug!(message, %err, "comparison failed");
    }
    Comparison {
        message: message.to_string(),
        outcome,
        rendered_expected: expected.to_string(),
    }
}

fn compare_at(
    path: &mut KeyPath,
    visited: &mut VisitedPairs,
    expected: &Value,
    actual: &Value,
) -> Result<(), CompareError> {
    trace!(path = %path, kind = %expected.kind(), "comparing");

    // Identity short-circuit: the same allocation is equal to itself. This
    // also terminates self-referential structures whose cyclic node is
    // literally the same reference on both sides.
    if expected.same_ref(actual) {
        return Ok(());
    }

    match (expected, actual) {
        (Value::Array(exp), Value::Array(act)) => {
            let pair = (
                Rc::as_ptr(exp) as *const (),
                Rc::as_ptr(act) as *const (),
            );
            if !visited.insert(pair) {
                // Cycle re-entered: treat as equal rather than recurse.
                return Ok(());
            }
            let exp = exp.borrow();
            let act = act.borrow();
            if exp.len() != act.len() {
                return Err(CompareError::LengthMismatch {
                    path: path.to_string(),
                    expected_len: exp.len(),
                    actual_len: act.len(),
                });
            }
            for (index, (exp_item, act_item)) in exp.iter().zip(act.iter()).enumerate() {
                path.push_index(index);
                let result = compare_at(path, visited, exp_item, act_item);
                path.pop();
                result?;
            }
            Ok(())
        }
        (Value::Object(exp), Value::Object(act)) => {
            let pair = (
                Rc::as_ptr(exp) as *const (),
                Rc::as_ptr(act) as *const (),
            );
            if !visited.insert(pair) {
                return Ok(());
            }
            let exp = exp.borrow();
            let act = act.borrow();

            // On a key-count mismatch, report the first key unique to the
            // larger side, in that side's insertion order. First divergence
            // only: no multi-key diff even when counts differ by more.
            if exp.len() > act.len() {
                if let Some(key) = exp.keys().find(|key| !act.contains_key(key.as_str())) {
                    return Err(CompareError::MissingKey {
                        path: path.child_key(key),
                    });
                }
            } else if act.len() > exp.len() {
                if let Some(key) = act.keys().find(|key| !exp.contains_key(key.as_str())) {
                    return Err(CompareError::UnexpectedKey {
                        path: path.child_key(key),
                    });
                }
            }

            for (key, exp_item) in exp.iter() {
                let Some(act_item) = act.get(key) else {
                    // Equal counts but divergent key sets end up here.
                    return Err(CompareError::MissingValue {
                        path: path.child_key(key),
                        expected: exp_item.to_string(),
                    });
                };
                path.push_key(key);
                let result = compare_at(path, visited, exp_item, act_item);
                path.pop();
                result?;
            }
            Ok(())
        }
        (Value::Null, Value::Null) => Ok(()),
        (Value::Bool(exp), Value::Bool(act)) if exp == act => Ok(()),
        (Value::Number(exp), Value::Number(act)) if numbers_equal(exp, act) => Ok(()),
        (Value::String(exp), Value::String(act)) if exp == act => Ok(()),
        _ => Err(mismatch_error(path, expected, actual)),
    }
}

/// Numeric equality across integer/float representations (1 equals 1.0)
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Classify a non-equal pair once same-kind composites have been ruled out
fn mismatch_error(path: &KeyPath, expected: &Value, actual: &Value) -> CompareError {
    let expected_kind = expected.kind();
    let actual_kind = actual.kind();

    if expected_kind == actual_kind {
        return CompareError::ValueMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        };
    }

    // Array/object/null confusion is a shape problem; any other kind
    // difference is a type problem.
    match (Shape::of(expected_kind), Shape::of(actual_kind)) {
        (Some(expected), Some(actual)) => CompareError::ShapeMismatch {
            path: path.to_string(),
            expected,
            actual,
        },
        _ => CompareError::TypeMismatch {
            path: path.to_string(),
            expected: expected_kind,
            actual: actual_kind,
        },
    }
}
