//! Mismatch taxonomy reported by the comparator

use std::fmt;

use deepcmp_core::Kind;
use thiserror::Error;

/// Shape of a value for array/object/null discrimination
///
/// Shape is diagnostic-only naming: it exists so a `ShapeMismatch` can say
/// "Null" and "Object" instead of leaking the full kind taxonomy into the
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Array,
    Object,
    Null,
}

impl Shape {
    /// The shape of a kind, if it has one
    pub fn of(kind: Kind) -> Option<Shape> {
        match kind {
            Kind::Array => Some(Shape::Array),
            Kind::Object => Some(Shape::Object),
            Kind::Null => Some(Shape::Null),
            Kind::Bool | Kind::Number | Kind::String => None,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Array => write!(f, "Array"),
            Shape::Object => write!(f, "Object"),
            Shape::Null => write!(f, "Null"),
        }
    }
}

/// The first structural difference found by a comparison
///
/// Every variant carries the full dotted path to the divergence and both
/// observed kinds or values, so the message pinpoints the difference without
/// re-running the comparison. All variants are terminal: a mismatch ends the
/// comparison that produced it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompareError {
    /// Runtime kinds differ (e.g. string vs. number, primitive vs. composite)
    #[error("type mismatch at `{path}`: expected {expected} but got {actual}")]
    TypeMismatch {
        path: String,
        expected: Kind,
        actual: Kind,
    },

    /// Array/object/null confusion between the two sides
    #[error("shape mismatch at `{path}`: expected {expected} but got {actual}")]
    ShapeMismatch {
        path: String,
        expected: Shape,
        actual: Shape,
    },

    /// Both sides are sequences but of different lengths
    #[error("length mismatch at `{path}`: expected {expected_len} elements but got {actual_len}")]
    LengthMismatch {
        path: String,
        expected_len: usize,
        actual_len: usize,
    },

    /// A key of expected is absent from actual
    #[error("missing key `{path}`: present in expected but absent from actual")]
    MissingKey { path: String },

    /// A key of actual is absent from expected
    #[error("unexpected key `{path}`: present in actual but absent from expected")]
    UnexpectedKey { path: String },

    /// Leaf values of the same kind differ
    #[error("value mismatch at `{path}`: expected {expected} but got {actual}")]
    ValueMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// Expected has a value where actual has none
    #[error("missing value at `{path}`: expected {expected} but actual has no value")]
    MissingValue { path: String, expected: String },
}

impl CompareError {
    /// The dotted path at which the divergence was found
    pub fn path(&self) -> &str {
        match self {
            CompareError::TypeMismatch { path, .. }
            | CompareError::ShapeMismatch { path, .. }
            | CompareError::LengthMismatch { path, .. }
            | CompareError::MissingKey { path }
            | CompareError::UnexpectedKey { path }
            | CompareError::ValueMismatch { path, .. }
            | CompareError::MissingValue { path, .. } => path,
        }
    }

    /// Stable name of the mismatch class, for logs and assertions
    pub fn category(&self) -> &'static str {
        match self {
            CompareError::TypeMismatch { .. } => "TypeMismatch",
            CompareError::ShapeMismatch { .. } => "ShapeMismatch",
            CompareError::LengthMismatch { .. } => "LengthMismatch",
            CompareError::MissingKey { .. } => "MissingKey",
            CompareError::UnexpectedKey { .. } => "UnexpectedKey",
            CompareError::ValueMismatch { .. } => "ValueMismatch",
            CompareError::MissingValue { .. } => "MissingValue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_of_kind() {
        assert_eq!(Shape::of(Kind::Array), Some(Shape::Array));
        assert_eq!(Shape::of(Kind::Object), Some(Shape::Object));
        assert_eq!(Shape::of(Kind::Null), Some(Shape::Null));
        assert_eq!(Shape::of(Kind::String), None);
    }

    #[test]
    fn test_messages_carry_path_and_context() {
        let err = CompareError::ValueMismatch {
            path: "b.c".to_string(),
            expected: "2".to_string(),
            actual: "3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "value mismatch at `b.c`: expected 2 but got 3"
        );
        assert_eq!(err.path(), "b.c");
        assert_eq!(err.category(), "ValueMismatch");
    }

    #[test]
    fn test_shape_mismatch_names_sides() {
        let err = CompareError::ShapeMismatch {
            path: "(root)".to_string(),
            expected: Shape::Null,
            actual: Shape::Object,
        };
        let message = err.to_string();
        assert!(message.contains("Null"));
        assert!(message.contains("Object"));
    }

    #[test]
    fn test_length_mismatch_cites_lengths() {
        let err = CompareError::LengthMismatch {
            path: "(root)".to_string(),
            expected_len: 2,
            actual_len: 3,
        };
        let message = err.to_string();
        assert!(message.contains('2'));
        assert!(message.contains('3'));
    }
}
