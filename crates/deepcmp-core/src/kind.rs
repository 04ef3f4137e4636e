//! Runtime kind discrimination for values

use std::fmt;

/// The runtime kind of a [`crate::Value`]
///
/// Computed per call rather than stored; kind dispatch in the comparator is
/// a single exhaustive match over this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// Whether this kind has children to descend into
    pub fn is_composite(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }

    /// Whether this kind participates in shape discrimination
    ///
    /// Shape covers the array/object/null confusion cases: null is treated
    /// as a composite-adjacent kind, not as an ordinary primitive.
    pub fn has_shape(self) -> bool {
        matches!(self, Kind::Array | Kind::Object | Kind::Null)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Null => write!(f, "Null"),
            Kind::Bool => write!(f, "Bool"),
            Kind::Number => write!(f, "Number"),
            Kind::String => write!(f, "String"),
            Kind::Array => write!(f, "Array"),
            Kind::Object => write!(f, "Object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_kinds() {
        assert!(Kind::Array.is_composite());
        assert!(Kind::Object.is_composite());
        assert!(!Kind::Null.is_composite());
        assert!(!Kind::String.is_composite());
    }

    #[test]
    fn test_shape_kinds() {
        assert!(Kind::Array.has_shape());
        assert!(Kind::Object.has_shape());
        assert!(Kind::Null.has_shape());
        assert!(!Kind::Bool.has_shape());
        assert!(!Kind::Number.has_shape());
        assert!(!Kind::String.has_shape());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Kind::Null.to_string(), "Null");
        assert_eq!(Kind::Number.to_string(), "Number");
        assert_eq!(Kind::Object.to_string(), "Object");
    }
}
