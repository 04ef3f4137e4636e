//! Key paths for mismatch diagnostics

use std::fmt;

/// One step of a descent: an object key or an array index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// The descent route from the comparison root to the current position
///
/// Grows by one segment per recursive descent and shrinks on return, so its
/// length always equals the recursion depth. Used only for diagnostics,
/// never consulted by the equality logic itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Dotted path to a child key of the current position, without mutating
    pub fn child_key(&self, key: &str) -> String {
        if self.is_empty() {
            key.to_string()
        } else {
            format!("{self}.{key}")
        }
    }
}

impl fmt::Display for KeyPath {
    /// `(root)` when empty, otherwise the dotted form, e.g. `a.b[2].c`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("(root)");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
