//! Dynamic value type with shared, possibly self-referential composites

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::Number;
use thiserror::Error;

use crate::Kind;

/// Error returned when converting a cyclic value into `serde_json::Value`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot represent a cyclic value as JSON")]
pub struct CyclicValueError;

/// A dynamically typed value
///
/// Composites (arrays and objects) are reference-counted shared cells:
/// cloning a composite aliases the same allocation, and a composite may
/// contain itself. Mappings preserve insertion order, so key enumeration
/// order is the order keys were added.
///
/// `Value` intentionally does not implement `PartialEq` for composites —
/// deep equality is the comparator's job, and a derived impl would recurse
/// forever on self-referential values.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Rc<RefCell<Vec<Value>>>),
    Object(Rc<RefCell<IndexMap<String, Value>>>),
}

impl Value {
    /// Create an array value from a list of items
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Create an empty array value
    pub fn empty_array() -> Self {
        Value::array(Vec::new())
    }

    /// Create an object value from key/value entries, preserving order
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect::<IndexMap<String, Value>>();
        Value::Object(Rc::new(RefCell::new(map)))
    }

    /// Create an empty object value
    pub fn empty_object() -> Self {
        Value::Object(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// The runtime kind of this value
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    /// Whether this value is a composite (array or object)
    pub fn is_composite(&self) -> bool {
        self.kind().is_composite()
    }

    /// Whether `self` and `other` are the same composite allocation
    ///
    /// Always false for non-composites: leaves have no reference identity.
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Type-erased address of a composite allocation, for identity sets
    pub fn ref_addr(&self) -> Option<*const ()> {
        match self {
            Value::Array(items) => Some(Rc::as_ptr(items) as *const ()),
            Value::Object(entries) => Some(Rc::as_ptr(entries) as *const ()),
            _ => None,
        }
    }

    /// Insert a key into an object value
    ///
    /// Returns false (and does nothing) if `self` is not an object. Useful
    /// for building shared or self-referential structures after creation.
    pub fn insert(&self, key: impl Into<String>, value: Value) -> bool {
        match self {
            Value::Object(entries) => {
                entries.borrow_mut().insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Append an item to an array value
    ///
    /// Returns false (and does nothing) if `self` is not an array.
    pub fn push(&self, value: Value) -> bool {
        match self {
            Value::Array(items) => {
                items.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    /// Number of children of a composite, or None for leaves
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.borrow().len()),
            Value::Object(entries) => Some(entries.borrow().len()),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<f64> for Value {
    /// Non-finite floats have no JSON representation and become Null,
    /// matching `serde_json::Value::from`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<serde_json::Value> for Value {
    /// Deep conversion; JSON values are finite so no cycle handling is
    /// needed in this direction.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => {
                Value::object(entries.into_iter().map(|(k, v)| (k, Value::from(v))))
            }
        }
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = CyclicValueError;

    /// Deep conversion back into JSON; fails if the value contains a
    /// reference cycle. Shared acyclic nodes are duplicated.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let mut on_stack = HashSet::new();
        to_json(value, &mut on_stack)
    }
}

fn to_json(
    value: &Value,
    on_stack: &mut HashSet<*const ()>,
) -> Result<serde_json::Value, CyclicValueError> {
    match value {
        Value::Null => Ok(serde_json::Value::Null),
        Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
        Value::Number(n) => Ok(serde_json::Value::Number(n.clone())),
        Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        Value::Array(items) => {
            let addr = Rc::as_ptr(items) as *const ();
            if !on_stack.insert(addr) {
                return Err(CyclicValueError);
            }
            let converted = items
                .borrow()
                .iter()
                .map(|item| to_json(item, on_stack))
                .collect::<Result<Vec<_>, _>>()?;
            on_stack.remove(&addr);
            Ok(serde_json::Value::Array(converted))
        }
        Value::Object(entries) => {
            let addr = Rc::as_ptr(entries) as *const ();
            if !on_stack.insert(addr) {
                return Err(CyclicValueError);
            }
            let converted = entries
                .borrow()
                .iter()
                .map(|(key, item)| Ok((key.clone(), to_json(item, on_stack)?)))
                .collect::<Result<serde_json::Map<String, serde_json::Value>, CyclicValueError>>()?;
            on_stack.remove(&addr);
            Ok(serde_json::Value::Object(converted))
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match serde_json::Value::try_from(self) {
            Ok(json) => json.serialize(serializer),
            Err(err) => Err(S::Error::custom(err)),
        }
    }
}

/// Cycle-safe JSON-ish rendering; a re-entered composite renders as `<cycle>`
fn fmt_value(
    value: &Value,
    f: &mut fmt::Formatter<'_>,
    on_stack: &mut HashSet<*const ()>,
) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::String(s) => write!(f, "{s:?}"),
        Value::Array(items) => {
            let addr = Rc::as_ptr(items) as *const ();
            if !on_stack.insert(addr) {
                return f.write_str("<cycle>");
            }
            f.write_str("[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                fmt_value(item, f, on_stack)?;
            }
            on_stack.remove(&addr);
            f.write_str("]")
        }
        Value::Object(entries) => {
            let addr = Rc::as_ptr(entries) as *const ();
            if !on_stack.insert(addr) {
                return f.write_str("<cycle>");
            }
            f.write_str("{")?;
            for (i, (key, item)) in entries.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key:?}: ")?;
                fmt_value(item, f, on_stack)?;
            }
            on_stack.remove(&addr);
            f.write_str("}")
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_value(self, f, &mut HashSet::new())
    }
}

impl fmt::Debug for Value {
    /// Same rendering as Display; a derived impl would recurse forever on
    /// self-referential values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_value(self, f, &mut HashSet::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_discrimination() {
        assert_eq!(Value::Null.kind(), Kind::Null);
        assert_eq!(Value::from(true).kind(), Kind::Bool);
        assert_eq!(Value::from(42i64).kind(), Kind::Number);
        assert_eq!(Value::from("hi").kind(), Kind::String);
        assert_eq!(Value::empty_array().kind(), Kind::Array);
        assert_eq!(Value::empty_object().kind(), Kind::Object);
    }

    #[test]
    fn test_same_ref_is_allocation_identity() {
        let a = Value::array(vec![Value::from(1i64)]);
        let alias = a.clone();
        let other = Value::array(vec![Value::from(1i64)]);

        assert!(a.same_ref(&alias));
        assert!(!a.same_ref(&other));
        // Leaves never share identity, even when equal
        assert!(!Value::from("x").same_ref(&Value::from("x")));
    }

    #[test]
    fn test_ref_addr_only_for_composites() {
        assert!(Value::empty_object().ref_addr().is_some());
        assert!(Value::empty_array().ref_addr().is_some());
        assert!(Value::Null.ref_addr().is_none());
        assert!(Value::from(3i64).ref_addr().is_none());
    }

    #[test]
    fn test_insert_and_push() {
        let obj = Value::empty_object();
        assert!(obj.insert("a", Value::from(1i64)));
        assert_eq!(obj.len(), Some(1));
        assert!(!Value::Null.insert("a", Value::Null));

        let arr = Value::empty_array();
        assert!(arr.push(Value::from("x")));
        assert_eq!(arr.len(), Some(1));
        assert!(!Value::from(1i64).push(Value::Null));
    }

    #[test]
    fn test_from_json_round_trip() {
        let json = json!({"a": 1, "b": [true, null, "s"], "c": {"d": 2.5}});
        let value = Value::from(json.clone());
        let back = serde_json::Value::try_from(&value).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn test_cyclic_value_rejected_by_json_conversion() {
        let a = Value::empty_object();
        a.insert("self", a.clone());
        assert_eq!(serde_json::Value::try_from(&a), Err(CyclicValueError));
    }

    #[test]
    fn test_shared_acyclic_node_converts() {
        let shared = Value::array(vec![Value::from(1i64)]);
        let root = Value::object([("x", shared.clone()), ("y", shared)]);
        let json = serde_json::Value::try_from(&root).unwrap();
        assert_eq!(json, json!({"x": [1], "y": [1]}));
    }

    #[test]
    fn test_display_rendering() {
        let value = Value::from(json!({"a": [1, "two"], "b": null}));
        assert_eq!(value.to_string(), r#"{"a": [1, "two"], "b": null}"#);
    }

    #[test]
    fn test_display_is_cycle_safe() {
        let a = Value::empty_object();
        a.insert("self", a.clone());
        assert_eq!(a.to_string(), r#"{"self": <cycle>}"#);
    }

    #[test]
    fn test_serialize_uses_json_form() {
        let value = Value::from(json!(["a", 1]));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"["a",1]"#);
    }

    #[test]
    fn test_non_finite_float_becomes_null() {
        assert_eq!(Value::from(f64::NAN).kind(), Kind::Null);
        assert_eq!(Value::from(1.5f64).kind(), Kind::Number);
    }
}
