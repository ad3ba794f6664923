//! Record access helpers
//!
//! Records are `serde_json::Value` objects addressed by dot-separated field
//! paths. Path resolution returns an absent marker (`None`) instead of
//! erroring, so each aggregation decides between skipping and failing.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Resolve a dotted field path against a record.
///
/// Every segment must be present as an object key down to the leaf; a missing
/// segment yields `None`, as does descending into a non-object.
pub fn resolve_path<'a>(record: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = record;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// f64 with a total order and consistent hashing.
///
/// All NaN bit patterns collapse to one canonical value at construction.
#[derive(Debug, Clone, Copy)]
pub struct OrderedFloat(f64);

impl OrderedFloat {
    pub fn new(value: f64) -> Self {
        Self(if value.is_nan() { f64::NAN } else { value })
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// Monotone bit encoding: flips the sign bit for positives and all bits
    /// for negatives so that u64 order matches numeric order.
    fn order_key(self) -> u64 {
        let bits = self.0.to_bits();
        if bits >> 63 == 0 { bits | (1 << 63) } else { !bits }
    }
}

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl Eq for OrderedFloat {}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl Hash for OrderedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order_key().hash(state);
    }
}

/// Scalar bucket key extracted from a record field.
///
/// Arrays and objects never form keys; extraction returns `None` for them so
/// grouping skips the record exactly like an absent field. Mixed-type keys in
/// one grouping order by type tag (null < bool < int < float < string), then
/// by value within the tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKey {
    Null,
    Bool(bool),
    Int(i64),
    Float(OrderedFloat),
    Str(String),
}

impl GroupKey {
    /// Extract a key from a resolved field value.
    ///
    /// Integer-representable numbers become `Int`; other numbers become
    /// `Float`. Containers yield `None`.
    pub fn from_value(value: &Value) -> Option<GroupKey> {
        match value {
            Value::Null => Some(GroupKey::Null),
            Value::Bool(b) => Some(GroupKey::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(GroupKey::Int(i))
                } else {
                    n.as_f64().map(|f| GroupKey::Float(OrderedFloat::new(f)))
                }
            }
            Value::String(s) => Some(GroupKey::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Null => write!(f, "null"),
            GroupKey::Bool(b) => write!(f, "{}", b),
            GroupKey::Int(i) => write!(f, "{}", i),
            GroupKey::Float(x) => write!(f, "{}", x.get()),
            GroupKey::Str(s) => write!(f, "{}", s),
        }
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupKey::Null => serializer.serialize_unit(),
            GroupKey::Bool(b) => serializer.serialize_bool(*b),
            GroupKey::Int(i) => serializer.serialize_i64(*i),
            GroupKey::Float(x) => serializer.serialize_f64(x.get()),
            GroupKey::Str(s) => serializer.serialize_str(s),
        }
    }
}

/// JSON type name used in malformed-value diagnostics.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
