// Strong Types - Identifiers and attribute values for the social graph
// Newtypes keep post and comment handles from being confused with each other or with raw counters

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Store-scoped post identifier, assigned monotonically from 1 at creation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub u64);

impl PostId {
    /// Create a new post ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn value(self) -> u64 {
        self.0
    }

    /// Key used for this post in rendering snapshots
    pub fn node_key(self) -> String {
        format!("post:{}", self.0)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Store-scoped comment identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommentId(pub u64);

impl CommentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scalar value stored under a user attribute key.
///
/// Integers and floats compare exactly with each other, so an attribute
/// stored as `22` matches a filter asking for `22.0`. Booleans never equal numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    /// Get the text value, if this is a text attribute
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (AttributeValue::Bool(a), AttributeValue::Bool(b)) => a == b,
            (AttributeValue::Text(a), AttributeValue::Text(b)) => a == b,
            (AttributeValue::Integer(a), AttributeValue::Integer(b)) => a == b,
            (AttributeValue::Float(a), AttributeValue::Float(b)) => a == b,
            (AttributeValue::Integer(i), AttributeValue::Float(f))
            | (AttributeValue::Float(f), AttributeValue::Integer(i)) => integer_equals_float(*i, *f),
            _ => false,
        }
    }
}

/// Exact comparison: the float must be integral and inside the i64 range
fn integer_equals_float(i: i64, f: f64) -> bool {
    // 2^63, exactly representable as f64
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    f.fract() == 0.0 && (-LIMIT..LIMIT).contains(&f) && f as i64 == i
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Float(x) => write!(f, "{}", x),
            AttributeValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Text(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Text(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Integer(i as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(x: f64) -> Self {
        AttributeValue::Float(x)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

/// Open attribute mapping attached to a user (name, age, location, ...)
pub type Attributes = BTreeMap<String, AttributeValue>;

/// Build an `Attributes` map from `key => value` pairs
#[macro_export]
macro_rules! attributes {
    () => {
        $crate::types::strong_types::Attributes::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut attrs = $crate::types::strong_types::Attributes::new();
        $(
            attrs.insert(
                ($key).to_string(),
                $crate::types::strong_types::AttributeValue::from($value),
            );
        )+
        attrs
    }};
}
