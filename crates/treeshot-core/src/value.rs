//! Dynamic values produced by backends.
//!
//! Backends hand the harness loosely shaped trees: nodes and tokens are
//! records with an open set of fields, mixed with arrays and scalars.
//! `Value` is that shape, independent of any particular parser.

use indexmap::IndexMap;

/// A tree-shaped value as produced by a backend.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// A field that exists but holds no value.
    ///
    /// The node serializer skips these; the fallback printer shows `undefined`.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    Object(Record),
}

impl Value {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Object(record) => Some(record),
            _ => None,
        }
    }

    /// The `type` tag of a record value, if it has a string one.
    pub fn type_tag(&self) -> Option<&str> {
        self.as_record().and_then(Record::type_tag)
    }
}

/// A record with named fields.
///
/// Records without a class are plain data. A class marks a value with its
/// own identity (an error object, a wrapper) that must never be mistaken for
/// raw AST data, even when it carries a `type` field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    class: Option<String>,
    fields: IndexMap<String, Value>,
}

impl Record {
    /// A plain record.
    pub fn new() -> Self {
        Self::default()
    }

    /// A record carrying a custom type identity.
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            fields: IndexMap::new(),
        }
    }

    /// Builder-style insert.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a field. Replacing keeps the original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn is_plain(&self) -> bool {
        self.class.is_none()
    }

    pub fn type_tag(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Remove a field, preserving the order of the remaining ones.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_int!(i32, i64, u32, u64, usize);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

/// JSON objects become plain records; field order is preserved.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                let mut record = Record::new();
                for (key, value) in map {
                    record.insert(key, Value::from(value));
                }
                Value::Object(record)
            }
        }
    }
}
