use chrono::NaiveDateTime;

/// A primitive database value, as bound to a statement or carried in a
/// result row.
///
/// `Null` does double duty: it is both the SQL NULL and the "field not set"
/// marker on partial entities (see [`crate::Entity::value_of`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Timestamp(NaiveDateTime),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The integer payload, if this value carries one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The text payload, if this value carries one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// A raw result row: labeled values in driver order.
///
/// Labels keep whatever casing the driver produced; lookups through
/// [`Row::get_ci`] are case-insensitive and the first matching label wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a labeled value, builder style.
    pub fn with_column(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.push((label.into(), value.into()));
        self
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((label.into(), value.into()));
    }

    /// Case-insensitive lookup by column label; first match wins.
    pub fn get_ci(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Positional lookup, for single-scalar results such as sequence reads.
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.columns.get(index).map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(label, value)| (label.as_str(), value))
    }
}
