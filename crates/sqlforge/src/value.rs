//! Literal value resolution for clause text.

/// A right-hand-side value in a clause.
///
/// Values never reach the statement text directly in condition chains: they
/// are resolved to literal text here and stored under a placeholder token.
/// INSERT/UPDATE literal positions use the double-quote policy instead.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Text literal, quoted on resolution.
    Text(String),
    /// Numeric literal, rendered verbatim.
    Number(String),
    /// Column reference rendered as `table.column` (column-to-column comparison).
    Column(String, String),
    /// No value yet; resolves to an unbound placeholder.
    Unbound,
}

impl Value {
    /// Resolve for condition text: single-quote policy.
    pub(crate) fn condition_literal(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(format!("'{}'", text)),
            Value::Number(number) => Some(number.clone()),
            Value::Column(table, column) => Some(format!("{}.{}", table, column)),
            Value::Unbound => None,
        }
    }

    /// Resolve for INSERT/UPDATE literal positions: double-quote policy.
    pub(crate) fn quoted_literal(&self) -> Option<String> {
        match self {
            Value::Text(text) => Some(format!("\"{}\"", text)),
            Value::Number(number) => Some(number.clone()),
            Value::Column(table, column) => Some(format!("{}.{}", table, column)),
            Value::Unbound => None,
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<(&str, &str)> for Value {
    fn from((table, column): (&str, &str)) -> Self {
        Value::Column(table.to_string(), column.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Unbound,
        }
    }
}

macro_rules! value_from_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(number: $t) -> Self {
                    Value::Number(number.to_string())
                }
            }
        )*
    };
}

value_from_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Value list for `IN (...)` / `NOT IN (...)`.
#[derive(Clone, Debug, PartialEq)]
pub enum InValues {
    /// Pre-formatted list text, spliced verbatim.
    Raw(String),
    /// Values resolved and allocated individually, comma-joined.
    List(Vec<Value>),
}

impl From<&str> for InValues {
    fn from(raw: &str) -> Self {
        InValues::Raw(raw.to_string())
    }
}

impl From<String> for InValues {
    fn from(raw: String) -> Self {
        InValues::Raw(raw)
    }
}

impl<T: Into<Value>> From<Vec<T>> for InValues {
    fn from(values: Vec<T>) -> Self {
        InValues::List(values.into_iter().map(Into::into).collect())
    }
}
