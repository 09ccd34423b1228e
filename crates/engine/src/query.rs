#![forbid(unsafe_code)]

use serde_json::Value;

/// One flat result row, columns in the order the backend returned them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueryRow {
    columns: Vec<(String, Value)>,
}

impl QueryRow {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.columns.iter().any(|(name, _)| name == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Value)> for QueryRow {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

/// What the query backend hands back: rows, or an opaque error text.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutcome {
    Rows(Vec<QueryRow>),
    Error(String),
}

impl QueryOutcome {
    /// An array of objects is a row set. Anything else is an error indicator; an
    /// `{ "error": ... }` object or a bare string supplies the error text.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Array(items) => {
                let mut rows = Vec::with_capacity(items.len());
                for item in items {
                    let Value::Object(obj) = item else {
                        return Self::Error("result rows must be objects".to_string());
                    };
                    rows.push(obj.into_iter().collect());
                }
                Self::Rows(rows)
            }
            Value::String(text) => Self::Error(text),
            Value::Object(mut obj) => match obj.remove("error") {
                Some(Value::String(text)) => Self::Error(text),
                Some(other) => Self::Error(other.to_string()),
                None => Self::Error("result is not a row sequence".to_string()),
            },
            other => Self::Error(format!("result is not a row sequence: {other}")),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}
