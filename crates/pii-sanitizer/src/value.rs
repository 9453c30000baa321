//! Structured records handed to the scrubber.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A record: field name to value.
pub type Record = BTreeMap<String, StructuredValue>;

/// A JSON-shaped value.
///
/// Serializes as plain JSON (no variant tags).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum StructuredValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<StructuredValue>),
    Map(Record),
}

impl StructuredValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StructuredValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Record> {
        match self {
            StructuredValue::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[StructuredValue]> {
        match self {
            StructuredValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Text form used when a non-string value has to be masked or hashed.
    ///
    /// Strings render as themselves; everything else as compact JSON.
    pub fn render(&self) -> String {
        match self {
            StructuredValue::String(s) => s.clone(),
            other => Value::from(other.clone()).to_string(),
        }
    }
}

impl From<Value> for StructuredValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => StructuredValue::Null,
            Value::Bool(b) => StructuredValue::Bool(b),
            Value::Number(n) => StructuredValue::Number(n),
            Value::String(s) => StructuredValue::String(s),
            Value::Array(items) => {
                StructuredValue::List(items.into_iter().map(StructuredValue::from).collect())
            }
            Value::Object(map) => StructuredValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, StructuredValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<StructuredValue> for Value {
    fn from(value: StructuredValue) -> Self {
        match value {
            StructuredValue::Null => Value::Null,
            StructuredValue::Bool(b) => Value::Bool(b),
            StructuredValue::Number(n) => Value::Number(n),
            StructuredValue::String(s) => Value::String(s),
            StructuredValue::List(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            StructuredValue::Map(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for StructuredValue {
    fn from(s: &str) -> Self {
        StructuredValue::String(s.to_string())
    }
}

impl From<String> for StructuredValue {
    fn from(s: String) -> Self {
        StructuredValue::String(s)
    }
}

impl From<bool> for StructuredValue {
    fn from(b: bool) -> Self {
        StructuredValue::Bool(b)
    }
}

impl From<i64> for StructuredValue {
    fn from(n: i64) -> Self {
        StructuredValue::Number(n.into())
    }
}

impl From<u64> for StructuredValue {
    fn from(n: u64) -> Self {
        StructuredValue::Number(n.into())
    }
}

impl From<Record> for StructuredValue {
    fn from(map: Record) -> Self {
        StructuredValue::Map(map)
    }
}

impl From<Vec<StructuredValue>> for StructuredValue {
    fn from(items: Vec<StructuredValue>) -> Self {
        StructuredValue::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_value() {
        let value = StructuredValue::from(json!({
            "user": {"email": "a@b.co", "age": 42},
            "tags": ["x", null, true]
        }));

        let map = value.as_map().unwrap();
        let user = map["user"].as_map().unwrap();
        assert_eq!(user["email"].as_str(), Some("a@b.co"));
        assert_eq!(user["age"], StructuredValue::from(42i64));
        assert_eq!(map["tags"].as_list().unwrap().len(), 3);
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let mut record = Record::new();
        record.insert("level".to_string(), "info".into());
        record.insert("count".to_string(), 3i64.into());
        let json = serde_json::to_string(&StructuredValue::Map(record)).unwrap();
        assert_eq!(json, r#"{"count":3,"level":"info"}"#);
    }

    #[test]
    fn test_deserializes_from_plain_json() {
        let value: StructuredValue = serde_json::from_str(r#"{"a":[1.5,"b"]}"#).unwrap();
        let items = value.as_map().unwrap()["a"].as_list().unwrap();
        assert_eq!(items[1].as_str(), Some("b"));
        assert!(matches!(items[0], StructuredValue::Number(_)));
    }

    #[test]
    fn test_render() {
        assert_eq!(StructuredValue::from("plain").render(), "plain");
        assert_eq!(StructuredValue::from(12345i64).render(), "12345");
        assert_eq!(StructuredValue::Null.render(), "null");
        assert_eq!(
            StructuredValue::from(vec![StructuredValue::from(1i64), StructuredValue::from(true)])
                .render(),
            "[1,true]"
        );
    }
}
