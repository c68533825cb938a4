use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

/// A scalar record field.
///
/// JSON `null` and an omitted field both deserialize to [`FieldValue::Unset`],
/// so the two spellings of "no value" compare equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Unset,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl FieldValue {
    /// Create a text value
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Create an integer value
    pub fn int(n: i64) -> Self {
        FieldValue::Number(n.into())
    }

    /// Check if the field carries no value
    pub fn is_unset(&self) -> bool {
        matches!(self, FieldValue::Unset)
    }

    /// Get the text content, if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Loose truthiness for flag fields that arrive as `0|1`, booleans or strings.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Unset => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            FieldValue::Text(s) => !s.is_empty(),
        }
    }

    /// Convert to a JSON value; unset becomes `null`.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Unset => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => Value::Number(n.clone()),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unset => write!(f, "(unset)"),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::int(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_null_and_missing_are_both_unset() {
        let from_null: FieldValue = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(from_null, FieldValue::Unset);
        assert_eq!(FieldValue::default(), FieldValue::Unset);
    }

    #[test]
    fn test_scalar_kinds_deserialize() {
        let n: FieldValue = serde_json::from_value(json!(80)).unwrap();
        let s: FieldValue = serde_json::from_value(json!("80")).unwrap();
        let b: FieldValue = serde_json::from_value(json!(true)).unwrap();
        assert_eq!(n, FieldValue::int(80));
        assert_eq!(s, FieldValue::text("80"));
        assert_eq!(b, FieldValue::Bool(true));
        assert_ne!(n, s);
    }

    #[test]
    fn test_nested_values_are_rejected() {
        assert!(serde_json::from_value::<FieldValue>(json!({"a": 1})).is_err());
        assert!(serde_json::from_value::<FieldValue>(json!([1])).is_err());
    }

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::Unset.is_truthy());
        assert!(!FieldValue::int(0).is_truthy());
        assert!(FieldValue::int(1).is_truthy());
        assert!(FieldValue::Bool(true).is_truthy());
        assert!(!FieldValue::text("").is_truthy());
    }
}
