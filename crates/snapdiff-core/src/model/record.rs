use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One entry of a snapshot collection.
///
/// Entries that match the typed schema are held as `Typed`; anything else
/// (wrong value kinds, a non-object entry) is kept verbatim as `Raw` so a
/// single bad record never prevents the rest of the collection from being
/// compared.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record<R> {
    Typed(R),
    Raw(Value),
}

impl<R: DeserializeOwned> Record<R> {
    /// Interpret a JSON value, falling back to `Raw` when it does not fit `R`.
    pub fn from_value(value: Value) -> Self {
        Self::interpret(value).0
    }

    /// Like [`Record::from_value`], also returning why the entry was kept raw.
    pub fn interpret(value: Value) -> (Self, Option<String>) {
        if !value.is_object() {
            return (Record::Raw(value), Some("entry is not an object".to_string()));
        }
        match R::deserialize(&value) {
            Ok(typed) => (Record::Typed(typed), None),
            Err(e) => (Record::Raw(value), Some(e.to_string())),
        }
    }
}

impl<R> Record<R> {
    /// Get the typed record, if the entry matched its schema
    pub fn typed(&self) -> Option<&R> {
        match self {
            Record::Typed(r) => Some(r),
            Record::Raw(_) => None,
        }
    }

    /// Check if the entry was kept as raw JSON
    pub fn is_raw(&self) -> bool {
        matches!(self, Record::Raw(_))
    }
}

impl<R: Serialize> Record<R> {
    /// JSON form of the entry, as it would appear in a snapshot.
    pub fn to_json(&self) -> Value {
        match self {
            Record::Typed(r) => serde_json::to_value(r).unwrap_or(Value::Null),
            Record::Raw(v) => v.clone(),
        }
    }
}

impl<'de, R: DeserializeOwned> Deserialize<'de> for Record<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Record::from_value)
    }
}
