//! CDN snapshot documents.
//!
//! A snapshot holds the two keyed collections the diff engine compares:
//! `contentRouters` (keyed by router name) and `contentServers` (keyed by
//! hostname). Parsing is lenient: a missing or non-object collection is an
//! empty collection, and entries that do not fit their typed schema are kept
//! as raw JSON (see [`Record`]).
//!
//! ## Non-Responsibilities
//!
//! - Fetching the documents (handled by whatever calls this crate)
//! - Validating other snapshot sections (`config`, `deliveryServices`, ...)

use crate::errors::{Result, SnapDiffError};
use crate::log_record;
use crate::model::{ContentRouter, ContentServer, Record};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use snapdiff_core_types::schema::{KIND_CONTENT_ROUTER, KIND_CONTENT_SERVER};
use std::collections::HashMap;

/// A keyed snapshot collection.
pub type Collection<R> = HashMap<String, Record<R>>;

/// The routing-relevant part of one CDN snapshot.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "router_collection")]
    pub content_routers: Collection<ContentRouter>,
    #[serde(default, deserialize_with = "server_collection")]
    pub content_servers: Collection<ContentServer>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a snapshot from raw document bytes.
    ///
    /// # Errors
    ///
    /// - `InvalidJson` — bytes are not valid JSON
    /// - `InvalidDocument` — the JSON root is not an object
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(bytes).map_err(|e| SnapDiffError::InvalidJson {
                message: e.to_string(),
            })?;
        Self::from_value(value)
    }

    /// Build a snapshot from an already-parsed JSON document.
    ///
    /// Accepts both the bare `{contentRouters, contentServers, ...}` shape and
    /// the Traffic Ops API envelope `{"response": {...}}`.
    ///
    /// # Errors
    ///
    /// - `InvalidDocument` — the JSON root (or the envelope's `response`) is not an object
    pub fn from_value(value: Value) -> Result<Self> {
        let value = unwrap_envelope(value);
        if !value.is_object() {
            return Err(SnapDiffError::InvalidDocument {
                reason: format!("snapshot root must be an object, got {}", kind_of(&value)),
            });
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Insert or replace a content router
    pub fn insert_router(&mut self, name: impl Into<String>, router: ContentRouter) {
        self.content_routers
            .insert(name.into(), Record::Typed(router));
    }

    /// Insert or replace a content server
    pub fn insert_server(&mut self, hostname: impl Into<String>, server: ContentServer) {
        self.content_servers
            .insert(hostname.into(), Record::Typed(server));
    }
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut obj)
            if !obj.contains_key("contentRouters")
                && !obj.contains_key("contentServers")
                && obj.get("response").is_some_and(Value::is_object) =>
        {
            obj.remove("response").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn router_collection<'de, D>(deserializer: D) -> std::result::Result<Collection<ContentRouter>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_collection(deserializer, KIND_CONTENT_ROUTER)
}

fn server_collection<'de, D>(deserializer: D) -> std::result::Result<Collection<ContentServer>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_collection(deserializer, KIND_CONTENT_SERVER)
}

fn lenient_collection<'de, D, R>(
    deserializer: D,
    record_kind: &'static str,
) -> std::result::Result<Collection<R>, D::Error>
where
    D: Deserializer<'de>,
    R: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Object(entries) => Ok(entries
            .into_iter()
            .map(|(key, value)| {
                let (record, reason) = Record::interpret(value);
                if let Some(reason) = reason {
                    log_record!(record_kind, key, "entry kept as raw JSON", reason = %reason);
                }
                (key, record)
            })
            .collect()),
        Value::Null => Ok(Collection::new()),
        other => {
            tracing::debug!(
                record_kind,
                found = kind_of(&other),
                "snapshot collection is not an object; treating as empty"
            );
            Ok(Collection::new())
        }
    }
}
