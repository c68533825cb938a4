use crate::model::FieldValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Delivery-service assignments of an edge server: XMLID to ordered remap strings.
pub type AssignmentMap = BTreeMap<String, Vec<String>>;

/// Cache tier derived from a server's `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerTier {
    /// `EDGE…` types; these carry `deliveryServices`
    Edge,
    /// `MID…` types
    Mid,
    /// Anything else, including a missing `type`
    Other,
}

impl ServerTier {
    /// Classify a raw `type` value by its prefix.
    pub fn from_type(server_type: &FieldValue) -> Self {
        match server_type.as_str() {
            Some(t) if t.starts_with("EDGE") => ServerTier::Edge,
            Some(t) if t.starts_with("MID") => ServerTier::Mid,
            _ => ServerTier::Other,
        }
    }
}

/// A cache server entry of a snapshot's `contentServers` collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentServer {
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub cache_group: FieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_services: Option<AssignmentMap>,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub fqdn: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub hash_count: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub hash_id: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub https_port: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub interface_name: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub ip: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub ip6: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub location_id: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub port: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub profile: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub routing_disabled: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub status: FieldValue,
    #[serde(rename = "type", default, skip_serializing_if = "FieldValue::is_unset")]
    pub server_type: FieldValue,
}

impl ContentServer {
    pub fn tier(&self) -> ServerTier {
        ServerTier::from_type(&self.server_type)
    }

    /// Capabilities as a slice; absent means none.
    pub fn capability_list(&self) -> &[String] {
        self.capabilities.as_deref().unwrap_or(&[])
    }

    /// Whether `deliveryServices` is meaningful for this server at all.
    pub fn carries_assignments(&self) -> bool {
        self.tier() == ServerTier::Edge
    }

    pub fn assignments(&self) -> Option<&AssignmentMap> {
        self.delivery_services.as_ref()
    }

    /// `routingDisabled` normalized to a boolean.
    pub fn routing_disabled_flag(&self) -> FieldValue {
        FieldValue::Bool(self.routing_disabled.is_truthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tier_from_type_prefix() {
        assert_eq!(ServerTier::from_type(&"EDGE".into()), ServerTier::Edge);
        assert_eq!(ServerTier::from_type(&"EDGE_PARTNER".into()), ServerTier::Edge);
        assert_eq!(ServerTier::from_type(&"MID_LOC".into()), ServerTier::Mid);
        assert_eq!(ServerTier::from_type(&"RASCAL".into()), ServerTier::Other);
        assert_eq!(ServerTier::from_type(&FieldValue::Unset), ServerTier::Other);
    }

    #[test]
    fn test_edge_server_parses_assignments() {
        let server: ContentServer = serde_json::from_value(json!({
            "cacheGroup": "cg-east",
            "capabilities": ["HDD", "RAM"],
            "deliveryServices": {"ds1": ["edge.ds1.cdn.test", "ds1.example.com"]},
            "routingDisabled": 0,
            "type": "EDGE"
        }))
        .unwrap();

        assert!(server.carries_assignments());
        assert_eq!(server.capability_list(), &["HDD".to_string(), "RAM".to_string()]);
        assert_eq!(server.assignments().unwrap()["ds1"].len(), 2);
        assert_eq!(server.routing_disabled_flag(), FieldValue::Bool(false));
    }

    #[test]
    fn test_mid_server_without_assignments() {
        let server: ContentServer = serde_json::from_value(json!({
            "type": "MID",
            "routingDisabled": 1
        }))
        .unwrap();

        assert!(!server.carries_assignments());
        assert!(server.assignments().is_none());
        assert!(server.capability_list().is_empty());
        assert_eq!(server.routing_disabled_flag(), FieldValue::Bool(true));
    }
}
