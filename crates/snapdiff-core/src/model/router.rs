use crate::model::FieldValue;
use serde::{Deserialize, Serialize};

/// A Traffic Router entry of a snapshot's `contentRouters` collection.
///
/// Every field is scalar and may be absent. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentRouter {
    #[serde(rename = "api.port", default, skip_serializing_if = "FieldValue::is_unset")]
    pub api_port: FieldValue,
    #[serde(
        rename = "secure.api.port",
        default,
        skip_serializing_if = "FieldValue::is_unset"
    )]
    pub secure_api_port: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub fqdn: FieldValue,
    #[serde(rename = "httpsPort", default, skip_serializing_if = "FieldValue::is_unset")]
    pub https_port: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub ip: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub ip6: FieldValue,
    /// Name of the physical location (cache group) the router lives in
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub location: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub port: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub profile: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_unset")]
    pub status: FieldValue,
}
