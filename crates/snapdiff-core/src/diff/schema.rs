//! Record schemas: the ordered fields of each record type and how each is compared.
//!
//! Schemas are declared once, statically. Field order here is the order in
//! which deltas are reported.

use crate::model::{AssignmentMap, ContentRouter, ContentServer, FieldValue};

/// How a field's two values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// Value equality with `null`/absent normalized to unset
    Scalar,
    /// Unordered set of strings
    StringSet,
    /// Delivery-service assignment map with ordered remap lists
    AssignmentMap,
}

/// Accessor for one field of a record type.
pub enum FieldAccess<R> {
    Scalar(fn(&R) -> FieldValue),
    StringSet(fn(&R) -> &[String]),
    AssignmentMap {
        /// Whether the field exists for this record's variant
        applies: fn(&R) -> bool,
        get: fn(&R) -> Option<&AssignmentMap>,
    },
}

/// A named field of a record schema.
pub struct FieldSpec<R> {
    pub name: &'static str,
    pub access: FieldAccess<R>,
}

impl<R> FieldSpec<R> {
    pub const fn scalar(name: &'static str, get: fn(&R) -> FieldValue) -> Self {
        Self {
            name,
            access: FieldAccess::Scalar(get),
        }
    }

    pub const fn string_set(name: &'static str, get: fn(&R) -> &[String]) -> Self {
        Self {
            name,
            access: FieldAccess::StringSet(get),
        }
    }

    pub const fn assignment_map(
        name: &'static str,
        applies: fn(&R) -> bool,
        get: fn(&R) -> Option<&AssignmentMap>,
    ) -> Self {
        Self {
            name,
            access: FieldAccess::AssignmentMap { applies, get },
        }
    }

    pub fn mode(&self) -> CompareMode {
        match self.access {
            FieldAccess::Scalar(_) => CompareMode::Scalar,
            FieldAccess::StringSet(_) => CompareMode::StringSet,
            FieldAccess::AssignmentMap { .. } => CompareMode::AssignmentMap,
        }
    }
}

/// Content routers: all scalar.
pub static CONTENT_ROUTER_SCHEMA: [FieldSpec<ContentRouter>; 10] = [
    FieldSpec::scalar("api.port", |r: &ContentRouter| r.api_port.clone()),
    FieldSpec::scalar("secure.api.port", |r: &ContentRouter| r.secure_api_port.clone()),
    FieldSpec::scalar("fqdn", |r: &ContentRouter| r.fqdn.clone()),
    FieldSpec::scalar("httpsPort", |r: &ContentRouter| r.https_port.clone()),
    FieldSpec::scalar("ip", |r: &ContentRouter| r.ip.clone()),
    FieldSpec::scalar("ip6", |r: &ContentRouter| r.ip6.clone()),
    FieldSpec::scalar("location", |r: &ContentRouter| r.location.clone()),
    FieldSpec::scalar("port", |r: &ContentRouter| r.port.clone()),
    FieldSpec::scalar("profile", |r: &ContentRouter| r.profile.clone()),
    FieldSpec::scalar("status", |r: &ContentRouter| r.status.clone()),
];

/// Content servers: scalars, the capability set, and the edge-only assignment map.
pub static CONTENT_SERVER_SCHEMA: [FieldSpec<ContentServer>; 16] = [
    FieldSpec::scalar("cacheGroup", |s: &ContentServer| s.cache_group.clone()),
    FieldSpec::scalar("fqdn", |s: &ContentServer| s.fqdn.clone()),
    FieldSpec::scalar("hashCount", |s: &ContentServer| s.hash_count.clone()),
    FieldSpec::scalar("hashId", |s: &ContentServer| s.hash_id.clone()),
    FieldSpec::scalar("httpsPort", |s: &ContentServer| s.https_port.clone()),
    FieldSpec::scalar("interfaceName", |s: &ContentServer| s.interface_name.clone()),
    FieldSpec::scalar("ip", |s: &ContentServer| s.ip.clone()),
    FieldSpec::scalar("ip6", |s: &ContentServer| s.ip6.clone()),
    FieldSpec::scalar("locationId", |s: &ContentServer| s.location_id.clone()),
    FieldSpec::scalar("port", |s: &ContentServer| s.port.clone()),
    FieldSpec::scalar("profile", |s: &ContentServer| s.profile.clone()),
    FieldSpec::scalar("routingDisabled", ContentServer::routing_disabled_flag),
    FieldSpec::scalar("status", |s: &ContentServer| s.status.clone()),
    FieldSpec::scalar("type", |s: &ContentServer| s.server_type.clone()),
    FieldSpec::string_set("capabilities", ContentServer::capability_list),
    FieldSpec::assignment_map(
        "deliveryServices",
        ContentServer::carries_assignments,
        ContentServer::assignments,
    ),
];
