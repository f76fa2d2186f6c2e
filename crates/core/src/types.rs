use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Event parameters or user-property payloads keyed by name. Ordered so that
/// translation output is deterministic.
pub type EventParams = BTreeMap<String, serde_json::Value>;

/// Naming vocabulary of one bridged SDK: how its event and parameter names map
/// onto the analytics backend, and which names to fall back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkAdapterConfig {
    /// Prepended to names that have no entry in the maps.
    pub sanitized_name_prefix: String,
    /// Value of the tag parameter injected into every forwarded event.
    pub wrapper_parameter_value: String,
    pub empty_event_name: String,
    pub empty_parameter_name: String,
    pub empty_user_property_name: String,
    /// Source event name to canonical backend event name.
    #[serde(default)]
    pub event_map: HashMap<String, String>,
    /// Source parameter name to canonical backend parameter name.
    #[serde(default)]
    pub parameter_map: HashMap<String, String>,
}
