//! Translates SDK-specified calls and events into a form the Google Analytics
//! for Firebase backend accepts.
//!
//! Names are resolved in this order:
//!
//! 1. absent or empty input → the adapter's fallback name for that kind;
//! 2. exact, case-sensitive match of the raw input in the adapter's map →
//!    the mapped canonical name, forwarded verbatim;
//! 3. otherwise `sanitize(prefix + raw)`. A raw name made only of
//!    disallowed characters therefore collapses to the bare prefix.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bridge_core::{BridgeResult, EventParams};
use tracing::{debug, info};

use crate::adapter::SdkAdapter;
use crate::backend::AnalyticsBackend;
use crate::naming::{self, NameKind};

/// Name of the parameter injected into every event to identify the source SDK.
pub const WRAPPER_PARAMETER_NAME: &str = "sdk_wrapper";

/// Result of translating one event.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedEvent {
    pub name: String,
    pub parameters: EventParams,
}

/// Forwards analytics calls to a backend, translating names with an
/// [`SdkAdapter`].
pub struct GoogleAnalyticsAdapter {
    adapter: Arc<dyn SdkAdapter>,
    backend: Arc<dyn AnalyticsBackend>,
}

impl GoogleAnalyticsAdapter {
    /// Build a translator. Fails when the adapter could produce names the
    /// backend would reject.
    pub fn new(
        adapter: Arc<dyn SdkAdapter>,
        backend: Arc<dyn AnalyticsBackend>,
    ) -> BridgeResult<Self> {
        adapter.validate()?;

        info!(
            wrapper = adapter.wrapper_parameter_value(),
            prefix = adapter.sanitized_name_prefix(),
            mapped_events = adapter.event_map().len(),
            mapped_parameters = adapter.parameter_map().len(),
            "Analytics translator initialized"
        );

        Ok(Self { adapter, backend })
    }

    pub fn adapter(&self) -> &dyn SdkAdapter {
        self.adapter.as_ref()
    }

    /// Translate an event and hand it to the backend.
    pub fn log_event(&self, name: Option<&str>, parameters: Option<&EventParams>) {
        let event = self.translate_event(name, parameters);
        metrics::counter!("bridge.events_translated").increment(1);
        debug!(
            raw = name.unwrap_or_default(),
            translated = %event.name,
            parameter_count = event.parameters.len(),
            "Event translated"
        );
        self.backend.log_event(&event.name, &event.parameters);
    }

    /// Set or, with a `None` value, clear a user property.
    pub fn set_user_property_string(&self, value: Option<&str>, name: Option<&str>) {
        let translated = self.translate_user_property_name(name);
        if value.is_some() {
            metrics::counter!("bridge.user_properties_set").increment(1);
        } else {
            metrics::counter!("bridge.user_properties_cleared").increment(1);
        }
        self.backend.set_user_property(&translated, value);
    }

    /// `None` clears the user identity.
    pub fn set_user_id(&self, user_id: Option<&str>) {
        self.backend.set_user_id(user_id);
    }

    pub fn set_analytics_collection_enabled(&self, enabled: bool) {
        self.backend.set_analytics_collection_enabled(enabled);
    }

    pub fn set_session_timeout_interval(&self, interval: Duration) {
        self.backend.set_session_timeout_interval(interval);
    }

    /// Translate an event without emitting it.
    pub fn translate_event(
        &self,
        name: Option<&str>,
        parameters: Option<&EventParams>,
    ) -> TranslatedEvent {
        let event_name = self.translate_name(
            name,
            self.adapter.event_map(),
            self.adapter.empty_event_name(),
            NameKind::Event,
        );

        let mut translated = EventParams::new();
        for (raw_key, value) in parameters.into_iter().flatten() {
            let key = self.translate_parameter_name(Some(raw_key.as_str()));
            if translated.contains_key(&key) {
                debug!(raw = %raw_key, translated = %key, "Duplicate parameter name dropped");
                continue;
            }
            translated.insert(key, value.clone());
        }

        translated.insert(
            WRAPPER_PARAMETER_NAME.to_string(),
            serde_json::Value::String(self.adapter.wrapper_parameter_value().to_string()),
        );

        TranslatedEvent {
            name: event_name,
            parameters: translated,
        }
    }

    pub fn translate_parameter_name(&self, name: Option<&str>) -> String {
        self.translate_name(
            name,
            self.adapter.parameter_map(),
            self.adapter.empty_parameter_name(),
            NameKind::Parameter,
        )
    }

    /// User properties share the parameter vocabulary but have a shorter
    /// length limit.
    pub fn translate_user_property_name(&self, name: Option<&str>) -> String {
        self.translate_name(
            name,
            self.adapter.parameter_map(),
            self.adapter.empty_user_property_name(),
            NameKind::UserProperty,
        )
    }

    fn translate_name(
        &self,
        name: Option<&str>,
        map: &HashMap<String, String>,
        empty_name: &str,
        kind: NameKind,
    ) -> String {
        let raw = match name {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                metrics::counter!("bridge.name_fallbacks").increment(1);
                return empty_name.to_string();
            }
        };

        if let Some(canonical) = map.get(raw) {
            return canonical.clone();
        }

        let prefix = self.adapter.sanitized_name_prefix();
        metrics::counter!("bridge.names_sanitized").increment(1);
        naming::sanitize(&format!("{prefix}{raw}"), kind.max_len())
    }
}
