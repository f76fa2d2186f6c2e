//! The attribution tracker, modeled as the vendor SDK behind a minimal
//! interface.

use std::time::Duration;

use bridge_core::EventParams;
use parking_lot::RwLock;
use tracing::debug;

/// Default minimum gap between two tracked sessions.
pub const DEFAULT_MIN_TIME_BETWEEN_SESSIONS: Duration = Duration::from_secs(5);

/// Calls and properties of the attribution tracker. Implementations hold their
/// own synchronization; every method takes `&self`.
pub trait AttributionTracker: Send + Sync {
    fn track_event(&self, name: &str, values: &EventParams);

    /// Single-value form of [`track_event`](Self::track_event), kept for
    /// older call sites.
    fn track_event_with_value(&self, name: &str, value: &str);

    fn customer_user_id(&self) -> Option<String>;
    fn set_customer_user_id(&self, user_id: Option<&str>);

    fn currency_code(&self) -> Option<String>;
    fn set_currency_code(&self, currency_code: Option<&str>);

    fn dev_key(&self) -> Option<String>;
    fn set_dev_key(&self, dev_key: Option<&str>);

    fn min_time_between_sessions(&self) -> Duration;
    fn set_min_time_between_sessions(&self, gap: Duration);

    fn device_tracking_disabled(&self) -> bool;
    fn set_device_tracking_disabled(&self, disabled: bool);

    /// Register the push token used for uninstall measurement.
    fn register_uninstall(&self, device_token: &[u8]);
}

/// One call to [`AttributionTracker::track_event`] or
/// [`AttributionTracker::track_event_with_value`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedEvent {
    pub name: String,
    pub values: EventParams,
    pub value: Option<String>,
}

#[derive(Debug)]
struct TrackerState {
    customer_user_id: Option<String>,
    currency_code: Option<String>,
    dev_key: Option<String>,
    min_time_between_sessions: Duration,
    device_tracking_disabled: bool,
    events: Vec<TrackedEvent>,
    uninstall_tokens: Vec<Vec<u8>>,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            customer_user_id: None,
            currency_code: None,
            dev_key: None,
            min_time_between_sessions: DEFAULT_MIN_TIME_BETWEEN_SESSIONS,
            device_tracking_disabled: false,
            events: Vec::new(),
            uninstall_tokens: Vec::new(),
        }
    }
}

/// In-process tracker that keeps its properties in memory and records every
/// tracked event and uninstall registration.
#[derive(Debug, Default)]
pub struct InMemoryTracker {
    state: RwLock<TrackerState>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TrackedEvent> {
        self.state.read().events.clone()
    }

    pub fn uninstall_tokens(&self) -> Vec<Vec<u8>> {
        self.state.read().uninstall_tokens.clone()
    }
}

impl AttributionTracker for InMemoryTracker {
    fn track_event(&self, name: &str, values: &EventParams) {
        debug!(event = name, values = values.len(), "Tracker event recorded");
        self.state.write().events.push(TrackedEvent {
            name: name.to_string(),
            values: values.clone(),
            value: None,
        });
    }

    fn track_event_with_value(&self, name: &str, value: &str) {
        debug!(event = name, value, "Tracker single-value event recorded");
        self.state.write().events.push(TrackedEvent {
            name: name.to_string(),
            values: EventParams::new(),
            value: Some(value.to_string()),
        });
    }

    fn customer_user_id(&self) -> Option<String> {
        self.state.read().customer_user_id.clone()
    }

    fn set_customer_user_id(&self, user_id: Option<&str>) {
        self.state.write().customer_user_id = user_id.map(str::to_string);
    }

    fn currency_code(&self) -> Option<String> {
        self.state.read().currency_code.clone()
    }

    fn set_currency_code(&self, currency_code: Option<&str>) {
        self.state.write().currency_code = currency_code.map(str::to_string);
    }

    fn dev_key(&self) -> Option<String> {
        self.state.read().dev_key.clone()
    }

    fn set_dev_key(&self, dev_key: Option<&str>) {
        self.state.write().dev_key = dev_key.map(str::to_string);
    }

    fn min_time_between_sessions(&self) -> Duration {
        self.state.read().min_time_between_sessions
    }

    fn set_min_time_between_sessions(&self, gap: Duration) {
        self.state.write().min_time_between_sessions = gap;
    }

    fn device_tracking_disabled(&self) -> bool {
        self.state.read().device_tracking_disabled
    }

    fn set_device_tracking_disabled(&self, disabled: bool) {
        self.state.write().device_tracking_disabled = disabled;
    }

    fn register_uninstall(&self, device_token: &[u8]) {
        debug!(token_len = device_token.len(), "Uninstall token registered");
        self.state.write().uninstall_tokens.push(device_token.to_vec());
    }
}
