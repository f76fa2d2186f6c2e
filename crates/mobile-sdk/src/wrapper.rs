//! Pass-through wrapper around the attribution tracker. Every call reaches the
//! tracker unchanged and, where the analytics backend has a counterpart, is
//! mirrored into it through the translator.

use std::sync::Arc;
use std::time::Duration;

use bridge_analytics::GoogleAnalyticsAdapter;
use bridge_core::config::{AnalyticsConfig, TrackerConfig};
use bridge_core::EventParams;
use tracing::{debug, info};

use crate::tracker::AttributionTracker;

/// Parameter name used when mirroring a single-value event.
pub const SINGLE_VALUE_PARAMETER: &str = "value";

pub struct TrackerWrapper {
    tracker: Arc<dyn AttributionTracker>,
    analytics: Arc<GoogleAnalyticsAdapter>,
}

impl TrackerWrapper {
    pub fn new(tracker: Arc<dyn AttributionTracker>, analytics: Arc<GoogleAnalyticsAdapter>) -> Self {
        Self { tracker, analytics }
    }

    pub fn tracker(&self) -> &dyn AttributionTracker {
        self.tracker.as_ref()
    }

    pub fn analytics(&self) -> &GoogleAnalyticsAdapter {
        &self.analytics
    }

    /// Apply startup settings to both SDKs.
    pub fn configure(&self, tracker: &TrackerConfig, analytics: &AnalyticsConfig) {
        if !tracker.dev_key.is_empty() {
            self.set_dev_key(Some(tracker.dev_key.as_str()));
        }
        self.set_currency_code(Some(tracker.currency_code.as_str()));
        if tracker.customer_user_id.is_some() {
            self.set_customer_user_id(tracker.customer_user_id.as_deref());
        }
        self.set_min_time_between_sessions(Duration::from_secs(
            tracker.min_time_between_sessions_secs,
        ));

        // Tracking disabled on the tracker side wins over the analytics flag.
        self.tracker
            .set_device_tracking_disabled(tracker.device_tracking_disabled);
        self.analytics.set_analytics_collection_enabled(
            analytics.collection_enabled && !tracker.device_tracking_disabled,
        );
        self.analytics
            .set_session_timeout_interval(Duration::from_secs(analytics.session_timeout_secs));

        info!(
            currency = %tracker.currency_code,
            collection_enabled = analytics.collection_enabled,
            device_tracking_disabled = tracker.device_tracking_disabled,
            session_timeout_secs = analytics.session_timeout_secs,
            "Tracker wrapper configured"
        );
    }

    pub fn track_event(&self, name: &str, values: &EventParams) {
        metrics::counter!("bridge.tracker_events").increment(1);
        self.tracker.track_event(name, values);
        self.analytics.log_event(Some(name), Some(values));
    }

    #[deprecated(note = "use track_event with a values map")]
    pub fn track_event_with_value(&self, name: &str, value: &str) {
        metrics::counter!("bridge.tracker_events").increment(1);
        self.tracker.track_event_with_value(name, value);

        let mut values = EventParams::new();
        values.insert(
            SINGLE_VALUE_PARAMETER.to_string(),
            serde_json::Value::String(value.to_string()),
        );
        self.analytics.log_event(Some(name), Some(&values));
    }

    pub fn customer_user_id(&self) -> Option<String> {
        self.tracker.customer_user_id()
    }

    pub fn set_customer_user_id(&self, user_id: Option<&str>) {
        self.tracker.set_customer_user_id(user_id);
        self.analytics.set_user_id(user_id);
    }

    pub fn currency_code(&self) -> Option<String> {
        self.tracker.currency_code()
    }

    pub fn set_currency_code(&self, currency_code: Option<&str>) {
        self.tracker.set_currency_code(currency_code);
    }

    pub fn dev_key(&self) -> Option<String> {
        self.tracker.dev_key()
    }

    pub fn set_dev_key(&self, dev_key: Option<&str>) {
        self.tracker.set_dev_key(dev_key);
    }

    pub fn min_time_between_sessions(&self) -> Duration {
        self.tracker.min_time_between_sessions()
    }

    pub fn set_min_time_between_sessions(&self, gap: Duration) {
        self.tracker.set_min_time_between_sessions(gap);
    }

    pub fn device_tracking_disabled(&self) -> bool {
        self.tracker.device_tracking_disabled()
    }

    pub fn set_device_tracking_disabled(&self, disabled: bool) {
        self.tracker.set_device_tracking_disabled(disabled);
        self.analytics.set_analytics_collection_enabled(!disabled);
    }

    /// Only the tracker measures uninstalls.
    pub fn register_uninstall(&self, device_token: &[u8]) {
        debug!(token_len = device_token.len(), "Forwarding uninstall registration");
        self.tracker.register_uninstall(device_token);
    }
}
