//! The receiving analytics backend, treated as an opaque capability.

use std::collections::BTreeMap;
use std::time::Duration;

use bridge_core::EventParams;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Outbound calls into the analytics backend. Implementations are expected to
/// be safe to call from any thread.
pub trait AnalyticsBackend: Send + Sync {
    fn log_event(&self, name: &str, parameters: &EventParams);

    /// `None` clears the property.
    fn set_user_property(&self, name: &str, value: Option<&str>);

    /// `None` clears the user identity.
    fn set_user_id(&self, user_id: Option<&str>);

    fn set_analytics_collection_enabled(&self, enabled: bool);

    fn set_session_timeout_interval(&self, interval: Duration);
}

/// One call made against a backend, as recorded by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum BackendCall {
    LogEvent {
        name: String,
        parameters: EventParams,
    },
    SetUserProperty {
        name: String,
        value: Option<String>,
    },
    SetUserId {
        user_id: Option<String>,
    },
    SetAnalyticsCollectionEnabled {
        enabled: bool,
    },
    SetSessionTimeoutInterval {
        interval_secs: f64,
    },
}

#[derive(Debug, Default)]
struct RecordedState {
    calls: Vec<BackendCall>,
    user_properties: BTreeMap<String, String>,
    user_id: Option<String>,
}

/// In-memory backend that records every call and tracks the resulting user
/// state.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    state: Mutex<RecordedState>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call recorded so far, oldest first.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().calls.clone()
    }

    /// Take the recorded calls, leaving the user state untouched.
    pub fn drain(&self) -> Vec<BackendCall> {
        std::mem::take(&mut self.state.lock().calls)
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Logged events as `(name, parameters)` pairs.
    pub fn events(&self) -> Vec<(String, EventParams)> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                BackendCall::LogEvent { name, parameters } => {
                    Some((name.clone(), parameters.clone()))
                }
                _ => None,
            })
            .collect()
    }

    pub fn user_property(&self, name: &str) -> Option<String> {
        self.state.lock().user_properties.get(name).cloned()
    }

    pub fn user_properties(&self) -> BTreeMap<String, String> {
        self.state.lock().user_properties.clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.state.lock().user_id.clone()
    }
}

impl AnalyticsBackend for RecordingBackend {
    fn log_event(&self, name: &str, parameters: &EventParams) {
        self.state.lock().calls.push(BackendCall::LogEvent {
            name: name.to_string(),
            parameters: parameters.clone(),
        });
    }

    fn set_user_property(&self, name: &str, value: Option<&str>) {
        let mut state = self.state.lock();
        match value {
            Some(v) => {
                state.user_properties.insert(name.to_string(), v.to_string());
            }
            None => {
                state.user_properties.remove(name);
            }
        }
        state.calls.push(BackendCall::SetUserProperty {
            name: name.to_string(),
            value: value.map(str::to_string),
        });
    }

    fn set_user_id(&self, user_id: Option<&str>) {
        let mut state = self.state.lock();
        state.user_id = user_id.map(str::to_string);
        state.calls.push(BackendCall::SetUserId {
            user_id: user_id.map(str::to_string),
        });
    }

    fn set_analytics_collection_enabled(&self, enabled: bool) {
        self.state
            .lock()
            .calls
            .push(BackendCall::SetAnalyticsCollectionEnabled { enabled });
    }

    fn set_session_timeout_interval(&self, interval: Duration) {
        self.state
            .lock()
            .calls
            .push(BackendCall::SetSessionTimeoutInterval {
                interval_secs: interval.as_secs_f64(),
            });
    }
}

/// Backend that only emits each call as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBackend;

impl AnalyticsBackend for TracingBackend {
    fn log_event(&self, name: &str, parameters: &EventParams) {
        let params = serde_json::to_string(parameters).unwrap_or_default();
        info!(event = name, %params, "Analytics event logged");
    }

    fn set_user_property(&self, name: &str, value: Option<&str>) {
        match value {
            Some(value) => info!(property = name, value, "User property set"),
            None => info!(property = name, "User property cleared"),
        }
    }

    fn set_user_id(&self, user_id: Option<&str>) {
        match user_id {
            Some(user_id) => info!(user_id, "User ID set"),
            None => info!("User ID cleared"),
        }
    }

    fn set_analytics_collection_enabled(&self, enabled: bool) {
        info!(enabled, "Analytics collection toggled");
    }

    fn set_session_timeout_interval(&self, interval: Duration) {
        info!(
            interval_secs = interval.as_secs_f64(),
            "Session timeout interval set"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_backend_records_in_order() {
        let backend = RecordingBackend::new();
        backend.set_user_id(Some("user-42"));
        backend.log_event("purchase", &EventParams::new());
        backend.set_analytics_collection_enabled(false);
        backend.set_session_timeout_interval(Duration::from_secs(90));

        let calls = backend.calls();
        assert_eq!(calls.len(), 4);
        assert_eq!(
            calls[0],
            BackendCall::SetUserId {
                user_id: Some("user-42".into())
            }
        );
        assert!(matches!(calls[1], BackendCall::LogEvent { ref name, .. } if name == "purchase"));
        assert_eq!(
            calls[3],
            BackendCall::SetSessionTimeoutInterval {
                interval_secs: 90.0
            }
        );
        assert_eq!(backend.user_id().as_deref(), Some("user-42"));
    }

    #[test]
    fn test_user_property_clear_is_idempotent() {
        let backend = RecordingBackend::new();
        backend.set_user_property("age", Some("42"));
        assert_eq!(backend.user_property("age").as_deref(), Some("42"));

        backend.set_user_property("age", None);
        let after_once = backend.user_properties();
        backend.set_user_property("age", None);
        let after_twice = backend.user_properties();

        assert!(after_once.is_empty());
        assert_eq!(after_once, after_twice);
    }

    #[test]
    fn test_drain_keeps_user_state() {
        let backend = RecordingBackend::new();
        backend.set_user_property("tier", Some("gold"));
        backend.log_event("login", &EventParams::new());

        let drained = backend.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(backend.call_count(), 0);
        assert_eq!(backend.user_property("tier").as_deref(), Some("gold"));
    }

    #[test]
    fn test_backend_call_serialization() {
        let call = BackendCall::SetUserProperty {
            name: "tier".into(),
            value: None,
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["call"], "set_user_property");
        assert_eq!(json["name"], "tier");
        assert!(json["value"].is_null());
    }
}
