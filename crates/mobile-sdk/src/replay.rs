//! Recorded tracker calls — one JSON object per call, replayable through a
//! [`TrackerWrapper`].

use std::time::Duration;

use anyhow::{Context, Result};
use bridge_core::EventParams;
use serde::{Deserialize, Serialize};

use crate::wrapper::TrackerWrapper;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum TrackerCall {
    TrackEvent {
        name: String,
        #[serde(default)]
        values: EventParams,
    },
    TrackEventWithValue {
        name: String,
        value: String,
    },
    SetCustomerUserId {
        #[serde(default)]
        user_id: Option<String>,
    },
    SetCurrencyCode {
        #[serde(default)]
        currency_code: Option<String>,
    },
    SetDevKey {
        #[serde(default)]
        dev_key: Option<String>,
    },
    SetMinTimeBetweenSessions {
        seconds: u64,
    },
    SetDeviceTrackingDisabled {
        disabled: bool,
    },
    /// `device_token` is hex encoded.
    RegisterUninstall {
        device_token: String,
    },
    /// Goes straight to the analytics side; the tracker has no user properties.
    SetUserProperty {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        value: Option<String>,
    },
}

impl TrackerCall {
    pub fn parse(line: &str) -> Result<Self> {
        serde_json::from_str(line).context("malformed tracker call")
    }

    pub fn apply(&self, wrapper: &TrackerWrapper) -> Result<()> {
        match self {
            TrackerCall::TrackEvent { name, values } => wrapper.track_event(name, values),
            TrackerCall::TrackEventWithValue { name, value } => {
                #[allow(deprecated)]
                wrapper.track_event_with_value(name, value);
            }
            TrackerCall::SetCustomerUserId { user_id } => {
                wrapper.set_customer_user_id(user_id.as_deref())
            }
            TrackerCall::SetCurrencyCode { currency_code } => {
                wrapper.set_currency_code(currency_code.as_deref())
            }
            TrackerCall::SetDevKey { dev_key } => wrapper.set_dev_key(dev_key.as_deref()),
            TrackerCall::SetMinTimeBetweenSessions { seconds } => {
                wrapper.set_min_time_between_sessions(Duration::from_secs(*seconds))
            }
            TrackerCall::SetDeviceTrackingDisabled { disabled } => {
                wrapper.set_device_tracking_disabled(*disabled)
            }
            TrackerCall::RegisterUninstall { device_token } => {
                let token = hex::decode(device_token)
                    .with_context(|| format!("device_token '{device_token}' is not valid hex"))?;
                wrapper.register_uninstall(&token);
            }
            TrackerCall::SetUserProperty { name, value } => wrapper
                .analytics()
                .set_user_property_string(value.as_deref(), name.as_deref()),
        }
        Ok(())
    }
}
