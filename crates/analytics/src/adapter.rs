//! The capability describing how one source SDK's names map onto the
//! analytics backend.
//!
//! Each bridged SDK implements [`SdkAdapter`] once; the translator receives it
//! at construction. [`SdkAdapterConfig`] implements it directly so that an
//! adapter can also be supplied from a config file.

use std::collections::HashMap;

use bridge_core::{BridgeError, BridgeResult, SdkAdapterConfig};

use crate::naming::{self, NameKind, MAX_USER_PROPERTY_NAME_LEN};

/// Adapter trait — a source SDK's naming vocabulary.
pub trait SdkAdapter: Send + Sync {
    /// Prepended to names that have no entry in the maps.
    fn sanitized_name_prefix(&self) -> &str;

    /// Identifies the source SDK in the tag parameter of every event.
    fn wrapper_parameter_value(&self) -> &str;

    fn empty_event_name(&self) -> &str;

    fn empty_parameter_name(&self) -> &str;

    fn empty_user_property_name(&self) -> &str;

    /// Source event name to canonical backend event name.
    fn event_map(&self) -> &HashMap<String, String>;

    /// Source parameter name to canonical backend parameter name.
    fn parameter_map(&self) -> &HashMap<String, String>;

    /// Check that the vocabulary can only ever produce names the backend
    /// accepts. Default implementation checks the prefix, the wrapper value,
    /// the fallback names and every canonical name in the maps.
    ///
    /// `parameter_map` also names user properties, so its values must fit the
    /// shorter user-property limit.
    fn validate(&self) -> BridgeResult<()> {
        let prefix = self.sanitized_name_prefix();
        if prefix.is_empty() {
            return Err(BridgeError::InvalidAdapter(
                "sanitized_name_prefix must not be empty".into(),
            ));
        }
        if !prefix.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(BridgeError::InvalidAdapter(format!(
                "sanitized_name_prefix must start with a letter, got '{prefix}'"
            )));
        }
        if !prefix.chars().all(naming::is_allowed_char) {
            return Err(BridgeError::InvalidAdapter(format!(
                "sanitized_name_prefix may only contain letters, digits and '_', got '{prefix}'"
            )));
        }
        if naming::has_reserved_prefix(prefix) {
            return Err(BridgeError::InvalidAdapter(format!(
                "sanitized_name_prefix '{prefix}' uses a reserved prefix"
            )));
        }
        if prefix.len() >= MAX_USER_PROPERTY_NAME_LEN {
            return Err(BridgeError::InvalidAdapter(format!(
                "sanitized_name_prefix must be shorter than {MAX_USER_PROPERTY_NAME_LEN} characters"
            )));
        }

        if self.wrapper_parameter_value().is_empty() {
            return Err(BridgeError::InvalidAdapter(
                "wrapper_parameter_value must not be empty".into(),
            ));
        }

        let fallbacks = [
            ("empty_event_name", self.empty_event_name(), NameKind::Event),
            (
                "empty_parameter_name",
                self.empty_parameter_name(),
                NameKind::Parameter,
            ),
            (
                "empty_user_property_name",
                self.empty_user_property_name(),
                NameKind::UserProperty,
            ),
        ];
        for (field, name, kind) in fallbacks {
            if !naming::is_valid_name(name, kind) {
                return Err(BridgeError::InvalidAdapter(format!(
                    "{field} '{name}' is not a valid {} name",
                    kind.as_str()
                )));
            }
        }

        let maps = [
            ("event_map", self.event_map(), NameKind::Event),
            ("parameter_map", self.parameter_map(), NameKind::UserProperty),
        ];
        for (field, map, kind) in maps {
            if let Some((raw, name)) = map
                .iter()
                .find(|(_, name)| !naming::is_valid_name(name, kind))
            {
                return Err(BridgeError::InvalidAdapter(format!(
                    "{field} maps '{raw}' to '{name}', which is not a valid {} name",
                    kind.as_str()
                )));
            }
        }

        Ok(())
    }
}

impl SdkAdapter for SdkAdapterConfig {
    fn sanitized_name_prefix(&self) -> &str {
        &self.sanitized_name_prefix
    }

    fn wrapper_parameter_value(&self) -> &str {
        &self.wrapper_parameter_value
    }

    fn empty_event_name(&self) -> &str {
        &self.empty_event_name
    }

    fn empty_parameter_name(&self) -> &str {
        &self.empty_parameter_name
    }

    fn empty_user_property_name(&self) -> &str {
        &self.empty_user_property_name
    }

    fn event_map(&self) -> &HashMap<String, String> {
        &self.event_map
    }

    fn parameter_map(&self) -> &HashMap<String, String> {
        &self.parameter_map
    }
}
