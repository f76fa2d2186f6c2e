//! AppsFlyer naming vocabulary — maps AppsFlyer rich in-app events and their
//! predefined parameters onto Google Analytics for Firebase recommended names.

use std::collections::HashMap;

use bridge_analytics::SdkAdapter;
use bridge_core::SdkAdapterConfig;

pub const SANITIZED_NAME_PREFIX: &str = "af_";
pub const WRAPPER_PARAMETER_VALUE: &str = "appsflyer";
pub const EMPTY_EVENT_NAME: &str = "af_unnamed_event";
pub const EMPTY_PARAMETER_NAME: &str = "af_unnamed_parameter";
pub const EMPTY_USER_PROPERTY_NAME: &str = "af_unnamed_property";

const EVENT_MAP: &[(&str, &str)] = &[
    ("af_achievement_unlocked", "unlock_achievement"),
    ("af_add_payment_info", "add_payment_info"),
    ("af_add_to_cart", "add_to_cart"),
    ("af_add_to_wishlist", "add_to_wishlist"),
    ("af_complete_registration", "sign_up"),
    ("af_content_view", "view_item"),
    ("af_initiated_checkout", "begin_checkout"),
    ("af_level_achieved", "level_up"),
    ("af_list_view", "view_item_list"),
    ("af_login", "login"),
    ("af_purchase", "ecommerce_purchase"),
    ("af_search", "search"),
    ("af_share", "share"),
    ("af_spent_credits", "spend_virtual_currency"),
    ("af_tutorial_completion", "tutorial_complete"),
];

const PARAMETER_MAP: &[(&str, &str)] = &[
    ("af_achievement_id", "achievement_id"),
    ("af_content_id", "item_id"),
    ("af_content_type", "item_category"),
    ("af_coupon_code", "coupon"),
    ("af_currency", "currency"),
    ("af_date_a", "start_date"),
    ("af_date_b", "end_date"),
    ("af_destination_a", "origin"),
    ("af_destination_b", "destination"),
    ("af_level", "level"),
    ("af_order_id", "transaction_id"),
    ("af_price", "price"),
    ("af_quantity", "quantity"),
    ("af_registration_method", "method"),
    ("af_revenue", "value"),
    ("af_score", "score"),
    ("af_search_string", "search_term"),
    ("af_success", "success"),
    ("af_virtual_currency_name", "virtual_currency_name"),
];

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Built-in [`SdkAdapter`] for AppsFlyer.
#[derive(Debug, Clone)]
pub struct AppsFlyerAdapter {
    config: SdkAdapterConfig,
}

impl AppsFlyerAdapter {
    pub fn new() -> Self {
        Self {
            config: SdkAdapterConfig {
                sanitized_name_prefix: SANITIZED_NAME_PREFIX.to_string(),
                wrapper_parameter_value: WRAPPER_PARAMETER_VALUE.to_string(),
                empty_event_name: EMPTY_EVENT_NAME.to_string(),
                empty_parameter_name: EMPTY_PARAMETER_NAME.to_string(),
                empty_user_property_name: EMPTY_USER_PROPERTY_NAME.to_string(),
                event_map: to_map(EVENT_MAP),
                parameter_map: to_map(PARAMETER_MAP),
            },
        }
    }

    pub fn config(&self) -> &SdkAdapterConfig {
        &self.config
    }
}

impl Default for AppsFlyerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SdkAdapter for AppsFlyerAdapter {
    fn sanitized_name_prefix(&self) -> &str {
        &self.config.sanitized_name_prefix
    }

    fn wrapper_parameter_value(&self) -> &str {
        &self.config.wrapper_parameter_value
    }

    fn empty_event_name(&self) -> &str {
        &self.config.empty_event_name
    }

    fn empty_parameter_name(&self) -> &str {
        &self.config.empty_parameter_name
    }

    fn empty_user_property_name(&self) -> &str {
        &self.config.empty_user_property_name
    }

    fn event_map(&self) -> &HashMap<String, String> {
        &self.config.event_map
    }

    fn parameter_map(&self) -> &HashMap<String, String> {
        &self.config.parameter_map
    }
}
