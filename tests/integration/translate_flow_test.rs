//! Integration tests for the tracker → translator → analytics backend flow.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::thread;

    use bridge_analytics::naming::sanitize;
    use bridge_analytics::{
        BackendCall, GoogleAnalyticsAdapter, RecordingBackend, WRAPPER_PARAMETER_NAME,
    };
    use bridge_core::config::AppConfig;
    use bridge_core::{EventParams, SdkAdapterConfig};
    use bridge_mobile_sdk::{AppsFlyerAdapter, InMemoryTracker, TrackerCall, TrackerWrapper};
    use serde_json::json;

    /// Adapter matching the examples used throughout the docs.
    fn sample_config() -> SdkAdapterConfig {
        SdkAdapterConfig {
            sanitized_name_prefix: "af_".to_string(),
            wrapper_parameter_value: "appsflyer".to_string(),
            empty_event_name: "af_unnamed_event".to_string(),
            empty_parameter_name: "af_unnamed_parameter".to_string(),
            empty_user_property_name: "af_unnamed_property".to_string(),
            event_map: HashMap::from([(
                "purchase".to_string(),
                "ecommerce_purchase".to_string(),
            )]),
            parameter_map: HashMap::from([("price".to_string(), "value".to_string())]),
        }
    }

    fn appsflyer_stack() -> (TrackerWrapper, Arc<InMemoryTracker>, Arc<RecordingBackend>) {
        let tracker = Arc::new(InMemoryTracker::new());
        let backend = Arc::new(RecordingBackend::new());
        let analytics = Arc::new(
            GoogleAnalyticsAdapter::new(Arc::new(AppsFlyerAdapter::new()), backend.clone())
                .unwrap(),
        );
        (
            TrackerWrapper::new(tracker.clone(), analytics),
            tracker,
            backend,
        )
    }

    #[test]
    fn test_mapped_and_unmapped_names() {
        let backend = Arc::new(RecordingBackend::new());
        let translator =
            GoogleAnalyticsAdapter::new(Arc::new(sample_config()), backend.clone()).unwrap();

        let mut params = EventParams::new();
        params.insert("price".to_string(), json!(5));
        params.insert("my$param".to_string(), json!("x"));
        params.insert(String::new(), json!("blank"));

        translator.log_event(Some("purchase"), Some(&params));
        translator.log_event(Some("my$event"), None);
        translator.log_event(None, None);

        let events = backend.events();
        assert_eq!(events[0].0, "ecommerce_purchase");
        assert_eq!(events[0].1["value"], json!(5));
        assert_eq!(events[0].1["af_myparam"], json!("x"));
        assert_eq!(events[0].1["af_unnamed_parameter"], json!("blank"));
        assert_eq!(events[1].0, "af_myevent");
        assert_eq!(events[1].0, sanitize("af_my$event", 40));
        assert_eq!(events[2].0, "af_unnamed_event");

        for (_, parameters) in &events {
            assert_eq!(parameters[WRAPPER_PARAMETER_NAME], json!("appsflyer"));
        }
    }

    #[test]
    fn test_user_property_lifecycle() {
        let backend = Arc::new(RecordingBackend::new());
        let translator =
            GoogleAnalyticsAdapter::new(Arc::new(sample_config()), backend.clone()).unwrap();

        translator.set_user_property_string(Some("31"), Some("age"));
        assert_eq!(backend.user_property("af_age").as_deref(), Some("31"));

        translator.set_user_property_string(None, Some("age"));
        let cleared_once = backend.user_properties();
        translator.set_user_property_string(None, Some("age"));

        assert!(cleared_once.is_empty());
        assert_eq!(backend.user_properties(), cleared_once);
    }

    #[test]
    fn test_appsflyer_session_replay() {
        let (wrapper, tracker, backend) = appsflyer_stack();
        let session = [
            r#"{"call":"set_customer_user_id","user_id":"cust-100"}"#,
            r#"{"call":"track_event","name":"af_login","values":{"af_registration_method":"email"}}"#,
            r#"{"call":"track_event","name":"af_content_view","values":{"af_content_id":"sku-1","af_content_type":"shoes"}}"#,
            r#"{"call":"track_event","name":"af_purchase","values":{"af_revenue":59.9,"af_currency":"EUR","af_order_id":"o-1"}}"#,
            r#"{"call":"track_event","name":"level 3 cleared!","values":{}}"#,
            r#"{"call":"set_device_tracking_disabled","disabled":true}"#,
        ];
        for line in session {
            TrackerCall::parse(line).unwrap().apply(&wrapper).unwrap();
        }

        assert_eq!(tracker.events().len(), 4);
        assert!(tracker.events().iter().all(|e| e.value.is_none()));

        let names: Vec<String> = backend.events().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec!["login", "view_item", "ecommerce_purchase", "af_level3cleared"]
        );

        let events = backend.events();
        assert_eq!(events[0].1["method"], json!("email"));
        assert_eq!(events[1].1["item_id"], json!("sku-1"));
        assert_eq!(events[1].1["item_category"], json!("shoes"));
        assert_eq!(events[2].1["value"], json!(59.9));
        assert_eq!(events[2].1["currency"], json!("EUR"));
        assert_eq!(events[2].1["transaction_id"], json!("o-1"));

        let calls = backend.calls();
        assert_eq!(
            calls.first(),
            Some(&BackendCall::SetUserId {
                user_id: Some("cust-100".to_string())
            })
        );
        assert_eq!(
            calls.last(),
            Some(&BackendCall::SetAnalyticsCollectionEnabled { enabled: false })
        );
    }

    #[test]
    fn test_adapter_from_config_file() {
        let path = std::env::temp_dir().join(format!(
            "analytics-bridge-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"
            [analytics]
            session_timeout_secs = 120

            [adapter]
            sanitized_name_prefix = "ky_"
            wrapper_parameter_value = "kochava"
            empty_event_name = "ky_unnamed_event"
            empty_parameter_name = "ky_unnamed_parameter"
            empty_user_property_name = "ky_unnamed_property"

            [adapter.event_map]
            purchase = "ecommerce_purchase"
            AddToCart = "add_to_cart"

            [adapter.parameter_map]
            OrderID = "transaction_id"
            "#,
        )
        .unwrap();

        let config = AppConfig::load(Some(path.as_path())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.analytics.session_timeout_secs, 120);
        let backend = Arc::new(RecordingBackend::new());
        let translator =
            GoogleAnalyticsAdapter::new(Arc::new(config.adapter.unwrap()), backend.clone())
                .unwrap();

        let mut params = EventParams::new();
        params.insert("OrderID".to_string(), json!("o-7"));

        translator.log_event(Some("purchase"), None);
        translator.log_event(Some("Purchase"), None);
        translator.log_event(Some("AddToCart"), Some(&params));
        translator.log_event(Some("addtocart"), None);

        let events = backend.events();
        assert_eq!(events[0].0, "ecommerce_purchase");
        assert_eq!(events[1].0, "ky_Purchase");
        assert_eq!(events[2].0, "add_to_cart");
        assert_eq!(events[2].1["transaction_id"], json!("o-7"));
        assert_eq!(events[3].0, "ky_addtocart");
        assert_eq!(events[0].1[WRAPPER_PARAMETER_NAME], json!("kochava"));
    }

    #[test]
    fn test_concurrent_logging() {
        let backend = Arc::new(RecordingBackend::new());
        let translator = Arc::new(
            GoogleAnalyticsAdapter::new(Arc::new(sample_config()), backend.clone()).unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let translator = translator.clone();
                thread::spawn(move || {
                    for i in 0..50 {
                        let mut params = EventParams::new();
                        params.insert(format!("thread {t}"), json!(i));
                        translator.log_event(Some("purchase"), Some(&params));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let events = backend.events();
        assert_eq!(events.len(), 400);
        assert!(events.iter().all(|(name, params)| {
            name == "ecommerce_purchase" && params[WRAPPER_PARAMETER_NAME] == json!("appsflyer")
        }));
    }
}
