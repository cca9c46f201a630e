// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the device state controller over a scripted transport.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use alexa_hap_lib::controller::{AccessoryKind, Characteristic, DeviceController, HubValue};
use alexa_hap_lib::error::TransportError;
use alexa_hap_lib::protocol::{ActionParameters, Transport};
use alexa_hap_lib::response::{RawFeature, RawProperty, property_keys};
use alexa_hap_lib::state::CapabilityState;
use alexa_hap_lib::store::{CacheConfig, DeviceStore};
use alexa_hap_lib::types::{ActionVerb, FeatureName, SupportedOperations};
use alexa_hap_lib::{Error, SmartHomeDevice};
use parking_lot::Mutex;

// ============================================================================
// Scripted transport
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Invocation {
    endpoint_id: String,
    feature: FeatureName,
    action: ActionVerb,
    parameters: ActionParameters,
}

#[derive(Debug, Default)]
struct MockTransport {
    features: Mutex<Vec<RawFeature>>,
    fetch_delay: Option<Duration>,
    fail: AtomicBool,
    fetches: AtomicUsize,
    invocations: Mutex<Vec<Invocation>>,
}

impl MockTransport {
    fn with_features(features: Vec<RawFeature>) -> Self {
        Self {
            features: Mutex::new(features),
            ..Self::default()
        }
    }

    fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    fn set_features(&self, features: Vec<RawFeature>) {
        *self.features.lock() = features;
    }

    fn fail(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().clone()
    }
}

impl Transport for MockTransport {
    async fn fetch_device_state(
        &self,
        _endpoint_id: &str,
    ) -> Result<Vec<RawFeature>, TransportError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::ConnectionFailed("unreachable".to_string()));
        }
        Ok(self.features.lock().clone())
    }

    async fn invoke_device_action(
        &self,
        endpoint_id: &str,
        feature: FeatureName,
        action: ActionVerb,
        parameters: ActionParameters,
    ) -> Result<(), TransportError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(TransportError::RequestUnsuccessful {
                code: "ENDPOINT_UNREACHABLE".to_string(),
            });
        }
        self.invocations.lock().push(Invocation {
            endpoint_id: endpoint_id.to_string(),
            feature,
            action,
            parameters,
        });
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

const DEVICE_ID: &str = "amzn1.alexa.entity.7a1b3c5d-2e4f-4a6b-8c9d-0e1f2a3b4c5d";
const ENDPOINT_ID: &str = "amzn1.alexa.endpoint.7a1b3c5d";

fn power(value: &str) -> RawFeature {
    RawFeature::new("power")
        .with_property(RawProperty::new("powerState").with_value(property_keys::POWER, value))
}

fn brightness(value: u8) -> RawFeature {
    RawFeature::new("brightness").with_property(
        RawProperty::new("brightness").with_value(property_keys::BRIGHTNESS, value),
    )
}

fn color(hue: f64, saturation: f64) -> RawFeature {
    RawFeature::new("color").with_property(RawProperty::new("color").with_value(
        property_keys::COLOR,
        serde_json::json!({ "hue": hue, "saturation": saturation, "brightness": 1.0 }),
    ))
}

fn color_temperature(kelvin: u32) -> RawFeature {
    RawFeature::new("colorTemperature").with_property(
        RawProperty::new("colorTemperatureInKelvin")
            .with_value(property_keys::COLOR_TEMPERATURE, kelvin),
    )
}

fn range(instance: &str, label: &str, value: u8) -> RawFeature {
    RawFeature::new("range")
        .with_instance(instance)
        .with_range_label(label)
        .with_property(
            RawProperty::new("rangeValue")
                .with_value(property_keys::RANGE, serde_json::json!({ "value": value })),
        )
}

fn device(operations: &[&str]) -> SmartHomeDevice {
    SmartHomeDevice::new(
        DEVICE_ID,
        ENDPOINT_ID,
        "Test Device",
        SupportedOperations::from_names(operations.iter().copied()),
    )
}

fn controller(
    kind: AccessoryKind,
    operations: &[&str],
    transport: &Arc<MockTransport>,
    config: CacheConfig,
) -> (DeviceController<MockTransport>, Arc<DeviceStore>) {
    let store = Arc::new(DeviceStore::new(config));
    let controller = DeviceController::new(
        device(operations),
        kind,
        Arc::clone(&store),
        Arc::clone(transport),
    );
    (controller, store)
}

const LIGHT_OPS: &[&str] = &[
    "turnOn",
    "turnOff",
    "setBrightness",
    "setColor",
    "setColorTemperature",
];

// ============================================================================
// Reads
// ============================================================================

mod reads {
    use super::*;

    #[tokio::test]
    async fn reads_within_ttl_fetch_once() {
        let transport =
            Arc::new(MockTransport::with_features(vec![power("ON"), brightness(42)]));
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        assert_eq!(
            light.get_state(Characteristic::Brightness).await.unwrap(),
            HubValue::from(42u8)
        );
        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test]
    async fn missing_feature_in_fresh_cache_triggers_fetch() {
        let transport =
            Arc::new(MockTransport::with_features(vec![power("ON"), brightness(42)]));
        let (light, store) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());
        store.replace_all(DEVICE_ID, vec![CapabilityState::new(FeatureName::Power, "ON")]);

        let value = light.get_state(Characteristic::Brightness).await.unwrap();

        assert_eq!(value, HubValue::from(42u8));
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test]
    async fn set_then_get_reads_back_without_fetch() {
        let transport =
            Arc::new(MockTransport::with_features(vec![power("ON"), brightness(42)]));
        let (light, store) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());
        store.replace_all(DEVICE_ID, vec![CapabilityState::new(FeatureName::Power, "ON")]);

        assert_eq!(
            light.get_state(Characteristic::Brightness).await.unwrap(),
            HubValue::from(42u8)
        );
        assert_eq!(transport.fetches(), 1);

        light
            .set_state(Characteristic::Brightness, HubValue::from(150u8))
            .await
            .unwrap();

        let invocations = transport.invocations();
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].endpoint_id, ENDPOINT_ID);
        assert_eq!(invocations[0].feature, FeatureName::Brightness);
        assert_eq!(invocations[0].action, ActionVerb::SetBrightness);
        assert_eq!(
            invocations[0].parameters.get("brightness"),
            Some(&serde_json::json!("100"))
        );

        assert_eq!(
            light.get_state(Characteristic::Brightness).await.unwrap(),
            HubValue::from(100u8)
        );
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test]
    async fn color_temperature_reads_as_mired() {
        let transport = Arc::new(MockTransport::with_features(vec![color_temperature(2700)]));
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        let value = light.get_state(Characteristic::ColorTemperature).await.unwrap();

        assert_eq!(value, HubValue::from(370u16));
    }

    #[tokio::test]
    async fn absent_state_is_missing() {
        let transport = Arc::new(MockTransport::with_features(vec![power("ON")]));
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        let err = light.get_state(Characteristic::Hue).await.unwrap_err();

        assert!(matches!(err, Error::MissingState(FeatureName::Color)));
        assert!(err.is_communication());
    }

    #[tokio::test]
    async fn unreported_feature_is_not_refetched_within_ttl() {
        let transport = Arc::new(MockTransport::with_features(vec![power("ON")]));
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        for _ in 0..3 {
            let err = light.get_state(Characteristic::Hue).await.unwrap_err();
            assert!(matches!(err, Error::MissingState(FeatureName::Color)));
        }
        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unreported_feature_is_refetched_after_ttl() {
        let transport = Arc::new(MockTransport::with_features(vec![power("ON")]));
        let (light, _) = controller(
            AccessoryKind::Light,
            LIGHT_OPS,
            &transport,
            CacheConfig::new(Duration::from_secs(30)).unwrap(),
        );

        assert!(light.get_state(Characteristic::Hue).await.is_err());
        transport.set_features(vec![power("ON"), color(120.0, 0.5)]);
        assert!(light.get_state(Characteristic::Hue).await.is_err());
        assert_eq!(transport.fetches(), 1);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert_eq!(
            light.get_state(Characteristic::Hue).await.unwrap(),
            HubValue::Number(120.0)
        );
        assert_eq!(transport.fetches(), 2);
    }

    #[tokio::test]
    async fn fetch_failure_is_communication_error() {
        let transport = Arc::new(MockTransport::default());
        transport.fail();
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        let err = light.get_state(Characteristic::On).await.unwrap_err();

        assert!(err.is_communication());
        assert!(matches!(
            err,
            Error::Communication {
                feature: FeatureName::Power,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unsupported_characteristic_is_rejected_before_io() {
        let transport = Arc::new(MockTransport::with_features(vec![power("ON")]));
        let (fan, _) =
            controller(AccessoryKind::Fan, &["turnOn"], &transport, CacheConfig::default());

        let err = fan.get_state(Characteristic::Hue).await.unwrap_err();

        assert!(matches!(err, Error::UnsupportedCharacteristic { .. }));
        assert_eq!(transport.fetches(), 0);
    }

    #[tokio::test]
    async fn states_reports_cache_origin() {
        let transport = Arc::new(MockTransport::with_features(vec![power("OFF")]));
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        let first = light.states().await.unwrap();
        let second = light.states().await.unwrap();

        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(first.states, second.states);
        assert_eq!(transport.fetches(), 1);
    }
}

// ============================================================================
// Cache lifetime
// ============================================================================

mod cache {
    use super::*;

    fn short_ttl() -> CacheConfig {
        CacheConfig::new(Duration::from_secs(30)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn expired_cache_is_refetched() {
        let transport = Arc::new(MockTransport::with_features(vec![power("ON")]));
        let (light, _) = controller(AccessoryKind::Light, LIGHT_OPS, &transport, short_ttl());

        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        transport.set_features(vec![power("OFF")]);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        assert_eq!(transport.fetches(), 1);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(false));
        assert_eq!(transport.fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn background_refresh_serves_stale_value() {
        let transport = Arc::new(MockTransport::with_features(vec![power("ON")]));
        let (light, _) = controller(
            AccessoryKind::Light,
            LIGHT_OPS,
            &transport,
            short_ttl().with_background_refresh(true),
        );

        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        transport.set_features(vec![power("OFF")]);
        tokio::time::advance(Duration::from_secs(31)).await;

        // Stale value is returned while the refresh runs on its own task.
        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(transport.fetches(), 2);
        assert_eq!(light.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(false));
        assert_eq!(transport.fetches(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_reads_share_one_fetch() {
        let transport = Arc::new(
            MockTransport::with_features(vec![power("ON"), brightness(42)])
                .with_fetch_delay(Duration::from_millis(200)),
        );
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        let (on, level, again) = tokio::join!(
            light.get_state(Characteristic::On),
            light.get_state(Characteristic::Brightness),
            light.get_state(Characteristic::On),
        );

        assert_eq!(on.unwrap(), HubValue::Bool(true));
        assert_eq!(level.unwrap(), HubValue::from(42u8));
        assert_eq!(again.unwrap(), HubValue::Bool(true));
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test]
    async fn controllers_share_the_store() {
        let transport = Arc::new(MockTransport::with_features(vec![power("ON"), brightness(10)]));
        let store = Arc::new(DeviceStore::default());
        let light = DeviceController::new(
            device(LIGHT_OPS),
            AccessoryKind::Light,
            Arc::clone(&store),
            Arc::clone(&transport),
        );
        let switch = DeviceController::new(
            device(&["turnOn", "turnOff"]),
            AccessoryKind::Switch,
            Arc::clone(&store),
            Arc::clone(&transport),
        );

        light.get_state(Characteristic::Brightness).await.unwrap();
        assert_eq!(switch.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        assert_eq!(transport.fetches(), 1);
    }
}

// ============================================================================
// Writes
// ============================================================================

mod writes {
    use super::*;

    #[tokio::test]
    async fn power_write_updates_cache() {
        let transport = Arc::new(MockTransport::with_features(vec![power("OFF")]));
        let (switch, _) = controller(
            AccessoryKind::Switch,
            &["turnOn", "turnOff"],
            &transport,
            CacheConfig::default(),
        );

        assert_eq!(switch.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(false));
        switch
            .set_state(Characteristic::On, HubValue::Bool(true))
            .await
            .unwrap();

        assert_eq!(transport.invocations()[0].action, ActionVerb::TurnOn);
        assert!(transport.invocations()[0].parameters.is_empty());
        assert_eq!(switch.get_state(Characteristic::On).await.unwrap(), HubValue::Bool(true));
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test]
    async fn percentage_fallback_follows_priority() {
        let transport = Arc::new(MockTransport::default());
        let (switch, _) = controller(
            AccessoryKind::Switch,
            &["adjustPercentage", "rampPercentage"],
            &transport,
            CacheConfig::default(),
        );

        switch
            .set_state(Characteristic::Brightness, HubValue::from(30u8))
            .await
            .unwrap();

        let invocation = &transport.invocations()[0];
        assert_eq!(invocation.feature, FeatureName::Percentage);
        assert_eq!(invocation.action, ActionVerb::AdjustPercentage);
        assert_eq!(
            invocation.parameters.get("percentage"),
            Some(&serde_json::json!("30"))
        );
    }

    #[tokio::test]
    async fn no_level_verb_is_unsupported_capability() {
        let transport = Arc::new(MockTransport::default());
        let (switch, _) = controller(
            AccessoryKind::Switch,
            &["turnOn", "turnOff"],
            &transport,
            CacheConfig::default(),
        );

        let err = switch
            .set_state(Characteristic::Brightness, HubValue::from(30u8))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnsupportedCapability { .. }));
        assert!(transport.invocations().is_empty());
    }

    #[tokio::test]
    async fn invalid_values_never_reach_transport() {
        let transport = Arc::new(MockTransport::default());
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        for (characteristic, value) in [
            (Characteristic::Brightness, HubValue::from("bright")),
            (Characteristic::Brightness, HubValue::Number(f64::NAN)),
            (Characteristic::ColorTemperature, HubValue::Number(f64::INFINITY)),
            (Characteristic::Hue, HubValue::Number(400.0)),
            (Characteristic::On, HubValue::from("maybe")),
        ] {
            let err = light.set_state(characteristic, value).await.unwrap_err();
            assert!(err.is_invalid_value(), "{characteristic}: {err}");
        }
        assert!(transport.invocations().is_empty());
        assert_eq!(transport.fetches(), 0);
    }

    #[tokio::test]
    async fn color_temperature_write_is_clamped() {
        let transport = Arc::new(MockTransport::default());
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        light
            .set_state(Characteristic::ColorTemperature, HubValue::from(1000u16))
            .await
            .unwrap();

        let invocation = &transport.invocations()[0];
        assert_eq!(invocation.feature, FeatureName::ColorTemperature);
        assert_eq!(invocation.action, ActionVerb::SetColorTemperature);
        assert_eq!(
            invocation
                .parameters
                .get("colorTemperatureInKelvin")
                .and_then(serde_json::Value::as_f64),
            Some(2000.0)
        );
    }

    #[tokio::test]
    async fn hue_write_sends_nearest_color_name() {
        let transport = Arc::new(MockTransport::default());
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        light
            .set_state(Characteristic::Hue, HubValue::Number(0.0))
            .await
            .unwrap();

        let invocation = &transport.invocations()[0];
        assert_eq!(invocation.feature, FeatureName::Color);
        assert_eq!(invocation.action, ActionVerb::SetColor);
        assert_eq!(invocation.parameters.get("colorName"), Some(&serde_json::json!("red")));
    }

    #[tokio::test]
    async fn hue_write_reads_back_from_cache() {
        let transport = Arc::new(MockTransport::with_features(vec![
            power("ON"),
            color(0.0, 0.75),
        ]));
        let (light, _) =
            controller(AccessoryKind::Light, LIGHT_OPS, &transport, CacheConfig::default());

        assert_eq!(
            light.get_state(Characteristic::Hue).await.unwrap(),
            HubValue::Number(0.0)
        );

        light
            .set_state(Characteristic::Hue, HubValue::Number(120.0))
            .await
            .unwrap();

        assert_eq!(
            transport.invocations()[0].parameters.get("colorName"),
            Some(&serde_json::json!("green"))
        );
        assert_eq!(
            light.get_state(Characteristic::Hue).await.unwrap(),
            HubValue::Number(120.0)
        );
        assert_eq!(
            light.get_state(Characteristic::Saturation).await.unwrap(),
            HubValue::Number(75.0)
        );
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test]
    async fn failed_write_leaves_cache_untouched() {
        let transport = Arc::new(MockTransport::with_features(vec![power("OFF")]));
        let (switch, store) = controller(
            AccessoryKind::Switch,
            &["turnOn", "turnOff"],
            &transport,
            CacheConfig::default(),
        );
        switch.get_state(Characteristic::On).await.unwrap();
        transport.fail();

        let err = switch
            .set_state(Characteristic::On, HubValue::Bool(true))
            .await
            .unwrap_err();

        assert!(err.is_communication());
        let cached = store.get(DEVICE_ID, FeatureName::Power).unwrap();
        assert_eq!(cached.value.as_text(), Some("OFF"));
    }
}

// ============================================================================
// Fans
// ============================================================================

mod fans {
    use super::*;

    const FAN_OPS: &[&str] = &["turnOn", "turnOff", "rampPercentage"];

    #[tokio::test]
    async fn cached_power_off_reads_zero_speed_without_io() {
        let transport = Arc::new(MockTransport::default());
        let (fan, store) =
            controller(AccessoryKind::Fan, FAN_OPS, &transport, CacheConfig::default());
        store.replace_all(DEVICE_ID, vec![CapabilityState::new(FeatureName::Power, "OFF")]);

        let speed = fan.get_state(Characteristic::RotationSpeed).await.unwrap();

        assert_eq!(speed, HubValue::from(0u8));
        assert_eq!(transport.fetches(), 0);
        assert!(transport.invocations().is_empty());
    }

    #[tokio::test]
    async fn speed_comes_from_percentage_range() {
        let transport = Arc::new(MockTransport::with_features(vec![
            power("ON"),
            range("1", "Percentage", 60),
        ]));
        let (fan, _) = controller(AccessoryKind::Fan, FAN_OPS, &transport, CacheConfig::default());

        assert_eq!(fan.get_state(Characteristic::Active).await.unwrap(), HubValue::from(1u8));
        assert_eq!(
            fan.get_state(Characteristic::RotationSpeed).await.unwrap(),
            HubValue::from(60u8)
        );
        assert_eq!(transport.fetches(), 1);
    }

    #[tokio::test]
    async fn speed_falls_back_to_unlabelled_range() {
        let transport = Arc::new(MockTransport::with_features(vec![
            power("ON"),
            range("1", "Humidity", 45),
            range("2", "Speed", 3),
        ]));
        let (fan, _) = controller(AccessoryKind::Fan, FAN_OPS, &transport, CacheConfig::default());

        let speed = fan.get_state(Characteristic::RotationSpeed).await.unwrap();

        assert_eq!(speed, HubValue::from(3u8));
    }

    #[tokio::test]
    async fn unknown_speed_reads_zero() {
        let transport = Arc::new(MockTransport::default());
        transport.fail();
        let (fan, _) = controller(AccessoryKind::Fan, FAN_OPS, &transport, CacheConfig::default());

        let speed = fan.get_state(Characteristic::RotationSpeed).await.unwrap();

        assert_eq!(speed, HubValue::from(0u8));
    }

    #[tokio::test]
    async fn active_write_maps_to_power_verbs() {
        let transport = Arc::new(MockTransport::default());
        let (fan, _) = controller(AccessoryKind::Fan, FAN_OPS, &transport, CacheConfig::default());

        fan.set_state(Characteristic::Active, HubValue::from(0u8))
            .await
            .unwrap();
        fan.set_state(Characteristic::RotationSpeed, HubValue::from(75u8))
            .await
            .unwrap();

        let invocations = transport.invocations();
        assert_eq!(invocations[0].action, ActionVerb::TurnOff);
        assert_eq!(invocations[1].feature, FeatureName::Percentage);
        assert_eq!(invocations[1].action, ActionVerb::RampPercentage);
        assert_eq!(
            invocations[1].parameters.get("percentage"),
            Some(&serde_json::json!("75"))
        );
    }
}
