use organic_core::config::{SchedulerConfig, TriggerConfig, TriggerMode};
use organic_core::errors::ConfigError;
use proptest::prelude::*;

fn arb_mode() -> impl Strategy<Value = TriggerMode> {
    prop_oneof![Just(TriggerMode::Seconds), Just(TriggerMode::Steps)]
}

// ── Valid configs survive a TOML round trip ───────────────────────────

proptest! {
    #[test]
    fn valid_config_round_trips_through_toml(
        mode in arb_mode(),
        frequency in 0.001f64..10_000.0,
        ratio in 0.001f64..=1.0,
        scaling_factor in 0.001f64..1_000.0,
        capacity in 1usize..100_000,
        backoff in 1u64..60_000,
    ) {
        let trigger =
            TriggerConfig::new(mode, frequency, frequency * ratio, scaling_factor).unwrap();
        let mut config = SchedulerConfig::with_trigger(trigger);
        config.queue.capacity = capacity;
        config.runtime.failure_backoff_ms = backoff;

        let text = toml::to_string(&config).unwrap();
        let parsed = SchedulerConfig::from_toml(&text).unwrap();
        prop_assert_eq!(parsed, config);
    }
}

// ── A floor above the base frequency is always rejected ───────────────

proptest! {
    #[test]
    fn floor_above_frequency_is_rejected(
        mode in arb_mode(),
        frequency in 0.001f64..1_000.0,
        excess in 0.001f64..1_000.0,
    ) {
        let err = TriggerConfig::new(mode, frequency, frequency + excess, 5.0).unwrap_err();
        let is_min_frequency_error = matches!(
            err,
            ConfigError::ValidationFailed { ref field, .. } if field == "trigger.min_frequency"
        );
        prop_assert!(is_min_frequency_error);
    }
}

// ── Non-positive scaling factors never validate ───────────────────────

proptest! {
    #[test]
    fn non_positive_scaling_is_rejected(scaling_factor in -1_000.0f64..=0.0) {
        let err = TriggerConfig::new(TriggerMode::Seconds, 10.0, 2.0, scaling_factor).unwrap_err();
        prop_assert_eq!(
            err,
            ConfigError::ValidationFailed {
                field: "trigger.scaling_factor".to_string(),
                message: "the scaling factor must be higher than 0".to_string(),
            }
        );
    }
}
