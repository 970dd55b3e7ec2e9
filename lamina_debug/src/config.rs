// Copyright 2026 the Lamina Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON configuration loading.
//!
//! Missing fields fall back to [`StackConfig::new`]'s values, so a file only
//! has to spell out what it changes:
//!
//! ```json
//! { "capacity": { "Limited": 3 }, "forwarding_properties": true }
//! ```

use lamina_core::config::StackConfig;
use lamina_core::transition::TransitionSpec;

/// Parses a [`StackConfig`] from JSON.
///
/// # Errors
///
/// Returns the parse error for malformed JSON or unknown values.
pub fn from_json(text: &str) -> Result<StackConfig, serde_json::Error> {
    serde_json::from_str(text)
}

/// Serializes a [`StackConfig`] as pretty-printed JSON.
///
/// # Errors
///
/// Serialization of these types does not fail in practice; the error is
/// surfaced for API symmetry with [`from_json`].
pub fn to_json(config: &StackConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(config)
}

/// Parses a [`TransitionSpec`] from JSON, e.g.
/// `{"style": "PushFromRight", "duration": {"secs": 0, "nanos": 250000000}}`.
///
/// # Errors
///
/// Returns the parse error for malformed JSON or unknown styles.
pub fn transition_from_json(text: &str) -> Result<TransitionSpec, serde_json::Error> {
    serde_json::from_str(text)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use lamina_core::capacity::Capacity;
    use lamina_core::transition::TransitionStyle;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = from_json(r#"{ "capacity": { "Limited": 3 } }"#).unwrap();
        assert_eq!(config.capacity, Capacity::limited(3));
        assert!(!config.removing_beyond_capacity);
        assert!(!config.forwarding_properties);

        assert_eq!(from_json("{}").unwrap(), StackConfig::new());
    }

    #[test]
    fn unlimited_capacity_is_a_unit_variant() {
        let config =
            from_json(r#"{ "capacity": "Unlimited", "removing_beyond_capacity": true }"#).unwrap();
        assert_eq!(config.capacity, Capacity::UNLIMITED);
        assert!(config.removing_beyond_capacity);
    }

    #[test]
    fn saved_config_loads_back() {
        let config = StackConfig::minimal().with_forwarding(true);
        let text = to_json(&config).unwrap();
        assert_eq!(from_json(&text).unwrap(), config);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(from_json(r#"{ "capacity": { "Limited": 0 } }"#).is_err());
    }

    #[test]
    fn transition_spec_parses() {
        let spec = transition_from_json(
            r#"{ "style": "PushFromRight", "duration": { "secs": 0, "nanos": 250000000 } }"#,
        )
        .unwrap();
        assert_eq!(spec.style, TransitionStyle::PushFromRight);
        assert_eq!(spec.duration, Duration::from_millis(250));
        assert!(transition_from_json(r#"{ "style": "Spin" }"#).is_err());
    }
}
