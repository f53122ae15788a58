//! Telemetry properties attached to command results.
//!
//! Commands describe what they did as a flat map of named values, each tagged
//! as personally identifiable or not. Nothing here transmits data; the
//! properties are returned to the caller and logged with PII redacted.

use std::collections::BTreeMap;

use serde::Serialize;

/// Property key naming the sub-command that ran.
pub const SUB_COMMAND: &str = "subCommand";

/// A single telemetry value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryValue {
    pub value: String,
    #[serde(rename = "isPii")]
    pub is_pii: bool,
}

/// Ordered telemetry properties for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TelemetryProperties(BTreeMap<String, TelemetryValue>);

impl TelemetryProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Properties for `sub_command`, e.g. `select` or `list`.
    pub fn for_sub_command(sub_command: &str) -> Self {
        let mut props = Self::new();
        props.set(SUB_COMMAND, sub_command, false);
        props
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>, is_pii: bool) {
        self.0.insert(
            key.into(),
            TelemetryValue {
                value: value.into(),
                is_pii,
            },
        );
    }

    /// Record a command option as `options.<name>` if it was given.
    pub fn set_option(&mut self, name: &str, value: Option<&str>, is_pii: bool) {
        if let Some(value) = value {
            self.set(format!("options.{name}"), value, is_pii);
        }
    }

    pub fn get(&self, key: &str) -> Option<&TelemetryValue> {
        self.0.get(key)
    }

    /// Shorthand for the raw value of `key`.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TelemetryValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// `key=value` pairs with PII values replaced by `<redacted>`.
    pub fn redacted(&self) -> String {
        self.iter()
            .map(|(k, v)| {
                if v.is_pii {
                    format!("{k}=<redacted>")
                } else {
                    format!("{k}={}", v.value)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Log the properties under the `taco::telemetry` target.
    pub fn emit(&self, event: &str) {
        tracing::info!(
            target: "taco::telemetry",
            event = event,
            properties = %self.redacted(),
            "telemetry"
        );
    }
}
