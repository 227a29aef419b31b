//! User-facing click settings and their conversion into [`WorkerInputs`].

use crate::{InputError, MouseButton, SharedDevice, TargetLocation, WorkerInputs};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Unit a [`ScaledValue`] is expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timescale {
    #[default]
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl Timescale {
    fn millis_per_unit(self) -> u64 {
        match self {
            Timescale::Milliseconds => 1,
            Timescale::Seconds => 1_000,
            Timescale::Minutes => 60_000,
            Timescale::Hours => 3_600_000,
        }
    }
}

/// A whole number in some [`Timescale`], as entered in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaledValue {
    pub value: u64,
    pub scale: Timescale,
}

impl ScaledValue {
    pub const fn millis(value: u64) -> Self {
        Self { value, scale: Timescale::Milliseconds }
    }

    pub fn to_duration(self, field: &'static str) -> Result<Duration, InputError> {
        self.value
            .checked_mul(self.scale.millis_per_unit())
            .map(Duration::from_millis)
            .ok_or(InputError::DurationOverflow(field))
    }
}

/// Upper bounds on the numeric inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    pub max_clicks_per_event: u32,
    pub max_event_count: u64,
    pub max_scaled_value: u64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_clicks_per_event: 999,
            max_event_count: 999_999,
            max_scaled_value: 999_999,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickSettings {
    pub interval: ScaledValue,
    /// Zero means instant clicks.
    pub hold_length: ScaledValue,
    pub clicks_per_event: u32,
    /// `None` clicks until stopped.
    pub event_count: Option<u64>,
    pub mouse_button: MouseButton,
    pub location: TargetLocation,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            interval: ScaledValue::millis(100),
            hold_length: ScaledValue::millis(0),
            clicks_per_event: 1,
            event_count: None,
            mouse_button: MouseButton::Left,
            location: TargetLocation::none(),
        }
    }
}

impl ClickSettings {
    /// Check the values against `limits`.
    pub fn validate(&self, limits: &InputLimits) -> Result<(), InputError> {
        if self.interval.value > limits.max_scaled_value {
            return Err(InputError::TooLarge { field: "interval", max: limits.max_scaled_value });
        }
        if self.hold_length.value > limits.max_scaled_value {
            return Err(InputError::TooLarge {
                field: "hold length",
                max: limits.max_scaled_value,
            });
        }
        if self.clicks_per_event > limits.max_clicks_per_event {
            return Err(InputError::TooLarge {
                field: "clicks per event",
                max: u64::from(limits.max_clicks_per_event),
            });
        }
        if self.event_count.is_some_and(|n| n > limits.max_event_count) {
            return Err(InputError::TooLarge { field: "event count", max: limits.max_event_count });
        }
        Ok(())
    }

    /// Build a validated snapshot for one run.
    pub fn to_worker_inputs(
        &self,
        limits: &InputLimits,
        device: SharedDevice,
    ) -> Result<WorkerInputs, InputError> {
        self.validate(limits)?;
        WorkerInputs::builder(device)
            .interval(self.interval.to_duration("interval")?)
            .hold_length(self.hold_length.to_duration("hold length")?)
            .clicks_per_event(self.clicks_per_event)
            .event_count(self.event_count)
            .mouse_button(self.mouse_button)
            .target(self.location)
            .build()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeySettings {
    /// Global start/stop shortcut, e.g. `ctrl+F8`. `None` disables it.
    pub toggle: Option<String>,
}

impl Default for HotkeySettings {
    fn default() -> Self {
        Self { toggle: Some("ctrl+F8".into()) }
    }
}

/// Everything persisted in `settings.yaml`. Missing fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickerSettings {
    pub click: ClickSettings,
    pub hotkey: HotkeySettings,
    pub limits: InputLimits,
}

impl ClickerSettings {
    pub fn validate(&self) -> Result<(), InputError> {
        self.click.validate(&self.limits)
    }

    pub fn worker_inputs(&self, device: SharedDevice) -> Result<WorkerInputs, InputError> {
        self.click.to_worker_inputs(&self.limits, device)
    }

    /// The cursor would be pinned to a location with no hotkey to stop it.
    pub fn softlock_risk(&self) -> bool {
        let has_hotkey = self
            .hotkey
            .toggle
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        self.click.location.is_active() && !has_hotkey
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDevice;
    use crate::ClickStyle;
    use std::sync::Arc;

    #[test]
    fn test_timescale_conversion() {
        assert_eq!(
            ScaledValue { value: 250, scale: Timescale::Milliseconds }.to_duration("x").unwrap(),
            Duration::from_millis(250)
        );
        assert_eq!(
            ScaledValue { value: 2, scale: Timescale::Minutes }.to_duration("x").unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(
            ScaledValue { value: 1, scale: Timescale::Hours }.to_duration("x").unwrap(),
            Duration::from_secs(3600)
        );
        assert_eq!(
            ScaledValue { value: u64::MAX, scale: Timescale::Seconds }.to_duration("interval"),
            Err(InputError::DurationOverflow("interval"))
        );
    }

    #[test]
    fn test_default_settings_build_continuous_inputs() {
        let settings = ClickerSettings::default();
        let inputs = settings.worker_inputs(Arc::new(MockDevice::new())).unwrap();

        assert_eq!(inputs.interval(), Duration::from_millis(100));
        assert!(inputs.is_continuous());
        assert_eq!(inputs.click_style(), ClickStyle::Instant { clicks_per_event: 1 });
    }

    #[test]
    fn test_hold_length_selects_held_style() {
        let mut settings = ClickerSettings::default();
        settings.click.hold_length = ScaledValue { value: 2, scale: Timescale::Seconds };

        let inputs = settings.worker_inputs(Arc::new(MockDevice::new())).unwrap();
        assert_eq!(inputs.click_style(), ClickStyle::Held { hold: Duration::from_secs(2) });
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut settings = ClickerSettings::default();
        settings.click.interval = ScaledValue::millis(0);

        let err = settings.worker_inputs(Arc::new(MockDevice::new())).unwrap_err();
        assert_eq!(err, InputError::ZeroInterval);
    }

    #[test]
    fn test_limits_enforced() {
        let mut settings = ClickerSettings::default();
        settings.click.clicks_per_event = 1000;
        assert!(matches!(
            settings.validate(),
            Err(InputError::TooLarge { field: "clicks per event", max: 999 })
        ));

        settings.click.clicks_per_event = 1;
        settings.click.event_count = Some(1_000_000);
        assert!(matches!(
            settings.validate(),
            Err(InputError::TooLarge { field: "event count", .. })
        ));
    }

    #[test]
    fn test_softlock_risk() {
        let mut settings = ClickerSettings::default();
        assert!(!settings.softlock_risk());

        settings.click.location = TargetLocation { x: Some(10), y: None };
        assert!(!settings.softlock_risk());

        settings.hotkey.toggle = None;
        assert!(settings.softlock_risk());

        settings.hotkey.toggle = Some("  ".into());
        assert!(settings.softlock_risk());

        settings.click.location = TargetLocation::none();
        assert!(!settings.softlock_risk());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "click:\n  clicks_per_event: 3\n  location:\n    x: 100\n";
        let settings: ClickerSettings = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(settings.click.clicks_per_event, 3);
        assert_eq!(settings.click.location, TargetLocation { x: Some(100), y: None });
        assert_eq!(settings.click.interval, ScaledValue::millis(100));
        assert_eq!(settings.hotkey, HotkeySettings::default());
    }
}
