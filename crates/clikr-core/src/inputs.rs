//! Per-run worker configuration.

use crate::{MouseButton, SharedDevice, TargetLocation};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("click interval must be greater than zero")]
    ZeroInterval,
    #[error("clicks per event must be at least 1")]
    ZeroClicksPerEvent,
    #[error("{field} exceeds the maximum of {max}")]
    TooLarge { field: &'static str, max: u64 },
    #[error("{0} does not fit in a duration")]
    DurationOverflow(&'static str),
}

/// How a single event clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickStyle {
    /// `clicks_per_event` back-to-back clicks.
    Instant { clicks_per_event: u32 },
    /// One press, held for `hold`, then released.
    Held { hold: Duration },
}

/// Immutable snapshot of everything one run needs.
///
/// Built through [`WorkerInputs::builder`], which rejects invalid values.
/// There are no setters: a configuration change only affects the next run.
#[derive(Clone)]
pub struct WorkerInputs {
    interval: Duration,
    hold_length: Duration,
    clicks_per_event: u32,
    event_count: Option<u64>,
    mouse_button: MouseButton,
    target: TargetLocation,
    device: SharedDevice,
}

impl WorkerInputs {
    pub fn builder(device: SharedDevice) -> WorkerInputsBuilder {
        WorkerInputsBuilder::new(device)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn hold_length(&self) -> Duration {
        self.hold_length
    }

    pub fn clicks_per_event(&self) -> u32 {
        self.clicks_per_event
    }

    /// `None` means a continuous run.
    pub fn event_count(&self) -> Option<u64> {
        self.event_count
    }

    pub fn is_continuous(&self) -> bool {
        self.event_count.is_none()
    }

    pub fn is_held(&self) -> bool {
        !self.hold_length.is_zero()
    }

    pub fn click_style(&self) -> ClickStyle {
        if self.is_held() {
            ClickStyle::Held { hold: self.hold_length }
        } else {
            ClickStyle::Instant { clicks_per_event: self.clicks_per_event }
        }
    }

    pub fn mouse_button(&self) -> MouseButton {
        self.mouse_button
    }

    pub fn target(&self) -> TargetLocation {
        self.target
    }

    pub fn device(&self) -> &SharedDevice {
        &self.device
    }
}

impl fmt::Display for WorkerInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(interval={:?}, hold_length={:?}, clicks_per_event={}, event_count={}, mouse_button={}, location={})",
            self.interval,
            self.hold_length,
            self.clicks_per_event,
            self.event_count
                .map_or_else(|| "continuous".to_string(), |n| n.to_string()),
            self.mouse_button,
            self.target,
        )
    }
}

impl fmt::Debug for WorkerInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerInputs")
            .field("interval", &self.interval)
            .field("hold_length", &self.hold_length)
            .field("clicks_per_event", &self.clicks_per_event)
            .field("event_count", &self.event_count)
            .field("mouse_button", &self.mouse_button)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// Builder for [`WorkerInputs`].
pub struct WorkerInputsBuilder {
    interval: Duration,
    hold_length: Duration,
    clicks_per_event: u32,
    event_count: Option<u64>,
    mouse_button: MouseButton,
    target: TargetLocation,
    device: SharedDevice,
}

impl WorkerInputsBuilder {
    /// Defaults: 100 ms interval, instant single clicks, continuous, left button, no target.
    pub fn new(device: SharedDevice) -> Self {
        Self {
            interval: Duration::from_millis(100),
            hold_length: Duration::ZERO,
            clicks_per_event: 1,
            event_count: None,
            mouse_button: MouseButton::Left,
            target: TargetLocation::none(),
            device,
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Zero selects instant clicks.
    pub fn hold_length(mut self, hold_length: Duration) -> Self {
        self.hold_length = hold_length;
        self
    }

    pub fn clicks_per_event(mut self, clicks: u32) -> Self {
        self.clicks_per_event = clicks;
        self
    }

    pub fn event_count(mut self, count: Option<u64>) -> Self {
        self.event_count = count;
        self
    }

    pub fn mouse_button(mut self, button: MouseButton) -> Self {
        self.mouse_button = button;
        self
    }

    pub fn target(mut self, target: TargetLocation) -> Self {
        self.target = target;
        self
    }

    pub fn build(self) -> Result<WorkerInputs, InputError> {
        if self.interval.is_zero() {
            return Err(InputError::ZeroInterval);
        }
        if self.clicks_per_event == 0 {
            return Err(InputError::ZeroClicksPerEvent);
        }

        Ok(WorkerInputs {
            interval: self.interval,
            hold_length: self.hold_length,
            clicks_per_event: self.clicks_per_event,
            event_count: self.event_count,
            mouse_button: self.mouse_button,
            target: self.target,
            device: self.device,
        })
    }
}
