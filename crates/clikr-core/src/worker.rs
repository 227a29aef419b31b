//! Click worker: the timed event loop for one run.

use crate::{
    ClickStyle, DeviceError, DeviceResult, InjectionDevice, MouseButton, Position, StopSignal,
    WorkerInputs,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Why a run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum FinishReason {
    /// The finite event budget was used up.
    Exhausted,
    /// A stop was requested.
    Cancelled,
    /// The device failed; the run was aborted.
    Failed(String),
}

/// Result of [`ClickWorker::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub events_completed: u64,
    pub reason: FinishReason,
}

impl RunOutcome {
    pub fn failed(events_completed: u64, message: impl Into<String>) -> Self {
        Self {
            events_completed,
            reason: FinishReason::Failed(message.into()),
        }
    }
}

/// Sleep owed after an event that took `elapsed`, given the target `interval`.
///
/// Overruns yield zero; missed time is never made up later.
pub fn remaining_sleep(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

enum EventFlow {
    Continue,
    Stopped,
}

/// Runs click events for one set of [`WorkerInputs`].
#[derive(Debug, Default)]
pub struct ClickWorker {
    last_position: Option<Position>,
    progress: Arc<AtomicU64>,
}

impl ClickWorker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed-event counter, updated as the run proceeds. Still readable
    /// if `run` unwinds.
    pub fn progress(&self) -> Arc<AtomicU64> {
        self.progress.clone()
    }

    /// Run until the event budget is used up, `stop` is raised, or the device fails.
    pub fn run(&mut self, inputs: &WorkerInputs, stop: &StopSignal) -> RunOutcome {
        info!(%inputs, "click worker starting");

        let mut completed = 0u64;
        self.progress.store(0, Ordering::Relaxed);
        let reason = loop {
            if let Some(total) = inputs.event_count() {
                if completed >= total {
                    break FinishReason::Exhausted;
                }
            }
            if stop.is_requested() {
                break FinishReason::Cancelled;
            }

            match self.execute_event(inputs, stop) {
                Ok(EventFlow::Continue) => {
                    completed += 1;
                    self.progress.store(completed, Ordering::Relaxed);
                }
                Ok(EventFlow::Stopped) => {
                    completed += 1;
                    self.progress.store(completed, Ordering::Relaxed);
                    break FinishReason::Cancelled;
                }
                Err(e) => {
                    error!(event = completed + 1, error = %e, "click event failed, aborting run");
                    break FinishReason::Failed(e.to_string());
                }
            }
        };

        info!(events = completed, ?reason, "click worker finished");
        RunOutcome { events_completed: completed, reason }
    }

    fn execute_event(&mut self, inputs: &WorkerInputs, stop: &StopSignal) -> DeviceResult<EventFlow> {
        let event_start = Instant::now();
        let device = inputs.device().as_ref();

        self.move_to_target(inputs, device)?;

        let button = inputs.mouse_button();
        match inputs.click_style() {
            ClickStyle::Held { hold } => {
                device.press(button)?;
                let pressed = PressedButton::new(device, button);
                let interrupted = stop.wait(hold);
                pressed.release()?;
                if interrupted {
                    debug!("stop requested while holding");
                    return Ok(EventFlow::Stopped);
                }
            }
            ClickStyle::Instant { clicks_per_event } => {
                for _ in 0..clicks_per_event {
                    device.click(button)?;
                }
            }
        }

        let pause = remaining_sleep(inputs.interval(), event_start.elapsed());
        if pause.is_zero() {
            debug!(interval = ?inputs.interval(), "event overran interval");
        }
        if stop.wait(pause) {
            return Ok(EventFlow::Stopped);
        }
        Ok(EventFlow::Continue)
    }

    /// Move to the target unless the resolved position is where we last moved.
    fn move_to_target(&mut self, inputs: &WorkerInputs, device: &dyn InjectionDevice) -> DeviceResult<()> {
        let target = inputs.target();
        if !target.is_active() {
            return Ok(());
        }

        let current = device.current_position()?;
        let next = target.resolve(current);
        if self.last_position == Some(next) {
            return Ok(());
        }

        debug!(%current, %next, "moving to target");
        device.move_to(next)?;
        self.last_position = Some(next);
        Ok(())
    }
}

/// A button held down by the worker. Released on drop if not released explicitly.
struct PressedButton<'a> {
    device: &'a dyn InjectionDevice,
    button: MouseButton,
    released: bool,
}

impl<'a> PressedButton<'a> {
    fn new(device: &'a dyn InjectionDevice, button: MouseButton) -> Self {
        Self { device, button, released: false }
    }

    fn release(mut self) -> Result<(), DeviceError> {
        self.released = true;
        self.device.release(self.button)
    }
}

impl Drop for PressedButton<'_> {
    fn drop(&mut self) {
        if !self.released {
            if let Err(e) = self.device.release(self.button) {
                warn!(button = %self.button, error = %e, "failed to release held button");
            }
        }
    }
}
