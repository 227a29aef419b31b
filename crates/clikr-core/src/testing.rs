//! Test doubles shared by the core unit tests.

use crate::{DeviceError, DeviceResult, InjectionDevice, MouseButton, Position};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    MoveTo(Position),
    Press(MouseButton),
    Release(MouseButton),
    Click(MouseButton),
    CurrentPosition,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<(Instant, DeviceCall)>,
    position: Position,
    clicks: usize,
}

/// Recording device with a virtual cursor.
#[derive(Debug, Default)]
pub struct MockDevice {
    state: Mutex<MockState>,
    click_delay: Duration,
    fail_on_click: Option<usize>,
    panic_on_click: Option<usize>,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(self, position: Position) -> Self {
        self.set_position(position);
        self
    }

    /// Each click/press blocks for `delay`, simulating slow injection.
    pub fn with_click_delay(mut self, delay: Duration) -> Self {
        self.click_delay = delay;
        self
    }

    /// The `n`th click (1-based) fails.
    pub fn failing_on_click(mut self, n: usize) -> Self {
        self.fail_on_click = Some(n);
        self
    }

    /// The `n`th click (1-based) panics.
    pub fn panicking_on_click(mut self, n: usize) -> Self {
        self.panic_on_click = Some(n);
        self
    }

    /// Simulate the user moving the cursor.
    pub fn set_position(&self, position: Position) {
        self.lock().position = position;
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.lock().calls.iter().map(|(_, c)| *c).collect()
    }

    pub fn timed_calls(&self) -> Vec<(Instant, DeviceCall)> {
        self.lock().calls.clone()
    }

    pub fn count(&self, pred: impl Fn(&DeviceCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|(_, c)| pred(c)).count()
    }

    pub fn clicks(&self) -> usize {
        self.count(|c| matches!(c, DeviceCall::Click(_)))
    }

    pub fn moves(&self) -> Vec<Position> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DeviceCall::MoveTo(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, call: DeviceCall) {
        self.lock().calls.push((Instant::now(), call));
    }
}

impl InjectionDevice for MockDevice {
    fn move_to(&self, position: Position) -> DeviceResult<()> {
        let mut state = self.lock();
        state.position = position;
        state.calls.push((Instant::now(), DeviceCall::MoveTo(position)));
        Ok(())
    }

    fn press(&self, button: MouseButton) -> DeviceResult<()> {
        self.record(DeviceCall::Press(button));
        Ok(())
    }

    fn release(&self, button: MouseButton) -> DeviceResult<()> {
        self.record(DeviceCall::Release(button));
        Ok(())
    }

    fn click(&self, button: MouseButton) -> DeviceResult<()> {
        if !self.click_delay.is_zero() {
            thread::sleep(self.click_delay);
        }
        let n = {
            let mut state = self.lock();
            state.clicks += 1;
            state.clicks
        };
        if self.panic_on_click == Some(n) {
            panic!("mock device exploded");
        }
        if self.fail_on_click == Some(n) {
            return Err(DeviceError::injection("click", "mock failure"));
        }
        self.record(DeviceCall::Click(button));
        Ok(())
    }

    fn current_position(&self) -> DeviceResult<Position> {
        let mut state = self.lock();
        state.calls.push((Instant::now(), DeviceCall::CurrentPosition));
        Ok(state.position)
    }
}
