//! Input injection implementations.

use crate::{PlatformError, PlatformResult};
use clikr_core::{DeviceError, DeviceResult, InjectionDevice, MouseButton, Position};
use enigo::{Button, Coordinate, Direction, Enigo, Mouse, Settings};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Minimal no-op device: logs calls and tracks a virtual cursor.
#[derive(Debug, Default)]
pub struct NoopDevice {
    position: Mutex<Position>,
}

impl NoopDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self) -> MutexGuard<'_, Position> {
        self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InjectionDevice for NoopDevice {
    fn move_to(&self, position: Position) -> DeviceResult<()> {
        debug!(%position, "NoopDevice: would move mouse");
        *self.position() = position;
        Ok(())
    }

    fn press(&self, button: MouseButton) -> DeviceResult<()> {
        debug!(%button, "NoopDevice: would press");
        Ok(())
    }

    fn release(&self, button: MouseButton) -> DeviceResult<()> {
        debug!(%button, "NoopDevice: would release");
        Ok(())
    }

    fn click(&self, button: MouseButton) -> DeviceResult<()> {
        debug!(%button, "NoopDevice: would click");
        Ok(())
    }

    fn current_position(&self) -> DeviceResult<Position> {
        Ok(*self.position())
    }
}

/// Real injection device using the `enigo` crate.
pub struct EnigoDevice {
    enigo: Mutex<Enigo>,
}

impl EnigoDevice {
    /// Connect to the platform input backend.
    pub fn new() -> PlatformResult<Self> {
        let settings = Settings::default();
        let enigo = Enigo::new(&settings).map_err(|e| {
            PlatformError::DeviceUnavailable(format!("failed to create Enigo: {e}"))
        })?;
        Ok(Self {
            enigo: Mutex::new(enigo),
        })
    }

    fn enigo(&self) -> MutexGuard<'_, Enigo> {
        self.enigo.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn button(&self, operation: &'static str, button: MouseButton, direction: Direction) -> DeviceResult<()> {
        trace!(%button, operation, "injecting button");
        self.enigo()
            .button(mouse_button_to_enigo(button), direction)
            .map_err(|e| DeviceError::injection(operation, e.to_string()))
    }
}

impl InjectionDevice for EnigoDevice {
    fn move_to(&self, position: Position) -> DeviceResult<()> {
        trace!(%position, "injecting mouse move");
        self.enigo()
            .move_mouse(position.x, position.y, Coordinate::Abs)
            .map_err(|e| DeviceError::injection("move", e.to_string()))
    }

    fn press(&self, button: MouseButton) -> DeviceResult<()> {
        self.button("press", button, Direction::Press)
    }

    fn release(&self, button: MouseButton) -> DeviceResult<()> {
        self.button("release", button, Direction::Release)
    }

    fn click(&self, button: MouseButton) -> DeviceResult<()> {
        self.button("click", button, Direction::Click)
    }

    fn current_position(&self) -> DeviceResult<Position> {
        let (x, y) = self
            .enigo()
            .location()
            .map_err(|e| DeviceError::injection("read position", e.to_string()))?;
        Ok(Position::new(x, y))
    }
}

fn mouse_button_to_enigo(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}
