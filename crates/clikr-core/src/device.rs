//! Injection device boundary.

use crate::{MouseButton, Position};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by an injection device.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceError {
    #[error("input device unavailable: {0}")]
    Unavailable(String),
    #[error("{operation} failed: {message}")]
    Injection {
        operation: &'static str,
        message: String,
    },
}

impl DeviceError {
    pub fn injection(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Injection { operation, message: message.into() }
    }
}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// Trait for injecting synthetic mouse input into the OS (implemented by clikr-platform).
///
/// Calls are expected to be synchronous and fast relative to a click interval.
pub trait InjectionDevice: Send + Sync {
    fn move_to(&self, position: Position) -> DeviceResult<()>;
    fn press(&self, button: MouseButton) -> DeviceResult<()>;
    fn release(&self, button: MouseButton) -> DeviceResult<()>;
    fn click(&self, button: MouseButton) -> DeviceResult<()>;
    fn current_position(&self) -> DeviceResult<Position>;
}

/// Device handle shared between the settings layer and the active run.
pub type SharedDevice = Arc<dyn InjectionDevice>;
