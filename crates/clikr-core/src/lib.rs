//! clikr-core: click scheduling core + settings.
//!
//! Design goal: keep this crate UI-agnostic and platform-agnostic.
//! Platform specific I/O (mouse injection) lives in `clikr-platform`.

mod device;
mod inputs;
mod manager;
mod settings;
mod signal;
mod storage;
mod worker;

#[cfg(test)]
mod testing;

pub use device::{DeviceError, DeviceResult, InjectionDevice, SharedDevice};
pub use inputs::{ClickStyle, InputError, WorkerInputs, WorkerInputsBuilder};
pub use manager::{ClickWorkerManager, ManagerError, RunId, RunReport, RunState, ToggleAction};
pub use settings::{
    ClickSettings, ClickerSettings, HotkeySettings, InputLimits, ScaledValue, Timescale,
};
pub use signal::{stop_signal, StopSignal, StopTrigger};
pub use storage::{
    get_app_data_dir, load_settings, load_settings_from, log_dir, save_settings,
    save_settings_to, settings_path, StorageError, StorageResult,
};
pub use worker::{remaining_sleep, ClickWorker, FinishReason, RunOutcome};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        };
        f.write_str(name)
    }
}

/// Absolute screen position in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where clicks land. Each axis is optional on its own: an absent axis
/// keeps whatever coordinate the cursor currently has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetLocation {
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl TargetLocation {
    /// No targeting: clicks happen wherever the cursor is.
    pub const fn none() -> Self {
        Self { x: None, y: None }
    }

    /// Pin both axes.
    pub const fn at(x: i32, y: i32) -> Self {
        Self { x: Some(x), y: Some(y) }
    }

    /// Whether at least one axis is pinned.
    pub fn is_active(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    /// Substitute the pinned axes over `current`.
    pub fn resolve(&self, current: Position) -> Position {
        Position {
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
        }
    }
}

impl fmt::Display for TargetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn axis(v: Option<i32>) -> String {
            v.map_or_else(|| "-".to_string(), |v| v.to_string())
        }
        write!(f, "({}, {})", axis(self.x), axis(self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_partial_target() {
        let current = Position::new(5, 7);

        assert_eq!(TargetLocation::none().resolve(current), current);
        assert_eq!(TargetLocation::at(1, 2).resolve(current), Position::new(1, 2));

        let x_only = TargetLocation { x: Some(100), y: None };
        assert!(x_only.is_active());
        assert_eq!(x_only.resolve(current), Position::new(100, 7));

        let y_only = TargetLocation { x: None, y: Some(-20) };
        assert_eq!(y_only.resolve(current), Position::new(5, -20));
    }

    #[test]
    fn test_target_display() {
        assert_eq!(TargetLocation::none().to_string(), "(-, -)");
        assert_eq!(TargetLocation { x: Some(3), y: None }.to_string(), "(3, -)");
    }

    #[test]
    fn test_mouse_button_serde_names() {
        let yaml = serde_yaml::to_string(&MouseButton::Middle).unwrap();
        assert_eq!(yaml.trim(), "middle");
        let parsed: MouseButton = serde_yaml::from_str("right").unwrap();
        assert_eq!(parsed, MouseButton::Right);
    }
}
