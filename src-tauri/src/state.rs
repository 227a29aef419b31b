//! Application state for Tauri backend.

use crate::error::AppError;
use clikr_core::{
    ClickWorkerManager, ClickerSettings, RunId, RunState, SharedDevice, ToggleAction,
};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Snapshot shown by the Start/Stop controls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickerStatus {
    pub state: RunState,
    pub running: bool,
    pub injection_available: bool,
    pub softlock_risk: bool,
}

pub struct AppState {
    pub manager: ClickWorkerManager,
    settings: Mutex<ClickerSettings>,
    /// The toggle hotkey actually registered with the OS, which can lag
    /// behind `settings` when registration fails.
    live_hotkey: Mutex<Option<String>>,
    device: SharedDevice,
    injection_available: bool,
}

impl AppState {
    pub fn new(
        manager: ClickWorkerManager,
        settings: ClickerSettings,
        device: SharedDevice,
        injection_available: bool,
    ) -> Self {
        Self {
            manager,
            settings: Mutex::new(settings),
            live_hotkey: Mutex::new(None),
            device,
            injection_available,
        }
    }

    pub fn settings(&self) -> MutexGuard<'_, ClickerSettings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn live_hotkey(&self) -> Option<String> {
        self.live_hotkey
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_live_hotkey(&self, hotkey: Option<String>) {
        *self.live_hotkey.lock().unwrap_or_else(PoisonError::into_inner) = hotkey;
    }

    /// A run from `settings` would pin the cursor with no working hotkey to stop it.
    fn softlock_risk(&self, settings: &ClickerSettings) -> bool {
        settings.softlock_risk()
            || (settings.click.location.is_active() && self.live_hotkey().is_none())
    }

    pub fn device(&self) -> &SharedDevice {
        &self.device
    }

    /// Start a run from the current settings, replacing any active run.
    pub fn start(&self) -> Result<RunId, AppError> {
        let settings = self.settings().clone();
        if self.softlock_risk(&settings) {
            return Err(AppError::SoftlockRisk);
        }
        let inputs = settings.worker_inputs(self.device.clone())?;
        Ok(self.manager.start(inputs)?)
    }

    /// Hotkey semantics: stop when running, otherwise start from the settings
    /// as they are right now.
    pub fn toggle(&self) -> Result<ToggleAction, AppError> {
        let settings = self.settings().clone();
        if !self.manager.is_running() && self.softlock_risk(&settings) {
            return Err(AppError::SoftlockRisk);
        }
        let device = self.device.clone();
        Ok(self.manager.toggle(|| settings.worker_inputs(device))?)
    }

    pub fn status(&self) -> ClickerStatus {
        let state = self.manager.state();
        let settings = self.settings().clone();
        ClickerStatus {
            state,
            running: state == RunState::Running,
            injection_available: self.injection_available,
            softlock_risk: self.softlock_risk(&settings),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clikr_core::{ClickerSettings, TargetLocation};
    use clikr_platform::NoopDevice;
    use std::sync::Arc;

    fn state(settings: ClickerSettings) -> AppState {
        let manager = ClickWorkerManager::new(|_| {});
        AppState::new(manager, settings, Arc::new(NoopDevice::new()), false)
    }

    #[test]
    fn test_start_refuses_softlock() {
        let mut settings = ClickerSettings::default();
        settings.click.location = TargetLocation::at(10, 10);
        settings.hotkey.toggle = None;
        let state = state(settings);

        assert!(matches!(state.start(), Err(AppError::SoftlockRisk)));
        assert!(matches!(state.toggle(), Err(AppError::SoftlockRisk)));
        assert!(!state.status().running);
    }

    #[test]
    fn test_unregistered_hotkey_counts_as_softlock() {
        let mut settings = ClickerSettings::default();
        settings.click.location = TargetLocation::at(10, 10);
        settings.hotkey.toggle = Some("ctrl+F8".into());
        let state = state(settings);

        // Configured but never registered, e.g. registration failed at startup.
        assert!(state.status().softlock_risk);
        assert!(matches!(state.start(), Err(AppError::SoftlockRisk)));
        assert!(matches!(state.toggle(), Err(AppError::SoftlockRisk)));

        state.set_live_hotkey(Some("ctrl+F8".into()));
        assert!(!state.status().softlock_risk);
        state.start().unwrap();
        assert!(state.status().running);

        // Losing the hotkey mid-run still lets the run be stopped.
        state.set_live_hotkey(None);
        assert_eq!(state.toggle().unwrap(), ToggleAction::Stopped);
        state.manager.shutdown();
    }

    #[test]
    fn test_toggle_round_trip() {
        let state = state(ClickerSettings::default());

        assert!(matches!(state.toggle().unwrap(), ToggleAction::Started(_)));
        assert!(state.status().running);
        assert_eq!(state.toggle().unwrap(), ToggleAction::Stopped);
        assert!(!state.status().running);
        state.manager.shutdown();
        assert_eq!(state.status().state, RunState::Idle);
    }

    #[test]
    fn test_status_serializes_camel_case() {
        let state = state(ClickerSettings::default());
        let json = serde_json::to_value(state.status()).unwrap();

        assert_eq!(json["state"], "Idle");
        assert_eq!(json["running"], false);
        assert_eq!(json["injectionAvailable"], false);
        assert_eq!(json["softlockRisk"], false);
    }
}
