use crate::error::{ApiError, AppError};
use crate::events;
use crate::hotkey;
use crate::state::{AppState, ClickerStatus};
use clikr_core::{ClickerSettings, Position, RunId, ToggleAction};
use tauri::{AppHandle, State};
use tracing::{info, warn};

fn api_err(e: impl Into<AppError>) -> String {
    let e: AppError = e.into();
    ApiError::from(e).into()
}

// ====== Settings Commands ======

#[tauri::command]
pub fn get_settings(state: State<'_, AppState>) -> ClickerSettings {
    state.settings().clone()
}

/// Validate, persist and apply new settings. A running clicker keeps the
/// inputs it was started with.
///
/// Nothing changes unless both the hotkey registration and the save succeed.
#[tauri::command]
pub fn update_settings(
    app: AppHandle,
    state: State<'_, AppState>,
    settings: ClickerSettings,
) -> Result<ClickerSettings, String> {
    settings.validate().map_err(api_err)?;

    let previous_hotkey = state.live_hotkey();
    hotkey::apply(&app, &state, settings.hotkey.toggle.as_deref()).map_err(api_err)?;

    let path = match clikr_core::save_settings(&settings) {
        Ok(path) => path,
        Err(e) => {
            if let Err(rollback) = hotkey::apply(&app, &state, previous_hotkey.as_deref()) {
                warn!("Failed to restore previous hotkey: {}", rollback);
            }
            return Err(api_err(e));
        }
    };
    info!("Settings saved to {:?}", path);
    *state.settings() = settings.clone();

    events::emit_status(&app, &state.status());
    Ok(settings)
}

// ====== Clicker Commands ======

#[tauri::command]
pub fn start_clicking(app: AppHandle, state: State<'_, AppState>) -> Result<RunId, String> {
    let run_id = state.start().map_err(api_err)?;
    events::emit_status(&app, &state.status());
    Ok(run_id)
}

#[tauri::command]
pub fn stop_clicking(app: AppHandle, state: State<'_, AppState>) -> bool {
    let stopped = state.manager.stop();
    events::emit_status(&app, &state.status());
    stopped
}

#[tauri::command]
pub fn toggle_clicking(
    app: AppHandle,
    state: State<'_, AppState>,
) -> Result<ToggleAction, String> {
    let action = state.toggle().map_err(api_err)?;
    events::emit_status(&app, &state.status());
    Ok(action)
}

#[tauri::command]
pub fn clicker_status(state: State<'_, AppState>) -> ClickerStatus {
    state.status()
}

/// Current cursor position, for filling in the click location.
#[tauri::command]
pub fn cursor_position(state: State<'_, AppState>) -> Result<Position, String> {
    state.device().current_position().map_err(api_err)
}
