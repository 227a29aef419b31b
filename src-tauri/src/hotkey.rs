//! Global start/stop hotkey.

use crate::error::AppError;
use crate::events;
use crate::state::AppState;
use tauri::{AppHandle, Manager};
use tauri_plugin_global_shortcut::{GlobalShortcutExt, ShortcutState};
use tracing::{info, warn};

/// Make `hotkey` the live toggle hotkey. `None` or blank disables it.
///
/// The new shortcut is registered before the old one is dropped, so on error
/// the previous hotkey stays live and `AppState::live_hotkey` is unchanged.
pub fn apply(app: &AppHandle, state: &AppState, hotkey: Option<&str>) -> Result<(), AppError> {
    let hotkey = hotkey.map(str::trim).filter(|k| !k.is_empty());
    let previous = state.live_hotkey();
    if hotkey == previous.as_deref() {
        return Ok(());
    }

    let shortcuts = app.global_shortcut();
    if let Some(hotkey) = hotkey {
        shortcuts
            .on_shortcut(hotkey, |app, _shortcut, event| {
                if event.state() == ShortcutState::Pressed {
                    on_toggle(app);
                }
            })
            .map_err(|e| AppError::Hotkey {
                hotkey: hotkey.to_string(),
                message: e.to_string(),
            })?;
    }

    if let Some(previous) = previous.as_deref() {
        if let Err(e) = shortcuts.unregister(previous) {
            warn!(hotkey = previous, error = %e, "failed to unregister previous hotkey");
        }
    }

    state.set_live_hotkey(hotkey.map(str::to_string));
    match hotkey {
        Some(hotkey) => info!(hotkey, "registered toggle hotkey"),
        None => info!("toggle hotkey disabled"),
    }
    Ok(())
}

fn on_toggle(app: &AppHandle) {
    let state = app.state::<AppState>();
    match state.toggle() {
        Ok(action) => info!(?action, "hotkey toggle"),
        Err(e) => warn!(error = %e, "hotkey toggle failed"),
    }
    events::emit_status(app, &state.status());
}
