#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod commands;
mod error;
mod events;
mod hotkey;
mod logging;
mod state;

use clikr_core::{ClickWorkerManager, SharedDevice};
use clikr_platform::{EnigoDevice, NoopDevice};
use state::AppState;
use std::sync::Arc;
use tauri::{Manager, RunEvent};
use tracing::{error, info, warn};

/// Real injection when the platform allows it, otherwise a logging stand-in.
fn open_device() -> (SharedDevice, bool) {
    match EnigoDevice::new() {
        Ok(device) => (Arc::new(device), true),
        Err(e) => {
            warn!("Mouse injection unavailable, clicks will only be logged: {}", e);
            (Arc::new(NoopDevice::new()), false)
        }
    }
}

fn main() {
    logging::setup(!cfg!(debug_assertions));

    let settings = clikr_core::load_settings();
    if let Err(e) = settings.validate() {
        warn!("Saved settings are out of range, they will be rejected on start: {}", e);
    }
    let (device, injection_available) = open_device();

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_global_shortcut::Builder::new().build())
        .setup(move |app| {
            let handle = app.handle().clone();
            let manager = ClickWorkerManager::new(move |report| {
                events::emit_finished(&handle, &report);
                if let Some(state) = handle.try_state::<AppState>() {
                    events::emit_status(&handle, &state.status());
                }
            });

            let toggle_key = settings.hotkey.toggle.clone();
            app.manage(AppState::new(manager, settings, device, injection_available));

            // Without a live hotkey, runs that pin the cursor are refused.
            let state = app.state::<AppState>();
            if let Err(e) = hotkey::apply(app.handle(), &state, toggle_key.as_deref()) {
                error!("{}", e);
            }
            info!("Clikr ready (injection_available={})", injection_available);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_settings,
            commands::update_settings,
            commands::start_clicking,
            commands::stop_clicking,
            commands::toggle_clicking,
            commands::clicker_status,
            commands::cursor_position,
        ])
        .build(tauri::generate_context!())
        .expect("error while building clikr");

    app.run(|app, event| {
        if let RunEvent::Exit = event {
            if let Some(state) = app.try_state::<AppState>() {
                state.manager.shutdown();
            }
        }
    });
}
