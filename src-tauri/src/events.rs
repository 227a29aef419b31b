//! Events pushed to the frontend.

use crate::state::ClickerStatus;
use clikr_core::RunReport;
use tauri::{AppHandle, Emitter};

pub const FINISHED: &str = "clicker://finished";
pub const STATE: &str = "clicker://state";

/// Forward a completed run. Called on the worker thread.
pub fn emit_finished(app: &AppHandle, report: &RunReport) {
    if let Err(e) = app.emit(FINISHED, report) {
        tracing::warn!("Failed to emit event {}: {}", FINISHED, e);
    }
}

pub fn emit_status(app: &AppHandle, status: &ClickerStatus) {
    if let Err(e) = app.emit(STATE, status) {
        tracing::warn!("Failed to emit event {}: {}", STATE, e);
    }
}
