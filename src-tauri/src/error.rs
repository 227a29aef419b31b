//! Errors surfaced to the frontend.

use clikr_core::{DeviceError, InputError, ManagerError, StorageError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Inputs(#[from] InputError),
    #[error(transparent)]
    Manager(#[from] ManagerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Device(#[from] DeviceError),
    #[error("a click location is set but no hotkey is configured; set a hotkey first so clicking can be stopped")]
    SoftlockRisk,
    #[error("failed to register hotkey {hotkey:?}: {message}")]
    Hotkey { hotkey: String, message: String },
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub message: String,
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError {
            message: err.to_string(),
        }
    }
}

impl From<ApiError> for String {
    fn from(err: ApiError) -> Self {
        err.message
    }
}
