//! clikr-platform: platform-specific I/O boundary for clikr.
//!
//! This crate provides:
//! - Mouse input injection via `enigo` (`EnigoDevice`)
//! - A logging no-op device for machines without an input backend (`NoopDevice`)
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `injector` - Injection devices implementing `clikr_core::InjectionDevice`

mod error;
mod injector;

// Re-export error types
pub use error::{PlatformError, PlatformResult};

// Re-export injection devices
pub use injector::{EnigoDevice, NoopDevice};
