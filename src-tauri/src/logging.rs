//! Logging with console output and, in release builds, a daily rolling file.

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_FILTER: &str = "clikr_tauri=info,clikr_core=info,clikr_platform=info";

/// Initialize logging.
///
/// `RUST_LOG` overrides the console filter. In production, logs are also
/// written to `clikr/logs/` under the platform data directory.
pub fn setup(is_production: bool) {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let console_layer = fmt::layer().with_target(true).with_filter(console_filter);

    let file_layer = if is_production {
        let log_dir = clikr_core::log_dir();

        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory {:?}: {}", log_dir, e);
            None
        } else {
            let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "clikr.log");

            Some(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .with_writer(file_appender)
                    .with_filter(EnvFilter::new(DEFAULT_FILTER)),
            )
        }
    } else {
        None
    };

    // `Option<Layer>` is itself a layer; `None` is a no-op.
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if is_production {
        tracing::info!("File logging enabled: {:?}", clikr_core::log_dir());
    }
    tracing::info!("Logging initialized (production={})", is_production);
}
