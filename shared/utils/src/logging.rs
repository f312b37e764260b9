use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    let json = config.format.eq_ignore_ascii_case("json");

    match (&config.file_path, json) {
        (Some(file_path), true) => {
            let file = OpenOptions::new().create(true).append(true).open(file_path)?;
            registry
                .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE).with_writer(Mutex::new(file)))
                .try_init()?;
        }
        (Some(file_path), false) => {
            let file = OpenOptions::new().create(true).append(true).open(file_path)?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
        (None, true) => {
            registry
                .with(fmt::layer().json().with_span_events(FmtSpan::CLOSE))
                .try_init()?;
        }
        (None, false) => {
            registry
                .with(fmt::layer().with_span_events(FmtSpan::CLOSE))
                .try_init()?;
        }
    }

    tracing::info!(level = %config.level, format = %config.format, "Logging initialized");
    Ok(())
}

#[macro_export]
macro_rules! log_error {
    ($err:expr, $msg:expr) => {
        tracing::error!(error = %$err, $msg);
    };
    ($err:expr, $msg:expr, $($field:tt)*) => {
        tracing::error!(error = %$err, $msg, $($field)*);
    };
}

#[macro_export]
macro_rules! log_warn {
    ($msg:expr) => {
        tracing::warn!($msg);
    };
    ($msg:expr, $($field:tt)*) => {
        tracing::warn!($msg, $($field)*);
    };
}

#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        tracing::info!($msg);
    };
    ($msg:expr, $($field:tt)*) => {
        tracing::info!($msg, $($field)*);
    };
}

#[macro_export]
macro_rules! log_debug {
    ($msg:expr) => {
        tracing::debug!($msg);
    };
    ($msg:expr, $($field:tt)*) => {
        tracing::debug!($msg, $($field)*);
    };
}
