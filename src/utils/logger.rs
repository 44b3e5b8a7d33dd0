use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("savepage=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("savepage=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// User-facing debug log, toggled by the `log_debug_info` setting.
///
/// Separate from the subscriber's level filter: the subscriber reflects how
/// the operator launched the process, this flag reflects a stored preference
/// and can change whenever settings are reloaded.
#[derive(Debug, Default)]
pub struct DebugLog {
    enabled: AtomicBool,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&self, on: bool) {
        self.enabled.store(on, Ordering::Relaxed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn log(&self, message: &str) {
        if self.is_enabled() {
            tracing::debug!("{}", message);
        }
    }
}
