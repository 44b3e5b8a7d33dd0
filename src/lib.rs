pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::cli::{ConsoleNotifier, LocalStorage, LogMenu, StdoutOpener};
pub use crate::config::settings::FileSettings;
pub use crate::config::CliConfig;
pub use crate::core::coordinator::Coordinator;
pub use crate::core::stats::Stats;
pub use crate::core::wayback::WaybackClient;
pub use crate::domain::model::{ArchiveOutcome, Capture, Settings};
pub use crate::utils::error::{Result, SavepageError};
