pub mod coordinator;
pub mod stats;
pub mod wayback;

pub use crate::domain::model::{ArchiveOutcome, Capture, Settings};
pub use crate::domain::ports::{
    Archiver, MenuHost, Notifier, PageOpener, SettingsStore, Storage,
};
pub use crate::utils::error::Result;
