use crate::domain::model::{ArchiveOutcome, Settings};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of the stored user preferences.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<Settings>;
}

/// The archiving service. HTTP-level rejections surface as an
/// [`ArchiveOutcome`] with `archived == false`; only transport failures
/// are errors.
#[async_trait]
pub trait Archiver: Send + Sync {
    async fn archive(&self, url: &str) -> Result<ArchiveOutcome>;
}

/// User-facing notifications plus the audible alert.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn note(&self, title: &str, body: &str) -> Result<()>;
    async fn sound(&self) -> Result<()>;
}

/// Host surface carrying the archive-this-page menu entry.
#[async_trait]
pub trait MenuHost: Send + Sync {
    async fn create(&self, title: &str) -> Result<()>;
    async fn remove_all(&self) -> Result<()>;
}

/// Opens a page for the user, e.g. the freshly saved capture.
#[async_trait]
pub trait PageOpener: Send + Sync {
    async fn open(&self, url: &str) -> Result<()>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
