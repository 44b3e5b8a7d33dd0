//! Adapters used by the CLI binary: file-backed storage plus terminal
//! stand-ins for the host browser surfaces (notifications, context menu,
//! tab opening).

use crate::core::{MenuHost, Notifier, PageOpener, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

/// Notifications on the terminal; the audible alert is the terminal bell.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn note(&self, title: &str, body: &str) -> Result<()> {
        eprintln!("{}: {}", title, body);
        Ok(())
    }

    async fn sound(&self) -> Result<()> {
        let mut stderr = std::io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// There is no real menu surface on the terminal; state changes are logged
/// so the toggle remains observable.
#[derive(Debug, Clone, Default)]
pub struct LogMenu;

#[async_trait]
impl MenuHost for LogMenu {
    async fn create(&self, title: &str) -> Result<()> {
        tracing::info!("Context menu entry enabled: {}", title);
        Ok(())
    }

    async fn remove_all(&self) -> Result<()> {
        tracing::info!("Context menu entry removed");
        Ok(())
    }
}

/// Prints the capture page URL instead of opening a browser tab.
#[derive(Debug, Clone, Default)]
pub struct StdoutOpener;

#[async_trait]
impl PageOpener for StdoutOpener {
    async fn open(&self, url: &str) -> Result<()> {
        println!("{}", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_local_storage_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage.write_file("stats.json", b"{\"archived\":1}").await.unwrap();
        let data = storage.read_file("stats.json").await.unwrap();

        assert_eq!(data, b"{\"archived\":1}");
    }

    #[tokio::test]
    async fn test_local_storage_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("deeper");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());

        storage.write_file("stats.json", b"{}").await.unwrap();
        assert!(base.join("stats.json").exists());
    }

    #[tokio::test]
    async fn test_local_storage_read_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert!(storage.read_file("absent.json").await.is_err());
    }
}
