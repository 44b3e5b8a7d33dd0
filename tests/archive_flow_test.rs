use async_trait::async_trait;
use httpmock::prelude::*;
use savepage::core::coordinator::{NOTIFY_ARCHIVE_FAILED, NOTIFY_CANNOT_ARCHIVE};
use savepage::domain::ports::{MenuHost, Notifier, PageOpener};
use savepage::utils::error::Result;
use savepage::{Coordinator, FileSettings, LocalStorage, WaybackClient};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
struct RecordingNotifier {
    notes: Arc<Mutex<Vec<(String, String)>>>,
    sounds: Arc<Mutex<u32>>,
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn note(&self, title: &str, body: &str) -> Result<()> {
        self.notes
            .lock()
            .await
            .push((title.to_string(), body.to_string()));
        Ok(())
    }

    async fn sound(&self) -> Result<()> {
        *self.sounds.lock().await += 1;
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingMenu {
    creates: Arc<Mutex<u32>>,
}

#[async_trait]
impl MenuHost for RecordingMenu {
    async fn create(&self, _title: &str) -> Result<()> {
        *self.creates.lock().await += 1;
        Ok(())
    }

    async fn remove_all(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone, Default)]
struct RecordingOpener {
    opened: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl PageOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().await.push(url.to_string());
        Ok(())
    }
}

struct Harness {
    temp_dir: TempDir,
    notifier: RecordingNotifier,
    menu: RecordingMenu,
    opener: RecordingOpener,
}

impl Harness {
    fn new(settings_toml: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("savepage.toml"), settings_toml).unwrap();
        Self {
            temp_dir,
            notifier: RecordingNotifier::default(),
            menu: RecordingMenu::default(),
            opener: RecordingOpener::default(),
        }
    }

    fn coordinator(
        &self,
        archive_host: &str,
    ) -> Coordinator<
        FileSettings,
        WaybackClient,
        RecordingNotifier,
        RecordingMenu,
        RecordingOpener,
        LocalStorage,
    > {
        let settings_store = FileSettings::new(self.temp_dir.path().join("savepage.toml"));
        let client = WaybackClient::new(archive_host).unwrap();
        let storage = LocalStorage::new(self.temp_dir.path().to_str().unwrap().to_string());
        Coordinator::new(
            settings_store,
            client,
            self.notifier.clone(),
            self.menu.clone(),
            self.opener.clone(),
            storage,
            archive_host,
        )
    }
}

#[tokio::test]
async fn test_end_to_end_archive_success() {
    let server = MockServer::start();
    let save_mock = server.mock(|when, then| {
        when.method(GET).path("/save/https://example.com/");
        then.status(200)
            .header("Content-Location", "/web/20180404120000/https://example.com/");
    });

    let harness = Harness::new("log_debug_info = true\n");
    let mut coordinator = harness.coordinator(&server.base_url());

    coordinator.start().await.unwrap();
    coordinator
        .menu_clicked("https://example.com/")
        .await
        .unwrap();

    save_mock.assert();

    // Exactly one capture page opened, at host prefix + capture path.
    assert_eq!(
        *harness.opener.opened.lock().await,
        vec![format!(
            "{}/web/20180404120000/https://example.com/",
            server.base_url()
        )]
    );
    assert!(harness.notifier.notes.lock().await.is_empty());
    assert_eq!(coordinator.archived_count(), 1);

    // Counter was persisted for the next run.
    let stats = std::fs::read_to_string(harness.temp_dir.path().join("stats.json")).unwrap();
    assert_eq!(stats, r#"{"archived":1}"#);
}

#[tokio::test]
async fn test_counter_persists_across_runs() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/save/https://example.com/");
        then.status(200)
            .header("Content-Location", "/web/20180404120000/https://example.com/");
    });

    let harness = Harness::new("");

    let mut first = harness.coordinator(&server.base_url());
    first.start().await.unwrap();
    first.menu_clicked("https://example.com/").await.unwrap();
    assert_eq!(first.archived_count(), 1);

    let mut second = harness.coordinator(&server.base_url());
    second.start().await.unwrap();
    second.menu_clicked("https://example.com/").await.unwrap();
    assert_eq!(second.archived_count(), 2);
}

#[tokio::test]
async fn test_end_to_end_archive_failure_notifies() {
    let server = MockServer::start();
    let save_mock = server.mock(|when, then| {
        when.method(GET).path("/save/https://example.com/blocked");
        then.status(520).header(
            "x-archive-wayback-runtime-error",
            "RobotAccessControlException: Blocked By Robots",
        );
    });

    let harness = Harness::new("");
    let mut coordinator = harness.coordinator(&server.base_url());

    coordinator.start().await.unwrap();
    coordinator
        .menu_clicked("https://example.com/blocked")
        .await
        .unwrap();

    save_mock.assert();
    assert!(harness.opener.opened.lock().await.is_empty());
    assert_eq!(
        *harness.notifier.notes.lock().await,
        vec![(
            NOTIFY_ARCHIVE_FAILED.to_string(),
            "RobotAccessControlException: Blocked By Robots".to_string()
        )]
    );
    assert_eq!(*harness.notifier.sounds.lock().await, 1);
    assert_eq!(coordinator.archived_count(), 0);
}

#[tokio::test]
async fn test_ineligible_page_never_reaches_the_service() {
    let server = MockServer::start();
    let save_mock = server.mock(|when, then| {
        when.method(GET).path_includes("/save/");
        then.status(200);
    });

    let harness = Harness::new("");
    let mut coordinator = harness.coordinator(&server.base_url());

    coordinator.start().await.unwrap();
    coordinator.menu_clicked("file:///etc/passwd").await.unwrap();

    save_mock.assert_calls(0);
    let notes = harness.notifier.notes.lock().await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].0, NOTIFY_CANNOT_ARCHIVE);
    assert!(harness.opener.opened.lock().await.is_empty());
}

#[tokio::test]
async fn test_missing_settings_file_keeps_coordinator_inactive() {
    let server = MockServer::start();

    let temp_dir = TempDir::new().unwrap();
    let settings_store = FileSettings::new(temp_dir.path().join("absent.toml"));
    let client = WaybackClient::new(server.base_url()).unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let menu = RecordingMenu::default();
    let mut coordinator = Coordinator::new(
        settings_store,
        client,
        RecordingNotifier::default(),
        menu.clone(),
        RecordingOpener::default(),
        storage,
        server.base_url(),
    );

    assert!(coordinator.start().await.is_err());
    assert_eq!(*menu.creates.lock().await, 0);
    assert!(!coordinator.menu_present());
}
