//! Background coordinator: wires settings, the context-menu entry, URL
//! validation, the archiving call and the archived-pages counter together.
//!
//! Every reaction takes `&mut self`, so only one event is ever in flight
//! and the shared state needs no further synchronization.

use crate::core::stats::Stats;
use crate::core::{
    ArchiveOutcome, Archiver, MenuHost, Notifier, PageOpener, SettingsStore, Storage,
};
use crate::domain::model::Settings;
use crate::utils::error::Result;
use crate::utils::format;
use crate::utils::logger::DebugLog;
use crate::utils::validation;

pub const MENU_ITEM_ARCHIVE_PAGE: &str = "Archive this page";
pub const NOTIFY_ARCHIVE_FAILED: &str = "Archiving failed";
pub const NOTIFY_CANNOT_ARCHIVE: &str = "This page cannot be archived";
pub const NOTIFY_CANNOT_ARCHIVE_BODY: &str =
    "Only publicly reachable http and https pages can be saved.";

pub struct Coordinator<Se, A, N, M, P, St>
where
    Se: SettingsStore,
    A: Archiver,
    N: Notifier,
    M: MenuHost,
    P: PageOpener,
    St: Storage,
{
    settings_store: Se,
    archiver: A,
    notifier: N,
    menu: M,
    opener: P,
    stats: Stats<St>,
    debug: DebugLog,
    archive_host: String,
    settings: Option<Settings>,
    /// Whether the context-menu entry currently exists on the host.
    menu_present: bool,
}

impl<Se, A, N, M, P, St> Coordinator<Se, A, N, M, P, St>
where
    Se: SettingsStore,
    A: Archiver,
    N: Notifier,
    M: MenuHost,
    P: PageOpener,
    St: Storage,
{
    pub fn new(
        settings_store: Se,
        archiver: A,
        notifier: N,
        menu: M,
        opener: P,
        storage: St,
        archive_host: impl Into<String>,
    ) -> Self {
        Self {
            settings_store,
            archiver,
            notifier,
            menu,
            opener,
            stats: Stats::new(storage),
            debug: DebugLog::new(),
            archive_host: archive_host.into(),
            settings: None,
            menu_present: false,
        }
    }

    pub fn settings(&self) -> Option<&Settings> {
        self.settings.as_ref()
    }

    pub fn archived_count(&self) -> u64 {
        self.stats.count()
    }

    pub fn menu_present(&self) -> bool {
        self.menu_present
    }

    /// Startup reaction: load settings, apply the debug toggle, seed the
    /// archive counter and bring the context menu in line. Without loadable
    /// settings the coordinator stays inactive.
    pub async fn start(&mut self) -> Result<()> {
        let settings = match self.settings_store.load().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!("Failed to load settings, coordinator not started: {}", e);
                return Err(e);
            }
        };

        self.debug.enable(settings.log_debug_info);
        self.debug.log("Settings loaded");

        let count = self.stats.load(settings.log_number_archived).await;
        self.debug.log(&format!(
            "{} pages archived so far",
            format::number(count, &settings.number_format)
        ));

        self.settings = Some(settings);
        self.sync_context_menu().await
    }

    /// Reaction to a change in the settings storage: reload and re-apply
    /// the debug toggle and menu state.
    pub async fn settings_changed(&mut self) -> Result<()> {
        let settings = self.settings_store.load().await?;

        self.debug.enable(settings.log_debug_info);
        self.debug.log("Settings updated and loaded");

        self.settings = Some(settings);
        self.sync_context_menu().await
    }

    /// Reaction to the context-menu entry being clicked on a page.
    pub async fn menu_clicked(&mut self, page_url: &str) -> Result<()> {
        if let Err(e) = validation::validate_page_url(page_url, &self.archive_host) {
            tracing::debug!("{}", e);
            self.notifier
                .note(NOTIFY_CANNOT_ARCHIVE, NOTIFY_CANNOT_ARCHIVE_BODY)
                .await?;
            self.notifier.sound().await?;
            return Ok(());
        }

        match self.archiver.archive(page_url).await {
            Ok(outcome) => self.handle_outcome(outcome).await,
            Err(e) => {
                tracing::error!("Archive request for {} failed: {}", page_url, e);
                self.notifier
                    .note(NOTIFY_ARCHIVE_FAILED, &e.to_string())
                    .await?;
                self.notifier.sound().await?;
                Ok(())
            }
        }
    }

    /// Create or remove the context-menu entry to match the current
    /// setting. Idempotent: a repeated call with unchanged settings issues
    /// no host call.
    async fn sync_context_menu(&mut self) -> Result<()> {
        let enabled = self
            .settings
            .as_ref()
            .map(|settings| settings.context_menu)
            .unwrap_or(false);

        if !self.menu_present && enabled {
            self.menu.create(MENU_ITEM_ARCHIVE_PAGE).await?;
            self.menu_present = true;
        } else if self.menu_present && !enabled {
            self.menu.remove_all().await?;
            self.menu_present = false;
        }

        Ok(())
    }

    /// Single result handler for an archive attempt.
    async fn handle_outcome(&mut self, outcome: ArchiveOutcome) -> Result<()> {
        if !outcome.archived {
            let reason = outcome.error.unwrap_or_else(|| "Unknown error".to_string());
            self.debug.log(&format!(
                "Page not archived\n URL: {}\n Status code: {}\n Reason: {}",
                outcome.url, outcome.code, reason
            ));
            self.notifier.note(NOTIFY_ARCHIVE_FAILED, &reason).await?;
            self.notifier.sound().await?;
            return Ok(());
        }

        let count = self.stats.update().await?;
        if let Some(settings) = &self.settings {
            self.debug.log(&format!(
                "{} pages archived",
                format::number(count, &settings.number_format)
            ));
        }

        let capture_url = outcome.capture_url.unwrap_or_default();
        if let Some(summary) = self.capture_summary(&capture_url) {
            self.debug.log(&summary);
        }

        self.opener
            .open(&format!("{}{}", self.archive_host, capture_url))
            .await
    }

    /// Human-readable capture description derived from the 14 digit
    /// timestamp embedded in the capture path.
    fn capture_summary(&self, capture_url: &str) -> Option<String> {
        let settings = self.settings.as_ref()?;
        let timestamp = capture_url
            .split('/')
            .find(|part| part.len() == 14 && part.bytes().all(|b| b.is_ascii_digit()))?;
        let iso = format::timestamp_to_date(timestamp);
        Some(format!(
            "Capture taken {} {}",
            format::readable_date(&iso, &settings.date_format, settings.time_zone_convert),
            format::readable_time(&iso, settings.time_zone_convert, &settings.time_format)
        ))
    }
}
