use serde::{Deserialize, Serialize};

/// Stored user preferences. Every field has a default so a partial
/// settings file still loads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Date display style tag, e.g. "Y/m/d". Unrecognized tags fall back
    /// to the long "Month DD, YYYY" rendering.
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Time display style tag, e.g. "g:i A" or "H:i:s".
    #[serde(default = "default_time_format")]
    pub time_format: String,

    /// Thousands-separator style tag for counters, e.g. "1,000".
    #[serde(default = "default_number_format")]
    pub number_format: String,

    /// Render dates and times in the local zone instead of UTC.
    #[serde(default)]
    pub time_zone_convert: bool,

    /// Offer the archive-this-page context menu entry.
    #[serde(default = "default_true")]
    pub context_menu: bool,

    /// Emit the user-facing debug log.
    #[serde(default)]
    pub log_debug_info: bool,

    /// Seed for the archived-pages counter when no counter file exists yet.
    #[serde(default)]
    pub log_number_archived: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            time_format: default_time_format(),
            number_format: default_number_format(),
            time_zone_convert: false,
            context_menu: true,
            log_debug_info: false,
            log_number_archived: 0,
        }
    }
}

fn default_date_format() -> String {
    "F j, Y".to_string()
}

fn default_time_format() -> String {
    "g:i A".to_string()
}

fn default_number_format() -> String {
    "1,000".to_string()
}

fn default_true() -> bool {
    true
}

/// Result of one archive attempt, consumed immediately by the result
/// handler.
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    pub archived: bool,
    pub url: String,
    /// HTTP status of the save request.
    pub code: u16,
    /// Service-supplied failure reason, when not archived.
    pub error: Option<String>,
    /// Capture path on the archive host, when archived.
    pub capture_url: Option<String>,
}

/// An existing snapshot reported by the availability endpoint.
#[derive(Debug, Clone)]
pub struct Capture {
    /// 14 digit compact timestamp (YYYYMMDDhhmmss).
    pub timestamp: String,
    /// Full URL of the capture page.
    pub url: String,
}
