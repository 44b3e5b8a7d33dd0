use crate::core::{Settings, SettingsStore};
use crate::utils::error::{Result, SavepageError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Settings persisted as a flat TOML file, e.g.:
///
/// ```toml
/// date_format = "Y/m/d"
/// time_format = "g:i A"
/// context_menu = true
/// log_debug_info = false
/// ```
#[derive(Debug, Clone)]
pub struct FileSettings {
    path: PathBuf,
}

impl FileSettings {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Settings> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| SavepageError::ConfigError {
            message: format!("Settings parse error: {}", e),
        })
    }
}

#[async_trait]
impl SettingsStore for FileSettings {
    async fn load(&self) -> Result<Settings> {
        let content = std::fs::read_to_string(&self.path).map_err(SavepageError::IoError)?;
        Self::from_toml_str(&content)
    }
}

/// Replace `${VAR}` references with the environment variable's value;
/// unset variables are left as written.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}
