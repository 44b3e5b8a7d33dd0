pub mod cli;
pub mod settings;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "savepage")]
#[command(about = "Archive web pages to a public web-archiving service")]
pub struct CliConfig {
    /// Page URL to archive (or to look up with --last)
    pub url: String,

    #[arg(long, default_value = "./savepage.toml")]
    pub settings: String,

    #[arg(long, default_value = "./data")]
    pub data_dir: String,

    #[arg(long, default_value = "https://web.archive.org")]
    pub archive_host: String,

    /// Show the newest existing capture instead of archiving
    #[arg(long)]
    pub last: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("archive_host", &self.archive_host)?;
        validate_non_empty_string("settings", &self.settings)?;
        validate_path("data_dir", &self.data_dir)?;
        Ok(())
    }
}
