use clap::Parser;
use savepage::domain::ports::SettingsStore as _;
use savepage::utils::{format, logger, validation::Validate};
use savepage::{
    CliConfig, ConsoleNotifier, Coordinator, FileSettings, LocalStorage, LogMenu, StdoutOpener,
    WaybackClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting savepage");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let settings_store = FileSettings::new(&config.settings);
    let client = WaybackClient::new(&config.archive_host)?;

    if config.last {
        return show_latest_capture(&config, &settings_store, &client).await;
    }

    let storage = LocalStorage::new(config.data_dir.clone());
    let mut coordinator = Coordinator::new(
        settings_store,
        client,
        ConsoleNotifier,
        LogMenu,
        StdoutOpener,
        storage,
        config.archive_host.clone(),
    );

    if let Err(e) = coordinator.start().await {
        eprintln!("Failed to load settings, not started: {}", e);
        std::process::exit(1);
    }

    coordinator.menu_clicked(&config.url).await?;

    let number_format = coordinator
        .settings()
        .map(|settings| settings.number_format.clone())
        .unwrap_or_default();
    tracing::info!(
        "{} pages archived",
        format::number(coordinator.archived_count(), &number_format)
    );

    Ok(())
}

async fn show_latest_capture(
    config: &CliConfig,
    settings_store: &FileSettings,
    client: &WaybackClient,
) -> anyhow::Result<()> {
    let settings = match settings_store.load().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Using default display settings: {}", e);
            Default::default()
        }
    };

    match client.latest_capture(&config.url).await? {
        Some(capture) => {
            let iso = format::timestamp_to_date(&capture.timestamp);
            println!(
                "Last archived {} at {} ({})",
                format::readable_date(&iso, &settings.date_format, settings.time_zone_convert),
                format::readable_time(&iso, settings.time_zone_convert, &settings.time_format),
                format::time_since(&iso, settings.time_zone_convert)
            );
            println!("{}", capture.url);
        }
        None => println!("No captures found for {}", config.url),
    }

    Ok(())
}
