use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meeting_meter::api;
use meeting_meter::calculate::{self, ErrorPolicy};
use meeting_meter::config::AppConfig;
use meeting_meter::fetch::{
    CalendarSource, FileCalendarSource, HttpCalendarSource, HttpSourceConfig, ReportWindow,
};
use meeting_meter::models::{AttendeePolicy, CostModel, Report};
use meeting_meter::render;
use meeting_meter::storage::{self, StorageConfig};

#[derive(Parser)]
#[command(name = "meeting-meter")]
#[command(about = "Meeting cost tracker: price your calendar in time and money")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a report over the configured calendar window
    Report {
        /// Read events from a JSON file instead of the configured source
        #[arg(long)]
        input: Option<String>,

        /// Lookback window (e.g., "7d", "12h"; overrides config)
        #[arg(long)]
        window: Option<String>,

        /// Post the report to the configured Slack webhook
        #[arg(long)]
        post_slack: bool,

        /// Write an HTML rendering of the report to this path
        #[arg(long)]
        html: Option<String>,

        /// Compute and print, but don't store or post anywhere
        #[arg(long)]
        dry_run: bool,

        /// Fail on the first malformed event instead of skipping it
        #[arg(long)]
        strict: bool,

        /// Skip appending meetings and the report to the data directory
        #[arg(long)]
        no_store: bool,
    },

    /// Start the API server over the latest report
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = PathBuf::from(&cli.config);
    let mut config = if path.exists() {
        AppConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        AppConfig::default()
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }

    Ok(config)
}

fn build_source(config: &AppConfig, input: Option<&str>) -> Result<Box<dyn CalendarSource>> {
    if let Some(path) = input {
        return Ok(Box::new(FileCalendarSource::new(PathBuf::from(path))));
    }

    match config.calendar.source.as_str() {
        "http" => {
            let url = config
                .calendar
                .url
                .as_deref()
                .ok_or_else(|| anyhow!("calendar.url is not configured"))?;
            let mut source_config = HttpSourceConfig::new(url.parse()?);
            source_config.token = std::env::var(&config.calendar.token_env).ok();
            source_config.timeout =
                std::time::Duration::from_secs(config.calendar.timeout_seconds);
            source_config.max_results = config.calendar.max_results;
            Ok(Box::new(HttpCalendarSource::new(source_config)?))
        }
        "file" => {
            let path = config
                .calendar
                .file
                .clone()
                .ok_or_else(|| anyhow!("calendar.file is not configured"))?;
            Ok(Box::new(FileCalendarSource::new(path)))
        }
        other => Err(anyhow!("Unknown calendar source: {other}")),
    }
}

/// Build the report the server starts with: fetch from the configured
/// calendar source when one is usable, otherwise fall back to the
/// latest stored snapshot.
async fn startup_report(
    config: &AppConfig,
    model: &CostModel,
    storage_config: &StorageConfig,
) -> Result<Report> {
    match build_source(config, None) {
        Ok(source) => {
            let lookback =
                meeting_meter::parse_window(&config.calendar.window).map_err(|e| anyhow!(e))?;
            match source.fetch_events(&ReportWindow::new(lookback)).await {
                Ok(records) => {
                    tracing::info!("Building startup report from {} events", records.len());
                    let run = calculate::build_report(
                        &records,
                        model,
                        ErrorPolicy::Skip,
                        AttendeePolicy::default(),
                    )?;
                    return Ok(run.report);
                }
                Err(e) => {
                    tracing::warn!(
                        "Startup fetch from the {} source failed: {}; falling back to stored reports",
                        source.name(),
                        e
                    );
                }
            }
        }
        Err(e) => {
            tracing::debug!("No usable calendar source ({}); trying stored reports", e);
        }
    }

    let snapshots = storage::jsonl::read_report_snapshots(storage_config)?;
    snapshots
        .into_iter()
        .next_back()
        .map(|s| s.report)
        .ok_or_else(|| {
            anyhow!("No calendar source and no stored reports; run `meeting-meter report` first")
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting meeting-meter v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let model = CostModel::from_params(&config.cost)?;
    let storage_config = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Report {
            input,
            window,
            post_slack,
            html,
            dry_run,
            strict,
            no_store,
        } => {
            let window_str = window.as_deref().unwrap_or(&config.calendar.window);
            let lookback = meeting_meter::parse_window(window_str).map_err(|e| anyhow!(e))?;
            let window = ReportWindow::new(lookback);

            let source = build_source(&config, input.as_deref())?;
            tracing::info!("Fetching events from the {} source", source.name());
            let records = source.fetch_events(&window).await?;
            tracing::info!("Fetched {} events", records.len());

            let policy = if strict {
                ErrorPolicy::Abort
            } else {
                ErrorPolicy::Skip
            };
            let run =
                calculate::build_report(&records, &model, policy, AttendeePolicy::default())?;

            if !run.skipped.is_empty() {
                tracing::warn!("Skipped {} malformed events", run.skipped.len());
            }

            for meeting in &run.meetings {
                print!("{}", render::console::meeting_block(meeting, &model));
            }
            print!("{}", render::console::summary_block(&run.report));

            if let Some(html_path) = &html {
                render::html::write_page(&run.report, PathBuf::from(html_path).as_path())?;
            }

            if dry_run {
                tracing::info!("Dry run, not storing or posting");
                return Ok(());
            }

            if !no_store {
                storage::jsonl::append_meetings(&storage_config, &run.meetings)?;
                storage::jsonl::store_report(&storage_config, &run.report)?;
            }

            if post_slack {
                let webhook = config
                    .slack
                    .webhook_url
                    .as_deref()
                    .ok_or_else(|| anyhow!("slack.webhook_url is not configured"))?
                    .parse()?;
                let client = reqwest::Client::new();
                render::slack::post(&client, &webhook, &run.report).await?;
            }
        }
        Commands::Serve { host, port } => {
            let report = startup_report(&config, &model, &storage_config).await?;

            let state = api::state::AppState {
                report: Arc::new(report),
                storage: Arc::new(storage_config),
            };
            let app = api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Report dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config(data_dir: &std::path::Path) -> AppConfig {
        let mut config = AppConfig::default();
        config.data_dir = data_dir.to_path_buf();
        config
    }

    fn setup(config: &AppConfig) -> (CostModel, StorageConfig) {
        let model = CostModel::from_params(&config.cost).unwrap();
        let storage_config = StorageConfig::new(config.data_dir.clone());
        (model, storage_config)
    }

    #[tokio::test]
    async fn test_startup_report_builds_from_configured_source() {
        let dir = tempfile::tempdir().unwrap();
        let events_path = dir.path().join("events.json");
        std::fs::write(
            &events_path,
            r#"[{"summary": "Standup",
                 "start": {"dateTime": "2017-04-25T09:30:00+00:00"},
                 "end": {"dateTime": "2017-04-25T10:00:00+00:00"}}]"#,
        )
        .unwrap();

        let mut config = base_config(dir.path());
        config.calendar.file = Some(events_path);
        let (model, storage_config) = setup(&config);

        let report = startup_report(&config, &model, &storage_config)
            .await
            .unwrap();

        assert_eq!(report.meeting_count, 1);
    }

    #[tokio::test]
    async fn test_startup_report_falls_back_to_stored_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        // File source configured but the file is gone: fetch fails,
        // the stored snapshot is served instead.
        let mut config = base_config(dir.path());
        config.calendar.file = Some(dir.path().join("missing.json"));
        let (model, storage_config) = setup(&config);

        let stored = calculate::build(&[], &model);
        storage::jsonl::store_report(&storage_config, &stored).unwrap();

        let report = startup_report(&config, &model, &storage_config)
            .await
            .unwrap();

        assert_eq!(report, stored);
    }

    #[tokio::test]
    async fn test_startup_report_without_source_uses_history() {
        let dir = tempfile::tempdir().unwrap();
        // Default config: file source with no file configured.
        let config = base_config(dir.path());
        let (model, storage_config) = setup(&config);

        let stored = calculate::build(&[], &model);
        storage::jsonl::store_report(&storage_config, &stored).unwrap();

        let report = startup_report(&config, &model, &storage_config)
            .await
            .unwrap();

        assert_eq!(report, stored);
    }

    #[tokio::test]
    async fn test_startup_report_errors_without_source_or_history() {
        let dir = tempfile::tempdir().unwrap();
        let config = base_config(dir.path());
        let (model, storage_config) = setup(&config);

        let err = startup_report(&config, &model, &storage_config)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("no stored reports"));
    }
}
