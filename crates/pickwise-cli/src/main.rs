// Pickwise entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Load the entity catalog
// 4. Create mpsc channels
// 5. Spawn the session poller (if enabled)
// 6. Spawn app logic task
// 7. Run the console front end until the user quits
// 8. Cleanup on exit

use std::sync::Arc;

use anyhow::Context;
use pickwise_app::app;
use pickwise_app::config;
use pickwise_app::sources::catalog::load_catalog;
use pickwise_app::sources::session::{spawn_poller, HttpSessionObserver};
use pickwise_cli::console;
use pickwise_cli::input::HELP;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing (log to file, not terminal)
    init_tracing()?;
    info!("Pickwise starting up");

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: catalog from {}, session {}",
        config.catalog.source.describe(),
        if config.session.enabled { "enabled" } else { "disabled" }
    );

    // 3. Load the entity catalog (falls back to the curated table)
    let http = reqwest::Client::new();
    let loaded = load_catalog(&config.catalog, &http).await;
    if loaded.catalog.is_empty() {
        anyhow::bail!("entity catalog is empty; check catalog.curated_path");
    }

    // 4. Create mpsc channels
    let (session_tx, session_rx) = mpsc::channel(16);
    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let (ui_tx, ui_rx) = mpsc::channel(256);

    // 5. Spawn the session poller. Without one, dropping the sender closes
    //    the session channel and the app ignores it.
    let poller = match HttpSessionObserver::from_config(&config.session) {
        Ok(Some(observer)) => {
            info!("Polling session source at {}", config.session.url);
            Some(spawn_poller(
                Arc::new(observer),
                config.session.poll_interval,
                session_tx,
            ))
        }
        Ok(None) => {
            info!("Session source disabled");
            drop(session_tx);
            None
        }
        Err(e) => {
            warn!("Failed to build session client: {}; continuing without it", e);
            drop(session_tx);
            None
        }
    };

    // 6. Spawn app logic task
    let app_state = app::AppState::new(config, loaded);
    let app_handle = tokio::spawn(async move {
        if let Err(e) = app::run(session_rx, cmd_rx, ui_tx, app_state).await {
            error!("Application loop error: {}", e);
        }
    });

    // 7. Run the console front end (blocks until the user quits)
    println!("{HELP}\n");
    let stdin = BufReader::new(tokio::io::stdin());
    if let Err(e) = console::run(stdin, std::io::stdout(), ui_rx, cmd_tx).await {
        error!("Console error: {}", e);
    }

    // 8. Cleanup: wait for app task to finish (with timeout)
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), async {
        let _ = app_handle.await;
    })
    .await;

    // The poller loops until its channel closes; stop it directly.
    if let Some(poller) = poller {
        poller.abort();
    }

    info!("Pickwise shut down cleanly");
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by
/// the console).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pickwise.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pickwise=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
