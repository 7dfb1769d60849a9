mod bootstrap;

use std::future::Future;
use std::io;

use anyhow::Result;
use optimizer_core::settings::{LastUsedParams, Settings};
use optimizer_runtime::session::DashboardSession;
use optimizer_ui::app::{restore_terminal, App};
use optimizer_ui::upload::UploadPanel;
use tokio::task::JoinHandle;

/// How the dashboard ended.
#[derive(Debug, PartialEq)]
enum Exit {
    /// The user quit; carries the region on screen at the time.
    Closed(Option<String>),
    /// The process received Ctrl+C while the dashboard was running.
    Interrupted,
}

/// Wait for the dashboard thread to finish or for `shutdown` to resolve,
/// whichever comes first.
async fn supervise<S>(ui: JoinHandle<io::Result<Option<String>>>, shutdown: S) -> Result<Exit>
where
    S: Future<Output = ()>,
{
    tokio::select! {
        joined = ui => Ok(Exit::Closed(joined??)),
        () = shutdown => Ok(Exit::Interrupted),
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    let log_path = settings
        .log_file
        .clone()
        .unwrap_or_else(bootstrap::default_log_path);
    bootstrap::setup_logging(&settings.log_level, &log_path)?;

    tracing::info!("Usage Optimizer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, Theme: {}, Preferred regions: {:?}",
        settings.data_dir.display(),
        settings.theme,
        settings.preferred_regions()
    );

    let mut session = DashboardSession::new(settings.preferred_regions());
    if let Some(file) = settings.file.as_ref() {
        // A failed load is shown inside the dashboard; keep going.
        if !session.load_file(file) {
            tracing::warn!("Could not load {} given on the command line", file.display());
        }
    }

    let upload = UploadPanel::new(&settings.data_dir);
    let app = App::new(&settings.theme, session, upload);

    // The TUI loop blocks on terminal input, so it gets its own thread and
    // the OS-level Ctrl+C signal stays observable here.
    let ui = tokio::task::spawn_blocking(move || app.run());

    match supervise(ui, ctrl_c()).await? {
        Exit::Closed(Some(region)) if !settings.clear => {
            let path = LastUsedParams::config_path();
            if let Err(e) = LastUsedParams::remember_region(&path, &region) {
                tracing::warn!("Could not save last region: {}", e);
            }
        }
        Exit::Closed(_) => {}
        Exit::Interrupted => {
            tracing::info!("Ctrl+C received; shutting down");
            restore_terminal()?;
            // The dashboard thread is still parked in `event::poll`.
            std::process::exit(130);
        }
    }

    tracing::info!("Usage Optimizer exiting");
    Ok(())
}
