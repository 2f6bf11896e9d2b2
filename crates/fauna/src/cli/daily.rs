//! Daily scheduler runner.

use super::App;
use fauna::{DailyScheduler, FaunaResult, LogPublisher, SchedulerMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Run the daily scheduler with posts going to the log.
///
/// With `once`, checks every guild a single time against the current local
/// time. Otherwise loops until Ctrl-C.
pub async fn run_daily(app: &App, guilds: Vec<String>, once: bool) -> FaunaResult<()> {
    let scheduler = DailyScheduler::new(
        app.guilds(),
        app.defaults(),
        Arc::clone(app.resolver()),
        LogPublisher,
        Duration::from_secs(app.config().daily.tick_secs),
    );

    if once {
        let sent = scheduler
            .tick(&guilds, chrono::Local::now().naive_local())
            .await;
        println!("Sent {} daily post(s)", sent);
        return Ok(());
    }

    let (tx, rx) = mpsc::channel(4);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl-C");
                let _ = tx.send(SchedulerMessage::Shutdown).await;
            }
            Err(e) => {
                // Keep the sender alive so the scheduler does not stop
                warn!(error = ?e, "Cannot listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        }
    });

    scheduler.run(guilds, rx).await;
    Ok(())
}
