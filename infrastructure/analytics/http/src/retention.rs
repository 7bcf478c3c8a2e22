use std::time::Duration;

use analytics_command_handlers::CleanupViewEventsHandler;
use analytics_commands::CleanupViewEventsCommand;
use sql_connection::SqlConnect;
use tokio::time::interval;
use tracing::{error, info};

use crate::DEFAULT_RETENTION_DAYS;

const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Daily retention sweep over the view-event log. Runs in-process so the
/// deployment needs no external cron.
#[derive(Clone)]
pub struct RetentionScheduler {
    cleanup: CleanupViewEventsHandler,
    days_to_keep: u32,
}

impl RetentionScheduler {
    pub fn new(db: SqlConnect) -> Self {
        Self {
            cleanup: CleanupViewEventsHandler::new(db),
            days_to_keep: DEFAULT_RETENTION_DAYS,
        }
    }

    pub fn with_retention_days(mut self, days: u32) -> Self {
        self.days_to_keep = days;
        self
    }

    /// Start the daily sweep job
    pub fn start(&self) {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut sweep_interval = interval(SWEEP_INTERVAL);
            sweep_interval.tick().await; // Skip first immediate tick

            info!(
                days_to_keep = scheduler.days_to_keep,
                "Starting view-event retention sweep (daily)"
            );

            loop {
                sweep_interval.tick().await;

                let command = CleanupViewEventsCommand {
                    days_to_keep: scheduler.days_to_keep,
                };
                match scheduler.cleanup.execute(command).await {
                    Ok(result) => {
                        info!(
                            deleted = result.deleted_count,
                            "View-event retention sweep completed"
                        );
                    }
                    Err(e) => {
                        error!("View-event retention sweep failed: {}", e);
                    }
                }
            }
        });
    }
}
