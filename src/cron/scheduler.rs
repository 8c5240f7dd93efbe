//! Cron scheduler for periodic position snapshots.
//!
//! Runs one pass at startup (unless disabled) and then one pass per interval.
//! Passes never overlap: a tick that fires while a pass is still running is
//! skipped.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::{error, info, warn};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::config::ScheduleSettings;

use super::jobs::{self, PositionEnumerator};

/// Cron scheduler that re-runs the position snapshot job.
pub struct CronScheduler {
    enumerator: Arc<PositionEnumerator>,
    settings: ScheduleSettings,
    running: Arc<Mutex<()>>,
}

impl CronScheduler {
    pub fn new(enumerator: Arc<PositionEnumerator>, settings: ScheduleSettings) -> Self {
        Self {
            enumerator,
            settings,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Starts the cron scheduler and runs until cancellation.
    pub async fn run(&self, cancellation_token: CancellationToken) -> Result<()> {
        if self.settings.run_on_start {
            tokio::select! {
                _ = cancellation_token.cancelled() => {
                    info!("Cancelled during initial snapshot pass");
                    return Ok(());
                },
                _ = run_guarded(&self.enumerator, &self.running) => {},
            }
        }

        let mut scheduler = JobScheduler::new().await?;
        self.register_position_snapshots_job(&scheduler).await?;

        scheduler.start().await?;
        info!("Cron scheduler started");

        cancellation_token.cancelled().await;
        info!("Cron scheduler shutting down...");

        scheduler.shutdown().await?;
        Ok(())
    }

    async fn register_position_snapshots_job(&self, scheduler: &JobScheduler) -> Result<()> {
        let enumerator = self.enumerator.clone();
        let running = self.running.clone();
        let interval = self.settings.interval_secs;

        let job = Job::new_repeated_async(Duration::from_secs(interval), move |_uuid, _lock| {
            let enumerator = enumerator.clone();
            let running = running.clone();
            Box::pin(async move {
                run_guarded(&enumerator, &running).await;
            })
        })?;

        scheduler.add(job).await?;
        info!("Registered position_snapshots job (every {}s)", interval);
        Ok(())
    }
}

async fn run_guarded(enumerator: &PositionEnumerator, running: &Mutex<()>) {
    let Ok(_guard) = running.try_lock() else {
        warn!("Previous position_snapshots pass still running, skipping this tick");
        return;
    };

    if let Err(e) = jobs::position_snapshots::run(enumerator).await {
        error!("Failed to take position snapshots: {:#}", e);
    }
}
