//! Job to snapshot every configured (user, pool) position.
//!
//! Pairs are processed one at a time. A failing pair is logged with its
//! identifiers and skipped; its row is simply absent from the record.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::{error, info};

use crate::{
    api::LfjClient,
    config::Settings,
    report::{CsvReport, ReportSink},
    snapshot::{LiveSource, PositionSource, SnapshotAggregator},
    worker::ReserveFetcher,
};

/// Outcome counts of one pass over all pairs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Drives the aggregator over users × pools and appends each row to the sink.
pub struct PositionEnumerator {
    aggregator: SnapshotAggregator,
    sink: Arc<dyn ReportSink>,
    users: Vec<String>,
    pools: Vec<String>,
}

impl PositionEnumerator {
    pub fn new(
        aggregator: SnapshotAggregator,
        sink: Arc<dyn ReportSink>,
        users: Vec<String>,
        pools: Vec<String>,
    ) -> Self {
        Self {
            aggregator,
            sink,
            users,
            pools,
        }
    }

    /// Wires the live API, helper contract and CSV record from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let window = settings.window.resolve()?;
        let api = LfjClient::new(&settings.api)?;
        let reserves =
            ReserveFetcher::new(&settings.rpc).context("Failed to initialize RPC provider")?;
        let source: Arc<dyn PositionSource> = Arc::new(LiveSource::new(api, reserves));

        let aggregator = SnapshotAggregator::new(
            source,
            window,
            settings.rpc.bins_above,
            settings.rpc.bins_below,
        );

        Ok(Self::new(
            aggregator,
            Arc::new(CsvReport::new(&settings.report.path)),
            settings.positions.users.clone(),
            settings.positions.pools.clone(),
        ))
    }

    pub fn pair_count(&self) -> usize {
        self.users.len() * self.pools.len()
    }

    pub async fn run_pass(&self) -> PassSummary {
        let mut summary = PassSummary::default();

        for user in &self.users {
            for pool in &self.pools {
                info!("Processing data for user: {} and pool: {}", user, pool);

                match self.snapshot_pair(user, pool).await {
                    Ok(()) => summary.succeeded += 1,
                    Err(e) => {
                        error!(
                            "An error occurred for user {} and pool {}: {:#}",
                            user, pool, e
                        );
                        summary.failed += 1;
                    },
                }
            }
        }

        summary
    }

    async fn snapshot_pair(&self, user: &str, pool: &str) -> Result<()> {
        let row = self.aggregator.snapshot(user, pool).await?;
        self.sink.append(std::slice::from_ref(&row))
    }
}

/// Runs one full pass. Fails only when every pair failed.
pub async fn run(enumerator: &PositionEnumerator) -> Result<PassSummary> {
    info!(
        "Starting position_snapshots job for {} pairs...",
        enumerator.pair_count()
    );

    let start = std::time::Instant::now();
    let summary = enumerator.run_pass().await;

    info!(
        "Completed position_snapshots job in {:?}: {} succeeded, {} failed",
        start.elapsed(),
        summary.succeeded,
        summary.failed
    );

    if summary.succeeded == 0 && summary.failed > 0 {
        bail!("All {} position snapshots failed", summary.failed);
    }
    Ok(summary)
}
