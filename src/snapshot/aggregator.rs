use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Local};
use log::{debug, info};

use crate::config::{TimeWindow, DATETIME_FORMAT};

use super::{
    BinHoldings, BinQuery, FeeSummary, InitialDepositSummary, MetricsInput, PoolSnapshot,
    PositionMetrics, PositionRow, PositionSource,
};

/// Analytics window whose fees drive the yield metrics.
pub const LONG_WINDOW: &str = "1d";

/// Analytics window reported alongside as recent activity.
pub const SHORT_WINDOW: &str = "1h";

/// Builds one [`PositionRow`] per (user, pool) from the upstream sources.
///
/// Fetches run one after another in a fixed order: pool analytics (long, then
/// short window), user history, accrued fees, and finally the on-chain bin
/// reserves around the active bin reported by the long-window reading.
pub struct SnapshotAggregator {
    source: Arc<dyn PositionSource>,
    window: TimeWindow,
    bins_above: u32,
    bins_below: u32,
}

impl SnapshotAggregator {
    pub fn new(
        source: Arc<dyn PositionSource>,
        window: TimeWindow,
        bins_above: u32,
        bins_below: u32,
    ) -> Self {
        Self {
            source,
            window,
            bins_above,
            bins_below,
        }
    }

    pub async fn snapshot(&self, user: &str, pool: &str) -> Result<PositionRow> {
        self.snapshot_at(user, pool, Local::now()).await
    }

    /// Same as [`Self::snapshot`] with an explicit wall-clock stamp.
    pub async fn snapshot_at(
        &self,
        user: &str,
        pool: &str,
        now: DateTime<Local>,
    ) -> Result<PositionRow> {
        let long = self
            .source
            .pool_analytics(pool, LONG_WINDOW, &self.window)
            .await?;
        let short = self
            .source
            .pool_analytics(pool, SHORT_WINDOW, &self.window)
            .await?;
        let snapshot = PoolSnapshot::merge(pool, long, &short)?;

        let history = self.source.user_history(user, pool, &self.window).await?;
        let deposit = InitialDepositSummary::from_events(&history);
        if deposit.deposit_time.is_none() {
            info!("No deposit entries found for user {} in pool {}", user, pool);
        }

        let fees = FeeSummary::from_accruals(
            &self.source.fees_earned(user, pool, &self.window).await?,
        );

        let query = BinQuery {
            pool: pool.to_string(),
            user: user.to_string(),
            active_id: snapshot.active_bin_id,
            bins_above: self.bins_above,
            bins_below: self.bins_below,
        };
        let bins = self.source.bin_reserves(&query).await?;
        debug!(
            "Received {} bins around active bin {} for pool {}",
            bins.len(),
            snapshot.active_bin_id,
            pool
        );
        let holdings =
            BinHoldings::aggregate(&bins, snapshot.token_x.decimals, snapshot.token_y.decimals);

        let metrics = PositionMetrics::compute(&MetricsInput {
            initial_x: deposit.amount_x,
            initial_y: deposit.amount_y,
            current_x: holdings.amount_x,
            current_y: holdings.amount_y,
            price_x: snapshot.token_x.price_usd,
            price_y: snapshot.token_y.price_usd,
            accrued_fees_x: fees.total_x,
            accrued_fees_y: fees.total_y,
            pool_liquidity_usd: snapshot.liquidity_usd,
            daily_fees_usd: snapshot.long_window.fees_usd,
        });

        Ok(assemble(user, now, snapshot, deposit, fees, holdings, metrics))
    }
}

fn assemble(
    user: &str,
    now: DateTime<Local>,
    pool: PoolSnapshot,
    deposit: InitialDepositSummary,
    fees: FeeSummary,
    holdings: BinHoldings,
    metrics: PositionMetrics,
) -> PositionRow {
    PositionRow {
        current_unix_timestamp: now.timestamp(),
        local_time: now.format(DATETIME_FORMAT).to_string(),
        pool_name: pool.name,
        pool_address: pool.address,
        volume_1h_usd: pool.short_window.volume_usd,
        pool_liquidity_usd: pool.liquidity_usd,
        fees_1h_usd: pool.short_window.fees_usd,
        bin_step: pool.bin_step,
        base_fee_pct: pool.base_fee_pct,
        max_fee_pct: pool.max_fee_pct,
        protocol_fee_pct: pool.protocol_share_pct,
        token_x_symbol: pool.token_x.symbol,
        token_y_symbol: pool.token_y.symbol,
        token_x_address: pool.token_x.address,
        token_y_address: pool.token_y.address,
        pool_token_x_amount: pool.reserve_x,
        pool_token_y_amount: pool.reserve_y,
        token_x_price: pool.token_x.price_usd,
        token_y_price: pool.token_y.price_usd,
        active_bin_id: pool.active_bin_id,
        depth_token_x: pool.depth_token_x,
        depth_token_y: pool.depth_token_y,
        depth_plus_usd: pool.depth_plus_usd,
        depth_minus_usd: pool.depth_minus_usd,
        user_address: user.to_string(),
        initial_deposit_x: deposit.amount_x,
        initial_deposit_y: deposit.amount_y,
        most_recent_deposit_time: deposit
            .deposit_time
            .map(|t| t.format(DATETIME_FORMAT).to_string()),
        token_x_amount: holdings.amount_x,
        token_y_amount: holdings.amount_y,
        token_x_usd: metrics.token_x_usd,
        token_y_usd: metrics.token_y_usd,
        bin_distribution: holdings.distribution,
        total_value_usd: metrics.total_value_usd,
        accrued_fees_x: fees.total_x,
        accrued_fees_y: fees.total_y,
        accrued_fees_x_usd: metrics.accrued_fees_x_usd,
        accrued_fees_y_usd: metrics.accrued_fees_y_usd,
        fees_per_bin: fees.per_bin,
        value_if_held_usd: metrics.value_if_held_usd,
        impermanent_loss_usd: metrics.impermanent_loss_usd,
        pool_share_pct: metrics.pool_share_pct,
        fees_annual: metrics.fees_annual_usd,
        apr_pct: metrics.apr_pct,
        apy_pct: metrics.apy_pct,
        apr_1d_pct: metrics.apr_1d_pct,
        volume_1d_usd: pool.long_window.volume_usd,
        fees_1d_usd: pool.long_window.fees_usd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::testing::{MockSource, POOL, USER};
    use crate::snapshot::SnapshotError;
    use chrono::TimeZone;

    fn aggregator(source: MockSource) -> (SnapshotAggregator, Arc<MockSource>) {
        let source = Arc::new(source);
        let window = TimeWindow {
            start: 1_714_521_600,
            end: 1_717_200_000,
        };
        (
            SnapshotAggregator::new(source.clone(), window, 1_000, 1_000),
            source,
        )
    }

    fn now() -> DateTime<Local> {
        Local.timestamp_opt(1_717_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_assembles_row() {
        let (aggregator, source) = aggregator(MockSource::default());
        let row = aggregator.snapshot_at(USER, POOL, now()).await.unwrap();

        assert_eq!(row.current_unix_timestamp, 1_717_000_000);
        assert_eq!(row.user_address, USER);
        assert_eq!(row.pool_address, POOL);
        assert_eq!(row.pool_name, "WAVAX-USDC");
        assert_eq!(row.active_bin_id, 8_388_608);

        // Long window drives yield, short window is reported
        assert_eq!(row.fees_1d_usd, 500.0);
        assert_eq!(row.fees_1h_usd, 20.0);
        assert_eq!(row.volume_1h_usd, 10_000.0);
        assert_eq!(row.fees_annual, 182_500.0);
        assert!((row.apr_pct - 18.25).abs() < 1e-9);
        assert!((row.apr_1d_pct - 0.05).abs() < 1e-9);

        // Only the block 105 deposits count
        assert_eq!(row.initial_deposit_x, 3.0);
        assert_eq!(row.initial_deposit_y, 30.0);
        assert_eq!(
            row.most_recent_deposit_time.as_deref(),
            Some("2024-05-01 11:00:00")
        );

        // One full bin of 2 WAVAX + 50 USDC at half share, one empty bin
        assert_eq!(row.token_x_amount, 1.0);
        assert_eq!(row.token_y_amount, 25.0);
        assert_eq!(row.token_x_usd, 40.0);
        assert_eq!(row.token_y_usd, 25.0);
        assert_eq!(row.total_value_usd, row.token_x_usd + row.token_y_usd);
        assert_eq!(row.value_if_held_usd, 3.0 * 40.0 + 30.0);
        assert_eq!(
            row.impermanent_loss_usd,
            row.value_if_held_usd - row.total_value_usd
        );
        assert_eq!(row.bin_distribution, "(8388608: 1.0, 25.0; 8388609: 0.0, 0.0)");

        assert_eq!(row.accrued_fees_x, 0.25);
        assert_eq!(row.accrued_fees_x_usd, 10.0);
        assert_eq!(row.fees_per_bin, "(8388608: 0.25, 0.5)");

        let queries = source.bin_queries();
        assert_eq!(
            queries,
            vec![BinQuery {
                pool: POOL.to_string(),
                user: USER.to_string(),
                active_id: 8_388_608,
                bins_above: 1_000,
                bins_below: 1_000,
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_history_still_produces_row() {
        let (aggregator, _) = aggregator(MockSource {
            history: vec![],
            ..MockSource::default()
        });
        let row = aggregator.snapshot_at(USER, POOL, now()).await.unwrap();

        assert_eq!(row.initial_deposit_x, 0.0);
        assert_eq!(row.initial_deposit_y, 0.0);
        assert!(row.most_recent_deposit_time.is_none());
        assert_eq!(row.value_if_held_usd, 0.0);
        assert_eq!(row.impermanent_loss_usd, -row.total_value_usd);
    }

    #[tokio::test]
    async fn test_zero_liquidity_pool_yields_nan_metrics() {
        let mut source = MockSource::default();
        source.long_pool["liquidityUsd"] = serde_json::json!(0);
        let (aggregator, _) = aggregator(source);

        let row = aggregator.snapshot_at(USER, POOL, now()).await.unwrap();
        assert!(row.pool_share_pct.is_nan());
        assert!(row.apr_pct.is_nan());
        assert!(row.apy_pct.is_nan());
        assert!(row.apr_1d_pct.is_nan());
    }

    #[tokio::test]
    async fn test_missing_active_bin_aborts_before_chain_read() {
        let mut source = MockSource::default();
        source
            .long_pool
            .as_object_mut()
            .unwrap()
            .remove("activeBinId");
        let (aggregator, source) = aggregator(source);

        let err = aggregator.snapshot_at(USER, POOL, now()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::MissingField { field: "activeBinId", .. })
        ));
        assert!(source.bin_queries().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let (aggregator, _) = aggregator(MockSource {
            failing_pool: Some(POOL.to_string()),
            ..MockSource::default()
        });

        assert!(aggregator.snapshot_at(USER, POOL, now()).await.is_err());
    }
}
