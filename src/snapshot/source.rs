use anyhow::Result;
use async_trait::async_trait;

use crate::{
    api::{DepositEvent, FeeAccrual, LfjClient, PoolAnalytics},
    config::TimeWindow,
    worker::ReserveFetcher,
};

use super::{BinQuery, BinReserve};

/// Upstream data the aggregator reconciles for one (user, pool) pair.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn pool_analytics(
        &self,
        pool: &str,
        filter_by: &str,
        window: &TimeWindow,
    ) -> Result<PoolAnalytics>;

    async fn user_history(
        &self,
        user: &str,
        pool: &str,
        window: &TimeWindow,
    ) -> Result<Vec<DepositEvent>>;

    async fn fees_earned(
        &self,
        user: &str,
        pool: &str,
        window: &TimeWindow,
    ) -> Result<Vec<FeeAccrual>>;

    async fn bin_reserves(&self, query: &BinQuery) -> Result<Vec<BinReserve>>;
}

/// LFJ API for analytics, the helper contract for bin reserves.
pub struct LiveSource {
    api: LfjClient,
    reserves: ReserveFetcher,
}

impl LiveSource {
    pub fn new(api: LfjClient, reserves: ReserveFetcher) -> Self {
        Self { api, reserves }
    }
}

#[async_trait]
impl PositionSource for LiveSource {
    async fn pool_analytics(
        &self,
        pool: &str,
        filter_by: &str,
        window: &TimeWindow,
    ) -> Result<PoolAnalytics> {
        self.api.get_pool(pool, filter_by, window).await
    }

    async fn user_history(
        &self,
        user: &str,
        pool: &str,
        window: &TimeWindow,
    ) -> Result<Vec<DepositEvent>> {
        self.api.get_user_history(user, pool, window).await
    }

    async fn fees_earned(
        &self,
        user: &str,
        pool: &str,
        window: &TimeWindow,
    ) -> Result<Vec<FeeAccrual>> {
        self.api.get_fees_earned(user, pool, window).await
    }

    async fn bin_reserves(&self, query: &BinQuery) -> Result<Vec<BinReserve>> {
        self.reserves.get_bins_reserve_of(query).await
    }
}
