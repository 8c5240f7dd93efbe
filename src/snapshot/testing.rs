//! In-memory [`PositionSource`] for aggregator and enumerator tests.

use std::sync::Mutex;

use alloy::primitives::U256;
use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::DateTime;
use serde_json::{json, Value};

use crate::api::{DepositEvent, FeeAccrual, PoolAnalytics, TokenFlow};
use crate::config::TimeWindow;

use super::{BinQuery, BinReserve, PositionSource};

pub const USER: &str = "0x1111111111111111111111111111111111111111";
pub const POOL: &str = "0xd446eb1660f766d533beceef890df7a69d26f7d1";
pub const OTHER_POOL: &str = "0x2222222222222222222222222222222222222222";

// 2024-05-01 10:00:00 and 11:00:00 UTC
const T10: i64 = 1_714_557_600;
const T11: i64 = 1_714_561_200;

pub struct MockSource {
    pub long_pool: Value,
    pub short_pool: Value,
    pub history: Vec<DepositEvent>,
    pub fees: Vec<FeeAccrual>,
    pub bins: Vec<BinReserve>,
    /// Pool analytics requests for this pool fail
    pub failing_pool: Option<String>,
    pub queries: Mutex<Vec<BinQuery>>,
}

impl MockSource {
    pub fn bin_queries(&self) -> Vec<BinQuery> {
        self.queries.lock().unwrap().clone()
    }
}

fn deposit(block: u64, ts: i64, x: f64, y: f64) -> DepositEvent {
    DepositEvent {
        timestamp: DateTime::from_timestamp(ts, 0),
        is_deposit: true,
        pool_address: Some(POOL.to_string()),
        block_number: Some(block),
        token_x: TokenFlow {
            amount: x,
            price: 40.0,
        },
        token_y: TokenFlow {
            amount: y,
            price: 1.0,
        },
        ..Default::default()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self {
            long_pool: json!({
                "pairAddress": POOL,
                "name": "WAVAX-USDC",
                "volumeUsd": 250000.0,
                "feesUsd": 500.0,
                "liquidityUsd": 1000000.0,
                "tokenX": { "address": "0xb31f66aa3c1e785363f0875a1b74e27b85fd66c7", "symbol": "WAVAX", "decimals": 18, "priceUsd": 40.0 },
                "tokenY": { "address": "0xb97ef9ef8734c71904d8002f8b6bc66dd9c48a6e", "symbol": "USDC", "decimals": 6, "priceUsd": 1.0 },
                "reserveX": 12000.0,
                "reserveY": 480000.0,
                "lbBinStep": 20,
                "lbBaseFeePct": 0.2,
                "lbMaxFeePct": 1.5,
                "protocolSharePct": 10,
                "activeBinId": 8388608,
                "liquidityDepthMinus": 40000.0,
                "liquidityDepthPlus": 42000.0,
                "liquidityDepthTokenX": 1050.0,
                "liquidityDepthTokenY": 40000.0
            }),
            short_pool: json!({ "volumeUsd": 10000.0, "feesUsd": 20.0 }),
            history: vec![
                deposit(100, T10, 5.0, 50.0),
                deposit(105, T11, 1.0, 10.0),
                deposit(105, T11, 2.0, 20.0),
            ],
            fees: vec![FeeAccrual {
                bin_id: Some(8_388_608),
                accrued_fees_x: 0.25,
                accrued_fees_y: 0.5,
            }],
            bins: vec![
                BinReserve {
                    bin_id: 8_388_608,
                    reserve_x: U256::from(2_000_000_000_000_000_000u128),
                    reserve_y: U256::from(50_000_000u64),
                    shares: U256::from(1u64),
                    total_shares: U256::from(2u64),
                },
                BinReserve {
                    bin_id: 8_388_609,
                    reserve_x: U256::ZERO,
                    reserve_y: U256::ZERO,
                    shares: U256::ZERO,
                    total_shares: U256::ZERO,
                },
            ],
            failing_pool: None,
            queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl PositionSource for MockSource {
    async fn pool_analytics(
        &self,
        pool: &str,
        filter_by: &str,
        _window: &TimeWindow,
    ) -> Result<PoolAnalytics> {
        if self.failing_pool.as_deref() == Some(pool) {
            bail!("HTTP status server error (502 Bad Gateway) for pool {pool}");
        }
        let value = match filter_by {
            "1d" => self.long_pool.clone(),
            _ => self.short_pool.clone(),
        };
        Ok(serde_json::from_value(value)?)
    }

    async fn user_history(
        &self,
        _user: &str,
        _pool: &str,
        _window: &TimeWindow,
    ) -> Result<Vec<DepositEvent>> {
        Ok(self.history.clone())
    }

    async fn fees_earned(
        &self,
        _user: &str,
        _pool: &str,
        _window: &TimeWindow,
    ) -> Result<Vec<FeeAccrual>> {
        Ok(self.fees.clone())
    }

    async fn bin_reserves(&self, query: &BinQuery) -> Result<Vec<BinReserve>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.bins.clone())
    }
}
