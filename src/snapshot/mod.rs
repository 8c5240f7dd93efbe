//! Position reconciliation: from upstream readings to one [`PositionRow`].
//!
//! - [`pool`] - Merges the long and short analytics windows
//! - [`deposits`] - Most recent deposit basis
//! - [`fees`] - Accrued fee totals
//! - [`bins`] - User share of on-chain bin reserves
//! - [`metrics`] - USD valuation, impermanent loss, pool share, APR/APY
//! - [`aggregator`] - Fetches and assembles one row per (user, pool)

pub mod aggregator;
pub mod bins;
pub mod deposits;
pub mod fees;
pub mod metrics;
pub mod pool;
pub mod row;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::SnapshotAggregator;
pub use bins::{BinHoldings, BinQuery, BinReserve};
pub use deposits::InitialDepositSummary;
pub use fees::FeeSummary;
pub use metrics::{MetricsInput, PositionMetrics};
pub use pool::{PoolSnapshot, TokenMeta, WindowReading};
pub use row::{PositionRow, COLUMNS};
pub use source::{LiveSource, PositionSource};

use thiserror::Error;

/// Response shape problems that make a pair impossible to value.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("pool {pool} response is missing `{field}`")]
    MissingField { pool: String, field: &'static str },

    #[error("pool {pool} reports active bin {id}, outside uint24")]
    ActiveBinOutOfRange { pool: String, id: u64 },
}

/// `(a; b; c)` listing used for the per-bin descriptive columns.
pub(crate) fn format_listing<I>(entries: I) -> String
where
    I: IntoIterator<Item = String>,
{
    format!("({})", entries.into_iter().collect::<Vec<_>>().join("; "))
}
