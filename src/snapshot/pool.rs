use crate::api::{PoolAnalytics, TokenInfo};

use super::SnapshotError;

/// Liquidity Book bin ids are uint24.
const MAX_BIN_ID: u64 = (1 << 24) - 1;

/// Token decimals above this cannot be a real ERC20.
const MAX_DECIMALS: u64 = 36;

/// Token side of a pool snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMeta {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    /// NaN when the API did not report a price
    pub price_usd: f64,
}

/// Volume and fee reading for one analytics window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowReading {
    /// NaN when absent
    pub volume_usd: f64,
    /// NaN when absent
    pub fees_usd: f64,
}

impl WindowReading {
    fn from_analytics(analytics: &PoolAnalytics) -> Self {
        Self {
            volume_usd: analytics.volume_usd.unwrap_or(f64::NAN),
            fees_usd: analytics.fees_usd.unwrap_or(f64::NAN),
        }
    }
}

/// Pool analytics merged from a long (1d) and a short (1h) window reading.
///
/// Current-state fields come from the long reading; the short reading only
/// contributes its own volume and fees.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSnapshot {
    pub address: String,
    pub name: String,
    pub long_window: WindowReading,
    pub short_window: WindowReading,
    pub liquidity_usd: f64,
    pub token_x: TokenMeta,
    pub token_y: TokenMeta,
    pub reserve_x: Option<f64>,
    pub reserve_y: Option<f64>,
    pub bin_step: Option<u64>,
    pub base_fee_pct: Option<f64>,
    pub max_fee_pct: Option<f64>,
    pub protocol_share_pct: Option<f64>,
    pub active_bin_id: u32,
    pub depth_minus_usd: Option<f64>,
    pub depth_plus_usd: Option<f64>,
    pub depth_token_x: Option<f64>,
    pub depth_token_y: Option<f64>,
}

impl PoolSnapshot {
    /// Merge the two readings of `pool`.
    ///
    /// Fails when the long reading lacks the active bin id, liquidity, or a
    /// token's decimals, since the position cannot be valued without them.
    pub fn merge(
        pool: &str,
        long: PoolAnalytics,
        short: &PoolAnalytics,
    ) -> Result<Self, SnapshotError> {
        let missing = |field: &'static str| SnapshotError::MissingField {
            pool: pool.to_string(),
            field,
        };

        let active_bin_id = long.active_bin_id.ok_or_else(|| missing("activeBinId"))?;
        if active_bin_id > MAX_BIN_ID {
            return Err(SnapshotError::ActiveBinOutOfRange {
                pool: pool.to_string(),
                id: active_bin_id,
            });
        }

        let liquidity_usd = long.liquidity_usd.ok_or_else(|| missing("liquidityUsd"))?;
        let long_window = WindowReading::from_analytics(&long);

        let token_x = token_meta(pool, long.token_x, "tokenX.decimals")?;
        let token_y = token_meta(pool, long.token_y, "tokenY.decimals")?;

        Ok(Self {
            address: long.pair_address.unwrap_or_else(|| pool.to_string()),
            name: long.name.unwrap_or_default(),
            long_window,
            short_window: WindowReading::from_analytics(short),
            liquidity_usd,
            token_x,
            token_y,
            reserve_x: long.reserve_x,
            reserve_y: long.reserve_y,
            bin_step: long.lb_bin_step,
            base_fee_pct: long.lb_base_fee_pct,
            max_fee_pct: long.lb_max_fee_pct,
            protocol_share_pct: long.protocol_share_pct,
            active_bin_id: active_bin_id as u32,
            depth_minus_usd: long.liquidity_depth_minus,
            depth_plus_usd: long.liquidity_depth_plus,
            depth_token_x: long.liquidity_depth_token_x,
            depth_token_y: long.liquidity_depth_token_y,
        })
    }
}

fn token_meta(
    pool: &str,
    info: Option<TokenInfo>,
    decimals_field: &'static str,
) -> Result<TokenMeta, SnapshotError> {
    let info = info.unwrap_or_default();

    let decimals = info
        .decimals
        .filter(|d| *d <= MAX_DECIMALS)
        .ok_or_else(|| SnapshotError::MissingField {
            pool: pool.to_string(),
            field: decimals_field,
        })?;

    Ok(TokenMeta {
        address: info.address.unwrap_or_default(),
        symbol: info.symbol.unwrap_or_default(),
        decimals: decimals as u8,
        price_usd: info.price_usd.unwrap_or(f64::NAN),
    })
}
