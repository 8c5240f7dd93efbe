//! User holdings across Liquidity Book bins.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use num_traits::Zero;

use crate::utils::{normalize, user_share};

use super::format_listing;

/// Helper-contract read parameters: a window of bins around the active bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinQuery {
    pub pool: String,
    pub user: String,
    pub active_id: u32,
    pub bins_above: u32,
    pub bins_below: u32,
}

/// One bin entry returned by the helper contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinReserve {
    pub bin_id: u32,
    pub reserve_x: U256,
    pub reserve_y: U256,
    pub shares: U256,
    pub total_shares: U256,
}

/// User's share of the bin reserves, in raw units and decimal-adjusted.
#[derive(Debug, Clone)]
pub struct BinHoldings {
    pub raw_x: BigDecimal,
    pub raw_y: BigDecimal,
    pub amount_x: f64,
    pub amount_y: f64,
    /// `(binId: amountX, amountY; ...)` with decimal-adjusted amounts
    pub distribution: String,
}

impl BinHoldings {
    pub fn aggregate(bins: &[BinReserve], decimals_x: u8, decimals_y: u8) -> Self {
        let mut raw_x = BigDecimal::zero();
        let mut raw_y = BigDecimal::zero();
        let mut entries = Vec::with_capacity(bins.len());

        for bin in bins {
            let x = user_share(bin.reserve_x, bin.shares, bin.total_shares);
            let y = user_share(bin.reserve_y, bin.shares, bin.total_shares);

            entries.push(format!(
                "{}: {:?}, {:?}",
                bin.bin_id,
                normalize(&x, decimals_x),
                normalize(&y, decimals_y)
            ));

            raw_x += x;
            raw_y += y;
        }

        Self {
            amount_x: normalize(&raw_x, decimals_x),
            amount_y: normalize(&raw_y, decimals_y),
            raw_x,
            raw_y,
            distribution: format_listing(entries),
        }
    }
}
