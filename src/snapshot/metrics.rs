//! Valuation and yield metrics for one position.
//!
//! All functions here are pure. Every ratio goes through [`finite_or_nan`], so a
//! zero-liquidity pool yields NaN metrics instead of infinities.

use crate::utils::finite_or_nan;

/// Days used to annualize a daily fee figure.
pub const DAYS_PER_YEAR: i32 = 365;

/// Normalized inputs, in whole tokens and USD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsInput {
    pub initial_x: f64,
    pub initial_y: f64,
    pub current_x: f64,
    pub current_y: f64,
    pub price_x: f64,
    pub price_y: f64,
    pub accrued_fees_x: f64,
    pub accrued_fees_y: f64,
    pub pool_liquidity_usd: f64,
    /// Pool fees over the long (daily) window
    pub daily_fees_usd: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionMetrics {
    pub value_if_held_usd: f64,
    pub token_x_usd: f64,
    pub token_y_usd: f64,
    pub total_value_usd: f64,
    /// Positive when holding would have been worth more
    pub impermanent_loss_usd: f64,
    pub accrued_fees_x_usd: f64,
    pub accrued_fees_y_usd: f64,
    pub pool_share_pct: f64,
    pub fees_annual_usd: f64,
    pub apr_pct: f64,
    pub apy_pct: f64,
    pub apr_1d_pct: f64,
}

impl PositionMetrics {
    pub fn compute(input: &MetricsInput) -> Self {
        let value_if_held_usd = input.initial_x * input.price_x + input.initial_y * input.price_y;

        let token_x_usd = input.current_x * input.price_x;
        let token_y_usd = input.current_y * input.price_y;
        let total_value_usd = token_x_usd + token_y_usd;

        let liquidity = input.pool_liquidity_usd;
        let daily_fees = input.daily_fees_usd;
        let fees_annual_usd = daily_fees * DAYS_PER_YEAR as f64;

        Self {
            value_if_held_usd,
            token_x_usd,
            token_y_usd,
            total_value_usd,
            impermanent_loss_usd: value_if_held_usd - total_value_usd,
            accrued_fees_x_usd: input.accrued_fees_x * input.price_x,
            accrued_fees_y_usd: input.accrued_fees_y * input.price_y,
            pool_share_pct: finite_or_nan(total_value_usd / liquidity * 100.0),
            fees_annual_usd,
            apr_pct: finite_or_nan(fees_annual_usd / liquidity * 100.0),
            apy_pct: finite_or_nan(((1.0 + daily_fees / liquidity).powi(DAYS_PER_YEAR) - 1.0) * 100.0),
            apr_1d_pct: finite_or_nan(daily_fees / liquidity * 100.0),
        }
    }
}
