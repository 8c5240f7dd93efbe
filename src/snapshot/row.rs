use serde::Serialize;

use crate::utils::{nan_as_empty, opt_nan_as_empty};

/// One reconciled (user, pool) position at one point in time.
///
/// Field order is the column order of the output record and must stay stable
/// across runs, since rows are appended to an existing file under an existing
/// header. NaN and `None` serialize as empty cells.
#[derive(Debug, Clone, Serialize)]
pub struct PositionRow {
    pub current_unix_timestamp: i64,
    #[serde(rename = "timestamp(datetime_pst)")]
    pub local_time: String,
    pub pool_name: String,
    pub pool_address: String,
    #[serde(rename = "pool[volume](1h)", serialize_with = "nan_as_empty")]
    pub volume_1h_usd: f64,
    #[serde(rename = "pool[liquidity]", serialize_with = "nan_as_empty")]
    pub pool_liquidity_usd: f64,
    #[serde(rename = "pool[total_fees(USD)](1h)", serialize_with = "nan_as_empty")]
    pub fees_1h_usd: f64,
    #[serde(rename = "lbBinStep")]
    pub bin_step: Option<u64>,
    #[serde(rename = "base_fee%", serialize_with = "opt_nan_as_empty")]
    pub base_fee_pct: Option<f64>,
    #[serde(rename = "max_fee%", serialize_with = "opt_nan_as_empty")]
    pub max_fee_pct: Option<f64>,
    #[serde(rename = "protocol_fee%", serialize_with = "opt_nan_as_empty")]
    pub protocol_fee_pct: Option<f64>,
    pub token_x_symbol: String,
    pub token_y_symbol: String,
    pub token_x_address: String,
    pub token_y_address: String,
    #[serde(rename = "pool[token_x_amount]", serialize_with = "opt_nan_as_empty")]
    pub pool_token_x_amount: Option<f64>,
    #[serde(rename = "pool[token_y_amount]", serialize_with = "opt_nan_as_empty")]
    pub pool_token_y_amount: Option<f64>,
    #[serde(serialize_with = "nan_as_empty")]
    pub token_x_price: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub token_y_price: f64,
    #[serde(rename = "activeBinId")]
    pub active_bin_id: u32,
    #[serde(rename = "liquidityDepth+2%TokenX", serialize_with = "opt_nan_as_empty")]
    pub depth_token_x: Option<f64>,
    #[serde(rename = "liquidityDepth-2%TokenY", serialize_with = "opt_nan_as_empty")]
    pub depth_token_y: Option<f64>,
    #[serde(rename = "liquidityDepth+2%(USD)", serialize_with = "opt_nan_as_empty")]
    pub depth_plus_usd: Option<f64>,
    #[serde(rename = "liquidityDepth-2%(USD)", serialize_with = "opt_nan_as_empty")]
    pub depth_minus_usd: Option<f64>,
    pub user_address: String,
    #[serde(rename = "total_tokenX_amount_initial_deposit")]
    pub initial_deposit_x: f64,
    #[serde(rename = "total_tokenY_amount_initial_deposit")]
    pub initial_deposit_y: f64,
    #[serde(rename = "MostRecentDepositTime")]
    pub most_recent_deposit_time: Option<String>,
    pub token_x_amount: f64,
    pub token_y_amount: f64,
    #[serde(rename = "token_x(USD)", serialize_with = "nan_as_empty")]
    pub token_x_usd: f64,
    #[serde(rename = "token_y(USD)", serialize_with = "nan_as_empty")]
    pub token_y_usd: f64,
    #[serde(rename = "bin_distribution(bin id: token_x_amount, token_y_amounts)")]
    pub bin_distribution: String,
    #[serde(rename = "total_token_value(USD)", serialize_with = "nan_as_empty")]
    pub total_value_usd: f64,
    #[serde(rename = "accrued_fees_token_x")]
    pub accrued_fees_x: f64,
    #[serde(rename = "accrued_fees_token_y")]
    pub accrued_fees_y: f64,
    #[serde(rename = "accrued_fees_token_x(USD)", serialize_with = "nan_as_empty")]
    pub accrued_fees_x_usd: f64,
    #[serde(rename = "accrued_fees_token_y(USD)", serialize_with = "nan_as_empty")]
    pub accrued_fees_y_usd: f64,
    #[serde(rename = "fees_per_bin(bin_id: token_x, token_y_amounts)")]
    pub fees_per_bin: String,
    #[serde(rename = "value_if_held(USD)", serialize_with = "nan_as_empty")]
    pub value_if_held_usd: f64,
    #[serde(rename = "impermanent_loss(USD)", serialize_with = "nan_as_empty")]
    pub impermanent_loss_usd: f64,
    #[serde(rename = "user_%_of_pool_liquidity", serialize_with = "nan_as_empty")]
    pub pool_share_pct: f64,
    #[serde(serialize_with = "nan_as_empty")]
    pub fees_annual: f64,
    #[serde(rename = "APR%", serialize_with = "nan_as_empty")]
    pub apr_pct: f64,
    #[serde(rename = "APY%", serialize_with = "nan_as_empty")]
    pub apy_pct: f64,
    #[serde(rename = "APR_1d%", serialize_with = "nan_as_empty")]
    pub apr_1d_pct: f64,

    // Long-window readings feed the yield metrics but are not part of the record
    #[serde(skip)]
    pub volume_1d_usd: f64,
    #[serde(skip)]
    pub fees_1d_usd: f64,
}

/// Output header, in order.
pub const COLUMNS: [&str; 46] = [
    "current_unix_timestamp",
    "timestamp(datetime_pst)",
    "pool_name",
    "pool_address",
    "pool[volume](1h)",
    "pool[liquidity]",
    "pool[total_fees(USD)](1h)",
    "lbBinStep",
    "base_fee%",
    "max_fee%",
    "protocol_fee%",
    "token_x_symbol",
    "token_y_symbol",
    "token_x_address",
    "token_y_address",
    "pool[token_x_amount]",
    "pool[token_y_amount]",
    "token_x_price",
    "token_y_price",
    "activeBinId",
    "liquidityDepth+2%TokenX",
    "liquidityDepth-2%TokenY",
    "liquidityDepth+2%(USD)",
    "liquidityDepth-2%(USD)",
    "user_address",
    "total_tokenX_amount_initial_deposit",
    "total_tokenY_amount_initial_deposit",
    "MostRecentDepositTime",
    "token_x_amount",
    "token_y_amount",
    "token_x(USD)",
    "token_y(USD)",
    "bin_distribution(bin id: token_x_amount, token_y_amounts)",
    "total_token_value(USD)",
    "accrued_fees_token_x",
    "accrued_fees_token_y",
    "accrued_fees_token_x(USD)",
    "accrued_fees_token_y(USD)",
    "fees_per_bin(bin_id: token_x, token_y_amounts)",
    "value_if_held(USD)",
    "impermanent_loss(USD)",
    "user_%_of_pool_liquidity",
    "fees_annual",
    "APR%",
    "APY%",
    "APR_1d%",
];
