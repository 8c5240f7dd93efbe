//! Response models for the LFJ analytics API.
//!
//! The API is loose about numeric encoding: the same field may arrive as a JSON
//! number, a numeric string, or be absent. Every numeric field here goes through
//! a lenient deserializer so a malformed value never fails the whole response.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;

// ============================================
// Pool analytics
// ============================================

/// One reading of `GET /pools/{chain}/{address}` for a single `filterBy` window.
///
/// Volume and fee figures cover the requested window; the remaining fields are
/// current pool state and do not depend on the filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolAnalytics {
    #[serde(default, deserialize_with = "lenient_string")]
    pub pair_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volume_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub fees_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub token_x: Option<TokenInfo>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub token_y: Option<TokenInfo>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reserve_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub reserve_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub lb_bin_step: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lb_base_fee_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lb_max_fee_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub protocol_share_pct: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub active_bin_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity_depth_minus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity_depth_plus: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity_depth_token_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub liquidity_depth_token_y: Option<f64>,
}

/// Token metadata embedded in a pool reading.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub decimals: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_usd: Option<f64>,
}

// ============================================
// User history
// ============================================

/// One deposit or withdrawal from `GET /user/{chain}/history/{user}/{pool}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositEvent {
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Only a literal `true` marks a deposit
    #[serde(default, deserialize_with = "lenient_bool")]
    pub is_deposit: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pool_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pair_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub bin_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_token_flow")]
    pub token_x: TokenFlow,
    #[serde(default, deserialize_with = "lenient_token_flow")]
    pub token_y: TokenFlow,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub block_number: Option<u64>,
}

/// Per-token side of a history entry. Unparsable amounts read as zero, and a
/// missing or non-object side reads as all zeros.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenFlow {
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub price: f64,
}

// ============================================
// Fees earned
// ============================================

/// Accrued fees for one bin from `GET /user/fees-earned/{chain}/{user}/{pool}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAccrual {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub bin_id: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub accrued_fees_x: f64,
    #[serde(default, deserialize_with = "lenient_f64_or_zero")]
    pub accrued_fees_y: f64,
}

// ============================================
// Lenient field parsing
// ============================================

/// Read a JSON number or numeric string as f64.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

/// Read a JSON number or numeric string as a non-negative integer.
pub fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

/// Read an RFC 3339 string, a naive `YYYY-MM-DD[ T]HH:MM:SS` string (UTC),
/// or unix seconds/milliseconds.
pub fn value_to_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|naive| naive.and_utc())
                .or_else(|| s.parse::<i64>().ok().and_then(unix_to_datetime))
        },
        Value::Number(n) => n.as_i64().and_then(unix_to_datetime),
        _ => None,
    }
}

/// Values past the year 33658 in seconds are taken as milliseconds.
fn unix_to_datetime(value: i64) -> Option<DateTime<Utc>> {
    if value.abs() >= 1_000_000_000_000 {
        DateTime::from_timestamp_millis(value)
    } else {
        DateTime::from_timestamp(value, 0)
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_f64))
}

fn lenient_f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?.unwrap_or(0.0))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_u64))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_to_timestamp))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Nested objects that are null, of the wrong type, or malformed read as `None`.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v).ok(),
        _ => None,
    })
}

fn lenient_token_flow<'de, D>(deserializer: D) -> Result<TokenFlow, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_object(deserializer)?.unwrap_or_default())
}
