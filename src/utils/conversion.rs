//! Raw token unit conversions.
//!
//! On-chain reserves and share balances are U256 values far beyond f64
//! precision, so share arithmetic runs on BigInt/BigDecimal and only the
//! decimal-adjusted result is converted to f64.

use alloy::primitives::U256;
use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use once_cell::sync::Lazy;

// ============================================
// U256 Conversions
// ============================================

/// Convert alloy U256 to an exact BigInt.
pub fn u256_to_bigint(value: U256) -> BigInt {
    let bytes: [u8; 32] = value.to_le_bytes();
    BigInt::from_bytes_le(Sign::Plus, &bytes)
}

/// Raw reserve owned by a holder of `shares` out of `total_shares`.
///
/// Computes `reserve * shares / total_shares` without intermediate rounding.
/// A bin with zero total shares contributes nothing.
pub fn user_share(reserve: U256, shares: U256, total_shares: U256) -> BigDecimal {
    if total_shares.is_zero() {
        return BigDecimal::zero();
    }

    let numerator = u256_to_bigint(reserve) * u256_to_bigint(shares);
    BigDecimal::from(numerator) / BigDecimal::from(u256_to_bigint(total_shares))
}

// ============================================
// Decimal Adjustment
// ============================================

/// Convert a raw token amount to whole-token units: `raw / 10^decimals`.
///
/// Returns NaN if the result does not fit a finite f64.
pub fn normalize(raw: &BigDecimal, decimals: u8) -> f64 {
    let adjusted = if decimals == 0 { raw.clone() } else { raw / big_pow10(decimals) };

    match adjusted.to_f64() {
        Some(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

// ============================================
// Internal Helpers
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^exp as BigDecimal.
pub(crate) fn big_pow10(exp: u8) -> BigDecimal {
    if (exp as usize) < POW10_CACHE.len() {
        POW10_CACHE[exp as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(exp as u32))
    }
}
