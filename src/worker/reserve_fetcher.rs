use std::time::Duration;

use alloy::{
    primitives::{aliases::U24, Address, U256},
    providers::{DynProvider, ProviderBuilder},
};
use anyhow::{Context, Result};
use log::warn;
use url::Url;

use crate::abis::ILiquidityHelper;
use crate::config::RpcSettings;
use crate::snapshot::{BinQuery, BinReserve};

/// Maximum attempts for the helper contract read
const MAX_RETRIES: u32 = 3;

/// Delay between retries (exponential backoff base)
const RETRY_DELAY_MS: u64 = 250;

/// Timeout for a single RPC call. A 2001-bin window is a heavy eth_call.
const RPC_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Reads a user's per-bin reserves from the Liquidity Book helper contract.
#[derive(Clone)]
pub struct ReserveFetcher {
    provider: DynProvider,
    helper: Address,
}

impl ReserveFetcher {
    pub fn new(settings: &RpcSettings) -> Result<Self> {
        let url = Url::parse(&settings.url).context("Invalid RPC URL")?;
        let helper = settings
            .helper_address
            .parse()
            .context("Invalid helper contract address")?;

        let client = ProviderBuilder::new().connect_http(url);

        Ok(Self {
            provider: DynProvider::new(client),
            helper,
        })
    }

    /// `getBinsReserveOf` around `query.active_id`, retried with backoff.
    pub async fn get_bins_reserve_of(&self, query: &BinQuery) -> Result<Vec<BinReserve>> {
        let mut last_err = None;

        for attempt in 0..MAX_RETRIES {
            match self.fetch(query).await {
                Ok(bins) => return Ok(bins),
                Err(e) => {
                    warn!(
                        "getBinsReserveOf attempt {}/{} failed for pool {}: {:#}",
                        attempt + 1,
                        MAX_RETRIES,
                        query.pool,
                        e
                    );
                    last_err = Some(e);
                    if attempt < MAX_RETRIES - 1 {
                        let delay = Duration::from_millis(RETRY_DELAY_MS * 2_u64.pow(attempt));
                        tokio::time::sleep(delay).await;
                    }
                },
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("getBinsReserveOf was not attempted")))
    }

    async fn fetch(&self, query: &BinQuery) -> Result<Vec<BinReserve>> {
        let pair: Address = query.pool.parse().context("Invalid pool address")?;
        let user: Address = query.user.parse().context("Invalid user address")?;

        let helper = ILiquidityHelper::new(self.helper, &self.provider);
        let call = helper.getBinsReserveOf(
            pair,
            user,
            to_u24(query.active_id, "active bin id")?,
            to_u24(query.bins_above, "bins above")?,
            to_u24(query.bins_below, "bins below")?,
        );

        let result = tokio::time::timeout(RPC_CALL_TIMEOUT, call.call())
            .await
            .context("getBinsReserveOf timeout")?
            .context("getBinsReserveOf call failed")?;

        Ok(result
            .reserves
            .into_iter()
            .map(|bin| BinReserve {
                bin_id: bin.id.to::<u32>(),
                reserve_x: U256::from(bin.reserveX),
                reserve_y: U256::from(bin.reserveY),
                shares: bin.shares,
                total_shares: bin.totalShares,
            })
            .collect())
    }
}

fn to_u24(value: u32, what: &str) -> Result<U24> {
    anyhow::ensure!(value < (1 << 24), "{what} {value} does not fit in uint24");
    Ok(U24::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u24_bounds() {
        assert_eq!(to_u24(8_388_608, "id").unwrap().to::<u32>(), 8_388_608);
        assert_eq!(to_u24((1 << 24) - 1, "id").unwrap().to::<u32>(), (1 << 24) - 1);
        assert!(to_u24(1 << 24, "id").is_err());
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = RpcSettings {
            helper_address: "not-an-address".to_string(),
            ..RpcSettings::default()
        };
        assert!(ReserveFetcher::new(&settings).is_err());

        let settings = RpcSettings {
            url: "::".to_string(),
            ..RpcSettings::default()
        };
        assert!(ReserveFetcher::new(&settings).is_err());
    }
}
