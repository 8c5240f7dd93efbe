use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;

use crate::config::{ApiSettings, TimeWindow};

use super::models::{DepositEvent, FeeAccrual, PoolAnalytics};

const API_KEY_HEADER: &str = "x-traderjoe-api-key";

/// Client for the LFJ analytics API.
///
/// Every request carries the page size and the configured history window,
/// matching how the upstream endpoints are paged and filtered.
#[derive(Clone)]
pub struct LfjClient {
    http: reqwest::Client,
    base_url: String,
    fees_base_url: String,
    api_key: String,
    chain: String,
    page_size: u32,
}

impl LfjClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            fees_base_url: settings.fees_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            chain: settings.chain.clone(),
            page_size: settings.page_size,
        })
    }

    /// Pool analytics for one `filterBy` window (`1h`, `1d`, ...).
    pub async fn get_pool(
        &self,
        pool: &str,
        filter_by: &str,
        window: &TimeWindow,
    ) -> Result<PoolAnalytics> {
        let url = format!("{}/pools/{}/{}", self.base_url, self.chain, pool);
        self.get_json(&url, window, &[("filterBy", filter_by)])
            .await
            .with_context(|| format!("Pool analytics ({filter_by}) request failed for {pool}"))
    }

    /// Full deposit/withdrawal history of `user` in `pool`.
    pub async fn get_user_history(
        &self,
        user: &str,
        pool: &str,
        window: &TimeWindow,
    ) -> Result<Vec<DepositEvent>> {
        let url = format!(
            "{}/user/{}/history/{}/{}",
            self.base_url, self.chain, user, pool
        );
        self.get_json(&url, window, &[])
            .await
            .with_context(|| format!("User history request failed for {user} in {pool}"))
    }

    /// Per-bin fees accrued by `user` in `pool`.
    pub async fn get_fees_earned(
        &self,
        user: &str,
        pool: &str,
        window: &TimeWindow,
    ) -> Result<Vec<FeeAccrual>> {
        let url = format!(
            "{}/user/fees-earned/{}/{}/{}",
            self.fees_base_url, self.chain, user, pool
        );
        self.get_json(&url, window, &[])
            .await
            .with_context(|| format!("Fees earned request failed for {user} in {pool}"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        window: &TimeWindow,
        extra: &[(&str, &str)],
    ) -> Result<T> {
        let mut params: Vec<(&str, String)> = vec![
            ("pageSize", self.page_size.to_string()),
            ("startTime", window.start.to_string()),
            ("endTime", window.end.to_string()),
        ];
        params.extend(extra.iter().map(|(k, v)| (*k, v.to_string())));

        debug!("GET {} {:?}", url, params);

        let response = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(&params)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<T>().await?)
    }
}
