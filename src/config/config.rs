use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Format of configured window bounds and of every timestamp written to the report.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// LFJ analytics API configuration.
///
/// Pool analytics and user history come from `base_url`; accrued fees are
/// served from the legacy Trader Joe host at `fees_base_url`.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_fees_base_url")]
    pub fees_base_url: String,
    /// Sent as the `x-traderjoe-api-key` header
    pub api_key: String,
    #[serde(default = "default_chain")]
    pub chain: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.lfj.dev/v1".to_string()
}

fn default_fees_base_url() -> String {
    "https://api.traderjoexyz.dev/v1".to_string()
}

fn default_chain() -> String {
    "avalanche".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_timeout_secs() -> u64 {
    30
}

/// Avalanche C-Chain RPC and Liquidity Book helper contract configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct RpcSettings {
    #[serde(default = "default_rpc_url")]
    pub url: String,
    #[serde(default = "default_helper_address")]
    pub helper_address: String,
    /// Bins queried above the active bin
    #[serde(default = "default_bin_radius")]
    pub bins_above: u32,
    /// Bins queried below the active bin
    #[serde(default = "default_bin_radius")]
    pub bins_below: u32,
}

impl Default for RpcSettings {
    fn default() -> Self {
        Self {
            url: default_rpc_url(),
            helper_address: default_helper_address(),
            bins_above: default_bin_radius(),
            bins_below: default_bin_radius(),
        }
    }
}

fn default_rpc_url() -> String {
    "https://api.avax.network/ext/bc/C/rpc".to_string()
}

fn default_helper_address() -> String {
    "0xA5c68C9E55Dde3505e60c4B5eAe411e2977dfB35".to_string()
}

fn default_bin_radius() -> u32 {
    1_000
}

/// Users and pools to reconcile. Every user is paired with every pool.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PositionSettings {
    pub users: Vec<String>,
    pub pools: Vec<String>,
}

/// History window passed to every API request.
#[derive(Debug, Deserialize, Clone)]
pub struct WindowSettings {
    /// `YYYY-MM-DD HH:MM:SS`, interpreted as UTC
    pub start_time: String,
    /// `YYYY-MM-DD HH:MM:SS`, interpreted as UTC
    pub end_time: String,
}

/// Resolved history window in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: i64,
    pub end: i64,
}

impl WindowSettings {
    pub fn resolve(&self) -> Result<TimeWindow> {
        let start = parse_window_time(&self.start_time).context("Invalid window.start_time")?;
        let end = parse_window_time(&self.end_time).context("Invalid window.end_time")?;
        anyhow::ensure!(
            start <= end,
            "window.start_time ({}) is after window.end_time ({})",
            self.start_time,
            self.end_time
        );
        Ok(TimeWindow { start, end })
    }
}

fn parse_window_time(value: &str) -> Result<i64> {
    let parsed = NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
        .with_context(|| format!("expected {DATETIME_FORMAT}, got {value:?}"))?;
    Ok(parsed.and_utc().timestamp())
}

/// Output record location.
#[derive(Debug, Deserialize, Clone)]
pub struct ReportSettings {
    #[serde(default = "default_report_path")]
    pub path: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            path: default_report_path(),
        }
    }
}

fn default_report_path() -> String {
    "merged_data.csv".to_string()
}

/// Cadence of snapshot passes.
#[derive(Debug, Deserialize, Clone)]
pub struct ScheduleSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Run one pass immediately instead of waiting for the first tick
    #[serde(default = "default_run_on_start")]
    pub run_on_start: bool,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            run_on_start: default_run_on_start(),
        }
    }
}

fn default_interval_secs() -> u64 {
    3600
}

fn default_run_on_start() -> bool {
    true
}

/// Root application configuration.
///
/// Loaded from `config.yaml` (or any format the `config` crate understands)
/// with `LBSNAP__SECTION__KEY` environment overrides, e.g. `LBSNAP__API__API_KEY`.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub rpc: RpcSettings,
    pub positions: PositionSettings,
    pub window: WindowSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub schedule: ScheduleSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("LBSNAP").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const YAML: &str = r#"
api:
  api_key: "secret"
positions:
  users: ["0x1111111111111111111111111111111111111111"]
  pools: ["0x2222222222222222222222222222222222222222"]
window:
  start_time: "2024-05-01 00:00:00"
  end_time: "2024-06-01 00:00:00"
"#;

    fn load(yaml: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_fill_optional_sections() {
        let settings = load(YAML);
        assert_eq!(settings.api.chain, "avalanche");
        assert_eq!(settings.api.page_size, 100);
        assert_eq!(settings.rpc.bins_above, 1_000);
        assert_eq!(settings.rpc.bins_below, 1_000);
        assert_eq!(
            settings.rpc.helper_address,
            "0xA5c68C9E55Dde3505e60c4B5eAe411e2977dfB35"
        );
        assert_eq!(settings.schedule.interval_secs, 3600);
        assert!(settings.schedule.run_on_start);
        assert_eq!(settings.report.path, "merged_data.csv");
    }

    #[test]
    fn test_window_resolves_to_unix_seconds() {
        let window = load(YAML).window.resolve().unwrap();
        assert_eq!(window.start, 1_714_521_600);
        assert_eq!(window.end, 1_717_200_000);
    }

    #[test]
    fn test_window_rejects_inverted_bounds() {
        let window = WindowSettings {
            start_time: "2024-06-01 00:00:00".to_string(),
            end_time: "2024-05-01 00:00:00".to_string(),
        };
        assert!(window.resolve().is_err());
    }

    #[test]
    fn test_window_rejects_bad_format() {
        assert!(parse_window_time("2024/05/01").is_err());
    }
}
