pub mod abis;
pub mod api;
pub mod config;
pub mod cron;
pub mod report;
pub mod snapshot;
pub mod utils;
pub mod worker;

pub use api::LfjClient;
pub use config::Settings;
pub use cron::jobs::{PassSummary, PositionEnumerator};
pub use cron::CronScheduler;
pub use report::{CsvReport, ReportSink};
pub use snapshot::{PositionRow, PositionSource, SnapshotAggregator};
pub use worker::ReserveFetcher;
