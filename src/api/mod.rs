pub mod client;
pub mod models;

pub use client::LfjClient;
pub use models::{DepositEvent, FeeAccrual, PoolAnalytics, TokenFlow, TokenInfo};
