pub mod liquidity_helper;

pub use liquidity_helper::{BinUserReserves, ILiquidityHelper};
