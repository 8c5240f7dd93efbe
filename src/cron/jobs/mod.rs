pub mod position_snapshots;

pub use position_snapshots::{PassSummary, PositionEnumerator};
