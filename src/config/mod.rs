#[allow(clippy::module_inception)]
mod config;

pub use self::config::{
    ApiSettings, PositionSettings, ReportSettings, RpcSettings, ScheduleSettings, Settings,
    TimeWindow, WindowSettings, DATETIME_FORMAT,
};
