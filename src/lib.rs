pub mod calculator;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod format;
pub mod global;
pub mod metrics;
pub mod process;
pub mod schema;
pub mod table;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
