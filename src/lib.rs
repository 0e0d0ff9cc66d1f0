pub mod app;
pub mod config;
pub mod export;
pub mod observability;

pub use app::{App, DashboardSummary};
pub use export::ExportPayload;
