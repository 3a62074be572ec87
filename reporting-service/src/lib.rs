pub mod api;
pub mod config;
pub mod error;
pub mod metrics_server;
pub mod observability;
pub mod period;
pub mod reporting;
pub mod store;

pub use error::ReportError;
pub use reporting::ReportingService;
