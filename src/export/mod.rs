//! Metric export to a Prometheus pushgateway
//!
//! [`TrainTestExporter`] implements [`TrainCallback`](crate::TrainCallback)
//! and pushes the run registry through a [`GatewayPush`] client.

mod exporter;
mod push;

// Re-export all public types
pub use exporter::TrainTestExporter;
pub use push::{GatewayPush, PushClient};
