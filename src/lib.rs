//! pasarela — push-based Prometheus exporter for model training loops.
//!
//! The crate is a thin adapter between a training loop's lifecycle events and
//! a Prometheus pushgateway: hooks receive the loop's logged scalars, turn
//! them into gauges (plus a model-weight histogram when configured) in a
//! per-run registry, and push that registry after every epoch.
//!
//! # Example
//!
//! ```no_run
//! use pasarela::buckets::WEIGHT_BUCKETS_1_0;
//! use pasarela::{
//!     ExporterConfig, HookContext, MetricLogs, TrainCallback, TrainTestExporter, WeightSnapshot,
//! };
//!
//! fn main() -> pasarela::Result<()> {
//!     let config = ExporterConfig::new("127.0.0.1:9091", "mnist")
//!         .with_weight_buckets(&WEIGHT_BUCKETS_1_0);
//!     let mut exporter = TrainTestExporter::from_config(config)?;
//!
//!     let model = WeightSnapshot::from_tensors(vec![vec![0.1, -0.2, 0.3]]);
//!     let empty = MetricLogs::new();
//!     exporter.on_train_begin(&HookContext::new(0, &empty, &model))?;
//!     for epoch in 0..10 {
//!         // In a real loop these come out of the training framework.
//!         let mut logs = MetricLogs::new();
//!         logs.insert("loss".to_string(), 0.5 / (epoch + 1) as f64);
//!         exporter.on_epoch_end(&HookContext::new(epoch, &logs, &model))?;
//!     }
//!     exporter.on_train_end(&HookContext::new(9, &empty, &model))?;
//!     Ok(())
//! }
//! ```
//!
//! Several callbacks (progress printing, checkpointing, the exporter) can be
//! driven together through [`CallbackManager`]. For long-lived serving
//! processes, [`InferenceExporter`] accumulates prediction and drift metrics
//! instead of per-run gauges.

pub mod buckets;
pub mod callback;
pub mod config;
pub mod error;
pub mod export;
pub mod inference;
pub mod model;

pub use buckets::{WEIGHT_BUCKETS_0_3, WEIGHT_BUCKETS_1_0};
pub use callback::{CallbackManager, ConsoleCallback, HookContext, MetricLogs, TrainCallback};
pub use config::{ExporterConfig, FailurePolicy};
pub use error::{PasarelaError, Result};
pub use export::{GatewayPush, PushClient, TrainTestExporter};
pub use inference::{Drift, InferenceExporter};
pub use model::{ModelVitals, WeightSnapshot};
