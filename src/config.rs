//! Exporter configuration.

use serde::{Deserialize, Serialize};

use crate::error::{PasarelaError, Result};

/// What to do when a lifecycle hook fails to export metrics.
///
/// A broken pushgateway should not abort a multi-hour training run, so the
/// default swallows export errors after logging them at `warn` level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the error and keep going.
    #[default]
    Swallow,
    /// Return the error to the training loop.
    Propagate,
}

/// Configuration for [`TrainTestExporter`](crate::TrainTestExporter).
///
/// # Example
///
/// ```
/// use pasarela::{ExporterConfig, buckets::WEIGHT_BUCKETS_0_3};
///
/// let config = ExporterConfig::new("127.0.0.1:9091", "mnist")
///     .with_metrics(&["loss", "val_loss"])
///     .with_weight_buckets(&WEIGHT_BUCKETS_0_3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Pushgateway address, `host:port` or a full URL.
    pub gateway: String,
    /// Job name the metrics are grouped under.
    pub job: String,
    /// Metric names to export. `None` exports every logged scalar.
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
    /// Bucket bounds for the model-weight histogram. `None` disables it.
    #[serde(default)]
    pub weight_buckets: Option<Vec<f64>>,
    /// Error handling policy for lifecycle hooks.
    #[serde(default)]
    pub on_error: FailurePolicy,
}

impl ExporterConfig {
    /// Create a config with default policy: export all logged metrics,
    /// no weight histogram, swallow export errors.
    pub fn new(gateway: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            gateway: gateway.into(),
            job: job.into(),
            metrics: None,
            weight_buckets: None,
            on_error: FailurePolicy::default(),
        }
    }

    /// Restrict the export to the named metrics.
    pub fn with_metrics(mut self, names: &[&str]) -> Self {
        self.metrics = Some(names.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Enable the model-weight histogram with the given bucket bounds.
    pub fn with_weight_buckets(mut self, buckets: &[f64]) -> Self {
        self.weight_buckets = Some(buckets.to_vec());
        self
    }

    /// Return export errors to the caller instead of swallowing them.
    pub fn propagate_errors(mut self) -> Self {
        self.on_error = FailurePolicy::Propagate;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.gateway.trim().is_empty() {
            return Err(PasarelaError::ConfigValue {
                field: "gateway".into(),
                message: "pushgateway address is empty".into(),
                suggestion: "use host:port, e.g. 127.0.0.1:9091".into(),
            });
        }
        if self.job.trim().is_empty() {
            return Err(PasarelaError::ConfigValue {
                field: "job".into(),
                message: "job name is empty".into(),
                suggestion: "name the run, e.g. the model or experiment name".into(),
            });
        }
        if let Some(buckets) = &self.weight_buckets {
            if buckets.is_empty() {
                return Err(PasarelaError::ConfigValue {
                    field: "weight_buckets".into(),
                    message: "bucket list is empty".into(),
                    suggestion: "use a preset from pasarela::buckets or remove the option"
                        .into(),
                });
            }
            if buckets.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err(PasarelaError::ConfigValue {
                    field: "weight_buckets".into(),
                    message: "bucket bounds must be strictly increasing".into(),
                    suggestion: "sort the bucket bounds and remove duplicates".into(),
                });
            }
        }
        Ok(())
    }
}
