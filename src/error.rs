//! Error types with actionable diagnostics.
//!
//! Every variant carries enough context for the user to fix the problem
//! without reading this crate's source.

use thiserror::Error;

/// Result type alias for pasarela operations.
pub type Result<T> = std::result::Result<T, PasarelaError>;

/// Errors that can occur while exporting metrics.
#[derive(Error, Debug)]
pub enum PasarelaError {
    /// The exporter already completed a run and was invoked again.
    #[error("this exporter already finished a run\n  → create a fresh exporter for every training or evaluation run")]
    RunExhausted,

    /// Configuration value is invalid.
    #[error("invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue { field: String, message: String, suggestion: String },

    /// A metric could not be created or registered.
    #[error("metric '{name}' could not be registered: {source}")]
    Metric {
        name: String,
        #[source]
        source: prometheus::Error,
    },

    /// The push gateway rejected the metrics or was unreachable.
    #[error("push to gateway '{gateway}' failed: {source}\n  → check that the pushgateway is running and the address includes host and port")]
    Push {
        gateway: String,
        #[source]
        source: prometheus::Error,
    },

    /// Text exposition encoding failed.
    #[error("failed to encode metrics: {0}")]
    Encode(#[from] prometheus::Error),
}

impl PasarelaError {
    /// Create a metric registration error.
    pub(crate) fn metric(name: impl Into<String>, source: prometheus::Error) -> Self {
        Self::Metric { name: name.into(), source }
    }

    /// Check if this error is user-recoverable.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::RunExhausted | Self::ConfigValue { .. } | Self::Push { .. })
    }
}
