//! Inference-time instrumentation.
//!
//! Training runs are short-lived and push their registry; a serving process
//! lives indefinitely, so this exporter accumulates counters across the
//! process lifetime. Drift figures are computed by the caller (typically a
//! dedicated drift-detection library watching the prediction stream) and only
//! exported here.

use std::time::{Duration, Instant};

use prometheus::{Gauge, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder};
use serde::{Deserialize, Serialize};

use crate::error::{PasarelaError, Result};
use crate::export::GatewayPush;

/// Drift figures for a batch of predictions, computed by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drift {
    /// How many predictions in the batch were flagged as drifting.
    pub detected: u64,
    /// Test statistic of the underlying detector, when it reports one.
    pub test_statistic: Option<f64>,
}

/// Exports prediction and drift metrics for a model serving process.
///
/// # Example
///
/// ```
/// use pasarela::InferenceExporter;
///
/// let exporter = InferenceExporter::new()?;
/// let prediction = exporter.observe(1, || "seven");
/// assert_eq!(prediction, "seven");
/// assert!(exporter.render()?.contains("pasarela_predict_requests_total 1"));
/// # Ok::<(), pasarela::PasarelaError>(())
/// ```
pub struct InferenceExporter {
    registry: Registry,
    predict_requests: IntCounter,
    predict_samples: IntCounter,
    predict_duration: Histogram,
    drift_detected: IntCounter,
    drift_test_statistic: Gauge,
}

impl InferenceExporter {
    /// Create an inference exporter with its own registry.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let predict_requests = register_int_counter(
            &registry,
            "pasarela_predict_requests_total",
            "the number of prediction calls",
        )?;
        let predict_samples = register_int_counter(
            &registry,
            "pasarela_predict_samples_total",
            "the number of samples predicted across all calls",
        )?;

        let name = "pasarela_predict_duration_seconds";
        let predict_duration =
            Histogram::with_opts(HistogramOpts::new(name, "prediction latency in seconds"))
                .map_err(|source| PasarelaError::metric(name, source))?;
        registry
            .register(Box::new(predict_duration.clone()))
            .map_err(|source| PasarelaError::metric(name, source))?;

        let drift_detected = register_int_counter(
            &registry,
            "pasarela_drift_detected_total",
            "the number of predictions flagged as drifting",
        )?;

        let name = "pasarela_drift_test_statistic";
        let drift_test_statistic =
            Gauge::with_opts(Opts::new(name, "latest drift detector test statistic"))
                .map_err(|source| PasarelaError::metric(name, source))?;
        registry
            .register(Box::new(drift_test_statistic.clone()))
            .map_err(|source| PasarelaError::metric(name, source))?;

        Ok(Self {
            registry,
            predict_requests,
            predict_samples,
            predict_duration,
            drift_detected,
            drift_test_statistic,
        })
    }

    /// Run a prediction closure, recording request count, sample count and
    /// latency around it.
    pub fn observe<F, T>(&self, samples: usize, predict: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let output = predict();
        self.record_prediction(samples, start.elapsed());
        output
    }

    /// Record an already-timed prediction.
    pub fn record_prediction(&self, samples: usize, elapsed: Duration) {
        self.predict_requests.inc();
        self.predict_samples.inc_by(samples as u64);
        self.predict_duration.observe(elapsed.as_secs_f64());
    }

    /// Export caller-computed drift figures.
    pub fn observe_drift(&self, drift: &Drift) {
        self.drift_detected.inc_by(drift.detected);
        if let Some(statistic) = drift.test_statistic {
            self.drift_test_statistic.set(statistic);
        }
    }

    /// Render the registry in Prometheus text format for scraping or logging.
    pub fn render(&self) -> Result<String> {
        Ok(TextEncoder::new().encode_to_string(&self.registry.gather())?)
    }

    /// Push the current state to a gateway under the given job name.
    pub fn push_to(&self, job: &str, client: &dyn GatewayPush) -> Result<()> {
        client.push(job, self.registry.gather())
    }

    /// The underlying registry, for callers that serve scrapes themselves.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

fn register_int_counter(registry: &Registry, name: &str, help: &str) -> Result<IntCounter> {
    let counter = IntCounter::with_opts(Opts::new(name, help))
        .map_err(|source| PasarelaError::metric(name, source))?;
    registry
        .register(Box::new(counter.clone()))
        .map_err(|source| PasarelaError::metric(name, source))?;
    Ok(counter)
}
