//! The train/test exporter: a lifecycle callback that pushes run metrics.

use std::collections::HashMap;
use std::time::Instant;

use prometheus::{Gauge, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use tracing::warn;

use crate::callback::{HookContext, MetricLogs, TrainCallback};
use crate::config::{ExporterConfig, FailurePolicy};
use crate::error::{PasarelaError, Result};
use crate::export::push::{GatewayPush, PushClient};
use crate::model::ModelVitals;

const TRAIN_PREFIX: &str = "pasarela_train_";
const TEST_PREFIX: &str = "pasarela_test_";

const PARAMS_HELP: &str = "the number of trainable and non-trainable model weights";
const WEIGHTS_HELP: &str = "model trainable weights";

/// Exports training and evaluation metrics to a Prometheus pushgateway.
///
/// One exporter covers exactly one run: either a training run
/// (`on_train_begin`, `on_epoch_end`..., `on_train_end`) or a standalone
/// evaluation (`on_test_begin`, `on_test_end`). Reusing a finished exporter
/// is an error, reported according to the configured [`FailurePolicy`].
///
/// Each epoch sets a gauge per logged metric (`pasarela_train_<name>`), the
/// model parameter count, the completed epoch count and the elapsed wall time,
/// then pushes the whole registry. When weight buckets are configured, the
/// final hook additionally exports a histogram of all trainable weights.
pub struct TrainTestExporter {
    config: ExporterConfig,
    client: Box<dyn GatewayPush>,
    registry: Registry,
    gauges: HashMap<String, Gauge>,
    started_at: Option<Instant>,
    is_done: bool,
    is_training: bool,
}

impl TrainTestExporter {
    /// Create an exporter that pushes every logged metric to `gateway`
    /// under `job`.
    pub fn new(gateway: &str, job: &str) -> Result<Self> {
        Self::from_config(ExporterConfig::new(gateway, job))
    }

    /// Create an exporter from a full configuration.
    pub fn from_config(config: ExporterConfig) -> Result<Self> {
        let client = Box::new(PushClient::new(&config.gateway));
        Self::with_client(config, client)
    }

    /// Create an exporter with a custom gateway client.
    ///
    /// This is the hook for tests and for callers that deliver metrics
    /// through something other than plain HTTP.
    pub fn with_client(config: ExporterConfig, client: Box<dyn GatewayPush>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            client,
            registry: Registry::new(),
            gauges: HashMap::new(),
            started_at: None,
            is_done: false,
            is_training: false,
        })
    }

    /// Whether this exporter already completed a run.
    pub fn is_done(&self) -> bool {
        self.is_done
    }

    /// Whether a training run has started.
    pub fn is_training(&self) -> bool {
        self.is_training
    }

    /// Render the run registry in Prometheus text format.
    pub fn render(&self) -> Result<String> {
        Ok(TextEncoder::new().encode_to_string(&self.registry.gather())?)
    }

    /// Get or create a gauge registered in the run registry.
    fn gauge(&mut self, name: &str, help: &str) -> Result<Gauge> {
        if let Some(gauge) = self.gauges.get(name) {
            return Ok(gauge.clone());
        }
        let gauge = Gauge::with_opts(Opts::new(name, help))
            .map_err(|source| PasarelaError::metric(name, source))?;
        self.registry
            .register(Box::new(gauge.clone()))
            .map_err(|source| PasarelaError::metric(name, source))?;
        self.gauges.insert(name.to_string(), gauge.clone());
        Ok(gauge)
    }

    /// The metrics to export: the configured filter when present, otherwise
    /// everything the loop logged. Filtered names absent from the logs are
    /// skipped.
    fn selected(&self, logs: &MetricLogs) -> Vec<(String, f64)> {
        match &self.config.metrics {
            Some(filter) => filter
                .iter()
                .filter_map(|name| logs.get(name).map(|value| (name.clone(), *value)))
                .collect(),
            None => logs.iter().map(|(name, value)| (name.clone(), *value)).collect(),
        }
    }

    fn set_log_gauges(&mut self, prefix: &str, logs: &MetricLogs) -> Result<()> {
        for (key, value) in self.selected(logs) {
            let name = format!("{prefix}{}", sanitize_metric_name(&key));
            self.gauge(&name, &key)?.set(value);
        }
        Ok(())
    }

    /// Bucket every trainable weight into a run histogram. Called at most once
    /// per run, so the registration cannot collide.
    fn export_weight_histogram(&mut self, name: &str, model: &dyn ModelVitals) -> Result<()> {
        let Some(buckets) = self.config.weight_buckets.clone() else {
            return Ok(());
        };
        let opts = HistogramOpts::new(name, WEIGHTS_HELP).buckets(buckets);
        let histogram =
            Histogram::with_opts(opts).map_err(|source| PasarelaError::metric(name, source))?;
        self.registry
            .register(Box::new(histogram.clone()))
            .map_err(|source| PasarelaError::metric(name, source))?;
        model.visit_trainable_weights(&mut |tensor| {
            for weight in tensor {
                histogram.observe(f64::from(*weight));
            }
        });
        Ok(())
    }

    fn push(&self) -> Result<()> {
        self.client.push(&self.config.job, self.registry.gather())
    }

    /// Apply the failure policy to a hook outcome.
    fn absorb(&self, hook: &'static str, result: Result<()>) -> Result<()> {
        match result {
            Err(err) if self.config.on_error == FailurePolicy::Swallow => {
                warn!(hook, error = %err, "metric export failed, continuing");
                Ok(())
            }
            other => other,
        }
    }

    fn try_train_begin(&mut self) -> Result<()> {
        if self.is_done {
            return Err(PasarelaError::RunExhausted);
        }
        self.is_training = true;
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn try_epoch_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        self.set_log_gauges(TRAIN_PREFIX, ctx.logs)?;

        let params = ctx.model.parameter_count() as f64;
        self.gauge("pasarela_train_model_parameters_count", PARAMS_HELP)?.set(params);

        self.gauge(
            "pasarela_train_epochs_count",
            "the number of completed training epochs",
        )?
        .set((ctx.epoch + 1) as f64);

        let elapsed = self.started_at.map_or(0.0, |t| t.elapsed().as_secs_f64());
        self.gauge(
            "pasarela_train_elapsed_time_seconds",
            "the amount of time spent training the model",
        )?
        .set(elapsed);

        self.push()
    }

    fn try_train_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        self.is_done = true;

        // Without a histogram there is nothing the last epoch did not
        // already push.
        if self.config.weight_buckets.is_none() {
            return Ok(());
        }
        self.export_weight_histogram("pasarela_train_model_weights", ctx.model)?;
        self.push()
    }

    fn try_test_begin(&self) -> Result<()> {
        if self.is_done {
            return Err(PasarelaError::RunExhausted);
        }
        Ok(())
    }

    fn try_test_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        // Evaluation inside a training run is already covered by the
        // epoch metrics.
        if self.is_training {
            return Ok(());
        }
        self.is_done = true;

        self.set_log_gauges(TEST_PREFIX, ctx.logs)?;

        let params = ctx.model.parameter_count() as f64;
        self.gauge("pasarela_test_model_parameters_count", PARAMS_HELP)?.set(params);

        self.export_weight_histogram("pasarela_test_model_weights", ctx.model)?;
        self.push()
    }
}

impl TrainCallback for TrainTestExporter {
    fn on_train_begin(&mut self, _ctx: &HookContext<'_>) -> Result<()> {
        let result = self.try_train_begin();
        self.absorb("on_train_begin", result)
    }

    fn on_epoch_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        let result = self.try_epoch_end(ctx);
        self.absorb("on_epoch_end", result)
    }

    fn on_train_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        let result = self.try_train_end(ctx);
        self.absorb("on_train_end", result)
    }

    fn on_test_begin(&mut self, _ctx: &HookContext<'_>) -> Result<()> {
        let result = self.try_test_begin();
        self.absorb("on_test_begin", result)
    }

    fn on_test_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        let result = self.try_test_end(ctx);
        self.absorb("on_test_end", result)
    }

    fn name(&self) -> &'static str {
        "TrainTestExporter"
    }
}

/// Turn a logged metric key into a valid Prometheus name fragment.
pub(crate) fn sanitize_metric_name(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == ':' { c } else { '_' })
        .collect();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
