//! Pushgateway client seam.
//!
//! The exporter talks to the gateway through the [`GatewayPush`] trait so
//! tests (and callers with exotic transports) can substitute their own
//! delivery. [`PushClient`] is the default implementation over the
//! `prometheus` crate's push protocol.

use std::collections::HashMap;

use prometheus::proto::MetricFamily;
use tracing::debug;

use crate::error::{PasarelaError, Result};

/// Delivery of gathered metric families to a push endpoint.
pub trait GatewayPush: Send {
    /// Push the metric families under the given job name.
    fn push(&self, job: &str, families: Vec<MetricFamily>) -> Result<()>;
}

/// Default gateway client over HTTP.
///
/// The address is `host:port` or a full URL; a missing scheme defaults to
/// `http://`. Pushes replace the job's previous metrics, matching gauge
/// semantics: the gateway always holds the latest run state.
#[derive(Debug, Clone)]
pub struct PushClient {
    gateway: String,
}

impl PushClient {
    /// Create a client for the given pushgateway address.
    pub fn new(gateway: impl Into<String>) -> Self {
        Self { gateway: gateway.into() }
    }

    /// The configured gateway address.
    pub fn gateway(&self) -> &str {
        &self.gateway
    }
}

impl GatewayPush for PushClient {
    fn push(&self, job: &str, families: Vec<MetricFamily>) -> Result<()> {
        let count = families.len();
        prometheus::push_metrics(job, HashMap::new(), &self.gateway, families, None).map_err(
            |source| PasarelaError::Push { gateway: self.gateway.clone(), source },
        )?;
        debug!(gateway = %self.gateway, job, families = count, "pushed metrics");
        Ok(())
    }
}
