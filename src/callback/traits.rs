//! Core types for the lifecycle hook protocol
//!
//! - `MetricLogs` - named scalars supplied by the loop at each hook
//! - `HookContext` - state passed to hooks
//! - `TrainCallback` - the trait all callbacks implement

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::ModelVitals;

/// Named scalar metrics supplied by the training loop.
///
/// Ordered so that exports and console output are deterministic.
pub type MetricLogs = BTreeMap<String, f64>;

/// Context passed to lifecycle hooks.
pub struct HookContext<'a> {
    /// Current epoch (0-indexed). Zero for hooks outside an epoch.
    pub epoch: usize,
    /// Scalar metrics the loop logged for this event.
    pub logs: &'a MetricLogs,
    /// The model under training or evaluation.
    pub model: &'a dyn ModelVitals,
}

impl<'a> HookContext<'a> {
    /// Create a hook context.
    pub fn new(epoch: usize, logs: &'a MetricLogs, model: &'a dyn ModelVitals) -> Self {
        Self { epoch, logs, model }
    }
}

/// Trait for training/evaluation lifecycle callbacks.
///
/// Hooks fire in whatever order the external loop calls them; there is no
/// ordering logic here. All methods have default no-op implementations, so
/// implement only the events you care about.
pub trait TrainCallback: Send {
    /// Called once before training starts.
    fn on_train_begin(&mut self, _ctx: &HookContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called after each training epoch.
    fn on_epoch_end(&mut self, _ctx: &HookContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once after training ends.
    fn on_train_end(&mut self, _ctx: &HookContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once before a standalone evaluation run.
    fn on_test_begin(&mut self, _ctx: &HookContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Called once after a standalone evaluation run.
    fn on_test_end(&mut self, _ctx: &HookContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Get callback name for logging
    fn name(&self) -> &'static str {
        "TrainCallback"
    }
}
