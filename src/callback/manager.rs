//! Callback manager for dispatching events to multiple callbacks

use super::traits::{HookContext, TrainCallback};
use crate::error::Result;

/// Manages multiple callbacks and dispatches events in registration order.
///
/// The first callback that returns an error short-circuits the dispatch; an
/// exporter configured to swallow its own failures never does.
pub struct CallbackManager {
    callbacks: Vec<Box<dyn TrainCallback>>,
}

impl CallbackManager {
    /// Create new callback manager
    pub fn new() -> Self {
        Self { callbacks: Vec::new() }
    }

    /// Add a callback
    pub fn add<C: TrainCallback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Get number of callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Fire train begin event
    pub fn on_train_begin(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.on_train_begin(ctx)?;
        }
        Ok(())
    }

    /// Fire epoch end event
    pub fn on_epoch_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.on_epoch_end(ctx)?;
        }
        Ok(())
    }

    /// Fire train end event
    pub fn on_train_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.on_train_end(ctx)?;
        }
        Ok(())
    }

    /// Fire test begin event
    pub fn on_test_begin(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.on_test_begin(ctx)?;
        }
        Ok(())
    }

    /// Fire test end event
    pub fn on_test_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        for cb in &mut self.callbacks {
            cb.on_test_end(ctx)?;
        }
        Ok(())
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new()
    }
}
