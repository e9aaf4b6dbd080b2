//! Callback system for training and evaluation lifecycle events
//!
//! Provides extensible hooks for loop events:
//! - `on_train_begin` / `on_epoch_end` / `on_train_end`
//! - `on_test_begin` / `on_test_end`
//!
//! # Example
//!
//! ```rust
//! use pasarela::callback::{HookContext, TrainCallback};
//!
//! struct PrintCallback;
//!
//! impl TrainCallback for PrintCallback {
//!     fn on_epoch_end(&mut self, ctx: &HookContext<'_>) -> pasarela::Result<()> {
//!         println!("Epoch {} finished with {} logged metrics", ctx.epoch, ctx.logs.len());
//!         Ok(())
//!     }
//! }
//! ```

mod console;
mod manager;
mod traits;

// Re-export all public types
pub use console::ConsoleCallback;
pub use manager::CallbackManager;
pub use traits::{HookContext, MetricLogs, TrainCallback};
