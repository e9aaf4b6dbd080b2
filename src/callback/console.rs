//! Console callback for logging run progress to stdout

use super::traits::{HookContext, TrainCallback};
use crate::error::Result;

/// Prints a one-line summary of every epoch and evaluation run.
///
/// Useful next to [`TrainTestExporter`](crate::TrainTestExporter) when the
/// pushgateway dashboard is not in view.
#[derive(Clone, Debug, Default)]
pub struct ConsoleCallback;

impl ConsoleCallback {
    /// Create a console callback.
    pub fn new() -> Self {
        Self
    }

    fn format_logs(ctx: &HookContext<'_>) -> String {
        ctx.logs
            .iter()
            .map(|(k, v)| format!("{k}: {v:.4}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl TrainCallback for ConsoleCallback {
    fn on_epoch_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        println!("Epoch {}: {}", ctx.epoch + 1, Self::format_logs(ctx));
        Ok(())
    }

    fn on_test_end(&mut self, ctx: &HookContext<'_>) -> Result<()> {
        println!("Evaluation: {}", Self::format_logs(ctx));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ConsoleCallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::MetricLogs;
    use crate::model::WeightSnapshot;

    #[test]
    fn test_format_logs_is_deterministic() {
        let mut logs = MetricLogs::new();
        logs.insert("loss".to_string(), 0.51234);
        logs.insert("accuracy".to_string(), 0.9);
        let model = WeightSnapshot::default();
        let ctx = HookContext::new(0, &logs, &model);
        assert_eq!(ConsoleCallback::format_logs(&ctx), "accuracy: 0.9000, loss: 0.5123");
    }

    #[test]
    fn test_console_hooks_never_fail() {
        let mut cb = ConsoleCallback::new();
        let logs = MetricLogs::new();
        let model = WeightSnapshot::default();
        let ctx = HookContext::new(0, &logs, &model);
        assert!(cb.on_epoch_end(&ctx).is_ok());
        assert!(cb.on_test_end(&ctx).is_ok());
        assert_eq!(cb.name(), "ConsoleCallback");
    }
}
