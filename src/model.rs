//! Model inspection seam.
//!
//! The exporter never depends on a concrete model type. Training loops
//! implement [`ModelVitals`] for whatever they train; [`WeightSnapshot`] is a
//! ready-made implementation for loops that can hand over flattened tensors.

/// What the exporter needs to know about a model.
pub trait ModelVitals {
    /// Total number of model parameters, trainable and non-trainable.
    fn parameter_count(&self) -> u64;

    /// Visit each trainable weight tensor as a flattened slice.
    fn visit_trainable_weights(&self, visit: &mut dyn FnMut(&[f32]));
}

/// An owned, flattened copy of a model's trainable weights.
///
/// The parameter count defaults to the number of trainable elements; when the
/// model also has non-trainable parameters, override it with
/// [`with_parameter_count`](Self::with_parameter_count).
#[derive(Debug, Clone, Default)]
pub struct WeightSnapshot {
    parameter_count: u64,
    tensors: Vec<Vec<f32>>,
}

impl WeightSnapshot {
    /// Build a snapshot from flattened trainable tensors.
    pub fn from_tensors(tensors: Vec<Vec<f32>>) -> Self {
        let parameter_count = tensors.iter().map(|t| t.len() as u64).sum();
        Self { parameter_count, tensors }
    }

    /// Override the total parameter count.
    pub fn with_parameter_count(mut self, count: u64) -> Self {
        self.parameter_count = count;
        self
    }
}

impl ModelVitals for WeightSnapshot {
    fn parameter_count(&self) -> u64 {
        self.parameter_count
    }

    fn visit_trainable_weights(&self, visit: &mut dyn FnMut(&[f32])) {
        for tensor in &self.tensors {
            visit(tensor);
        }
    }
}
