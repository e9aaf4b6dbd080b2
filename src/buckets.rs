//! Histogram bucket presets for model-weight distributions.
//!
//! Weight tensors of well-conditioned models tend to stay close to zero, so
//! both presets are symmetric around it. Pick the narrow preset for models
//! with aggressive regularization; pass custom bounds through
//! [`ExporterConfig::with_weight_buckets`](crate::ExporterConfig::with_weight_buckets)
//! for anything else.

/// Weight buckets spanning -1.0 to 1.0 in steps of 0.1.
pub const WEIGHT_BUCKETS_1_0: [f64; 21] = [
    -1.0, -0.9, -0.8, -0.7, -0.6, -0.5, -0.4, -0.3, -0.2, -0.1, 0.0, 0.1, 0.2, 0.3, 0.4, 0.5,
    0.6, 0.7, 0.8, 0.9, 1.0,
];

/// Weight buckets spanning -0.30 to 0.30 in steps of 0.05.
pub const WEIGHT_BUCKETS_0_3: [f64; 13] = [
    -0.30, -0.25, -0.20, -0.15, -0.10, -0.05, 0.00, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30,
];
