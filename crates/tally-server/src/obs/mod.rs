//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics and rendered by the `/metrics` handler. The
//! snapshot save failure counter is the second half of the "log and count"
//! channel for persistence errors.

pub mod metrics;
