//! Prometheus metrics for requests, tokens and batches.

pub mod metrics;
