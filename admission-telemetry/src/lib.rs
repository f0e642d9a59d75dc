//! Observability utilities for the admission controller.

#![warn(missing_docs, clippy::pedantic)]

pub mod tracing_support;

pub use tracing_support::{LogOutput, TelemetryConfig, init};
