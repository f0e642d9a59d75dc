//! Admission controller enforcing contact labels and container resource
//! requests on cluster workloads.
//!
//! Depend on this crate to pull in the whole controller. The internal crates
//! sit behind feature flags so hosts that only need the data model can leave
//! the rest out.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use admission_primitives as primitives;

/// Admission policies and the controller (enabled by `policy` feature).
#[cfg(feature = "policy")]
pub use admission_policy as policy;

/// Configuration schema and loading (enabled by `config` feature).
#[cfg(feature = "config")]
pub use admission_config as config;

/// Tracing setup for binaries (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use admission_telemetry as telemetry;

/// Builds the controller with its default configuration.
#[cfg(feature = "policy")]
#[must_use]
pub fn controller() -> admission_policy::SpecRequirements {
    admission_policy::SpecRequirements::new()
}
