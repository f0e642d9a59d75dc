//! Configuration management for the spec-requirements admission controller.
//!
//! The schema decides which actors the policies apply to and which operations
//! are inspected. Every field has a default matching the controller's
//! historical behaviour, so an empty document is a valid configuration.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ACTOR_MARKER_ENV, apply_env_overrides, from_json_str, load_from_path};
pub use schema::{ActorConfig, NameMatch, SpecRequirementsConfig};
