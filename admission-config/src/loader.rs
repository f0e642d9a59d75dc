//! Configuration loaders.

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::{ConfigResult, SpecRequirementsConfig};

/// Environment variable overriding [`crate::ActorConfig::name_marker`].
pub const ACTOR_MARKER_ENV: &str = "SPEC_REQUIREMENTS_ACTOR_MARKER";

/// Parses and validates a JSON configuration document.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Malformed`] for unparsable documents or
/// unknown fields, and [`crate::ConfigError::Invalid`] when validation fails.
pub fn from_json_str(raw: &str) -> ConfigResult<SpecRequirementsConfig> {
    let config: SpecRequirementsConfig = serde_json::from_str(raw)?;
    config.validate()?;
    Ok(config)
}

/// Reads, parses, and validates a JSON configuration file.
///
/// # Errors
///
/// Fails when the file cannot be read or its contents are rejected by
/// [`from_json_str`].
pub fn load_from_path(path: impl AsRef<Path>) -> anyhow::Result<SpecRequirementsConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = from_json_str(&raw)
        .with_context(|| format!("failed to load config file {}", path.display()))?;
    debug!(path = %path.display(), "loaded spec-requirements config");
    Ok(config)
}

/// Applies environment overrides using `lookup` to read variables, then
/// revalidates.
///
/// Pass `|key| std::env::var(key).ok()` to read the process environment.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Invalid`] when the overridden configuration
/// no longer validates.
pub fn apply_env_overrides<F>(config: &mut SpecRequirementsConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(marker) = lookup(ACTOR_MARKER_ENV) {
        debug!(marker = %marker, "actor marker overridden from environment");
        config.actors.name_marker = marker;
    }
    config.validate()
}
