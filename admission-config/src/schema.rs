//! Strongly typed configuration schema.

use admission_primitives::Operation;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// How the actor name is compared against [`ActorConfig::name_marker`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatch {
    /// The name contains the marker anywhere. Matches `admin`, `sysadmin`,
    /// and `administrator` alike.
    #[default]
    Substring,
    /// The name starts with the marker.
    Prefix,
    /// The name equals the marker.
    Exact,
}

/// Which actors count as interactive humans subject to the policies.
///
/// An actor is privileged when its name matches the marker under
/// `name_match`, or when it belongs to any of `privileged_groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActorConfig {
    /// Marker looked for in the actor name. Blank disables name matching.
    pub name_marker: String,
    /// Comparison applied to the actor name.
    pub name_match: NameMatch,
    /// Groups whose members are always privileged.
    pub privileged_groups: Vec<String>,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            name_marker: "admin".into(),
            name_match: NameMatch::Substring,
            privileged_groups: Vec::new(),
        }
    }
}

/// Top-level controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecRequirementsConfig {
    /// Actor classification.
    pub actors: ActorConfig,
    /// Operations the controller inspects; everything else is allowed untouched.
    pub operations: Vec<Operation>,
}

impl Default for SpecRequirementsConfig {
    fn default() -> Self {
        Self {
            actors: ActorConfig::default(),
            operations: vec![Operation::Create, Operation::Update],
        }
    }
}

impl SpecRequirementsConfig {
    /// Checks that the configuration can classify actors and handles at least
    /// one operation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no actor could ever be privileged
    /// or when no operation is handled.
    pub fn validate(&self) -> ConfigResult<()> {
        let groups_listed = self
            .actors
            .privileged_groups
            .iter()
            .any(|group| !group.trim().is_empty());
        if self.actors.name_marker.trim().is_empty() && !groups_listed {
            return Err(ConfigError::Invalid {
                field: "actors.name_marker",
                reason: "must be set unless actors.privileged_groups lists a group",
            });
        }

        if self.operations.is_empty() {
            return Err(ConfigError::Invalid {
                field: "operations",
                reason: "at least one operation must be handled",
            });
        }

        Ok(())
    }
}
