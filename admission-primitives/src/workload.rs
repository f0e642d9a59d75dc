//! Container and pod shapes carried by workload resources.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ObjectMeta;

/// Name of a compute resource a container can request, e.g. `cpu`.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceName(String);

impl ResourceName {
    /// Reserved key for CPU requests.
    pub const CPU: &'static str = "cpu";
    /// Reserved key for memory requests.
    pub const MEMORY: &'static str = "memory";
}

impl Borrow<str> for ResourceName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ResourceName {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

/// Amount of a resource in its textual form, e.g. `100m` or `256Mi`.
///
/// The admission policies only test for presence, so the value is kept as written.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(String);

impl From<&str> for Quantity {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

/// Requests and limits declared by a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    /// Minimum amounts the container needs.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: BTreeMap<ResourceName, Quantity>,
    /// Maximum amounts the container may use.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: BTreeMap<ResourceName, Quantity>,
}

impl ResourceRequirements {
    /// Adds a request and returns the updated requirements.
    #[must_use]
    pub fn with_request(mut self, name: impl Into<ResourceName>, quantity: impl Into<Quantity>) -> Self {
        self.requests.insert(name.into(), quantity.into());
        self
    }

    /// Adds a limit and returns the updated requirements.
    #[must_use]
    pub fn with_limit(mut self, name: impl Into<ResourceName>, quantity: impl Into<Quantity>) -> Self {
        self.limits.insert(name.into(), quantity.into());
        self
    }

    /// Returns `true` when a request is declared under `name`, whatever its value.
    #[must_use]
    pub fn has_request(&self, name: &str) -> bool {
        self.requests.contains_key(name)
    }
}

/// A single container in a pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Container name, unique within the pod.
    pub name: String,
    /// Image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Declared compute resources.
    #[serde(default)]
    pub resources: ResourceRequirements,
}

impl Container {
    /// Creates a container with the given name and image and no resources.
    #[must_use]
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image: Some(image.into()),
            resources: ResourceRequirements::default(),
        }
    }

    /// Adds a resource request and returns the updated container.
    #[must_use]
    pub fn with_request(mut self, name: impl Into<ResourceName>, quantity: impl Into<Quantity>) -> Self {
        self.resources = self.resources.with_request(name, quantity);
        self
    }
}

/// Pod specification: the containers that make up a pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    /// Containers run to completion before the regular containers start.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub init_containers: Vec<Container>,
    /// Regular containers.
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl PodSpec {
    /// Creates a pod spec with the given regular containers.
    #[must_use]
    pub fn with_containers(containers: Vec<Container>) -> Self {
        Self {
            init_containers: Vec::new(),
            containers,
        }
    }

    /// Iterates over init containers followed by regular containers.
    pub fn all_containers(&self) -> impl Iterator<Item = &Container> {
        self.init_containers.iter().chain(&self.containers)
    }
}

/// Pod template embedded in workload resources such as deployments and jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodTemplateSpec {
    /// Metadata stamped onto every pod created from the template.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Pod specification.
    #[serde(default)]
    pub spec: PodSpec,
}

impl PodTemplateSpec {
    /// Creates a template with default metadata and the given pod spec.
    #[must_use]
    pub fn new(spec: PodSpec) -> Self {
        Self {
            metadata: ObjectMeta::default(),
            spec,
        }
    }

    /// Replaces the template metadata and returns the updated template.
    #[must_use]
    pub fn with_metadata(mut self, metadata: ObjectMeta) -> Self {
        self.metadata = metadata;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_containers_lists_init_first() {
        let spec = PodSpec {
            init_containers: vec![Container::new("migrate", "db-tools")],
            containers: vec![Container::new("app", "app"), Container::new("proxy", "envoy")],
        };
        let names: Vec<_> = spec.all_containers().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["migrate", "app", "proxy"]);
    }

    #[test]
    fn has_request_ignores_value() {
        let resources = ResourceRequirements::default()
            .with_request(ResourceName::CPU, "0")
            .with_limit(ResourceName::MEMORY, "1Gi");
        assert!(resources.has_request(ResourceName::CPU));
        assert!(!resources.has_request(ResourceName::MEMORY));
    }

    #[test]
    fn reads_container_requests_from_json() {
        let container: Container = serde_json::from_value(serde_json::json!({
            "name": "app",
            "image": "nginx",
            "resources": { "requests": { "cpu": "100m", "memory": "128Mi" } }
        }))
        .unwrap();
        assert!(container.resources.has_request("cpu"));
        assert!(container.resources.has_request("memory"));
        assert_eq!(container.resources.requests["memory"].0.as_str(), "128Mi");
    }
}
