//! Object metadata and request envelope descriptors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label mapping attached to objects and pod templates.
///
/// Iteration is in byte-wise key order.
pub type Labels = BTreeMap<String, String>;

/// Metadata shared by every resource and by embedded pod templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Object name, unique within its namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Namespace the object lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Label mapping. `None` until the first label is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Labels>,
    /// Free-form annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
}

impl ObjectMeta {
    /// Creates metadata carrying only a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Adds a label and returns the updated metadata.
    #[must_use]
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels
            .get_or_insert_with(Labels::new)
            .insert(key.into(), value.into());
        self
    }

    /// Iterates over the labels, yielding nothing when no mapping exists.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.labels
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the value stored under exactly `key`.
    #[must_use]
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.as_ref()?.get(key).map(String::as_str)
    }
}

/// Kind descriptor the host attaches to an admission request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupVersionKind {
    /// API group; empty for the core group.
    pub group: String,
    /// API version.
    pub version: String,
    /// Kind name, e.g. `Pod` or `Deployment`.
    pub kind: String,
}

impl GroupVersionKind {
    /// Kind name of bare pods.
    pub const POD: &'static str = "Pod";

    /// Creates a kind descriptor.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Creates a descriptor in the core group with version `v1`.
    #[must_use]
    pub fn core(kind: impl Into<String>) -> Self {
        Self::new("", "v1", kind)
    }

    /// Returns `true` when the kind is exactly `Pod`.
    #[must_use]
    pub fn is_pod(&self) -> bool {
        self.kind == Self::POD
    }
}

/// Resource descriptor the host attaches to an admission request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupVersionResource {
    /// API group; empty for the core group.
    pub group: String,
    /// API version.
    pub version: String,
    /// Plural resource name, e.g. `pods` or `deployments`.
    pub resource: String,
}

impl GroupVersionResource {
    /// Creates a resource descriptor.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            resource: resource.into(),
        }
    }

    /// Renders `resource.group`, or just `resource` for the core group.
    #[must_use]
    pub fn qualified(&self) -> String {
        if self.group.is_empty() {
            self.resource.clone()
        } else {
            format!("{}.{}", self.resource, self.group)
        }
    }
}

/// Identity of the actor submitting the request, as authenticated by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    /// Actor name, e.g. `admin` or `kubelet`.
    #[serde(rename = "username")]
    pub name: String,
    /// Stable identifier for the actor, if the host provides one.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
    /// Groups the actor belongs to.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

impl UserInfo {
    /// Creates an actor identity with the supplied name and no groups.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a group membership and returns the updated identity.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }
}
