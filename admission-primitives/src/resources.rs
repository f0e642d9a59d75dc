//! Supported resource kinds and the union over them.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{AdmissionObject, Labels, ObjectMeta, PodSpec, PodTemplateSpec};

/// Implements the metadata accessor of [`AdmissionObject`] for a kind with a
/// `metadata` field, plus any extra methods given in the block.
macro_rules! admission_object {
    ($kind:ty { $($extra:tt)* }) => {
        impl AdmissionObject for $kind {
            fn metadata(&self) -> &ObjectMeta {
                &self.metadata
            }

            $($extra)*
        }
    };
}

/// Implements template access for kinds whose spec owns a `template` field.
macro_rules! templated_object {
    ($kind:ty) => {
        admission_object!($kind {
            fn pod_template(&self) -> Option<&PodTemplateSpec> {
                Some(&self.spec.template)
            }

            fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
                Some(&mut self.spec.template)
            }
        });
    };
}

/// Label query used by workload controllers to find their pods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Exact-match label requirements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<Labels>,
}

/// A bare pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pod {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Pod specification.
    #[serde(default)]
    pub spec: PodSpec,
}

admission_object!(Pod {
    fn pod_spec(&self) -> Option<&PodSpec> {
        Some(&self.spec)
    }
});

/// Deployment specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSpec {
    /// Desired pod count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Pods managed by the deployment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Template for the managed pods.
    #[serde(default)]
    pub template: PodTemplateSpec,
}

/// A deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Deployment specification.
    #[serde(default)]
    pub spec: DeploymentSpec,
}

templated_object!(Deployment);

/// Replica set specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicaSetSpec {
    /// Desired pod count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Pods managed by the replica set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Template for the managed pods.
    #[serde(default)]
    pub template: PodTemplateSpec,
}

/// A replica set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaSet {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Replica set specification.
    #[serde(default)]
    pub spec: ReplicaSetSpec,
}

templated_object!(ReplicaSet);

/// Stateful set specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatefulSetSpec {
    /// Desired pod count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Governing service name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Pods managed by the stateful set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Template for the managed pods.
    #[serde(default)]
    pub template: PodTemplateSpec,
}

/// A stateful set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatefulSet {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Stateful set specification.
    #[serde(default)]
    pub spec: StatefulSetSpec,
}

templated_object!(StatefulSet);

/// Daemon set specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetSpec {
    /// Pods managed by the daemon set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
    /// Template for the managed pods.
    #[serde(default)]
    pub template: PodTemplateSpec,
}

/// A daemon set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaemonSet {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Daemon set specification.
    #[serde(default)]
    pub spec: DaemonSetSpec,
}

templated_object!(DaemonSet);

/// Job specification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSpec {
    /// Maximum pods running at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallelism: Option<i32>,
    /// Successful pods required to finish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completions: Option<i32>,
    /// Retries before the job is marked failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_limit: Option<i32>,
    /// Template for the job's pods.
    #[serde(default)]
    pub template: PodTemplateSpec,
}

/// A run-to-completion job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Job specification.
    #[serde(default)]
    pub spec: JobSpec,
}

templated_object!(Job);

/// Replication controller specification. The template is optional here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationControllerSpec {
    /// Desired pod count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,
    /// Exact-match pod selector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Labels>,
    /// Template for the managed pods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
}

/// A replication controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationController {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Replication controller specification.
    #[serde(default)]
    pub spec: ReplicationControllerSpec,
}

admission_object!(ReplicationController {
    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        self.spec.template.as_ref()
    }

    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.spec.template.as_mut()
    }
});

/// A port exposed by a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    /// Port name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Port number exposed by the service.
    pub port: u16,
}

/// Service specification. Carries a selector but no pod template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    /// Pods receiving traffic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Labels>,
    /// Exposed ports.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ServicePort>,
}

/// A service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Service specification.
    #[serde(default)]
    pub spec: ServiceSpec,
}

admission_object!(Service {});

/// A config map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigMap {
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Configuration entries.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, String>,
}

admission_object!(ConfigMap {});

/// Any other kind. Only the metadata is interpreted; the remaining fields
/// are kept so the object serializes back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericObject {
    /// Kind name as sent by the host, e.g. `Secret`.
    pub kind: String,
    /// API group and version, e.g. `networking.k8s.io/v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Object metadata.
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Every other top-level field, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl GenericObject {
    /// Creates an object of `kind` carrying only metadata.
    #[must_use]
    pub fn new(kind: impl Into<String>, metadata: ObjectMeta) -> Self {
        Self {
            kind: kind.into(),
            metadata,
            ..Self::default()
        }
    }
}

admission_object!(GenericObject {});

/// Declares [`Resource`] and its serde helpers from one list of modelled kinds.
macro_rules! resource_union {
    ($($kind:ident => $doc:literal),* $(,)?) => {
        /// A resource submitted to admission.
        ///
        /// Documents are dispatched on their `kind` field. Kinds without a
        /// dedicated type land in [`Resource::Other`], so every object can be
        /// inspected for its labels. A document naming a modelled kind must
        /// parse as that kind.
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $(
                #[doc = $doc]
                $kind($kind),
            )*
            /// A kind with no dedicated type.
            Other(GenericObject),
        }

        #[derive(Deserialize)]
        #[serde(tag = "kind")]
        enum Modelled {
            $($kind($kind),)*
        }

        #[derive(Serialize)]
        #[serde(tag = "kind")]
        enum ModelledRef<'a> {
            $($kind(&'a $kind),)*
        }

        impl Resource {
            /// Kind names that deserialize into a dedicated variant.
            pub const MODELLED_KINDS: &'static [&'static str] = &[$(stringify!($kind)),*];

            /// Returns the kind name of the wrapped resource.
            #[must_use]
            pub fn kind(&self) -> &str {
                match self {
                    $(Self::$kind(_) => stringify!($kind),)*
                    Self::Other(object) => &object.kind,
                }
            }

            fn as_object(&self) -> &dyn AdmissionObject {
                match self {
                    $(Self::$kind(r) => r,)*
                    Self::Other(r) => r,
                }
            }

            fn as_object_mut(&mut self) -> &mut dyn AdmissionObject {
                match self {
                    $(Self::$kind(r) => r,)*
                    Self::Other(r) => r,
                }
            }
        }

        impl From<Modelled> for Resource {
            fn from(value: Modelled) -> Self {
                match value {
                    $(Modelled::$kind(r) => Self::$kind(r),)*
                }
            }
        }

        impl Serialize for Resource {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $(Self::$kind(r) => ModelledRef::$kind(r).serialize(serializer),)*
                    Self::Other(object) => object.serialize(serializer),
                }
            }
        }

        $(
            impl From<$kind> for Resource {
                fn from(value: $kind) -> Self {
                    Self::$kind(value)
                }
            }
        )*
    };
}

resource_union!(
    Pod => "A bare pod.",
    Deployment => "A deployment.",
    ReplicaSet => "A replica set.",
    StatefulSet => "A stateful set.",
    DaemonSet => "A daemon set.",
    Job => "A job.",
    ReplicationController => "A replication controller.",
    Service => "A service.",
    ConfigMap => "A config map.",
);

impl<'de> Deserialize<'de> for Resource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        let kind = document
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| D::Error::missing_field("kind"))?;

        if Self::MODELLED_KINDS.contains(&kind) {
            Modelled::deserialize(document)
                .map(Self::from)
                .map_err(D::Error::custom)
        } else {
            GenericObject::deserialize(document)
                .map(Self::Other)
                .map_err(D::Error::custom)
        }
    }
}

impl From<GenericObject> for Resource {
    fn from(value: GenericObject) -> Self {
        Self::Other(value)
    }
}

impl AdmissionObject for Resource {
    fn metadata(&self) -> &ObjectMeta {
        self.as_object().metadata()
    }

    fn pod_spec(&self) -> Option<&PodSpec> {
        self.as_object().pod_spec()
    }

    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        self.as_object().pod_template()
    }

    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        self.as_object_mut().pod_template_mut()
    }
}
