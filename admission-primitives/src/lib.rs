//! Core shared types for the spec-requirements admission controller.
//!
//! The types here model just enough of a cluster resource for the admission
//! policies to work with: object metadata and labels, container resource
//! requests, embedded pod templates, and the request envelope fields supplied
//! by the host pipeline.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod meta;
mod object;
mod operation;
mod resources;
mod workload;

/// Error type for parsing request envelope fields.
pub use error::Error;
/// Unique identifier for a single admission request.
pub use ids::RequestUid;
/// Object metadata, labels, and type descriptors.
pub use meta::{GroupVersionKind, GroupVersionResource, Labels, ObjectMeta, UserInfo};
/// Capability trait implemented by every resource the controller can inspect.
pub use object::AdmissionObject;
/// Admission operations supplied by the host pipeline.
pub use operation::Operation;
/// Supported resource kinds and the union over them.
pub use resources::{
    ConfigMap, DaemonSet, DaemonSetSpec, Deployment, DeploymentSpec, GenericObject, Job, JobSpec,
    LabelSelector, Pod, ReplicaSet, ReplicaSetSpec, ReplicationController,
    ReplicationControllerSpec, Resource, Service, ServicePort, ServiceSpec, StatefulSet,
    StatefulSetSpec,
};
/// Container and pod shapes carried by workload resources.
pub use workload::{
    Container, PodSpec, PodTemplateSpec, Quantity, ResourceName, ResourceRequirements,
};
