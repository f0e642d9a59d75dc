//! Admission request contract supplied by the host pipeline.

use admission_primitives::{
    AdmissionObject, GroupVersionKind, GroupVersionResource, Operation, RequestUid, Resource,
    UserInfo,
};
use serde::{Deserialize, Serialize};

/// A single create or update about to be persisted.
///
/// `kind` is the kind the host reports for the request and is carried
/// separately from the shape of `object`; the policies only use it to decide
/// whether containers are read straight off a pod. The object is held by value
/// so the controller can label its pod template in place; the caller persists
/// whatever [`into_object`](Self::into_object) hands back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionRequest<O = Resource> {
    #[serde(default)]
    uid: RequestUid,
    kind: GroupVersionKind,
    #[serde(default)]
    resource: GroupVersionResource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    operation: Operation,
    user_info: UserInfo,
    object: O,
}

impl<O: AdmissionObject> AdmissionRequest<O> {
    /// Creates a request with a fresh uid and an empty resource descriptor.
    ///
    /// The request name and namespace are taken from the object metadata.
    #[must_use]
    pub fn new(kind: GroupVersionKind, operation: Operation, user_info: UserInfo, object: O) -> Self {
        let name = object.metadata().name.clone();
        let namespace = object.metadata().namespace.clone();
        Self {
            uid: RequestUid::random(),
            kind,
            resource: GroupVersionResource::default(),
            name,
            namespace,
            operation,
            user_info,
            object,
        }
    }
}

impl<O> AdmissionRequest<O> {
    /// Sets the request uid.
    #[must_use]
    pub fn with_uid(mut self, uid: RequestUid) -> Self {
        self.uid = uid;
        self
    }

    /// Sets the resource descriptor.
    #[must_use]
    pub fn with_resource(mut self, resource: GroupVersionResource) -> Self {
        self.resource = resource;
        self
    }

    /// Overrides the object name reported for the request.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the namespace reported for the request.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Returns the request uid.
    #[must_use]
    pub fn uid(&self) -> RequestUid {
        self.uid
    }

    /// Returns the kind the host reported for the object.
    #[must_use]
    pub fn kind(&self) -> &GroupVersionKind {
        &self.kind
    }

    /// Returns the resource descriptor.
    #[must_use]
    pub fn resource(&self) -> &GroupVersionResource {
        &self.resource
    }

    /// Returns the object name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns the operation being admitted.
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the actor submitting the request.
    #[must_use]
    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    /// Returns the object under admission.
    #[must_use]
    pub fn object(&self) -> &O {
        &self.object
    }

    /// Returns the object under admission mutably.
    pub fn object_mut(&mut self) -> &mut O {
        &mut self.object
    }

    /// Consumes the request and returns the object, including any labels the
    /// controller propagated into it.
    #[must_use]
    pub fn into_object(self) -> O {
        self.object
    }
}
