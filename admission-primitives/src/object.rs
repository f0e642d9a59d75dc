//! Capability trait for resources submitted to admission.

use crate::{ObjectMeta, PodSpec, PodTemplateSpec};

/// A resource the admission controller can inspect.
///
/// Every resource exposes its metadata. Kinds that produce pods opt into
/// further inspection by overriding [`pod_template`](Self::pod_template) and
/// [`pod_template_mut`](Self::pod_template_mut) (workload controllers such as
/// deployments and jobs) or [`pod_spec`](Self::pod_spec) (bare pods). A kind
/// added later only has to implement this trait to be covered; nothing in the
/// policy code enumerates kinds.
pub trait AdmissionObject {
    /// Returns the object metadata.
    fn metadata(&self) -> &ObjectMeta;

    /// Returns the pod spec of a bare pod.
    fn pod_spec(&self) -> Option<&PodSpec> {
        None
    }

    /// Returns the embedded pod template, if the kind carries one.
    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        None
    }

    /// Returns the embedded pod template mutably, if the kind carries one.
    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        None
    }
}

impl<T: AdmissionObject + ?Sized> AdmissionObject for Box<T> {
    fn metadata(&self) -> &ObjectMeta {
        (**self).metadata()
    }

    fn pod_spec(&self) -> Option<&PodSpec> {
        (**self).pod_spec()
    }

    fn pod_template(&self) -> Option<&PodTemplateSpec> {
        (**self).pod_template()
    }

    fn pod_template_mut(&mut self) -> Option<&mut PodTemplateSpec> {
        (**self).pod_template_mut()
    }
}
