//! Locating pod templates and container lists inside admitted objects.
//!
//! The lookup goes through [`AdmissionObject`], which each resource kind
//! implements for itself, so nothing here lists the kinds that embed a pod
//! template.

use admission_primitives::{AdmissionObject, Container, PodTemplateSpec};

/// Returns the pod template embedded in `object`, or `None` for kinds that
/// carry none (pods, services, config maps, ...).
///
/// The template is borrowed from the object, so edits made through it are
/// persisted with the object.
pub fn locate_template<O>(object: &mut O) -> Option<&mut PodTemplateSpec>
where
    O: AdmissionObject + ?Sized,
{
    object.pod_template_mut()
}

/// Where the containers subject to the request check were read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerSource {
    /// The object's own pod spec.
    PodSpec,
    /// The embedded pod template.
    Template,
    /// The object exposed neither, so there is nothing to check.
    Absent,
}

/// Collects init containers followed by regular containers.
///
/// With `as_pod` set the containers are read from the object's own pod spec,
/// otherwise from its embedded pod template.
pub fn workload_containers<O>(object: &O, as_pod: bool) -> (Vec<&Container>, ContainerSource)
where
    O: AdmissionObject + ?Sized,
{
    let (spec, source) = if as_pod {
        (object.pod_spec(), ContainerSource::PodSpec)
    } else {
        (
            object.pod_template().map(|template| &template.spec),
            ContainerSource::Template,
        )
    };

    match spec {
        Some(spec) => (spec.all_containers().collect(), source),
        None => (Vec::new(), ContainerSource::Absent),
    }
}

#[cfg(test)]
mod tests {
    use admission_primitives::{
        ConfigMap, Container, Deployment, DeploymentSpec, Job, JobSpec, ObjectMeta, Pod, PodSpec,
        Resource, Service, ServiceSpec,
    };

    use super::*;

    fn template(name: &str, container: &str) -> PodTemplateSpec {
        PodTemplateSpec::new(PodSpec::with_containers(vec![Container::new(container, "image")]))
            .with_metadata(ObjectMeta::named(name))
    }

    #[test]
    fn finds_job_template() {
        let expected = template("jobpod", "jobcontainer1");
        let mut job = Resource::from(Job {
            metadata: ObjectMeta::named("job"),
            spec: JobSpec {
                template: expected.clone(),
                ..JobSpec::default()
            },
        });

        assert_eq!(locate_template(&mut job).as_deref(), Some(&expected));
    }

    #[test]
    fn finds_deployment_template() {
        let expected = template("deploymentpod", "deploymentcontainer1");
        let mut deployment = Deployment {
            metadata: ObjectMeta::named("deployment"),
            spec: DeploymentSpec {
                template: expected.clone(),
                ..DeploymentSpec::default()
            },
        };

        let found = locate_template(&mut deployment).expect("template");
        assert_eq!(*found, expected);
    }

    #[test]
    fn pod_has_no_template() {
        let mut pod = Resource::from(Pod {
            metadata: ObjectMeta::named("pod"),
            spec: PodSpec::with_containers(vec![Container::new("c", "image")]),
        });
        assert!(locate_template(&mut pod).is_none());
    }

    #[test]
    fn service_with_selector_has_no_template() {
        let mut service = Resource::from(Service {
            metadata: ObjectMeta::named("service"),
            spec: ServiceSpec {
                selector: Some(
                    [("app", "search"), ("project", "infra")]
                        .into_iter()
                        .map(|(k, v)| (k.to_owned(), v.to_owned()))
                        .collect(),
                ),
                ports: Vec::new(),
            },
        });
        assert!(locate_template(&mut service).is_none());
    }

    #[test]
    fn located_template_is_the_owned_one() {
        let mut job = Job::default();
        locate_template(&mut job)
            .expect("template")
            .metadata
            .name = Some("renamed".into());
        assert_eq!(job.spec.template.metadata.name.as_deref(), Some("renamed"));
    }

    #[test]
    fn pod_containers_come_from_pod_spec() {
        let pod = Pod {
            metadata: ObjectMeta::named("pod"),
            spec: PodSpec {
                init_containers: vec![Container::new("init", "image")],
                containers: vec![Container::new("main", "image")],
            },
        };
        let (containers, source) = workload_containers(&pod, true);
        let names: Vec<_> = containers.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["init", "main"]);
        assert_eq!(source, ContainerSource::PodSpec);
    }

    #[test]
    fn template_containers_include_init_containers() {
        let mut job = Job::default();
        job.spec.template.spec = PodSpec {
            init_containers: vec![Container::new("fetch", "image")],
            containers: vec![Container::new("run", "image")],
        };
        let (containers, source) = workload_containers(&job, false);
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[0].name, "fetch");
        assert_eq!(source, ContainerSource::Template);
    }

    #[test]
    fn mismatched_shape_yields_no_containers() {
        let config_map = ConfigMap::default();
        let (containers, source) = workload_containers(&config_map, true);
        assert!(containers.is_empty());
        assert_eq!(source, ContainerSource::Absent);

        let (containers, source) = workload_containers(&config_map, false);
        assert!(containers.is_empty());
        assert_eq!(source, ContainerSource::Absent);
    }
}
