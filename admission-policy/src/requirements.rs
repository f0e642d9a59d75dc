//! Resource request checks over container lists.

use admission_primitives::{Container, ResourceName};

/// Resource keys every container must request.
pub const REQUIRED_REQUESTS: [&str; 2] = [ResourceName::CPU, ResourceName::MEMORY];

/// A container that is missing one or more required requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingRequests<'a> {
    /// Name of the offending container.
    pub container: &'a str,
    /// Required keys with no request declared.
    pub missing: Vec<&'static str>,
}

/// Returns `true` when every container requests both cpu and memory.
///
/// Only the presence of a request is checked, never its value. An empty list
/// is satisfied.
pub fn all_requests_present<'a, I>(containers: I) -> bool
where
    I: IntoIterator<Item = &'a Container>,
{
    containers.into_iter().all(|container| {
        REQUIRED_REQUESTS
            .iter()
            .all(|key| container.resources.has_request(key))
    })
}

/// Lists the containers that lack a required request, in input order.
pub fn missing_requests<'a, I>(containers: I) -> Vec<MissingRequests<'a>>
where
    I: IntoIterator<Item = &'a Container>,
{
    containers
        .into_iter()
        .filter_map(|container| {
            let missing: Vec<_> = REQUIRED_REQUESTS
                .into_iter()
                .filter(|key| !container.resources.has_request(key))
                .collect();
            (!missing.is_empty()).then(|| MissingRequests {
                container: &container.name,
                missing,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn both(name: &str) -> Container {
        Container::new(name, "image")
            .with_request(ResourceName::CPU, "100")
            .with_request(ResourceName::MEMORY, "200")
    }

    fn cpu_only(name: &str) -> Container {
        Container::new(name, "image").with_request(ResourceName::CPU, "100")
    }

    fn memory_only(name: &str) -> Container {
        Container::new(name, "image").with_request(ResourceName::MEMORY, "200")
    }

    fn bare(name: &str) -> Container {
        Container::new(name, "image")
    }

    #[test]
    fn empty_list_is_satisfied() {
        assert!(all_requests_present(&[]));
        assert!(missing_requests(&[]).is_empty());
    }

    #[test]
    fn all_containers_with_requests() {
        assert!(all_requests_present(&[both("first"), both("second")]));
    }

    #[test]
    fn no_container_has_requests() {
        assert!(!all_requests_present(&[bare("first"), bare("second")]));
    }

    #[test]
    fn mixture_fails() {
        assert!(!all_requests_present(&[both("first"), bare("second")]));
    }

    #[test]
    fn memory_missing_fails() {
        assert!(!all_requests_present(&[cpu_only("first"), both("second")]));
    }

    #[test]
    fn cpu_missing_fails() {
        assert!(!all_requests_present(&[both("first"), memory_only("second")]));
    }

    #[test]
    fn limits_do_not_count_as_requests() {
        let mut container = bare("limited");
        container.resources = container
            .resources
            .with_limit(ResourceName::CPU, "1")
            .with_limit(ResourceName::MEMORY, "1Gi");
        assert!(!all_requests_present([&container]));
    }

    #[test]
    fn missing_requests_names_each_gap() {
        let containers = [both("ok"), cpu_only("no-mem"), bare("nothing")];
        let missing = missing_requests(&containers);
        assert_eq!(
            missing,
            [
                MissingRequests {
                    container: "no-mem",
                    missing: vec!["memory"],
                },
                MissingRequests {
                    container: "nothing",
                    missing: vec!["cpu", "memory"],
                },
            ]
        );
    }
}
