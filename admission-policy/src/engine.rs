//! Admission controller trait and the spec-requirements implementation.

use std::collections::BTreeSet;

use admission_config::{ConfigResult, SpecRequirementsConfig};
use admission_primitives::{AdmissionObject, Operation, Resource};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::actors::ActorMatcher;
use crate::contracts::AdmissionRequest;
use crate::decision::{AdmissionDecision, Denial};
use crate::introspect::{self, ContainerSource};
use crate::{inspect, propagate, requirements};

/// Errors surfaced to hosts that expect admission failures as errors.
#[derive(Debug, Error)]
pub enum AdmissionError {
    /// The controller denied the request.
    #[error("{}", forbidden_message(.resource, .name.as_deref(), .reason))]
    Forbidden {
        /// Qualified resource, e.g. `jobs.batch`; empty when unknown.
        resource: String,
        /// Object name, if the request carried one.
        name: Option<String>,
        /// Reason reported by the controller.
        reason: String,
    },
}

impl AdmissionError {
    /// Builds a forbidden error describing `request`.
    #[must_use]
    pub fn forbidden<O>(request: &AdmissionRequest<O>, reason: impl Into<String>) -> Self {
        Self::Forbidden {
            resource: request.resource().qualified(),
            name: request.name().map(str::to_owned),
            reason: reason.into(),
        }
    }
}

fn forbidden_message(resource: &str, name: Option<&str>, reason: &str) -> String {
    match (resource.is_empty(), name.filter(|n| !n.is_empty())) {
        (true, _) => format!("forbidden: {reason}"),
        (false, None) => format!("{resource} is forbidden: {reason}"),
        (false, Some(name)) => format!("{resource} {name:?} is forbidden: {reason}"),
    }
}

/// Result alias for admission operations.
pub type AdmissionResult<T> = Result<T, AdmissionError>;

/// Trait implemented by admission controllers wired into a host pipeline.
///
/// `admit` may modify the object in `request`; hosts must persist the object
/// they get back from the request, not a copy taken beforehand.
pub trait AdmissionController<O = Resource>: Send + Sync {
    /// Returns the name the controller is registered under.
    fn name(&self) -> &str;

    /// Returns true when the controller inspects requests for `operation`.
    fn handles(&self, operation: Operation) -> bool;

    /// Evaluates the request, possibly modifying its object.
    fn admit(&self, request: &mut AdmissionRequest<O>) -> AdmissionDecision;
}

/// Enforces contact labels and container resource requests on resources
/// created or updated by interactive humans, and copies the contact label
/// into embedded pod templates.
///
/// The controller holds no mutable state; one instance can serve concurrent
/// requests as long as each request owns its object.
#[derive(Debug, Clone)]
pub struct SpecRequirements {
    actors: ActorMatcher,
    operations: BTreeSet<Operation>,
}

impl SpecRequirements {
    /// Name the controller registers under.
    pub const PLUGIN_NAME: &'static str = "SpecRequirements";

    /// Creates a controller with the default configuration: actors whose name
    /// contains `admin`, on create and update.
    #[must_use]
    pub fn new() -> Self {
        Self::build(&SpecRequirementsConfig::default())
    }

    /// Creates a controller from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`admission_config::ConfigError::Invalid`] when the
    /// configuration does not validate.
    pub fn from_config(config: &SpecRequirementsConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &SpecRequirementsConfig) -> Self {
        Self {
            actors: ActorMatcher::from_config(&config.actors),
            operations: config.operations.iter().copied().collect(),
        }
    }

    /// Returns the actor classification in use.
    #[must_use]
    pub fn actors(&self) -> &ActorMatcher {
        &self.actors
    }

    /// Returns true when requests for `operation` are inspected.
    #[must_use]
    pub fn handles(&self, operation: Operation) -> bool {
        self.operations.contains(&operation)
    }

    /// Decides whether the resource in `request` may be persisted.
    ///
    /// When the actor is privileged and the object carries a contact label,
    /// the label is written into the object's pod template (if it has one)
    /// *before* container resource requests are checked. The write is kept
    /// even when the request is then denied; see
    /// [`AdmissionDecision::contact_propagated`].
    pub fn decide<O>(&self, request: &mut AdmissionRequest<O>) -> AdmissionDecision
    where
        O: AdmissionObject,
    {
        let operation = request.operation();
        if !self.handles(operation) {
            debug!(%operation, uid = %request.uid(), "operation not handled by spec requirements");
            return AdmissionDecision::allow();
        }

        if !self.actors.is_privileged(request.user_info()) {
            debug!(
                actor = %request.user_info().name,
                uid = %request.uid(),
                "actor bypasses spec requirements"
            );
            return AdmissionDecision::allow();
        }

        let Some(contact) = inspect::contact_label(request.object().metadata()).map(str::to_owned)
        else {
            info!(
                %operation,
                kind = %request.kind().kind,
                actor = %request.user_info().name,
                uid = %request.uid(),
                "denied: no contact label"
            );
            return AdmissionDecision::deny(Denial::MissingContactLabel, operation);
        };

        let as_pod = request.kind().is_pod();
        let propagated = match introspect::locate_template(request.object_mut()) {
            Some(template) => {
                propagate::propagate_contact(template, &contact);
                true
            }
            None => false,
        };

        if !as_pod && !propagated {
            debug!(kind = %request.kind().kind, uid = %request.uid(), "no pod template, contact label suffices");
            return AdmissionDecision::allow();
        }

        let (containers, source) = introspect::workload_containers(request.object(), as_pod);
        if source == ContainerSource::Absent {
            warn!(
                kind = %request.kind().kind,
                uid = %request.uid(),
                "request kind is Pod but the object carries no pod spec"
            );
        }

        if !requirements::all_requests_present(containers.iter().copied()) {
            let missing = requirements::missing_requests(containers.iter().copied());
            info!(
                %operation,
                kind = %request.kind().kind,
                actor = %request.user_info().name,
                uid = %request.uid(),
                ?missing,
                "denied: containers without resource requests"
            );
            return AdmissionDecision::deny(Denial::MissingResourceRequests, operation)
                .with_contact_propagated(propagated);
        }

        debug!(%contact, propagated, uid = %request.uid(), "spec requirements satisfied");
        AdmissionDecision::allow().with_contact_propagated(propagated)
    }
}

impl Default for SpecRequirements {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: AdmissionObject> AdmissionController<O> for SpecRequirements {
    fn name(&self) -> &str {
        Self::PLUGIN_NAME
    }

    fn handles(&self, operation: Operation) -> bool {
        SpecRequirements::handles(self, operation)
    }

    fn admit(&self, request: &mut AdmissionRequest<O>) -> AdmissionDecision {
        self.decide(request)
    }
}
