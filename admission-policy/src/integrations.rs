//! Adapters for host pipelines that chain controllers or expect errors.

use admission_primitives::Resource;
use tracing::debug;

use crate::contracts::AdmissionRequest;
use crate::decision::AdmissionDecision;
use crate::engine::{AdmissionController, AdmissionError, AdmissionResult};

/// Runs `controller` if it handles the request's operation and converts a
/// denial into [`AdmissionError::Forbidden`].
///
/// # Errors
///
/// Returns [`AdmissionError::Forbidden`] carrying the controller's reason when
/// the request is denied.
pub fn admit_or_forbid<C, O>(controller: &C, request: &mut AdmissionRequest<O>) -> AdmissionResult<()>
where
    C: AdmissionController<O> + ?Sized,
{
    if !controller.handles(request.operation()) {
        return Ok(());
    }

    let decision = controller.admit(request);
    if decision.is_deny() {
        let reason = decision.reason().unwrap_or("denied");
        return Err(AdmissionError::forbidden(request, reason));
    }
    Ok(())
}

/// Ordered list of controllers evaluated one after another.
///
/// Each controller sees the object as modified by the ones before it.
/// Evaluation stops at the first denial.
pub struct ControllerChain<O = Resource> {
    controllers: Vec<Box<dyn AdmissionController<O>>>,
}

impl<O> ControllerChain<O> {
    /// Creates an empty chain, which allows everything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            controllers: Vec::new(),
        }
    }

    /// Appends a controller and returns the updated chain.
    #[must_use]
    pub fn with(mut self, controller: impl AdmissionController<O> + 'static) -> Self {
        self.controllers.push(Box::new(controller));
        self
    }

    /// Returns the registered controller names in evaluation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.controllers.iter().map(|c| c.name()).collect()
    }

    /// Evaluates every controller that handles the request's operation.
    pub fn admit(&self, request: &mut AdmissionRequest<O>) -> AdmissionDecision {
        let mut propagated = false;
        for controller in &self.controllers {
            if !controller.handles(request.operation()) {
                continue;
            }
            let decision = controller.admit(request);
            propagated |= decision.contact_propagated();
            if decision.is_deny() {
                debug!(controller = controller.name(), uid = %request.uid(), "controller denied request");
                return decision.with_contact_propagated(propagated);
            }
        }
        AdmissionDecision::allow().with_contact_propagated(propagated)
    }
}

impl<O> Default for ControllerChain<O> {
    fn default() -> Self {
        Self::new()
    }
}
