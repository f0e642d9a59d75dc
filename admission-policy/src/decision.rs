//! Admission decision types returned by the controller.

use admission_primitives::Operation;
use serde::{Deserialize, Serialize};

/// Describes the outcome of an admission evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    /// The resource may be persisted.
    Allow,
    /// The resource must not be persisted.
    Deny,
}

/// Which policy a denied request violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// The object carries no usable contact label.
    MissingContactLabel,
    /// At least one container lacks a cpu or memory request.
    MissingResourceRequests,
}

impl Denial {
    /// Renders the operator-facing reason for the given operation.
    #[must_use]
    pub fn message(self, operation: Operation) -> String {
        let verb = operation.verb();
        match self {
            Self::MissingContactLabel => format!(
                "Cannot {verb} this resource. It does not have a valid contact label. \
                 Please add one and try again."
            ),
            Self::MissingResourceRequests => format!(
                "Cannot {verb} this resource. Some containers do not have resource requests \
                 specified. Please add resource requests to every container in the pod spec \
                 and try again."
            ),
        }
    }
}

/// Structured decision emitted by the controller.
///
/// Evaluation may label the object's pod template before the resource
/// request check runs, and that label is kept when the request is then
/// denied. [`contact_propagated`](Self::contact_propagated) reports whether
/// this happened, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionDecision {
    kind: DecisionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    denial: Option<Denial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    #[serde(default)]
    contact_propagated: bool,
}

impl AdmissionDecision {
    /// Returns an allow decision with no additional context.
    #[must_use]
    pub fn allow() -> Self {
        Self {
            kind: DecisionKind::Allow,
            denial: None,
            reason: None,
            contact_propagated: false,
        }
    }

    /// Returns a deny decision carrying the rendered reason for `operation`.
    #[must_use]
    pub fn deny(denial: Denial, operation: Operation) -> Self {
        Self {
            kind: DecisionKind::Deny,
            denial: Some(denial),
            reason: Some(denial.message(operation)),
            contact_propagated: false,
        }
    }

    /// Records whether the contact label was written into a pod template.
    #[must_use]
    pub fn with_contact_propagated(mut self, propagated: bool) -> Self {
        self.contact_propagated = propagated;
        self
    }

    /// Returns the decision kind.
    #[must_use]
    pub fn kind(&self) -> DecisionKind {
        self.kind
    }

    /// Returns true when the resource may be persisted.
    #[must_use]
    pub fn is_allow(&self) -> bool {
        self.kind == DecisionKind::Allow
    }

    /// Returns true when the resource must not be persisted.
    #[must_use]
    pub fn is_deny(&self) -> bool {
        self.kind == DecisionKind::Deny
    }

    /// Returns the violated policy for deny decisions.
    #[must_use]
    pub fn denial(&self) -> Option<Denial> {
        self.denial
    }

    /// Returns the human-readable reason for deny decisions.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Returns true when the object's pod template was labelled during evaluation.
    #[must_use]
    pub fn contact_propagated(&self) -> bool {
        self.contact_propagated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_helpers_work() {
        let allow = AdmissionDecision::allow();
        assert!(allow.is_allow());
        assert!(!allow.is_deny());
        assert_eq!(allow.reason(), None);
        assert!(!allow.contact_propagated());

        let deny = AdmissionDecision::deny(Denial::MissingResourceRequests, Operation::Update)
            .with_contact_propagated(true);
        assert!(deny.is_deny());
        assert_eq!(deny.denial(), Some(Denial::MissingResourceRequests));
        assert!(deny.contact_propagated());
    }

    #[test]
    fn contact_reason_is_verbatim() {
        assert_eq!(
            Denial::MissingContactLabel.message(Operation::Create),
            "Cannot create this resource. It does not have a valid contact label. \
             Please add one and try again."
        );
    }

    #[test]
    fn requests_reason_is_verbatim() {
        assert_eq!(
            Denial::MissingResourceRequests.message(Operation::Update),
            "Cannot update this resource. Some containers do not have resource requests \
             specified. Please add resource requests to every container in the pod spec and \
             try again."
        );
    }

    #[test]
    fn serializes_without_empty_reason() {
        let json = serde_json::to_value(AdmissionDecision::allow()).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "allow", "contact_propagated": false }));
    }
}
