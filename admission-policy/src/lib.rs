//! Admission policies for cluster workloads.
//!
//! [`SpecRequirements`] applies to resources created or updated by interactive
//! human actors and enforces two rules:
//!
//! - the resource carries a `contact` label (key compared without regard to case);
//! - if the resource is a pod or embeds a pod template, every container requests
//!   both `cpu` and `memory`.
//!
//! Along the way the contact label is copied into the embedded pod template so
//! the pods created from it carry it too.

#![warn(missing_docs, clippy::pedantic)]

pub mod actors;
pub mod contracts;
pub mod decision;
pub mod engine;
pub mod inspect;
pub mod integrations;
pub mod introspect;
pub mod propagate;
pub mod requirements;

pub use actors::ActorMatcher;
pub use contracts::AdmissionRequest;
pub use decision::{AdmissionDecision, DecisionKind, Denial};
pub use engine::{AdmissionController, AdmissionError, AdmissionResult, SpecRequirements};
pub use integrations::{ControllerChain, admit_or_forbid};
