use thiserror::Error;

use crate::form::state::Step;

/// Failures raised by the core form logic. Step validation itself never
/// raises — an invalid step silently refuses to advance — but strict
/// callers can opt into an error via [`crate::form::state::QuoteFormState::try_next_step`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("step `{}` cannot advance: {reason}", step.label())]
    StepBlocked { step: Step, reason: String },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}
