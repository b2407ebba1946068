//! The quote form state machine: one owning [`state::QuoteFormState`] per
//! quoting session, mutated only through the named operations in
//! [`transitions`], with per-step validity tracked centrally so the step
//! orchestration needs no step-local knowledge.

pub mod commercial;
pub mod contacts;
pub mod feasibility_merge;
pub mod service_needs;
pub mod state;
pub mod summary;
pub mod technical;
pub mod transitions;
