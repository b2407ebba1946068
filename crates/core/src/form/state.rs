use serde::{Deserialize, Serialize};

use crate::form::commercial::CommercialProposal;
use crate::form::contacts::ContactInformation;
use crate::form::service_needs::ServiceNeeds;
use crate::form::summary::RequestedDate;
use crate::form::technical::TechnicalFeasibility;

/// The five wizard steps, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    ServiceNeeds,
    TechnicalFeasibility,
    CommercialProposal,
    ContactInformation,
    SummarySignature,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::ServiceNeeds,
        Step::TechnicalFeasibility,
        Step::CommercialProposal,
        Step::ContactInformation,
        Step::SummarySignature,
    ];

    pub const FIRST: Step = Step::ServiceNeeds;
    pub const LAST: Step = Step::SummarySignature;

    pub fn index(self) -> usize {
        match self {
            Self::ServiceNeeds => 0,
            Self::TechnicalFeasibility => 1,
            Self::CommercialProposal => 2,
            Self::ContactInformation => 3,
            Self::SummarySignature => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ServiceNeeds => "Service Needs",
            Self::TechnicalFeasibility => "Technical Feasibility",
            Self::CommercialProposal => "Commercial Proposal",
            Self::ContactInformation => "Contact Information",
            Self::SummarySignature => "Summary & Signature",
        }
    }
}

/// Per-step validation state: `valid` is recomputed from data whenever the
/// step's inputs change; `touched` records that the user interacted at
/// least once. Error display is gated on `touched && !valid`, while step
/// advancement looks only at `valid`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepValidation {
    pub valid: bool,
    pub touched: bool,
}

impl StepValidation {
    fn valid_untouched() -> Self {
        Self { valid: true, touched: false }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub service_needs: StepValidation,
    pub technical_feasibility: StepValidation,
    pub commercial_proposal: StepValidation,
    pub contact_information: StepValidation,
    pub summary_signature: StepValidation,
}

impl Default for FormValidation {
    fn default() -> Self {
        // Steps without required fields start (and stay) valid; the two
        // gated steps start invalid until their data satisfies the rules.
        Self {
            service_needs: StepValidation::default(),
            technical_feasibility: StepValidation::default(),
            commercial_proposal: StepValidation::valid_untouched(),
            contact_information: StepValidation::valid_untouched(),
            summary_signature: StepValidation::valid_untouched(),
        }
    }
}

impl FormValidation {
    pub fn step(&self, step: Step) -> StepValidation {
        match step {
            Step::ServiceNeeds => self.service_needs,
            Step::TechnicalFeasibility => self.technical_feasibility,
            Step::CommercialProposal => self.commercial_proposal,
            Step::ContactInformation => self.contact_information,
            Step::SummarySignature => self.summary_signature,
        }
    }

    pub fn step_mut(&mut self, step: Step) -> &mut StepValidation {
        match step {
            Step::ServiceNeeds => &mut self.service_needs,
            Step::TechnicalFeasibility => &mut self.technical_feasibility,
            Step::CommercialProposal => &mut self.commercial_proposal,
            Step::ContactInformation => &mut self.contact_information,
            Step::SummarySignature => &mut self.summary_signature,
        }
    }
}

/// The in-progress quote form. One instance per quoting session, created
/// on entry to the create/edit flow and discarded on exit; every mutation
/// goes through the named operations in `transitions.rs`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteFormState {
    pub current_step: Step,
    pub service_needs: ServiceNeeds,
    pub technical_feasibility: TechnicalFeasibility,
    pub commercial_proposal: CommercialProposal,
    pub contact_information: ContactInformation,
    pub requested_date: RequestedDate,
    pub form_validation: FormValidation,
}

impl Default for Step {
    fn default() -> Self {
        Self::FIRST
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_ordered_zero_to_four() {
        for (expected, step) in Step::ALL.into_iter().enumerate() {
            assert_eq!(step.index(), expected);
            assert_eq!(Step::from_index(expected), Some(step));
        }
        assert_eq!(Step::from_index(5), None);
    }

    #[test]
    fn last_step_has_no_next_and_first_no_prev() {
        assert_eq!(Step::LAST.next(), None);
        assert_eq!(Step::FIRST.prev(), None);
        assert_eq!(Step::ServiceNeeds.next(), Some(Step::TechnicalFeasibility));
        assert_eq!(Step::SummarySignature.prev(), Some(Step::ContactInformation));
    }

    #[test]
    fn default_validation_gates_only_the_first_two_steps() {
        let validation = FormValidation::default();
        assert!(!validation.service_needs.valid);
        assert!(!validation.technical_feasibility.valid);
        assert!(validation.commercial_proposal.valid);
        assert!(validation.contact_information.valid);
        assert!(validation.summary_signature.valid);
        for step in Step::ALL {
            assert!(!validation.step(step).touched);
        }
    }
}
