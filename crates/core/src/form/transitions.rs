//! The closed set of operations that mutate a [`QuoteFormState`].
//!
//! Every user interaction and every collaborator response lands here as a
//! named transition. Operations are synchronous merges over the owned
//! state; the async plumbing lives in the client crate.

use chrono::NaiveDate;

use crate::domain::site::GeographicSite;
use crate::errors::DomainError;
use crate::form::commercial::{CommercialProposalUpdate, CommitmentPeriod, PackageKind};
use crate::form::contacts::ContactInformationUpdate;
use crate::form::service_needs::ServiceNeedsUpdate;
use crate::form::state::{QuoteFormState, Step};
use crate::form::summary::RequestedDate;
use crate::form::technical::{ConnectionMode, EndpointId, InterfaceChoice};

impl QuoteFormState {
    /// Jump directly to a step. Used by the index-based stepper header;
    /// deliberately unchecked, unlike [`QuoteFormState::next_step`].
    pub fn set_current_step(&mut self, step: Step) {
        self.current_step = step;
    }

    /// Advance one step if the current step's computed validity allows it.
    /// Returns whether the step changed; an ineligible call is a silent
    /// no-op rather than an error.
    pub fn next_step(&mut self) -> bool {
        if !self.form_validation.step(self.current_step).valid {
            return false;
        }
        match self.current_step.next() {
            Some(next) => {
                self.current_step = next;
                true
            }
            None => false,
        }
    }

    /// Strict variant of [`QuoteFormState::next_step`] for callers that
    /// want the refusal surfaced instead of swallowed.
    pub fn try_next_step(&mut self) -> Result<(), DomainError> {
        if self.next_step() {
            return Ok(());
        }
        let step = self.current_step;
        let reason = if !self.form_validation.step(step).valid {
            "step validation has not passed".to_string()
        } else {
            "already at the final step".to_string()
        };
        Err(DomainError::StepBlocked { step, reason })
    }

    /// Go back one step; always allowed, floored at the first step.
    pub fn prev_step(&mut self) -> bool {
        match self.current_step.prev() {
            Some(prev) => {
                self.current_step = prev;
                true
            }
            None => false,
        }
    }

    /// Restore the defaults. Called when the quote flow is exited,
    /// whether by cancel or completion.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_step_valid(&mut self, step: Step, valid: bool) {
        self.form_validation.step_mut(step).valid = valid;
    }

    pub fn touch_step(&mut self, step: Step) {
        self.form_validation.step_mut(step).touched = true;
    }

    /// Whether a step should render its inline errors: computed validity
    /// is always maintained, but errors only show after first interaction.
    pub fn show_errors(&self, step: Step) -> bool {
        let state = self.form_validation.step(step);
        state.touched && !state.valid
    }

    // --- Service Needs -----------------------------------------------------

    pub fn update_service_needs(&mut self, update: ServiceNeedsUpdate) {
        self.service_needs.merge(update);
        self.touch_step(Step::ServiceNeeds);
        self.revalidate_service_needs();
    }

    /// Select a POP location for one endpoint. Besides the service-needs
    /// branch this immediately mirrors the site's name and address into
    /// the technical step; the feasibility probes are the caller's job.
    pub fn select_location(&mut self, end: EndpointId, site: GeographicSite) {
        self.technical_feasibility.endpoint_mut(end).apply_site(&site);
        let location = Some(Some(site));
        let update = match end {
            EndpointId::EndA => ServiceNeedsUpdate { end_a_location: location, ..Default::default() },
            EndpointId::EndB => ServiceNeedsUpdate { end_b_location: location, ..Default::default() },
        };
        self.update_service_needs(update);
    }

    pub fn clear_location(&mut self, end: EndpointId) {
        let update = match end {
            EndpointId::EndA => {
                ServiceNeedsUpdate { end_a_location: Some(None), ..Default::default() }
            }
            EndpointId::EndB => {
                ServiceNeedsUpdate { end_b_location: Some(None), ..Default::default() }
            }
        };
        self.update_service_needs(update);
    }

    pub fn set_bandwidth(&mut self, bandwidth: impl Into<String>) {
        self.update_service_needs(ServiceNeedsUpdate {
            end_bandwidth: Some(bandwidth.into()),
            ..Default::default()
        });
    }

    fn revalidate_service_needs(&mut self) {
        let valid = self.service_needs.is_valid();
        self.set_step_valid(Step::ServiceNeeds, valid);
    }

    // --- Technical Feasibility ---------------------------------------------

    pub fn set_connection_mode(&mut self, end: EndpointId, mode: ConnectionMode) {
        self.technical_feasibility.endpoint_mut(end).connection_mode = mode;
        self.technical_changed();
    }

    pub fn set_vlan_number(&mut self, end: EndpointId, vlan: impl Into<String>) {
        self.technical_feasibility.endpoint_mut(end).vlan_number = vlan.into();
        self.technical_changed();
    }

    pub fn set_new_interface_mode(&mut self, end: EndpointId, mode: ConnectionMode) {
        self.technical_feasibility.endpoint_mut(end).connection_mode_new_interface = mode;
        self.technical_changed();
    }

    pub fn set_new_interface_vlan(&mut self, end: EndpointId, vlan: impl Into<String>) {
        self.technical_feasibility.endpoint_mut(end).vlan_number_new_interface = vlan.into();
        self.technical_changed();
    }

    pub fn select_interface(&mut self, end: EndpointId, choice: InterfaceChoice) {
        self.technical_feasibility.endpoint_mut(end).selected_interface = Some(choice);
        self.technical_changed();
    }

    pub fn set_cross_connect(&mut self, end: EndpointId, cross_connect: bool) {
        self.technical_feasibility.endpoint_mut(end).cross_connect = cross_connect;
        self.technical_changed();
    }

    fn technical_changed(&mut self) {
        self.touch_step(Step::TechnicalFeasibility);
        self.revalidate_technical();
    }

    /// Recompute step-1 validity. Also used by the feasibility merge,
    /// which rewrites endpoint fields without counting as user interaction.
    pub(crate) fn revalidate_technical(&mut self) {
        let valid = self.technical_feasibility.is_valid();
        self.set_step_valid(Step::TechnicalFeasibility, valid);
    }

    // --- Commercial Proposal -----------------------------------------------

    pub fn update_commercial_proposal(&mut self, update: CommercialProposalUpdate) {
        self.commercial_proposal.merge(update);
        self.touch_step(Step::CommercialProposal);
    }

    pub fn select_package(&mut self, kind: PackageKind) {
        self.commercial_proposal.select_package(kind);
        self.touch_step(Step::CommercialProposal);
    }

    pub fn select_period(&mut self, period: CommitmentPeriod) {
        self.commercial_proposal.select_period(period);
        self.touch_step(Step::CommercialProposal);
    }

    // --- Contact Information -----------------------------------------------

    pub fn update_contact_information(&mut self, update: ContactInformationUpdate) {
        self.contact_information.merge(update);
        self.touch_step(Step::ContactInformation);
    }

    // --- Summary & Signature -----------------------------------------------

    /// Full replace, matching the date picker's behavior.
    pub fn update_requested_date(&mut self, requested: RequestedDate) {
        self.requested_date = requested;
        self.touch_step(Step::SummarySignature);
    }

    /// Entering the summary step establishes the 15-day floor.
    pub fn initialize_summary(&mut self, today: NaiveDate) {
        self.requested_date.clamp_to_minimum(today);
    }
}
