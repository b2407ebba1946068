//! Core of the point-to-point circuit quoting wizard: the form state
//! machine, its derivation and validation rules, the collaborator data
//! contracts, and the persisted-quote load adapter. Everything here is
//! synchronous and I/O-free; transport lives in `linkquote-client`.

pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod loader;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::customer::Customer;
pub use domain::feasibility::{ProbeKind, ProbeRequest, QualificationItem, ServiceQualification};
pub use domain::quote::{Characteristic, QuoteId, QuoteRecord, QuoteState, RelatedParty};
pub use domain::site::{pop_id_for_site, GeographicSite, Place};
pub use errors::DomainError;
pub use form::commercial::{
    catalog_price, CommercialProposal, CommitmentPeriod, PackageKind, SelectedPackage,
};
pub use form::contacts::{ContactInfo, ContactInformation, ContactInformationUpdate};
pub use form::feasibility_merge::{EndpointProbes, FetchStatus, ProbeTable};
pub use form::service_needs::{ServiceNeeds, ServiceNeedsUpdate};
pub use form::state::{FormValidation, QuoteFormState, Step, StepValidation};
pub use form::summary::{minimum_requested_date, RequestedDate};
pub use form::technical::{
    capacity_display, ConnectionMode, EndpointDetails, EndpointId, InterfaceChoice,
    TechnicalFeasibility,
};
