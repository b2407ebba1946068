//! Projection of a persisted quote record into a fresh form session (the
//! "edit" entry path). Every read is defensive: anything missing or
//! unrecognized in the record leaves the corresponding default in place.

use tracing::debug;

use crate::domain::quote::{ProductPlace, QuoteRecord, RelatedParty};
use crate::domain::site::GeographicSite;
use crate::form::commercial::{CommitmentPeriod, PackageKind};
use crate::form::contacts::ContactInfo;
use crate::form::state::QuoteFormState;
use crate::form::technical::{ConnectionMode, EndpointDetails, EndpointId, InterfaceChoice};

/// Role substrings that identify each contact slot among the quote's
/// related parties. First party whose role matches any substring wins.
const COMMERCIAL_ROLES: &[&str] = &["commercial", "sales", "contact"];
const TECHNICAL_ROLES: &[&str] = &["technical", "tech"];
const BILLING_ROLES: &[&str] = &["billing", "finance", "payment"];
const FAULT_ROLES: &[&str] = &["fault", "maintenance", "support"];
const DATA_PROTECTION_ROLES: &[&str] = &["data", "protection", "privacy"];

impl QuoteFormState {
    /// One-shot overwrite of the default form state from a persisted
    /// quote. Branch validity is recomputed afterwards, but no step is
    /// marked touched: loading is not user interaction.
    pub fn initialize_from_quote(&mut self, record: &QuoteRecord) {
        debug!(quote_id = %record.id, "initializing form state from persisted quote");

        self.load_service_needs(record);
        self.load_endpoint(record, EndpointId::EndA, "PointA");
        self.load_endpoint(record, EndpointId::EndB, "PointB");
        self.load_commercial(record);
        self.load_contacts(record);
        self.load_requested_date(record);

        let service_needs_valid = self.service_needs.is_valid();
        self.set_step_valid(crate::form::state::Step::ServiceNeeds, service_needs_valid);
        self.revalidate_technical();
    }

    fn load_service_needs(&mut self, record: &QuoteRecord) {
        if let Some(bandwidth) = record.product_characteristic("bandwidth") {
            self.service_needs.end_bandwidth = Some(bandwidth.to_string());
        }
        if let Some(place) = record.place_with_role("pop a") {
            self.service_needs.end_a_location = Some(GeographicSite::stub(&place.id, &place.name));
        }
        if let Some(place) = record.place_with_role("pop b") {
            self.service_needs.end_b_location = Some(GeographicSite::stub(&place.id, &place.name));
        }
    }

    fn load_endpoint(&mut self, record: &QuoteRecord, end: EndpointId, prefix: &str) {
        let characteristic = |suffix: &str| record.product_characteristic(&format!("{prefix}_{suffix}"));

        let endpoint = match end {
            EndpointId::EndA => &mut self.technical_feasibility.end_a,
            EndpointId::EndB => &mut self.technical_feasibility.end_b,
        };

        if let Some(router) = characteristic("Router") {
            endpoint.existing.router = router.to_string();
        }
        if let Some(interface) = characteristic("IntfType") {
            endpoint.existing.interface = interface.to_string();
        }
        if let Some(port_mode) = characteristic("PortMode") {
            endpoint.connection_mode =
                if port_mode == "PORT" { ConnectionMode::Port } else { ConnectionMode::Vlan };
        }
        if let Some(vlan) = characteristic("VLAN") {
            endpoint.vlan_number = vlan.to_string();
        }
        if let Some(cross_connect) = characteristic("CrossConn") {
            endpoint.cross_connect = cross_connect == "true";
        }
        if let Some(capacity) = characteristic("IntfCapacity") {
            endpoint.new_interface.l2_capacity_max = capacity.to_string();
            endpoint.new_interface.recompute_display();
        }
        if let Some(is_new) = characteristic("IsNewIntf") {
            endpoint.selected_interface = Some(if is_new == "true" {
                InterfaceChoice::New
            } else {
                InterfaceChoice::Existing
            });
        }

        let role = match end {
            EndpointId::EndA => "pop a",
            EndpointId::EndB => "pop b",
        };
        if let Some(place) = record.place_with_role(role) {
            apply_place_address(endpoint, place);
        }
    }

    fn load_commercial(&mut self, record: &QuoteRecord) {
        if let Some(offering_name) =
            record.first_product().and_then(|p| p.product_offering.as_ref()).map(|o| o.name.as_str())
        {
            let inferred = PackageKind::ALL.into_iter().find(|kind| offering_name.contains(kind.name()));
            if let Some(kind) = inferred {
                self.commercial_proposal.selected_package.kind = kind;
            }
        }

        if let Some(term_name) =
            record.first_product().and_then(|p| p.product_term.first()).map(|t| t.name.as_str())
        {
            self.commercial_proposal.selected_package.period = if term_name.contains("36") {
                CommitmentPeriod::ThirtySixMonths
            } else if term_name.contains("24") {
                CommitmentPeriod::TwentyFourMonths
            } else if term_name.contains("12") {
                CommitmentPeriod::TwelveMonths
            } else {
                CommitmentPeriod::NoCommitment
            };
        }

        if let Some(recurring) = record.item_price("RecurringCharge") {
            let price = recurring.price.clone().unwrap_or_default();
            self.commercial_proposal.selected_package.price = price.value.unwrap_or_default();
            self.commercial_proposal.selected_package.currency =
                price.unit.unwrap_or_else(|| "€".to_string());
        }
        if let Some(installation) = record.item_price("InstallationFee") {
            let price = installation.price.clone().unwrap_or_default();
            self.commercial_proposal.installation_fee = price.value.unwrap_or_default();
        }
    }

    fn load_contacts(&mut self, record: &QuoteRecord) {
        if let Some(party) = party_with_role(record, COMMERCIAL_ROLES) {
            self.contact_information.commercial_contact = contact_from_party(party);
        }
        if let Some(party) = party_with_role(record, TECHNICAL_ROLES) {
            self.contact_information.technical_contact = contact_from_party(party);
        }
        if let Some(party) = party_with_role(record, BILLING_ROLES) {
            self.contact_information.billing_contact = contact_from_party(party);
        }
        if let Some(party) = party_with_role(record, FAULT_ROLES) {
            let contact = contact_from_party(party);
            self.contact_information.fault_management.name = contact.name;
            self.contact_information.fault_management.email = contact.email;
            if let Some(phone) = contact.phone {
                self.contact_information.fault_management.phone = phone;
            }
        }
        if let Some(party) = party_with_role(record, DATA_PROTECTION_ROLES) {
            let contact = contact_from_party(party);
            self.contact_information.data_protection_contact.name = contact.name;
            self.contact_information.data_protection_contact.email = contact.email;
            if let Some(phone) = contact.phone {
                self.contact_information.data_protection_contact.phone = phone;
            }
        }
    }

    fn load_requested_date(&mut self, record: &QuoteRecord) {
        let date = record
            .requested_quote_completion_date
            .or(record.expected_quote_completion_date)
            .map(|d| d.date_naive());
        if let Some(date) = date {
            self.requested_date.date = Some(date);
        }
    }
}

/// Prefer the place's own address fields; fall back to the legacy
/// positional encoding (`country/…/…/street/city`) only when the structured
/// fields are blank and the id has at least five `/`-segments.
fn apply_place_address(endpoint: &mut EndpointDetails, place: &ProductPlace) {
    if !place.name.is_empty() {
        endpoint.location = place.name.clone();
    }

    let has_structured_fields =
        !place.street_name.is_empty() || !place.city.is_empty() || !place.country.is_empty();
    if has_structured_fields {
        if !place.street_name.is_empty() {
            endpoint.street = place.street_name.clone();
        }
        if !place.postcode.is_empty() {
            endpoint.postcode = place.postcode.clone();
        }
        if !place.city.is_empty() {
            endpoint.city = place.city.clone();
        }
        if !place.country.is_empty() {
            endpoint.country = place.country.clone();
        }
        return;
    }

    // Legacy-compat path for records that encode the address in the id.
    let segments: Vec<&str> = place.id.split('/').collect();
    if segments.len() >= 5 {
        endpoint.country = segments[0].to_string();
        endpoint.street = segments[3].to_string();
        endpoint.city = segments[4].to_string();
    }
}

fn party_with_role<'a>(record: &'a QuoteRecord, roles: &[&str]) -> Option<&'a RelatedParty> {
    record.related_party.iter().find(|party| {
        let role = party.role.to_lowercase();
        roles.iter().any(|candidate| role.contains(candidate))
    })
}

fn contact_from_party(party: &RelatedParty) -> ContactInfo {
    let email = party
        .contact_medium
        .iter()
        .find(|medium| medium.medium_type.eq_ignore_ascii_case("email"))
        .map(|medium| medium.characteristic.email_address.clone())
        .unwrap_or_default();

    let phone = party
        .contact_medium
        .iter()
        .find(|medium| {
            medium.medium_type.eq_ignore_ascii_case("phone")
                || medium.medium_type.eq_ignore_ascii_case("mobile")
        })
        .map(|medium| medium.characteristic.phone_number.clone());

    let address = party
        .contact_medium
        .iter()
        .find(|medium| medium.medium_type.eq_ignore_ascii_case("email"))
        .map(|medium| &medium.characteristic)
        .map(postal_address)
        .filter(|joined| !joined.is_empty());

    let company = if !party.trading_name.is_empty() {
        Some(party.trading_name.clone())
    } else if !party.organization_type.is_empty() {
        Some(party.organization_type.clone())
    } else {
        None
    };

    let title = party
        .party_characteristic
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case("title") || c.name.eq_ignore_ascii_case("role"))
        .map(|c| c.value.clone());

    ContactInfo { name: party.name.clone(), title, company, address, phone, email }
}

fn postal_address(characteristic: &crate::domain::quote::MediumCharacteristic) -> String {
    [
        &characteristic.street1,
        &characteristic.street2,
        &characteristic.city,
        &characteristic.state_or_province,
        &characteristic.country,
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .cloned()
    .collect::<Vec<_>>()
    .join(", ")
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::quote::{
        Characteristic, ContactMedium, MediumCharacteristic, PriceValue, ProductOfferingRef,
        ProductSpec, ProductTerm, QuoteItem, QuoteItemPrice,
    };

    fn quote_with_product(product: ProductSpec) -> QuoteRecord {
        QuoteRecord {
            id: "Q-100".to_string(),
            quote_item: vec![QuoteItem {
                id: "item-1".to_string(),
                product: Some(product),
                quote_item_price: Vec::new(),
            }],
            ..Default::default()
        }
    }

    fn characteristics(pairs: &[(&str, &str)]) -> Vec<Characteristic> {
        pairs
            .iter()
            .map(|(name, value)| Characteristic {
                name: (*name).to_string(),
                value: (*value).to_string(),
            })
            .collect()
    }

    #[test]
    fn loads_bandwidth_and_pop_sites() {
        let record = quote_with_product(ProductSpec {
            product_characteristic: characteristics(&[("Bandwidth", "100M")]),
            place: vec![
                ProductPlace {
                    id: "FR-PAR-282187".to_string(),
                    name: "Paris Lab 3".to_string(),
                    role: "POP A".to_string(),
                    ..Default::default()
                },
                ProductPlace {
                    id: "CI-ABJ-100021".to_string(),
                    name: "Abidjan".to_string(),
                    role: "pop b".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        });

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);

        assert_eq!(state.service_needs.end_bandwidth.as_deref(), Some("100M"));
        assert_eq!(
            state.service_needs.end_a_location.as_ref().map(|s| s.name.as_str()),
            Some("Paris Lab 3"),
        );
        assert_eq!(
            state.service_needs.end_b_location.as_ref().map(|s| s.id.as_str()),
            Some("CI-ABJ-100021"),
        );
        assert!(state.form_validation.service_needs.valid);
        assert!(!state.form_validation.service_needs.touched);
    }

    #[test]
    fn loads_technical_characteristics_per_endpoint() {
        let record = quote_with_product(ProductSpec {
            product_characteristic: characteristics(&[
                ("PointA_Router", "MPPCR1"),
                ("PointA_IntfType", "TenGigE0/0/0/0/12"),
                ("PointA_PortMode", "PORT"),
                ("PointA_CrossConn", "true"),
                ("PointA_IntfCapacity", "10000"),
                ("PointB_PortMode", "VLAN"),
                ("PointB_VLAN", "23"),
            ]),
            ..Default::default()
        });

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);

        let end_a = &state.technical_feasibility.end_a;
        assert_eq!(end_a.existing.router, "MPPCR1");
        assert_eq!(end_a.existing.interface, "TenGigE0/0/0/0/12");
        assert_eq!(end_a.connection_mode, ConnectionMode::Port);
        assert!(end_a.cross_connect);
        assert_eq!(end_a.new_interface.l2_capacity_max_display, "TenGigabitEthernet");

        let end_b = &state.technical_feasibility.end_b;
        assert_eq!(end_b.connection_mode, ConnectionMode::Vlan);
        assert_eq!(end_b.vlan_number, "23");
    }

    #[test]
    fn missing_characteristics_leave_defaults_untouched() {
        let defaults = QuoteFormState::default();
        let record = quote_with_product(ProductSpec::default());

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);

        assert_eq!(
            state.technical_feasibility.end_a.existing,
            defaults.technical_feasibility.end_a.existing,
        );
        assert_eq!(state.commercial_proposal, defaults.commercial_proposal);
        assert_eq!(state.requested_date, defaults.requested_date);
    }

    #[test]
    fn infers_package_and_period_by_substring() {
        let record = quote_with_product(ProductSpec {
            product_offering: Some(ProductOfferingRef {
                id: "off-2".to_string(),
                name: "P2P Dynamic Offering".to_string(),
            }),
            product_term: vec![ProductTerm { name: "24 months commitment".to_string() }],
            ..Default::default()
        });

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);

        assert_eq!(state.commercial_proposal.selected_package.kind, PackageKind::Dynamic);
        assert_eq!(
            state.commercial_proposal.selected_package.period,
            CommitmentPeriod::TwentyFourMonths,
        );
    }

    #[test]
    fn unrecognized_term_means_no_commitment() {
        let record = quote_with_product(ProductSpec {
            product_term: vec![ProductTerm { name: "rolling".to_string() }],
            ..Default::default()
        });

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);
        assert_eq!(state.commercial_proposal.selected_package.period, CommitmentPeriod::NoCommitment);
    }

    #[test]
    fn reads_prices_with_missing_value_defaults() {
        let mut record = quote_with_product(ProductSpec::default());
        record.quote_item[0].quote_item_price = vec![
            QuoteItemPrice {
                name: "RecurringCharge".to_string(),
                price: Some(PriceValue { value: Some(Decimal::new(17_50, 2)), unit: None }),
            },
            QuoteItemPrice { name: "InstallationFee".to_string(), price: None },
        ];

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);

        assert_eq!(state.commercial_proposal.selected_package.price, Decimal::new(17_50, 2));
        assert_eq!(state.commercial_proposal.selected_package.currency, "€");
        assert_eq!(state.commercial_proposal.installation_fee, Decimal::ZERO);
    }

    #[test]
    fn positional_place_id_is_a_fallback_only() {
        let record = quote_with_product(ProductSpec {
            place: vec![ProductPlace {
                id: "France/x/y/12 Rue de la Paix/Paris".to_string(),
                name: "Paris Lab 3".to_string(),
                role: "pop a".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);

        let end_a = &state.technical_feasibility.end_a;
        assert_eq!(end_a.country, "France");
        assert_eq!(end_a.street, "12 Rue de la Paix");
        assert_eq!(end_a.city, "Paris");

        // Structured fields win over the id encoding when present.
        let record = quote_with_product(ProductSpec {
            place: vec![ProductPlace {
                id: "Wrong/x/y/Wrong Street/Wrongville".to_string(),
                name: "Paris Lab 3".to_string(),
                role: "pop a".to_string(),
                street_name: "Real Street".to_string(),
                city: "Paris".to_string(),
                country: "France".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        });
        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);
        assert_eq!(state.technical_feasibility.end_a.street, "Real Street");
        assert_eq!(state.technical_feasibility.end_a.city, "Paris");
    }

    #[test]
    fn picks_contacts_by_role_substring() {
        let record = QuoteRecord {
            id: "Q-2".to_string(),
            related_party: vec![
                RelatedParty {
                    role: "Technical Lead".to_string(),
                    name: "ADA NETWORK".to_string(),
                    trading_name: "NetCo".to_string(),
                    contact_medium: vec![
                        ContactMedium {
                            medium_type: "Email".to_string(),
                            characteristic: MediumCharacteristic {
                                email_address: "ada@netco.example".to_string(),
                                street1: "1 Fiber Way".to_string(),
                                city: "Lyon".to_string(),
                                country: "France".to_string(),
                                ..Default::default()
                            },
                        },
                        ContactMedium {
                            medium_type: "Mobile".to_string(),
                            characteristic: MediumCharacteristic {
                                phone_number: "+33611111111".to_string(),
                                ..Default::default()
                            },
                        },
                    ],
                    party_characteristic: characteristics(&[("title", "Network Architect")]),
                    ..Default::default()
                },
                RelatedParty {
                    role: "Support Desk".to_string(),
                    name: "DESK TEAM".to_string(),
                    contact_medium: vec![ContactMedium {
                        medium_type: "email".to_string(),
                        characteristic: MediumCharacteristic {
                            email_address: "desk@netco.example".to_string(),
                            ..Default::default()
                        },
                    }],
                    ..Default::default()
                },
            ],
            ..Default::default()
        };

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);

        let technical = &state.contact_information.technical_contact;
        assert_eq!(technical.name, "ADA NETWORK");
        assert_eq!(technical.email, "ada@netco.example");
        assert_eq!(technical.phone.as_deref(), Some("+33611111111"));
        assert_eq!(technical.company.as_deref(), Some("NetCo"));
        assert_eq!(technical.title.as_deref(), Some("Network Architect"));
        assert_eq!(technical.address.as_deref(), Some("1 Fiber Way, Lyon, France"));

        let fault = &state.contact_information.fault_management;
        assert_eq!(fault.name, "DESK TEAM");
        assert_eq!(fault.email, "desk@netco.example");
        // Group name and working hours have no source in the record.
        assert_eq!(fault.group_name, "NOC");
        assert_eq!(fault.working_hours, "24/7");

        // Unmatched roles keep their defaults.
        assert_eq!(state.contact_information.commercial_contact.name, "JEAN DUPONT");
    }

    #[test]
    fn requested_date_falls_back_to_expected() {
        let record = QuoteRecord {
            id: "Q-3".to_string(),
            expected_quote_completion_date: Some("2026-09-20T00:00:00Z".parse().expect("date")),
            ..Default::default()
        };

        let mut state = QuoteFormState::default();
        state.initialize_from_quote(&record);
        assert_eq!(
            state.requested_date.date,
            Some(NaiveDate::from_ymd_opt(2026, 9, 20).expect("date")),
        );
    }
}
