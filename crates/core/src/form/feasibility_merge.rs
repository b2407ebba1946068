//! Merging feasibility-probe responses into the technical step.
//!
//! Each endpoint is probed twice (existing interface, new-interface
//! capacity). Responses are stored replace-by-key in a two-slot
//! [`ProbeTable`] — a later probe for the same endpoint and kind
//! overwrites the earlier one, so repeated location changes cannot
//! accumulate stale interfaces. Field-level merging is keep-prior: a
//! characteristic absent from a response leaves the form value unchanged.

use serde::{Deserialize, Serialize};

use crate::domain::feasibility::{ProbeKind, ServiceQualification};
use crate::form::state::QuoteFormState;
use crate::form::technical::{ConnectionMode, EndpointId};

/// Lifecycle of an endpoint's probe fetches, mirrored to the UI as a
/// spinner / passive failure banner.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed {
        message: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointProbes {
    pub existing: Option<ServiceQualification>,
    pub capacity: Option<ServiceQualification>,
    pub status: FetchStatus,
}

impl EndpointProbes {
    pub fn store(&mut self, kind: ProbeKind, response: ServiceQualification) {
        match kind {
            ProbeKind::Existing => self.existing = Some(response),
            ProbeKind::Capacity => self.capacity = Some(response),
        }
    }

    /// Drop results from a previous site before re-probing.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Per-endpoint probe results for the session, keyed by endpoint and
/// probe kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProbeTable {
    pub end_a: EndpointProbes,
    pub end_b: EndpointProbes,
}

impl ProbeTable {
    pub fn endpoint(&self, end: EndpointId) -> &EndpointProbes {
        match end {
            EndpointId::EndA => &self.end_a,
            EndpointId::EndB => &self.end_b,
        }
    }

    pub fn endpoint_mut(&mut self, end: EndpointId) -> &mut EndpointProbes {
        match end {
            EndpointId::EndA => &mut self.end_a,
            EndpointId::EndB => &mut self.end_b,
        }
    }
}

impl QuoteFormState {
    /// Fold an existing-interface probe response (`number_intf == "0"`)
    /// into one endpoint. Missing characteristics keep the prior values;
    /// a response without a matching item changes nothing.
    pub fn apply_existing_probe(&mut self, end: EndpointId, response: &ServiceQualification) {
        let Some(item) = response.item_for(ProbeKind::Existing) else {
            return;
        };

        let endpoint = self.technical_feasibility.endpoint_mut(end);

        // `vlan_id` is a comma-separated pair: existing-interface VLAN,
        // then new-interface VLAN. An empty segment means port mode.
        if let Some(vlan_id) = item.characteristic("vlan_id") {
            let mut segments = vlan_id.split(',');
            if let Some(existing_vlan) = segments.next() {
                if existing_vlan.is_empty() {
                    endpoint.connection_mode = ConnectionMode::Port;
                } else {
                    endpoint.connection_mode = ConnectionMode::Vlan;
                    endpoint.vlan_number = existing_vlan.to_string();
                }
            }
            if let Some(new_vlan) = segments.next() {
                if new_vlan.is_empty() {
                    endpoint.connection_mode_new_interface = ConnectionMode::Port;
                } else {
                    endpoint.connection_mode_new_interface = ConnectionMode::Vlan;
                    endpoint.vlan_number_new_interface = new_vlan.to_string();
                }
            }
        }

        if let Some(interface) = item.characteristic("interface") {
            endpoint.existing.interface = interface.to_string();
        }
        if let Some(router) = item.characteristic("router") {
            endpoint.existing.router = router.to_string();
        }
        if let Some(bw_avail) = item.characteristic("bw_avail") {
            endpoint.existing.bw_avail = bw_avail.to_string();
        }
        if let Some(bw_max) = item.characteristic("bw_max") {
            endpoint.existing.bw_max = bw_max.to_string();
        }

        self.revalidate_technical();
    }

    /// Fold a new-interface capacity probe response (`number_intf == "1"`)
    /// into one endpoint, re-deriving the capacity display pair.
    pub fn apply_capacity_probe(&mut self, end: EndpointId, response: &ServiceQualification) {
        let Some(item) = response.item_for(ProbeKind::Capacity) else {
            return;
        };

        let endpoint = self.technical_feasibility.endpoint_mut(end);
        if let Some(l2) = item.characteristic("l2_capacity_max") {
            endpoint.new_interface.l2_capacity_max = l2.to_string();
        }
        if let Some(l3) = item.characteristic("l3_capacity_max") {
            endpoint.new_interface.l3_capacity_max = l3.to_string();
        }
        endpoint.new_interface.recompute_display();

        self.revalidate_technical();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::feasibility::QualificationItem;

    fn response(pairs: &[(&str, &str)]) -> ServiceQualification {
        ServiceQualification {
            service_qualification_item: vec![QualificationItem::from_pairs(pairs)],
        }
    }

    #[test]
    fn existing_probe_sets_vlan_mode_from_first_segment() {
        let mut state = QuoteFormState::default();
        state.apply_existing_probe(
            EndpointId::EndA,
            &response(&[
                ("number_intf", "0"),
                ("vlan_id", "23,42"),
                ("interface", "TenGigE0/0/0/0/12"),
                ("router", "MPPCR1"),
                ("bw_avail", "9992"),
                ("bw_max", "10000"),
            ]),
        );

        let end_a = &state.technical_feasibility.end_a;
        assert_eq!(end_a.connection_mode, ConnectionMode::Vlan);
        assert_eq!(end_a.vlan_number, "23");
        assert_eq!(end_a.connection_mode_new_interface, ConnectionMode::Vlan);
        assert_eq!(end_a.vlan_number_new_interface, "42");
        assert_eq!(end_a.existing.interface, "TenGigE0/0/0/0/12");
        assert_eq!(end_a.existing.router, "MPPCR1");
        assert_eq!(end_a.existing.bw_avail, "9992");
        assert_eq!(end_a.existing.bw_max, "10000");
    }

    #[test]
    fn empty_vlan_segment_means_port_mode() {
        let mut state = QuoteFormState::default();
        state.technical_feasibility.end_b.vlan_number = "7".to_string();
        state.apply_existing_probe(
            EndpointId::EndB,
            &response(&[("number_intf", "0"), ("vlan_id", ",19")]),
        );

        let end_b = &state.technical_feasibility.end_b;
        assert_eq!(end_b.connection_mode, ConnectionMode::Port);
        // Port mode leaves the previously entered number alone.
        assert_eq!(end_b.vlan_number, "7");
        assert_eq!(end_b.connection_mode_new_interface, ConnectionMode::Vlan);
        assert_eq!(end_b.vlan_number_new_interface, "19");
    }

    #[test]
    fn absent_characteristics_keep_prior_values() {
        let mut state = QuoteFormState::default();
        state.technical_feasibility.end_a.existing.router = "OLD-ROUTER".to_string();
        state.technical_feasibility.end_a.connection_mode = ConnectionMode::Vlan;

        state.apply_existing_probe(
            EndpointId::EndA,
            &response(&[("number_intf", "0"), ("interface", "GigE1/2")]),
        );

        let end_a = &state.technical_feasibility.end_a;
        assert_eq!(end_a.existing.router, "OLD-ROUTER");
        assert_eq!(end_a.existing.interface, "GigE1/2");
        assert_eq!(end_a.connection_mode, ConnectionMode::Vlan);
    }

    #[test]
    fn response_without_matching_item_changes_nothing() {
        let mut state = QuoteFormState::default();
        let before = state.clone();
        state.apply_existing_probe(
            EndpointId::EndA,
            &response(&[("number_intf", "1"), ("l2_capacity_max", "10000")]),
        );
        assert_eq!(state, before);
    }

    #[test]
    fn capacity_probe_derives_display_fields() {
        let mut state = QuoteFormState::default();
        state.apply_capacity_probe(
            EndpointId::EndA,
            &response(&[
                ("number_intf", "1"),
                ("l2_capacity_max", "10000"),
                ("l3_capacity_max", "8000"),
            ]),
        );

        let new_interface = &state.technical_feasibility.end_a.new_interface;
        assert_eq!(new_interface.l2_capacity_max, "10000");
        assert_eq!(new_interface.l3_capacity_max, "8000");
        assert_eq!(new_interface.l2_capacity_max_value_display, 10);
        assert_eq!(new_interface.l2_capacity_max_display, "TenGigabitEthernet");

        state.apply_capacity_probe(
            EndpointId::EndB,
            &response(&[("number_intf", "1"), ("l2_capacity_max", "1000")]),
        );
        let new_interface = &state.technical_feasibility.end_b.new_interface;
        assert_eq!(new_interface.l2_capacity_max_value_display, 1);
        assert_eq!(new_interface.l2_capacity_max_display, "GigabitEthernet");
    }

    #[test]
    fn probe_table_replaces_by_endpoint_and_kind() {
        let mut table = ProbeTable::default();
        let first = response(&[("number_intf", "0"), ("router", "R1")]);
        let second = response(&[("number_intf", "0"), ("router", "R2")]);

        table.endpoint_mut(EndpointId::EndA).store(ProbeKind::Existing, first);
        table.endpoint_mut(EndpointId::EndA).store(ProbeKind::Existing, second.clone());

        assert_eq!(table.endpoint(EndpointId::EndA).existing, Some(second));
        assert_eq!(table.endpoint(EndpointId::EndA).capacity, None);
        assert_eq!(table.endpoint(EndpointId::EndB), &EndpointProbes::default());
    }
}
