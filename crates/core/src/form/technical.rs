use serde::{Deserialize, Serialize};

use crate::domain::site::GeographicSite;

/// The two ends of the point-to-point circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointId {
    EndA,
    EndB,
}

impl EndpointId {
    pub const BOTH: [EndpointId; 2] = [EndpointId::EndA, EndpointId::EndB];

    pub fn label(self) -> &'static str {
        match self {
            Self::EndA => "End A",
            Self::EndB => "End B",
        }
    }
}

/// How an interface is provisioned. VLAN mode additionally requires a
/// VLAN number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConnectionMode {
    Vlan,
    #[default]
    Port,
}

/// Which interface card the user picked for an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceChoice {
    Existing,
    New,
}

/// Interface already present at the POP, as reported by the existing probe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExistingInterface {
    pub interface: String,
    pub router: String,
    pub bw_avail: String,
    pub bw_max: String,
}

/// Capacity available for a freshly provisioned interface, plus the display
/// pair derived from `l2_capacity_max`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewInterface {
    pub l2_capacity_max: String,
    pub l3_capacity_max: String,
    pub l2_capacity_max_value_display: u32,
    pub l2_capacity_max_display: String,
}

impl Default for NewInterface {
    fn default() -> Self {
        let (value, label) = capacity_display("");
        Self {
            l2_capacity_max: String::new(),
            l3_capacity_max: String::new(),
            l2_capacity_max_value_display: value,
            l2_capacity_max_display: label.to_string(),
        }
    }
}

impl NewInterface {
    pub fn recompute_display(&mut self) {
        let (value, label) = capacity_display(&self.l2_capacity_max);
        self.l2_capacity_max_value_display = value;
        self.l2_capacity_max_display = label.to_string();
    }
}

/// 10 Gbps Ethernet when the reported L2 capacity reaches 10000 Mbps,
/// 1 Gbps otherwise. Unparseable capacities fall in the 1 Gbps bucket.
pub fn capacity_display(l2_capacity_max: &str) -> (u32, &'static str) {
    let capacity: f64 = l2_capacity_max.trim().parse().unwrap_or(0.0);
    if capacity >= 10_000.0 {
        (10, "TenGigabitEthernet")
    } else {
        (1, "GigabitEthernet")
    }
}

/// Everything the technical-feasibility step tracks for one endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointDetails {
    /// Site name, copied from the selected POP location.
    pub location: String,
    pub street: String,
    pub postcode: String,
    pub city: String,
    pub country: String,

    pub existing: ExistingInterface,
    pub connection_mode: ConnectionMode,
    pub vlan_number: String,

    pub new_interface: NewInterface,
    pub connection_mode_new_interface: ConnectionMode,
    pub vlan_number_new_interface: String,

    pub selected_interface: Option<InterfaceChoice>,
    pub cross_connect: bool,
}

impl EndpointDetails {
    /// Copy the resolved location name and address off the selected site.
    pub fn apply_site(&mut self, site: &GeographicSite) {
        self.location = site.name.clone();
        if let Some(place) = site.first_place() {
            self.street = place.street_name.clone();
            self.postcode = place.postcode.clone();
            self.city = place.city.clone();
            self.country = place.country.clone();
        }
    }

    /// Step-1 gate for this endpoint: an interface must be chosen, and the
    /// chosen interface's VLAN mode must come with a VLAN number.
    pub fn is_valid(&self) -> bool {
        match self.selected_interface {
            None => false,
            Some(InterfaceChoice::Existing) => {
                self.connection_mode != ConnectionMode::Vlan || !self.vlan_number.is_empty()
            }
            Some(InterfaceChoice::New) => {
                self.connection_mode_new_interface != ConnectionMode::Vlan
                    || !self.vlan_number_new_interface.is_empty()
            }
        }
    }
}

/// Step 1: per-endpoint technical detail for both circuit ends.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalFeasibility {
    pub end_a: EndpointDetails,
    pub end_b: EndpointDetails,
}

impl TechnicalFeasibility {
    pub fn endpoint(&self, end: EndpointId) -> &EndpointDetails {
        match end {
            EndpointId::EndA => &self.end_a,
            EndpointId::EndB => &self.end_b,
        }
    }

    pub fn endpoint_mut(&mut self, end: EndpointId) -> &mut EndpointDetails {
        match end {
            EndpointId::EndA => &mut self.end_a,
            EndpointId::EndB => &mut self.end_b,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.end_a.is_valid() && self.end_b.is_valid()
    }
}
