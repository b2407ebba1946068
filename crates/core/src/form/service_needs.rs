use serde::{Deserialize, Serialize};

use crate::domain::site::GeographicSite;

/// Step 0: what the customer needs — the two circuit endpoints and the
/// bandwidth between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceNeeds {
    pub end_bandwidth: Option<String>,
    pub end_a_location: Option<GeographicSite>,
    pub end_b_location: Option<GeographicSite>,
}

impl ServiceNeeds {
    /// The step gates on all three inputs being present.
    pub fn is_valid(&self) -> bool {
        self.end_bandwidth.as_deref().is_some_and(|bw| !bw.is_empty())
            && self.end_a_location.is_some()
            && self.end_b_location.is_some()
    }
}

/// Shallow-merge update: `None` leaves the field untouched, `Some` replaces
/// it wholesale (including `Some(None)` to clear a location).
#[derive(Clone, Debug, Default)]
pub struct ServiceNeedsUpdate {
    pub end_bandwidth: Option<String>,
    pub end_a_location: Option<Option<GeographicSite>>,
    pub end_b_location: Option<Option<GeographicSite>>,
}

impl ServiceNeeds {
    pub fn merge(&mut self, update: ServiceNeedsUpdate) {
        if let Some(bandwidth) = update.end_bandwidth {
            self.end_bandwidth = Some(bandwidth);
        }
        if let Some(location) = update.end_a_location {
            self.end_a_location = location;
        }
        if let Some(location) = update.end_b_location {
            self.end_b_location = location;
        }
    }
}
