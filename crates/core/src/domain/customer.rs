use serde::{Deserialize, Serialize};

use crate::domain::quote::Characteristic;

/// Customer record from the customer-management API. Only the fields the
/// quoting flow reads are modelled; the feasibility adapter needs the
/// `coderce` characteristic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub status: String,
    pub characteristic: Vec<Characteristic>,
}

impl Customer {
    /// RCE code forwarded to feasibility probes, when the customer has one.
    pub fn code_rce(&self) -> Option<&str> {
        self.characteristic
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case("coderce"))
            .map(|c| c.value.as_str())
    }
}
