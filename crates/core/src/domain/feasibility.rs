use serde::{Deserialize, Serialize};

use crate::domain::quote::{characteristic_value, Characteristic};

/// Which of the two per-endpoint probes a request/response belongs to.
/// The adapter distinguishes them by the `number_intf` characteristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProbeKind {
    /// `number_intf = "0"`: reports the interface already present at the POP.
    Existing,
    /// `number_intf = "1"`: reports capacity available for a new interface.
    Capacity,
}

impl ProbeKind {
    pub fn number_intf(self) -> &'static str {
        match self {
            Self::Existing => "0",
            Self::Capacity => "1",
        }
    }
}

/// TMF645 check-service-qualification payload, shared between request and
/// response: both sides are a list of items wrapping a characteristic list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceQualification {
    pub service_qualification_item: Vec<QualificationItem>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualificationItem {
    pub service: QualifiedService,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QualifiedService {
    pub service_characteristic: Vec<Characteristic>,
}

/// Parameters for one feasibility probe against the adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeRequest {
    pub code_rce: String,
    pub kind: ProbeKind,
    pub pop_id: String,
    pub service_type: String,
    pub origin: String,
    pub type_intf: Option<String>,
    pub bw_service: Option<String>,
}

impl ProbeRequest {
    pub fn new(code_rce: impl Into<String>, kind: ProbeKind, pop_id: impl Into<String>) -> Self {
        Self {
            code_rce: code_rce.into(),
            kind,
            pop_id: pop_id.into(),
            service_type: "L2VPN".to_string(),
            origin: "ODP".to_string(),
            type_intf: None,
            bw_service: None,
        }
    }

    /// Request body the adapter expects: a single qualification item whose
    /// service carries the probe parameters as characteristics.
    pub fn to_body(&self) -> ServiceQualification {
        let mut characteristics = vec![
            Characteristic { name: "code_rce".to_string(), value: self.code_rce.clone() },
            Characteristic {
                name: "number_intf".to_string(),
                value: self.kind.number_intf().to_string(),
            },
            Characteristic { name: "pop_id".to_string(), value: self.pop_id.clone() },
            Characteristic { name: "service_type".to_string(), value: self.service_type.clone() },
            Characteristic { name: "origin".to_string(), value: self.origin.clone() },
        ];
        if let Some(type_intf) = &self.type_intf {
            characteristics
                .push(Characteristic { name: "type_intf".to_string(), value: type_intf.clone() });
        }
        if let Some(bw_service) = &self.bw_service {
            characteristics
                .push(Characteristic { name: "bw_service".to_string(), value: bw_service.clone() });
        }

        ServiceQualification {
            service_qualification_item: vec![QualificationItem {
                service: QualifiedService { service_characteristic: characteristics },
            }],
        }
    }
}

impl ServiceQualification {
    /// Item belonging to the given probe kind. Responses may interleave
    /// items from both probes; consumers must select by `number_intf`
    /// before reading anything else.
    pub fn item_for(&self, kind: ProbeKind) -> Option<&QualificationItem> {
        self.service_qualification_item.iter().find(|item| {
            characteristic_value(&item.service.service_characteristic, "number_intf")
                == Some(kind.number_intf())
        })
    }
}

impl QualificationItem {
    pub fn characteristic(&self, name: &str) -> Option<&str> {
        characteristic_value(&self.service.service_characteristic, name)
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            service: QualifiedService {
                service_characteristic: pairs
                    .iter()
                    .map(|(name, value)| Characteristic {
                        name: (*name).to_string(),
                        value: (*value).to_string(),
                    })
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_body_carries_required_characteristics() {
        let body = ProbeRequest::new("RCE-042", ProbeKind::Capacity, "282187").to_body();
        let item = &body.service_qualification_item[0];
        assert_eq!(item.characteristic("code_rce"), Some("RCE-042"));
        assert_eq!(item.characteristic("number_intf"), Some("1"));
        assert_eq!(item.characteristic("pop_id"), Some("282187"));
        assert_eq!(item.characteristic("service_type"), Some("L2VPN"));
        assert_eq!(item.characteristic("origin"), Some("ODP"));
        assert_eq!(item.characteristic("type_intf"), None);
    }

    #[test]
    fn item_selection_requires_matching_number_intf() {
        let response = ServiceQualification {
            service_qualification_item: vec![
                QualificationItem::from_pairs(&[("number_intf", "1"), ("l2_capacity_max", "10000")]),
                QualificationItem::from_pairs(&[("number_intf", "0"), ("router", "MPPCR1")]),
            ],
        };

        let existing = response.item_for(ProbeKind::Existing).expect("existing item");
        assert_eq!(existing.characteristic("router"), Some("MPPCR1"));

        let capacity = response.item_for(ProbeKind::Capacity).expect("capacity item");
        assert_eq!(capacity.characteristic("l2_capacity_max"), Some("10000"));
    }

    #[test]
    fn missing_kind_yields_none() {
        let response = ServiceQualification::default();
        assert!(response.item_for(ProbeKind::Existing).is_none());
    }

    #[test]
    fn wire_shape_uses_tmf_field_names() {
        let body = ProbeRequest::new("RCE-042", ProbeKind::Existing, "282187").to_body();
        let json = serde_json::to_value(&body).expect("serialize");
        assert!(json.get("serviceQualificationItem").is_some());
        let item = &json["serviceQualificationItem"][0]["service"]["serviceCharacteristic"][0];
        assert_eq!(item["name"], "code_rce");
        assert_eq!(item["value"], "RCE-042");

        let parsed: ServiceQualification =
            serde_json::from_value(json).expect("deserialize response shape");
        assert_eq!(parsed, body);
    }
}
