use serde::{Deserialize, Serialize};

/// Free-text contact record. Only `name` and `email` are always filled.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: String,
}

/// Fault-management desk contact; unlike the person contacts it names a
/// group and its working hours.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FaultManagementContact {
    pub group_name: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub working_hours: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataProtectionContact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Step 3: the five contact roles attached to the quote. No cross-field
/// rules; the step never blocks navigation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInformation {
    pub commercial_contact: ContactInfo,
    pub technical_contact: ContactInfo,
    pub billing_contact: ContactInfo,
    pub fault_management: FaultManagementContact,
    pub data_protection_contact: DataProtectionContact,
}

impl Default for ContactInformation {
    fn default() -> Self {
        Self {
            commercial_contact: ContactInfo {
                name: "JEAN DUPONT".to_string(),
                title: Some("Sales Manager".to_string()),
                company: Some("Orange Business".to_string()),
                address: Some("123 Business Street, Paris".to_string()),
                phone: Some("+33123456789".to_string()),
                email: "jean.dupont@orange.com".to_string(),
            },
            technical_contact: ContactInfo {
                name: "ANNE PERE".to_string(),
                title: Some("Network Engineer".to_string()),
                company: Some("Orange Business".to_string()),
                address: Some("123 Business Street, Paris".to_string()),
                phone: Some("+33123456788".to_string()),
                email: "anne.pere@orange.com".to_string(),
            },
            billing_contact: ContactInfo {
                name: "JEANNE DUPONT".to_string(),
                title: Some("Finance Manager".to_string()),
                company: Some("Orange Business".to_string()),
                address: Some("123 Business Street, Paris".to_string()),
                phone: Some("+33123456787".to_string()),
                email: "jeanne.dupont@orange.com".to_string(),
            },
            fault_management: FaultManagementContact {
                group_name: "NOC".to_string(),
                name: "NOC Team".to_string(),
                phone: "+33123456786".to_string(),
                email: "noc@orange.com".to_string(),
                working_hours: "24/7".to_string(),
            },
            data_protection_contact: DataProtectionContact {
                name: "FABRICE DUPONT".to_string(),
                phone: "+33123456785".to_string(),
                email: "fabrice.dupont@orange.com".to_string(),
            },
        }
    }
}

/// Shallow-merge update over the five roles; `None` keeps the prior record.
#[derive(Clone, Debug, Default)]
pub struct ContactInformationUpdate {
    pub commercial_contact: Option<ContactInfo>,
    pub technical_contact: Option<ContactInfo>,
    pub billing_contact: Option<ContactInfo>,
    pub fault_management: Option<FaultManagementContact>,
    pub data_protection_contact: Option<DataProtectionContact>,
}

impl ContactInformation {
    pub fn merge(&mut self, update: ContactInformationUpdate) {
        if let Some(contact) = update.commercial_contact {
            self.commercial_contact = contact;
        }
        if let Some(contact) = update.technical_contact {
            self.technical_contact = contact;
        }
        if let Some(contact) = update.billing_contact {
            self.billing_contact = contact;
        }
        if let Some(contact) = update.fault_management {
            self.fault_management = contact;
        }
        if let Some(contact) = update.data_protection_contact {
            self.data_protection_contact = contact;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_replaces_one_role_and_keeps_the_rest() {
        let mut contacts = ContactInformation::default();
        contacts.merge(ContactInformationUpdate {
            billing_contact: Some(ContactInfo {
                name: "NEW BILLER".to_string(),
                email: "billing@example.com".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        });

        assert_eq!(contacts.billing_contact.name, "NEW BILLER");
        assert_eq!(contacts.commercial_contact.name, "JEAN DUPONT");
        assert_eq!(contacts.fault_management.group_name, "NOC");
    }
}
