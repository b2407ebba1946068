use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteId(pub String);

impl std::fmt::Display for QuoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state of a persisted quote, as reported by the quote API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteState {
    Draft,
    #[serde(alias = "inProgress", alias = "In Progress")]
    InProgress,
    #[serde(alias = "Pending Approval")]
    PendingApproval,
    Approved,
    Rejected,
    Presented,
    Accepted,
    Ordered,
    #[serde(alias = "cancelled")]
    Canceled,
    Expired,
}

/// Name/value pair used throughout the TMF data model for product,
/// service, and party characteristics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Characteristic {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductOfferingRef {
    pub id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductTerm {
    pub name: String,
}

/// A place attached to a product, carrying the endpoint role ("POP A" /
/// "POP B") plus whatever address detail the backend recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductPlace {
    pub id: String,
    pub name: String,
    pub role: String,
    pub street_name: String,
    pub postcode: String,
    pub city: String,
    pub country: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductSpec {
    pub name: String,
    pub product_offering: Option<ProductOfferingRef>,
    pub product_characteristic: Vec<Characteristic>,
    pub product_term: Vec<ProductTerm>,
    pub place: Vec<ProductPlace>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceValue {
    pub value: Option<Decimal>,
    pub unit: Option<String>,
}

/// One priced component of a quote item ("RecurringCharge",
/// "InstallationFee", ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteItemPrice {
    pub name: String,
    pub price: Option<PriceValue>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: String,
    pub product: Option<ProductSpec>,
    pub quote_item_price: Vec<QuoteItemPrice>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediumCharacteristic {
    pub email_address: String,
    pub phone_number: String,
    pub street1: String,
    pub street2: String,
    pub city: String,
    pub state_or_province: String,
    pub country: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactMedium {
    pub medium_type: String,
    pub characteristic: MediumCharacteristic,
}

/// A party related to the quote (contacts, account holders, approvers).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelatedParty {
    pub id: String,
    pub role: String,
    pub name: String,
    pub trading_name: String,
    pub organization_type: String,
    pub contact_medium: Vec<ContactMedium>,
    pub party_characteristic: Vec<Characteristic>,
}

/// A persisted quote record as fetched from the quote-management API.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteRecord {
    pub id: String,
    pub state: Option<QuoteState>,
    pub channel: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub expected_quote_completion_date: Option<DateTime<Utc>>,
    pub requested_quote_completion_date: Option<DateTime<Utc>>,
    pub quote_item: Vec<QuoteItem>,
    pub related_party: Vec<RelatedParty>,
}

impl QuoteRecord {
    pub fn first_product(&self) -> Option<&ProductSpec> {
        self.quote_item.first().and_then(|item| item.product.as_ref())
    }

    /// First product characteristic whose name matches case-insensitively.
    pub fn product_characteristic(&self, name: &str) -> Option<&str> {
        self.first_product()?
            .product_characteristic
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .map(|c| c.value.as_str())
    }

    /// First product place entry with the given role (case-insensitive).
    pub fn place_with_role(&self, role: &str) -> Option<&ProductPlace> {
        self.first_product()?.place.iter().find(|p| p.role.eq_ignore_ascii_case(role))
    }

    pub fn item_price(&self, name: &str) -> Option<&QuoteItemPrice> {
        self.quote_item.first()?.quote_item_price.iter().find(|p| p.name == name)
    }

    /// Completion date the backend committed to: seven calendar days from
    /// creation when it did not report one explicitly.
    pub fn effective_expected_completion(&self) -> Option<NaiveDate> {
        self.expected_quote_completion_date
            .map(|d| d.date_naive())
            .or_else(|| self.created_date.map(|d| (d + Duration::days(7)).date_naive()))
    }

    /// Completion date the customer asked for: fifteen calendar days from
    /// creation when the record carries none, matching the requested-date
    /// floor in `form::summary`.
    pub fn effective_requested_completion(&self) -> Option<NaiveDate> {
        self.requested_quote_completion_date
            .map(|d| d.date_naive())
            .or_else(|| self.created_date.map(|d| (d + Duration::days(15)).date_naive()))
    }
}

/// Characteristic lookup over an arbitrary list, shared with the
/// feasibility-response readers.
pub fn characteristic_value<'a>(list: &'a [Characteristic], name: &str) -> Option<&'a str> {
    list.iter().find(|c| c.name == name).map(|c| c.value.as_str())
}
