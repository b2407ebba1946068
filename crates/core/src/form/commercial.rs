use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// The three commercial packages on offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageKind {
    Essential,
    Dynamic,
    Intense,
}

impl PackageKind {
    pub const ALL: [PackageKind; 3] =
        [PackageKind::Essential, PackageKind::Dynamic, PackageKind::Intense];

    pub fn name(self) -> &'static str {
        match self {
            Self::Essential => "Essential",
            Self::Dynamic => "Dynamic",
            Self::Intense => "Intense",
        }
    }
}

/// Contract commitment length. Pricing is keyed on (package, period).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CommitmentPeriod {
    ThirtySixMonths,
    TwentyFourMonths,
    TwelveMonths,
    NoCommitment,
}

impl CommitmentPeriod {
    pub const ALL: [CommitmentPeriod; 4] = [
        CommitmentPeriod::ThirtySixMonths,
        CommitmentPeriod::TwentyFourMonths,
        CommitmentPeriod::TwelveMonths,
        CommitmentPeriod::NoCommitment,
    ];

    pub fn months(self) -> u8 {
        match self {
            Self::ThirtySixMonths => 36,
            Self::TwentyFourMonths => 24,
            Self::TwelveMonths => 12,
            Self::NoCommitment => 0,
        }
    }
}

impl From<CommitmentPeriod> for u8 {
    fn from(period: CommitmentPeriod) -> Self {
        period.months()
    }
}

impl TryFrom<u8> for CommitmentPeriod {
    type Error = DomainError;

    fn try_from(months: u8) -> Result<Self, Self::Error> {
        match months {
            36 => Ok(Self::ThirtySixMonths),
            24 => Ok(Self::TwentyFourMonths),
            12 => Ok(Self::TwelveMonths),
            0 => Ok(Self::NoCommitment),
            other => Err(DomainError::InvariantViolation(format!(
                "unsupported commitment period `{other}` months"
            ))),
        }
    }
}

/// Monthly recurring price for a (package, period) pair, in euros.
/// The catalog is fixed; an unknown pair yields `None`.
pub fn catalog_price(kind: PackageKind, period: CommitmentPeriod) -> Option<Decimal> {
    use CommitmentPeriod::{NoCommitment, ThirtySixMonths, TwelveMonths, TwentyFourMonths};

    let cents = match (kind, period) {
        (PackageKind::Essential, ThirtySixMonths) => 13_00,
        (PackageKind::Essential, TwentyFourMonths) => 13_00,
        (PackageKind::Essential, TwelveMonths) => 14_00,
        (PackageKind::Essential, NoCommitment) => 15_00,
        (PackageKind::Dynamic, ThirtySixMonths) => 15_00,
        (PackageKind::Dynamic, TwentyFourMonths) => 16_00,
        (PackageKind::Dynamic, TwelveMonths) => 17_00,
        (PackageKind::Dynamic, NoCommitment) => 18_00,
        (PackageKind::Intense, ThirtySixMonths) => 18_00,
        (PackageKind::Intense, TwentyFourMonths) => 19_00,
        (PackageKind::Intense, TwelveMonths) => 20_00,
        (PackageKind::Intense, NoCommitment) => 21_00,
    };
    Some(Decimal::new(cents, 2))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedPackage {
    #[serde(rename = "type")]
    pub kind: PackageKind,
    pub price: Decimal,
    pub currency: String,
    pub period: CommitmentPeriod,
}

/// Step 2: the chosen package, its derived price, and the fee schedule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommercialProposal {
    pub selected_package: SelectedPackage,
    pub installation_fee: Decimal,
    pub recurring_charges: BTreeMap<String, Decimal>,
}

impl Default for CommercialProposal {
    fn default() -> Self {
        Self {
            selected_package: SelectedPackage {
                kind: PackageKind::Essential,
                price: Decimal::new(13_00, 2),
                currency: "€".to_string(),
                period: CommitmentPeriod::ThirtySixMonths,
            },
            installation_fee: Decimal::new(30_00, 2),
            recurring_charges: BTreeMap::from([
                ("PortA".to_string(), Decimal::new(5_00, 2)),
                ("PortB".to_string(), Decimal::new(10_00, 2)),
            ]),
        }
    }
}

impl CommercialProposal {
    /// Switch package, re-deriving the price for the current period so the
    /// (package, period, price) triple never disagrees with the catalog.
    pub fn select_package(&mut self, kind: PackageKind) {
        if let Some(price) = catalog_price(kind, self.selected_package.period) {
            self.selected_package.kind = kind;
            self.selected_package.price = price;
        }
    }

    /// Set period and price together from the catalog. An unknown
    /// combination leaves both untouched.
    pub fn select_period(&mut self, period: CommitmentPeriod) {
        if let Some(price) = catalog_price(self.selected_package.kind, period) {
            self.selected_package.period = period;
            self.selected_package.price = price;
        }
    }
}

/// Shallow-merge update; `None` keeps the prior value. Replacing the whole
/// selected package bypasses the catalog coupling, so prefer
/// `select_package`/`select_period` for user-driven changes — the wholesale
/// form exists for the load adapter.
#[derive(Clone, Debug, Default)]
pub struct CommercialProposalUpdate {
    pub selected_package: Option<SelectedPackage>,
    pub installation_fee: Option<Decimal>,
    pub recurring_charges: Option<BTreeMap<String, Decimal>>,
}

impl CommercialProposal {
    pub fn merge(&mut self, update: CommercialProposalUpdate) {
        if let Some(package) = update.selected_package {
            self.selected_package = package;
        }
        if let Some(fee) = update.installation_fee {
            self.installation_fee = fee;
        }
        if let Some(charges) = update.recurring_charges {
            self.recurring_charges = charges;
        }
    }
}
