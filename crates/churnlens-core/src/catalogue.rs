//! Field catalogue for the intake form: labels, sections and choice lists.

use crate::category::{
    AddOn, Contract, Gender, InternetService, MultipleLines, PaymentMethod, YesNo, labels,
};
use crate::profile::field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Customer,
    Services,
    Billing,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Customer => "Customer Information",
            Self::Services => "Services & Internet",
            Self::Billing => "Billing Information",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// One of a closed list of display labels.
    Choice(fn() -> Vec<&'static str>),
    /// Whole number ≥ 0.
    Count,
    /// Real number ≥ 0.
    Amount,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub section: Section,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Allowed display labels, empty for numeric fields.
    pub fn choices(&self) -> Vec<&'static str> {
        match self.kind {
            FieldKind::Choice(list) => list(),
            FieldKind::Count | FieldKind::Amount => Vec::new(),
        }
    }
}

fn senior_citizen_choices() -> Vec<&'static str> {
    vec!["0", "1"]
}

const fn spec(
    name: &'static str,
    label: &'static str,
    section: Section,
    kind: FieldKind,
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        section,
        kind,
    }
}

/// Every raw profile field, in form order.
pub static FIELDS: [FieldSpec; 18] = [
    spec(field::GENDER, "Gender", Section::Customer, FieldKind::Choice(labels::<Gender>)),
    spec(
        field::SENIOR_CITIZEN,
        "Senior Citizen",
        Section::Customer,
        FieldKind::Choice(senior_citizen_choices),
    ),
    spec(field::PARTNER, "Partner", Section::Customer, FieldKind::Choice(labels::<YesNo>)),
    spec(field::DEPENDENTS, "Dependents", Section::Customer, FieldKind::Choice(labels::<YesNo>)),
    spec(field::TENURE, "Tenure (months)", Section::Customer, FieldKind::Count),
    spec(
        field::MULTIPLE_LINES,
        "Multiple Lines",
        Section::Services,
        FieldKind::Choice(labels::<MultipleLines>),
    ),
    spec(
        field::INTERNET_SERVICE,
        "Internet Service",
        Section::Services,
        FieldKind::Choice(labels::<InternetService>),
    ),
    spec(
        field::ONLINE_SECURITY,
        "Online Security",
        Section::Services,
        FieldKind::Choice(labels::<AddOn>),
    ),
    spec(
        field::ONLINE_BACKUP,
        "Online Backup",
        Section::Services,
        FieldKind::Choice(labels::<AddOn>),
    ),
    spec(
        field::DEVICE_PROTECTION,
        "Device Protection",
        Section::Services,
        FieldKind::Choice(labels::<AddOn>),
    ),
    spec(
        field::TECH_SUPPORT,
        "Tech Support",
        Section::Services,
        FieldKind::Choice(labels::<AddOn>),
    ),
    spec(
        field::STREAMING_TV,
        "Streaming TV",
        Section::Services,
        FieldKind::Choice(labels::<AddOn>),
    ),
    spec(
        field::STREAMING_MOVIES,
        "Streaming Movies",
        Section::Services,
        FieldKind::Choice(labels::<AddOn>),
    ),
    spec(field::CONTRACT, "Contract", Section::Billing, FieldKind::Choice(labels::<Contract>)),
    spec(
        field::PAPERLESS_BILLING,
        "Paperless Billing",
        Section::Billing,
        FieldKind::Choice(labels::<YesNo>),
    ),
    spec(
        field::PAYMENT_METHOD,
        "Payment Method",
        Section::Billing,
        FieldKind::Choice(labels::<PaymentMethod>),
    ),
    spec(field::MONTHLY_CHARGES, "Monthly Charges", Section::Billing, FieldKind::Amount),
    spec(field::TOTAL_CHARGES, "Total Charges", Section::Billing, FieldKind::Amount),
];

/// Look up a field by its raw name.
pub fn find(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}
