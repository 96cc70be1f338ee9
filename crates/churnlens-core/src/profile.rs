//! Raw and typed customer profiles.
//!
//! A [`RawProfile`] is what the intake boundary hands over: field names mapped
//! to display strings or numbers. [`CustomerProfile`] is the same record after
//! every categorical field has been resolved against its closed set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::category::{
    AddOn, Category, Contract, Gender, InternetService, MultipleLines, PaymentMethod, YesNo,
    parse_category,
};
use crate::error::EncodeError;

/// Raw field names, exactly as the intake form and the training data spell them.
pub mod field {
    pub const GENDER: &str = "gender";
    pub const SENIOR_CITIZEN: &str = "SeniorCitizen";
    pub const PARTNER: &str = "Partner";
    pub const DEPENDENTS: &str = "Dependents";
    pub const TENURE: &str = "tenure";
    pub const MULTIPLE_LINES: &str = "MultipleLines";
    pub const INTERNET_SERVICE: &str = "InternetService";
    pub const ONLINE_SECURITY: &str = "OnlineSecurity";
    pub const ONLINE_BACKUP: &str = "OnlineBackup";
    pub const DEVICE_PROTECTION: &str = "DeviceProtection";
    pub const TECH_SUPPORT: &str = "TechSupport";
    pub const STREAMING_TV: &str = "StreamingTV";
    pub const STREAMING_MOVIES: &str = "StreamingMovies";
    pub const CONTRACT: &str = "Contract";
    pub const PAPERLESS_BILLING: &str = "PaperlessBilling";
    pub const PAYMENT_METHOD: &str = "PaymentMethod";
    pub const MONTHLY_CHARGES: &str = "MonthlyCharges";
    pub const TOTAL_CHARGES: &str = "TotalCharges";

    /// Every raw field a profile carries.
    pub const ALL: [&str; 18] = [
        GENDER,
        SENIOR_CITIZEN,
        PARTNER,
        DEPENDENTS,
        TENURE,
        MULTIPLE_LINES,
        INTERNET_SERVICE,
        ONLINE_SECURITY,
        ONLINE_BACKUP,
        DEVICE_PROTECTION,
        TECH_SUPPORT,
        STREAMING_TV,
        STREAMING_MOVIES,
        CONTRACT,
        PAPERLESS_BILLING,
        PAYMENT_METHOD,
        MONTHLY_CHARGES,
        TOTAL_CHARGES,
    ];
}

/// A single raw field value: a display string or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn render(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<u32> for RawValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

/// Field name → raw value, built fresh for every prediction request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProfile(BTreeMap<String, RawValue>);

impl RawProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<RawValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawProfile {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A customer profile with every field resolved to its typed domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProfile", into = "RawProfile")]
pub struct CustomerProfile {
    pub gender: Gender,
    pub senior_citizen: YesNo,
    pub partner: YesNo,
    pub dependents: YesNo,
    /// Months with the company.
    pub tenure: u32,
    pub multiple_lines: MultipleLines,
    pub internet_service: InternetService,
    pub online_security: AddOn,
    pub online_backup: AddOn,
    pub device_protection: AddOn,
    pub tech_support: AddOn,
    pub streaming_tv: AddOn,
    pub streaming_movies: AddOn,
    pub contract: Contract,
    pub paperless_billing: YesNo,
    pub payment_method: PaymentMethod,
    pub monthly_charges: f64,
    pub total_charges: f64,
}

impl CustomerProfile {
    /// Render back to the raw form the intake boundary would have produced.
    pub fn to_raw(&self) -> RawProfile {
        RawProfile::new()
            .with(field::GENDER, self.gender.label())
            .with(field::SENIOR_CITIZEN, f64::from(self.senior_citizen.code()))
            .with(field::PARTNER, self.partner.label())
            .with(field::DEPENDENTS, self.dependents.label())
            .with(field::TENURE, self.tenure)
            .with(field::MULTIPLE_LINES, self.multiple_lines.label())
            .with(field::INTERNET_SERVICE, self.internet_service.label())
            .with(field::ONLINE_SECURITY, self.online_security.label())
            .with(field::ONLINE_BACKUP, self.online_backup.label())
            .with(field::DEVICE_PROTECTION, self.device_protection.label())
            .with(field::TECH_SUPPORT, self.tech_support.label())
            .with(field::STREAMING_TV, self.streaming_tv.label())
            .with(field::STREAMING_MOVIES, self.streaming_movies.label())
            .with(field::CONTRACT, self.contract.label())
            .with(field::PAPERLESS_BILLING, self.paperless_billing.label())
            .with(field::PAYMENT_METHOD, self.payment_method.label())
            .with(field::MONTHLY_CHARGES, self.monthly_charges)
            .with(field::TOTAL_CHARGES, self.total_charges)
    }
}

impl TryFrom<&RawProfile> for CustomerProfile {
    type Error = EncodeError;

    fn try_from(raw: &RawProfile) -> Result<Self, Self::Error> {
        for (name, _) in raw.iter() {
            if !field::ALL.contains(&name) {
                debug!(field = name, "ignoring unknown profile field");
            }
        }

        Ok(Self {
            gender: category(raw, field::GENDER)?,
            senior_citizen: senior_citizen(raw)?,
            partner: category(raw, field::PARTNER)?,
            dependents: category(raw, field::DEPENDENTS)?,
            tenure: whole_number(raw, field::TENURE)?,
            multiple_lines: category(raw, field::MULTIPLE_LINES)?,
            internet_service: category(raw, field::INTERNET_SERVICE)?,
            online_security: category(raw, field::ONLINE_SECURITY)?,
            online_backup: category(raw, field::ONLINE_BACKUP)?,
            device_protection: category(raw, field::DEVICE_PROTECTION)?,
            tech_support: category(raw, field::TECH_SUPPORT)?,
            streaming_tv: category(raw, field::STREAMING_TV)?,
            streaming_movies: category(raw, field::STREAMING_MOVIES)?,
            contract: category(raw, field::CONTRACT)?,
            paperless_billing: category(raw, field::PAPERLESS_BILLING)?,
            payment_method: category(raw, field::PAYMENT_METHOD)?,
            monthly_charges: amount(raw, field::MONTHLY_CHARGES)?,
            total_charges: amount(raw, field::TOTAL_CHARGES)?,
        })
    }
}

impl TryFrom<RawProfile> for CustomerProfile {
    type Error = EncodeError;

    fn try_from(raw: RawProfile) -> Result<Self, Self::Error> {
        Self::try_from(&raw)
    }
}

impl From<CustomerProfile> for RawProfile {
    fn from(profile: CustomerProfile) -> Self {
        profile.to_raw()
    }
}

// ── Field extraction ──

fn required<'a>(raw: &'a RawProfile, name: &'static str) -> Result<&'a RawValue, EncodeError> {
    raw.get(name).ok_or(EncodeError::MissingField(name))
}

fn category<T: Category>(raw: &RawProfile, name: &'static str) -> Result<T, EncodeError> {
    match required(raw, name)? {
        RawValue::Text(s) => parse_category(name, s),
        other => Err(EncodeError::InvalidCategory {
            field: name,
            value: other.render(),
        }),
    }
}

/// SeniorCitizen is offered as the integers 0 and 1 rather than Yes/No.
fn senior_citizen(raw: &RawProfile) -> Result<YesNo, EncodeError> {
    let name = field::SENIOR_CITIZEN;
    let value = required(raw, name)?;
    let code = match value {
        RawValue::Number(n) if *n == 0.0 => Some(0),
        RawValue::Number(n) if *n == 1.0 => Some(1),
        RawValue::Text(s) if s == "0" => Some(0),
        RawValue::Text(s) if s == "1" => Some(1),
        _ => None,
    };
    code.and_then(YesNo::from_code)
        .ok_or_else(|| EncodeError::InvalidCategory {
            field: name,
            value: value.render(),
        })
}

fn number(raw: &RawProfile, name: &'static str) -> Result<f64, EncodeError> {
    match required(raw, name)? {
        RawValue::Number(n) if !n.is_finite() => Err(EncodeError::InvalidNumber {
            field: name,
            value: n.to_string(),
            reason: "not finite",
        }),
        RawValue::Number(n) if *n < 0.0 => Err(EncodeError::InvalidNumber {
            field: name,
            value: n.to_string(),
            reason: "negative",
        }),
        RawValue::Number(n) => Ok(*n),
        RawValue::Text(s) => Err(EncodeError::InvalidNumber {
            field: name,
            value: s.clone(),
            reason: "expected a number",
        }),
    }
}

fn amount(raw: &RawProfile, name: &'static str) -> Result<f64, EncodeError> {
    number(raw, name)
}

fn whole_number(raw: &RawProfile, name: &'static str) -> Result<u32, EncodeError> {
    let n = number(raw, name)?;
    if n.fract() != 0.0 || n > f64::from(u32::MAX) {
        return Err(EncodeError::InvalidNumber {
            field: name,
            value: n.to_string(),
            reason: "expected a whole number of months",
        });
    }
    Ok(n as u32)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A fully valid raw profile (scenario A in the encoder tests).
    pub(crate) fn sample_raw() -> RawProfile {
        RawProfile::new()
            .with("gender", "Male")
            .with("SeniorCitizen", 0.0)
            .with("Partner", "No")
            .with("Dependents", "No")
            .with("tenure", 12.0)
            .with("MultipleLines", "No")
            .with("InternetService", "DSL")
            .with("OnlineSecurity", "Yes")
            .with("OnlineBackup", "No")
            .with("DeviceProtection", "No")
            .with("TechSupport", "No")
            .with("StreamingTV", "No")
            .with("StreamingMovies", "No")
            .with("Contract", "Month-to-month")
            .with("PaperlessBilling", "Yes")
            .with("PaymentMethod", "Electronic check")
            .with("MonthlyCharges", 70.0)
            .with("TotalCharges", 840.0)
    }

    #[test]
    fn parses_valid_profile() {
        let p = CustomerProfile::try_from(&sample_raw()).unwrap();
        assert_eq!(p.gender, Gender::Male);
        assert_eq!(p.senior_citizen, YesNo::No);
        assert_eq!(p.tenure, 12);
        assert_eq!(p.online_security, AddOn::Yes);
        assert_eq!(p.payment_method, PaymentMethod::ElectronicCheck);
        assert_eq!(p.total_charges, 840.0);
    }

    #[test]
    fn deserializes_from_json_object() {
        let json = r#"{
            "gender": "Female", "SeniorCitizen": 1, "Partner": "Yes", "Dependents": "No",
            "tenure": 3, "MultipleLines": "No phone service", "InternetService": "Fiber optic",
            "OnlineSecurity": "No", "OnlineBackup": "Yes", "DeviceProtection": "No",
            "TechSupport": "No", "StreamingTV": "Yes", "StreamingMovies": "Yes",
            "Contract": "One year", "PaperlessBilling": "No",
            "PaymentMethod": "Credit card (automatic)",
            "MonthlyCharges": 95.5, "TotalCharges": 286.5
        }"#;
        let p: CustomerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.senior_citizen, YesNo::Yes);
        assert_eq!(p.multiple_lines, MultipleLines::NoPhoneService);
        assert_eq!(p.internet_service, InternetService::FiberOptic);
        assert_eq!(p.contract, Contract::OneYear);
        assert_eq!(p.monthly_charges, 95.5);
    }

    #[test]
    fn typed_profile_renders_back_to_raw() {
        let raw = sample_raw();
        let p = CustomerProfile::try_from(&raw).unwrap();
        assert_eq!(p.to_raw(), raw);
    }

    #[test]
    fn missing_field_is_reported() {
        let mut raw = sample_raw();
        raw.0.remove("Contract");
        assert_eq!(
            CustomerProfile::try_from(&raw).unwrap_err(),
            EncodeError::MissingField("Contract")
        );
    }

    #[test]
    fn out_of_domain_category_is_rejected() {
        let raw = sample_raw().with("Contract", "Quarterly");
        assert_eq!(
            CustomerProfile::try_from(&raw).unwrap_err(),
            EncodeError::InvalidCategory {
                field: "Contract",
                value: "Quarterly".into()
            }
        );
    }

    #[test]
    fn number_in_categorical_slot_is_rejected() {
        let raw = sample_raw().with("Partner", 1.0);
        assert!(matches!(
            CustomerProfile::try_from(&raw),
            Err(EncodeError::InvalidCategory { field: "Partner", .. })
        ));
    }

    #[test]
    fn senior_citizen_accepts_only_zero_and_one() {
        let text = sample_raw().with("SeniorCitizen", "1");
        assert_eq!(
            CustomerProfile::try_from(&text).unwrap().senior_citizen,
            YesNo::Yes
        );

        let two = sample_raw().with("SeniorCitizen", 2.0);
        assert!(matches!(
            CustomerProfile::try_from(&two),
            Err(EncodeError::InvalidCategory { field: "SeniorCitizen", .. })
        ));

        let yes = sample_raw().with("SeniorCitizen", "Yes");
        assert!(CustomerProfile::try_from(&yes).is_err());
    }

    #[test]
    fn numeric_fields_are_validated() {
        let negative = sample_raw().with("MonthlyCharges", -1.0);
        assert!(matches!(
            CustomerProfile::try_from(&negative),
            Err(EncodeError::InvalidNumber { field: "MonthlyCharges", reason: "negative", .. })
        ));

        let fractional = sample_raw().with("tenure", 1.5);
        assert!(matches!(
            CustomerProfile::try_from(&fractional),
            Err(EncodeError::InvalidNumber { field: "tenure", .. })
        ));

        let text = sample_raw().with("TotalCharges", "840");
        assert!(matches!(
            CustomerProfile::try_from(&text),
            Err(EncodeError::InvalidNumber { field: "TotalCharges", .. })
        ));

        let nan = sample_raw().with("TotalCharges", f64::NAN);
        assert!(CustomerProfile::try_from(&nan).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = sample_raw().with("customerID", "7590-VHVEG");
        assert!(CustomerProfile::try_from(&raw).is_ok());
    }
}
