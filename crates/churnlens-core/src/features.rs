//! Feature vector layout and the profile → vector encoder.
//!
//! The scaler and classifier were fit against exactly this column order.
//! Nothing downstream checks it, so the order must never change.

use tracing::debug;

use crate::category::{AddOn, Category, InternetService, MultipleLines};
use crate::error::{EncodeError, ShapeError};
use crate::profile::{CustomerProfile, RawProfile};

pub const FEATURE_COUNT: usize = 20;

/// Column names in model order. The last two are derived indicators.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "SeniorCitizen",
    "Partner",
    "Dependents",
    "tenure",
    "MultipleLines",
    "InternetService",
    "OnlineSecurity",
    "OnlineBackup",
    "DeviceProtection",
    "TechSupport",
    "StreamingTV",
    "StreamingMovies",
    "Contract",
    "PaperlessBilling",
    "PaymentMethod",
    "MonthlyCharges",
    "TotalCharges",
    "NoInternetService",
    "NoPhoneService",
];

/// Fixed-order numeric encoding of one customer profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Wrap a vector returned by an external collaborator, rejecting any
    /// length other than [`FEATURE_COUNT`].
    pub fn from_slice(values: &[f64]) -> Result<Self, ShapeError> {
        let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| ShapeError {
            expected: FEATURE_COUNT,
            found: values.len(),
        })?;
        Ok(Self(array))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    /// Value of the named column.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| self.0[i])
    }

    /// `(column name, value)` pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.into_iter().zip(self.0.iter().copied())
    }

    /// Single-precision copy for runtimes that take f32 tensors.
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.0.iter().map(|&v| v as f32).collect()
    }
}

/// Collapse an internet-dependent add-on to a "has this add-on" flag.
pub fn internet_fix(value: AddOn) -> f64 {
    f64::from(value.code())
}

fn flag(on: bool) -> f64 {
    if on { 1.0 } else { 0.0 }
}

/// Encode a typed profile into the model's feature layout.
pub fn encode(p: &CustomerProfile) -> FeatureVector {
    // Derived indicators read the raw service values, before recoding
    // collapses their sentinels.
    let no_internet_service = flag(p.internet_service == InternetService::No);
    let no_phone_service = flag(p.multiple_lines == MultipleLines::NoPhoneService);

    let vector = FeatureVector([
        f64::from(p.gender.code()),
        f64::from(p.senior_citizen.code()),
        f64::from(p.partner.code()),
        f64::from(p.dependents.code()),
        f64::from(p.tenure),
        f64::from(p.multiple_lines.code()),
        f64::from(p.internet_service.code()),
        internet_fix(p.online_security),
        internet_fix(p.online_backup),
        internet_fix(p.device_protection),
        internet_fix(p.tech_support),
        internet_fix(p.streaming_tv),
        internet_fix(p.streaming_movies),
        f64::from(p.contract.code()),
        f64::from(p.paperless_billing.code()),
        f64::from(p.payment_method.code()),
        p.monthly_charges,
        p.total_charges,
        no_internet_service,
        no_phone_service,
    ]);

    debug!(features = ?vector.as_slice(), "encoded profile");
    vector
}

/// Resolve a raw profile against the closed sets and encode it.
///
/// Any invalid field fails the whole request; no partial vector is produced.
pub fn encode_raw(raw: &RawProfile) -> Result<FeatureVector, EncodeError> {
    let profile = CustomerProfile::try_from(raw)?;
    Ok(encode(&profile))
}
