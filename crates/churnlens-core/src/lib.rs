//! Customer profile types and the deterministic churn feature encoder.

pub mod catalogue;
pub mod category;
mod error;
pub mod features;
pub mod profile;

pub use category::{
    AddOn, Category, Contract, Gender, InternetService, MultipleLines, PaymentMethod, YesNo,
    parse_category,
};
pub use error::{EncodeError, ShapeError};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, encode, encode_raw, internet_fix};
pub use profile::{CustomerProfile, RawProfile, RawValue};
