//! Closed category sets for the categorical profile fields.
//!
//! Each enum lists its variants in the order the intake form offers them.
//! `label()` is the exact display string the model was trained against and
//! `code()` is the value that lands in the feature vector slot.

use std::fmt;

use crate::error::EncodeError;

/// A categorical field with a closed, enumerated set of display labels.
pub trait Category: Copy + Sized + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Exact display string for this variant.
    fn label(self) -> &'static str;

    /// Encoded feature value for this variant.
    fn code(self) -> u8;
}

/// Look up a raw display string in the closed set of `T`.
///
/// Matching is exact: no trimming and no case folding, since the
/// training-time strings are exact.
pub fn parse_category<T: Category>(field: &'static str, raw: &str) -> Result<T, EncodeError> {
    T::ALL
        .iter()
        .copied()
        .find(|c| c.label() == raw)
        .ok_or_else(|| EncodeError::InvalidCategory {
            field,
            value: raw.to_string(),
        })
}

/// Display labels of `T`, in display order.
pub fn labels<T: Category>() -> Vec<&'static str> {
    T::ALL.iter().map(|c| c.label()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Female,
    Male,
}

impl Category for Gender {
    const ALL: &'static [Self] = &[Self::Female, Self::Male];

    fn label(self) -> &'static str {
        match self {
            Self::Female => "Female",
            Self::Male => "Male",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::Female => 0,
            Self::Male => 1,
        }
    }
}

/// Binary Yes/No answer (Partner, Dependents, PaperlessBilling, SeniorCitizen).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    No,
    Yes,
}

impl YesNo {
    /// Inverse of [`Category::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::No),
            1 => Some(Self::Yes),
            _ => None,
        }
    }
}

impl Category for YesNo {
    const ALL: &'static [Self] = &[Self::No, Self::Yes];

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::No => 0,
            Self::Yes => 1,
        }
    }
}

/// Phone line status. `NoPhoneService` is a sentinel collapsed to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultipleLines {
    No,
    Yes,
    NoPhoneService,
}

impl Category for MultipleLines {
    const ALL: &'static [Self] = &[Self::No, Self::Yes, Self::NoPhoneService];

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
            Self::NoPhoneService => "No phone service",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::No | Self::NoPhoneService => 0,
            Self::Yes => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    No,
}

impl Category for InternetService {
    const ALL: &'static [Self] = &[Self::Dsl, Self::FiberOptic, Self::No];

    fn label(self) -> &'static str {
        match self {
            Self::Dsl => "DSL",
            Self::FiberOptic => "Fiber optic",
            Self::No => "No",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::Dsl => 0,
            Self::FiberOptic => 1,
            Self::No => 2,
        }
    }
}

/// An internet-dependent add-on (OnlineSecurity, OnlineBackup, DeviceProtection,
/// TechSupport, StreamingTV, StreamingMovies).
///
/// Both "off" values encode to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddOn {
    No,
    Yes,
    NoInternetService,
}

impl Category for AddOn {
    const ALL: &'static [Self] = &[Self::No, Self::Yes, Self::NoInternetService];

    fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes",
            Self::NoInternetService => "No internet service",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::No | Self::NoInternetService => 0,
            Self::Yes => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl Category for Contract {
    const ALL: &'static [Self] = &[Self::MonthToMonth, Self::OneYear, Self::TwoYear];

    fn label(self) -> &'static str {
        match self {
            Self::MonthToMonth => "Month-to-month",
            Self::OneYear => "One year",
            Self::TwoYear => "Two year",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::MonthToMonth => 0,
            Self::OneYear => 1,
            Self::TwoYear => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    ElectronicCheck,
    MailedCheck,
    BankTransfer,
    CreditCard,
}

impl Category for PaymentMethod {
    const ALL: &'static [Self] = &[
        Self::ElectronicCheck,
        Self::MailedCheck,
        Self::BankTransfer,
        Self::CreditCard,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::ElectronicCheck => "Electronic check",
            Self::MailedCheck => "Mailed check",
            Self::BankTransfer => "Bank transfer (automatic)",
            Self::CreditCard => "Credit card (automatic)",
        }
    }

    fn code(self) -> u8 {
        match self {
            Self::ElectronicCheck => 0,
            Self::MailedCheck => 1,
            Self::BankTransfer => 2,
            Self::CreditCard => 3,
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_label!(
    Gender,
    YesNo,
    MultipleLines,
    InternetService,
    AddOn,
    Contract,
    PaymentMethod,
);
