#[macro_use]
mod macros;

pub mod academic_year;
pub mod admin_role;
pub mod event_type;
pub mod payment_status;
pub mod registration_status;
pub mod sponsor_tier;
pub mod storage;

pub use academic_year::AcademicYear;
pub use admin_role::AdminRole;
pub use event_type::EventType;
pub use payment_status::PaymentStatus;
pub use registration_status::RegistrationStatus;
pub use sponsor_tier::SponsorTier;

use std::fmt;

/// Error when parsing a string into one of the closed enums of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    kind: &'static str,
    invalid: String,
    valid: Vec<&'static str>,
}

impl ParseEnumError {
    pub(crate) fn new(
        kind: &'static str,
        invalid: &str,
        valid: impl Iterator<Item = &'static str>,
    ) -> Self {
        Self {
            kind,
            invalid: invalid.to_string(),
            valid: valid.collect(),
        }
    }
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} '{}'. Valid values: {}",
            self.kind,
            self.invalid,
            self.valid.join(", ")
        )
    }
}

impl std::error::Error for ParseEnumError {}
