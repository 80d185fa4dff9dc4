#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

string_enum! {
    /// Payment state of a registration.
    pub enum PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
    }
}

impl PaymentStatus {
    /// Initial payment state for a new registration.
    ///
    /// Free events need no payment, so their registrations start out
    /// `completed`; anything with a fee waits for verification.
    pub fn initial_for_fee(registration_fee: f64) -> Self {
        if registration_fee > 0.0 {
            Self::Pending
        } else {
            Self::Completed
        }
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}
