#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

string_enum! {
    /// Lifecycle state of an event registration.
    ///
    /// Admins may move a registration between any two states; there is no
    /// guarded transition graph.
    pub enum RegistrationStatus {
        /// Submitted, waiting for an organizer to review it.
        Pending => "pending",
        Confirmed => "confirmed",
        Rejected => "rejected",
        /// Withdrawn after submission.
        Cancelled => "cancelled",
        /// Event is full; the registration is kept in line.
        Waitlisted => "waitlisted",
    }
}

impl RegistrationStatus {
    /// Returns true if the registration still holds (or may still get) a seat.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::Waitlisted)
    }
}

impl Default for RegistrationStatus {
    fn default() -> Self {
        Self::Pending
    }
}
