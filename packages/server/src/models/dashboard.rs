use common::{PaymentStatus, RegistrationStatus};
use serde::Serialize;

use super::registration::RegistrationResponse;

#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub events: u64,
    pub registrations: u64,
    pub students: u64,
    pub speakers: u64,
    pub sponsors: u64,
    pub contacts: u64,
    pub unresolved_contacts: u64,
}

/// Number of registrations for one event.
#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRegistrationCount {
    pub event_id: i32,
    /// Empty if the event row no longer exists.
    pub title: String,
    pub count: u64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PaymentStatusCount {
    pub status: PaymentStatus,
    pub count: u64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RegistrationStatusCount {
    pub status: RegistrationStatus,
    pub count: u64,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub counts: DashboardCounts,
    /// Five newest registrations.
    pub recent_registrations: Vec<RegistrationResponse>,
    /// Ordered by count, highest first.
    pub event_registrations: Vec<EventRegistrationCount>,
    pub payment_stats: Vec<PaymentStatusCount>,
    pub registration_stats: Vec<RegistrationStatusCount>,
}
