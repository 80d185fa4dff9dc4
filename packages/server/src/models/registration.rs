use chrono::{DateTime, Utc};
use common::{AcademicYear, PaymentStatus, RegistrationStatus};
use serde::{Deserialize, Serialize};

use super::shared::{
    Pagination, non_blank, normalize_email, validate_email, validate_required,
};
use crate::entity::registration::{self, TeamMember};
use crate::error::AppError;

/// Team members as submitted by a client.
///
/// Multipart forms send them as a JSON-encoded string; JSON bodies may send
/// either that string or a plain array.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(untagged)]
pub enum TeamMembersInput {
    Serialized(String),
    List(Vec<TeamMember>),
}

/// Request body for creating a registration.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    #[schema(example = 1)]
    pub event_id: i32,
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@college.edu")]
    pub email: String,
    #[schema(example = "9999999999")]
    pub phone: String,
    #[schema(example = "RV College of Engineering")]
    pub college: String,
    #[schema(example = "CSE")]
    pub department: String,
    /// One of `1`..`5` or `Others`.
    #[schema(example = "2")]
    pub year: String,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default)]
    pub team_members: Option<TeamMembersInput>,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

/// A registration request that passed validation, with normalized fields.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
    pub event_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub department: String,
    pub year: AcademicYear,
    pub team_name: Option<String>,
    pub team_members: Vec<TeamMember>,
    pub transaction_id: Option<String>,
    pub additional_info: Option<String>,
}

/// Parse the JSON-encoded team member list sent by multipart forms.
/// A blank string means no members.
pub fn parse_team_members(raw: &str) -> Result<Vec<TeamMember>, AppError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw)
        .map_err(|e| AppError::Validation(format!("Invalid team members format: {e}")))
}

pub fn parse_year(year: &str) -> Result<AcademicYear, AppError> {
    year.trim()
        .parse()
        .map_err(|e: common::ParseEnumError| AppError::Validation(e.to_string()))
}

impl CreateRegistrationRequest {
    /// Validate and normalize the request.
    pub fn validate(self) -> Result<NewRegistration, AppError> {
        validate_required("Name", &self.name, 128)?;
        validate_email(&self.email)?;
        validate_required("Phone", &self.phone, 20)?;
        validate_required("College", &self.college, 256)?;
        validate_required("Department", &self.department, 128)?;
        let year = parse_year(&self.year)?;

        let team_members = match self.team_members {
            None => Vec::new(),
            Some(TeamMembersInput::Serialized(raw)) => parse_team_members(&raw)?,
            Some(TeamMembersInput::List(list)) => list,
        };
        for (i, member) in team_members.iter().enumerate() {
            validate_required(&format!("Team member {} name", i + 1), &member.name, 128)?;
            validate_email(&member.email).map_err(|_| {
                AppError::Validation(format!("Team member {} email is invalid", i + 1))
            })?;
        }
        let team_members = team_members
            .into_iter()
            .map(|m| TeamMember {
                name: m.name.trim().to_string(),
                email: normalize_email(&m.email),
                phone: m.phone.trim().to_string(),
                college: m.college.trim().to_string(),
            })
            .collect();

        Ok(NewRegistration {
            event_id: self.event_id,
            name: self.name.trim().to_string(),
            email: normalize_email(&self.email),
            phone: self.phone.trim().to_string(),
            college: self.college.trim().to_string(),
            department: self.department.trim().to_string(),
            year,
            team_name: non_blank(self.team_name),
            team_members,
            transaction_id: non_blank(self.transaction_id),
            additional_info: non_blank(self.additional_info),
        })
    }
}

/// Admin status update. Absent fields are left unchanged.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegistrationStatusRequest {
    pub registration_status: Option<RegistrationStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RegistrationListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Only registrations for this event.
    pub event_id: Option<i32>,
    pub registration_status: Option<RegistrationStatus>,
    pub payment_status: Option<PaymentStatus>,
    /// Case-insensitive match on name or email.
    pub search: Option<String>,
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

/// Trimmed view returned right after a registration is created.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSummary {
    #[schema(example = 12)]
    pub id: i32,
    /// Title of the event registered for.
    #[schema(example = "Code Sprint")]
    pub event: String,
    pub registration_status: RegistrationStatus,
    pub payment_status: PaymentStatus,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CreateRegistrationResponse {
    pub success: bool,
    pub registration: RegistrationSummary,
}

/// Event fields embedded in registration views.
#[derive(Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventBrief {
    pub id: i32,
    pub title: String,
    pub event_type: common::EventType,
    pub registration_fee: f64,
    pub venue: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub image: Option<String>,
}

impl From<crate::entity::event::Model> for EventBrief {
    fn from(m: crate::entity::event::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            event_type: m.event_type,
            registration_fee: m.registration_fee,
            venue: m.venue,
            event_date: m.event_date,
            image: m.image,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: i32,
    /// NULL only if the event row disappeared underneath.
    pub event: Option<EventBrief>,
    pub student_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub department: String,
    pub year: AcademicYear,
    pub team_name: Option<String>,
    pub team_members: Vec<TeamMember>,
    pub transaction_id: Option<String>,
    /// Public path of the payment screenshot, e.g. `uploads/payments/1700000000000-proof.png`.
    pub payment_proof: Option<String>,
    pub payment_status: PaymentStatus,
    pub registration_status: RegistrationStatus,
    pub additional_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RegistrationResponse {
    pub fn new(m: registration::Model, event: Option<EventBrief>) -> Self {
        Self {
            id: m.id,
            event,
            student_id: m.student_id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            college: m.college,
            department: m.department,
            year: m.year,
            team_name: m.team_name,
            team_members: serde_json::from_value(m.team_members).unwrap_or_default(),
            transaction_id: m.transaction_id,
            payment_proof: m.payment_proof,
            payment_status: m.payment_status,
            registration_status: m.registration_status,
            additional_info: m.additional_info,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RegistrationListResponse {
    pub data: Vec<RegistrationResponse>,
    pub pagination: Pagination,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct RegisteredEventsResponse {
    pub success: bool,
    pub registrations: Vec<RegistrationResponse>,
}
