use common::{AcademicYear, PaymentStatus, RegistrationStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A teammate listed on a team registration.
/// Stored as JSON array in the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TeamMember {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub college: String,
}

/// One signup for one event. The personal fields are a snapshot taken at
/// submission time and are not kept in sync with the student profile.
///
/// `(event_id, email)` is unique; see `seed::ensure_indexes`.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "registration")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(indexed)]
    pub event_id: i32,
    #[sea_orm(belongs_to, from = "event_id", to = "id")]
    pub event: HasOne<super::event::Entity>,

    /// NULL for registrations made through the public form.
    #[sea_orm(indexed)]
    pub student_id: Option<i32>,
    #[sea_orm(belongs_to, from = "student_id", to = "id")]
    pub student: HasOne<super::student::Entity>,

    pub name: String,
    /// Always stored trimmed and lower-cased.
    pub email: String,
    pub phone: String,
    pub college: String,
    pub department: String,
    pub year: AcademicYear,

    pub team_name: Option<String>,
    /// Team members stored as JSON array of {name, email, phone, college} objects.
    #[sea_orm(column_type = "JsonBinary")]
    pub team_members: serde_json::Value,

    pub transaction_id: Option<String>,
    /// Public path of the uploaded payment screenshot.
    pub payment_proof: Option<String>,

    #[sea_orm(indexed)]
    pub payment_status: PaymentStatus,
    #[sea_orm(indexed)]
    pub registration_status: RegistrationStatus,

    #[sea_orm(column_type = "Text", nullable)]
    pub additional_info: Option<String>,

    #[sea_orm(indexed)]
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
