use chrono::{DateTime, Utc};
use common::{AcademicYear, AdminRole};
use serde::{Deserialize, Serialize};

use super::shared::{
    double_option, non_blank, validate_email, validate_password, validate_required,
};
use crate::entity::{admin, student};
use crate::error::AppError;

/// Request body for admin or student login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Account email (case-insensitive).
    #[schema(example = "admin@techshethra.in")]
    pub email: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() {
        return Err(AppError::Validation("Email must not be empty".into()));
    }
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// Request body for creating a back-office account (superadmin only).
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateAdminRequest {
    #[schema(example = "Ravi Kumar")]
    pub name: String,
    #[schema(example = "ravi@techshethra.in")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    /// Defaults to `admin`.
    #[serde(default)]
    pub role: Option<AdminRole>,
}

pub fn validate_create_admin(payload: &CreateAdminRequest) -> Result<(), AppError> {
    validate_required("Name", &payload.name, 128)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub created_at: DateTime<Utc>,
}

impl From<admin::Model> for AdminResponse {
    fn from(m: admin::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            role: m.role,
            created_at: m.created_at,
        }
    }
}

/// Successful admin login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminLoginResponse {
    /// JWT bearer token accepted by admin routes only.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub admin: AdminResponse,
}

// ---------------------------------------------------------------------------
// Student
// ---------------------------------------------------------------------------

/// Request body for student self-registration.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct StudentRegisterRequest {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@college.edu")]
    pub email: String,
    /// Password (8-128 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
    #[schema(example = "9999999999")]
    pub phone: String,
    #[schema(example = "RV College of Engineering")]
    pub college: String,
    #[schema(example = "CSE")]
    pub department: String,
    /// One of `1`..`5` or `Others`.
    #[schema(example = "2")]
    pub year: String,
}

pub fn validate_student_register(payload: &StudentRegisterRequest) -> Result<AcademicYear, AppError> {
    validate_required("Name", &payload.name, 128)?;
    validate_email(&payload.email)?;
    validate_password(&payload.password)?;
    validate_required("Phone", &payload.phone, 20)?;
    validate_required("College", &payload.college, 256)?;
    validate_required("Department", &payload.department, 128)?;
    super::registration::parse_year(&payload.year)
}

/// Profile update with PATCH semantics. Absent fields are left unchanged.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub college: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
    /// Send `null` to clear the picture.
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profile_picture: Option<Option<String>>,
    /// New password (8-128 characters).
    pub password: Option<String>,
}

pub fn validate_update_profile(
    payload: &UpdateProfileRequest,
) -> Result<Option<AcademicYear>, AppError> {
    if let Some(ref name) = payload.name {
        validate_required("Name", name, 128)?;
    }
    if let Some(ref phone) = payload.phone {
        validate_required("Phone", phone, 20)?;
    }
    if let Some(ref college) = payload.college {
        validate_required("College", college, 256)?;
    }
    if let Some(ref department) = payload.department {
        validate_required("Department", department, 128)?;
    }
    if let Some(ref password) = payload.password {
        validate_password(password)?;
    }
    payload
        .year
        .as_deref()
        .map(super::registration::parse_year)
        .transpose()
}

/// Normalize an optional URL field from a PATCH body: blank clears it.
pub fn patch_url(value: Option<Option<String>>) -> Option<Option<String>> {
    value.map(non_blank)
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    #[schema(example = 5)]
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub college: String,
    pub department: String,
    pub year: AcademicYear,
    pub profile_picture: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<student::Model> for StudentResponse {
    fn from(m: student::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            college: m.college,
            department: m.department,
            year: m.year,
            profile_picture: m.profile_picture,
            is_verified: m.is_verified,
            created_at: m.created_at,
        }
    }
}

/// Successful student register/login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentAuthResponse {
    pub success: bool,
    /// JWT bearer token accepted by student routes only.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub student: StudentResponse,
}

/// Student profile with the ids of the registrations and events it is linked to.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfileResponse {
    #[serde(flatten)]
    pub student: StudentResponse,
    /// Ids of the student's registrations, newest first.
    pub registrations: Vec<i32>,
    /// Ids of the events the student registered for, newest first.
    pub registered_events: Vec<i32>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentProfileEnvelope {
    pub success: bool,
    pub student: StudentProfileResponse,
}
