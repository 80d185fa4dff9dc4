use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_required};
use crate::entity::speaker;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpeakerRequest {
    #[schema(example = "Dr. Meera Iyer")]
    pub name: String,
    #[schema(example = "Principal Engineer")]
    pub designation: String,
    #[schema(example = "ISRO")]
    pub organization: String,
    #[serde(default)]
    pub bio: String,
    pub image: Option<String>,
    pub linkedin: Option<String>,
    /// Display order; appended after the last speaker when omitted.
    pub position: Option<i32>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpeakerRequest {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub organization: Option<String>,
    pub bio: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub linkedin: Option<Option<String>>,
    pub position: Option<i32>,
}

pub fn validate_position(position: Option<i32>) -> Result<(), AppError> {
    if position.is_some_and(|p| p < 0) {
        return Err(AppError::Validation("Position must not be negative".into()));
    }
    Ok(())
}

pub fn validate_create_speaker(req: &CreateSpeakerRequest) -> Result<(), AppError> {
    validate_required("Name", &req.name, 128)?;
    validate_required("Designation", &req.designation, 128)?;
    validate_required("Organization", &req.organization, 128)?;
    validate_position(req.position)
}

pub fn validate_update_speaker(req: &UpdateSpeakerRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_required("Name", name, 128)?;
    }
    if let Some(ref designation) = req.designation {
        validate_required("Designation", designation, 128)?;
    }
    if let Some(ref organization) = req.organization {
        validate_required("Organization", organization, 128)?;
    }
    validate_position(req.position)
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerResponse {
    pub id: i32,
    pub name: String,
    pub designation: String,
    pub organization: String,
    pub bio: String,
    pub image: Option<String>,
    pub linkedin: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<speaker::Model> for SpeakerResponse {
    fn from(m: speaker::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            designation: m.designation,
            organization: m.organization,
            bio: m.bio,
            image: m.image,
            linkedin: m.linkedin,
            position: m.position,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
