use chrono::{DateTime, Utc};
use common::SponsorTier;
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_required};
use super::speaker::validate_position;
use crate::entity::sponsor;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSponsorRequest {
    #[schema(example = "Acme Corp")]
    pub name: String,
    /// Logo URL.
    pub logo: String,
    pub website: Option<String>,
    pub tier: SponsorTier,
    pub position: Option<i32>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSponsorRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub website: Option<Option<String>>,
    pub tier: Option<SponsorTier>,
    pub position: Option<i32>,
}

pub fn validate_create_sponsor(req: &CreateSponsorRequest) -> Result<(), AppError> {
    validate_required("Name", &req.name, 128)?;
    validate_required("Logo", &req.logo, 2048)?;
    validate_position(req.position)
}

pub fn validate_update_sponsor(req: &UpdateSponsorRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_required("Name", name, 128)?;
    }
    if let Some(ref logo) = req.logo {
        validate_required("Logo", logo, 2048)?;
    }
    validate_position(req.position)
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SponsorResponse {
    pub id: i32,
    pub name: String,
    pub logo: String,
    pub website: Option<String>,
    pub tier: SponsorTier,
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<sponsor::Model> for SponsorResponse {
    fn from(m: sponsor::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            logo: m.logo,
            website: m.website,
            tier: m.tier,
            position: m.position,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
