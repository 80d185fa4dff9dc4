use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{Pagination, validate_email, validate_required};
use crate::entity::contact;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateContactRequest {
    #[schema(example = "Asha Rao")]
    pub name: String,
    #[schema(example = "asha@college.edu")]
    pub email: String,
    pub subject: Option<String>,
    #[schema(example = "Is on-spot registration available?")]
    pub message: String,
}

pub fn validate_create_contact(req: &CreateContactRequest) -> Result<(), AppError> {
    validate_required("Name", &req.name, 128)?;
    validate_email(&req.email)?;
    validate_required("Message", &req.message, 5000)
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ContactListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub is_resolved: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<contact::Model> for ContactResponse {
    fn from(m: contact::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            is_resolved: m.is_resolved,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ContactListResponse {
    pub data: Vec<ContactResponse>,
    pub pagination: Pagination,
}
