use chrono::{DateTime, Utc};
use common::EventType;
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_title};
use crate::entity::event;
use crate::error::AppError;

/// Allowed team size, inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TeamSize {
    #[schema(example = 1)]
    pub min: i32,
    #[schema(example = 4)]
    pub max: i32,
}

impl Default for TeamSize {
    fn default() -> Self {
        Self { min: 1, max: 1 }
    }
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[schema(example = "Code Sprint")]
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub event_type: EventType,
    #[schema(example = 120)]
    pub capacity: i32,
    /// Fee in rupees, 0 for free events.
    #[serde(default)]
    #[schema(example = 100.0)]
    pub registration_fee: f64,
    #[serde(default)]
    pub prizes: Vec<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub is_team_event: bool,
    #[serde(default)]
    pub team_size: TeamSize,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
    pub venue: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
}

/// Event update with PATCH semantics.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
    pub event_type: Option<EventType>,
    pub capacity: Option<i32>,
    pub registration_fee: Option<f64>,
    pub prizes: Option<Vec<String>>,
    pub requirements: Option<Vec<String>>,
    pub is_team_event: Option<bool>,
    pub team_size: Option<TeamSize>,
    pub is_active: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub venue: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub event_date: Option<Option<DateTime<Utc>>>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct EventListQuery {
    pub event_type: Option<EventType>,
    /// Case-insensitive title match.
    pub search: Option<String>,
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() || description.len() > 100_000 {
        return Err(AppError::Validation(
            "Description must be non-empty and at most 100KB".into(),
        ));
    }
    Ok(())
}

fn validate_fee(fee: f64) -> Result<(), AppError> {
    if !fee.is_finite() || fee < 0.0 {
        return Err(AppError::Validation(
            "Registration fee must be a non-negative number".into(),
        ));
    }
    Ok(())
}

fn validate_capacity(capacity: i32) -> Result<(), AppError> {
    if capacity < 0 {
        return Err(AppError::Validation("Capacity must not be negative".into()));
    }
    Ok(())
}

pub fn validate_team_size(size: TeamSize) -> Result<(), AppError> {
    if size.min < 1 || size.max < size.min {
        return Err(AppError::Validation(
            "Team size must satisfy 1 <= min <= max".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_event(req: &CreateEventRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_description(&req.description)?;
    validate_fee(req.registration_fee)?;
    validate_capacity(req.capacity)?;
    validate_team_size(req.team_size)
}

pub fn validate_update_event(req: &UpdateEventRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(ref description) = req.description {
        validate_description(description)?;
    }
    if let Some(fee) = req.registration_fee {
        validate_fee(fee)?;
    }
    if let Some(capacity) = req.capacity {
        validate_capacity(capacity)?;
    }
    if let Some(size) = req.team_size {
        validate_team_size(size)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Response DTOs
// ---------------------------------------------------------------------------

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    #[schema(example = 1)]
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub event_type: EventType,
    pub capacity: i32,
    pub registration_fee: f64,
    pub prizes: Vec<String>,
    pub requirements: Vec<String>,
    pub is_team_event: bool,
    pub team_size: TeamSize,
    pub is_active: bool,
    pub venue: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<event::Model> for EventResponse {
    fn from(m: event::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            image: m.image,
            event_type: m.event_type,
            capacity: m.capacity,
            registration_fee: m.registration_fee,
            prizes: serde_json::from_value(m.prizes).unwrap_or_default(),
            requirements: serde_json::from_value(m.requirements).unwrap_or_default(),
            is_team_event: m.is_team_event,
            team_size: TeamSize {
                min: m.team_size_min,
                max: m.team_size_max,
            },
            is_active: m.is_active,
            venue: m.venue,
            event_date: m.event_date,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EventListResponse {
    pub data: Vec<EventResponse>,
}
