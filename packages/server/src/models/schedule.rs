use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::shared::{double_option, validate_title};
use crate::entity::schedule;
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    /// Event this slot belongs to, if any.
    pub event_id: Option<i32>,
    #[schema(example = "Opening Ceremony")]
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub event_id: Option<Option<i32>>,
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub venue: Option<Option<String>>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

pub fn validate_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::Validation(
            "endTime must be after startTime".into(),
        ));
    }
    Ok(())
}

pub fn validate_create_schedule(req: &CreateScheduleRequest) -> Result<(), AppError> {
    validate_title(&req.title)?;
    validate_time_range(req.start_time, req.end_time)
}

/// Field-level checks only; the merged time range is checked against the
/// stored row by the handler.
pub fn validate_update_schedule(req: &UpdateScheduleRequest) -> Result<(), AppError> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    Ok(())
}

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    pub id: i32,
    pub event_id: Option<i32>,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<schedule::Model> for ScheduleResponse {
    fn from(m: schedule::Model) -> Self {
        Self {
            id: m.id,
            event_id: m.event_id,
            title: m.title,
            description: m.description,
            venue: m.venue,
            start_time: m.start_time,
            end_time: m.end_time,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
