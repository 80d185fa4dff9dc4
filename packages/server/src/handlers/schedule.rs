use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, schedule};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::schedule::*;
use crate::models::shared::non_blank;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Schedule",
    operation_id = "listSchedule",
    summary = "List schedule slots in chronological order",
    responses(
        (status = 200, description = "Schedule", body = Vec<ScheduleResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_schedule(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleResponse>>, AppError> {
    let slots = schedule::Entity::find()
        .order_by_asc(schedule::Column::StartTime)
        .order_by_asc(schedule::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(slots.into_iter().map(ScheduleResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Schedule",
    operation_id = "createScheduleSlot",
    summary = "Add a schedule slot",
    description = "`endTime` must be after `startTime`. `eventId`, when given, must reference an existing event.",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Slot created", body = ScheduleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.id()))]
pub async fn create_schedule(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_schedule(&payload)?;
    if let Some(event_id) = payload.event_id {
        ensure_event_exists(&state.db, event_id).await?;
    }

    let now = chrono::Utc::now();
    let model = schedule::ActiveModel {
        event_id: Set(payload.event_id),
        title: Set(payload.title.trim().to_string()),
        description: Set(non_blank(payload.description)),
        venue: Set(non_blank(payload.venue)),
        start_time: Set(payload.start_time),
        end_time: Set(payload.end_time),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(ScheduleResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Schedule",
    operation_id = "updateScheduleSlot",
    summary = "Update a schedule slot",
    description = "PATCH semantics. The resulting time range is validated against the stored values of fields not in the payload.",
    params(("id" = i32, Path, description = "Schedule slot ID")),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Slot updated", body = ScheduleResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Slot or event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(id, admin_id = admin.id()))]
pub async fn update_schedule(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateScheduleRequest>,
) -> Result<Json<ScheduleResponse>, AppError> {
    validate_update_schedule(&payload)?;

    let existing = schedule::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Schedule slot not found".into()))?;
    if payload == UpdateScheduleRequest::default() {
        return Ok(Json(existing.into()));
    }

    validate_time_range(
        payload.start_time.unwrap_or(existing.start_time),
        payload.end_time.unwrap_or(existing.end_time),
    )?;
    if let Some(Some(event_id)) = payload.event_id {
        ensure_event_exists(&state.db, event_id).await?;
    }

    let mut active: schedule::ActiveModel = existing.into();
    if let Some(event_id) = payload.event_id {
        active.event_id = Set(event_id);
    }
    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(non_blank(description));
    }
    if let Some(venue) = payload.venue {
        active.venue = Set(non_blank(venue));
    }
    if let Some(start_time) = payload.start_time {
        active.start_time = Set(start_time);
    }
    if let Some(end_time) = payload.end_time {
        active.end_time = Set(end_time);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Schedule",
    operation_id = "deleteScheduleSlot",
    summary = "Delete a schedule slot",
    params(("id" = i32, Path, description = "Schedule slot ID")),
    responses(
        (status = 204, description = "Slot deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Slot not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn delete_schedule(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = schedule::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Schedule slot not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_event_exists<C: ConnectionTrait>(db: &C, event_id: i32) -> Result<(), AppError> {
    let found = event::Entity::find_by_id(event_id).count(db).await?;
    if found == 0 {
        return Err(AppError::NotFound("Event not found".into()));
    }
    Ok(())
}
