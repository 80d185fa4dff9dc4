use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::speaker;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::shared::non_blank;
use crate::models::speaker::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Speakers",
    operation_id = "listSpeakers",
    summary = "List speakers in display order",
    responses(
        (status = 200, description = "Speakers", body = Vec<SpeakerResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_speakers(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpeakerResponse>>, AppError> {
    let speakers = speaker::Entity::find()
        .order_by_asc(speaker::Column::Position)
        .order_by_asc(speaker::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(speakers.into_iter().map(SpeakerResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Speakers",
    operation_id = "createSpeaker",
    summary = "Add a speaker",
    description = "Position is appended after the last speaker if omitted.",
    request_body = CreateSpeakerRequest,
    responses(
        (status = 201, description = "Speaker created", body = SpeakerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.id()))]
pub async fn create_speaker(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSpeakerRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_speaker(&payload)?;

    let position = match payload.position {
        Some(p) => p,
        None => next_position(&state.db).await?,
    };

    let now = chrono::Utc::now();
    let model = speaker::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        designation: Set(payload.designation.trim().to_string()),
        organization: Set(payload.organization.trim().to_string()),
        bio: Set(payload.bio),
        image: Set(non_blank(payload.image)),
        linkedin: Set(non_blank(payload.linkedin)),
        position: Set(position),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(SpeakerResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Speakers",
    operation_id = "updateSpeaker",
    summary = "Update a speaker",
    params(("id" = i32, Path, description = "Speaker ID")),
    request_body = UpdateSpeakerRequest,
    responses(
        (status = 200, description = "Speaker updated", body = SpeakerResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Speaker not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(id, admin_id = admin.id()))]
pub async fn update_speaker(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSpeakerRequest>,
) -> Result<Json<SpeakerResponse>, AppError> {
    validate_update_speaker(&payload)?;

    let existing = find_speaker(&state.db, id).await?;
    if payload == UpdateSpeakerRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: speaker::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref designation) = payload.designation {
        active.designation = Set(designation.trim().to_string());
    }
    if let Some(ref organization) = payload.organization {
        active.organization = Set(organization.trim().to_string());
    }
    if let Some(bio) = payload.bio {
        active.bio = Set(bio);
    }
    if let Some(image) = payload.image {
        active.image = Set(non_blank(image));
    }
    if let Some(linkedin) = payload.linkedin {
        active.linkedin = Set(non_blank(linkedin));
    }
    if let Some(position) = payload.position {
        active.position = Set(position);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Speakers",
    operation_id = "deleteSpeaker",
    summary = "Delete a speaker",
    params(("id" = i32, Path, description = "Speaker ID")),
    responses(
        (status = 204, description = "Speaker deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Speaker not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn delete_speaker(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = speaker::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Speaker not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn find_speaker<C: ConnectionTrait>(db: &C, id: i32) -> Result<speaker::Model, AppError> {
    speaker::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Speaker not found".into()))
}

async fn next_position<C: ConnectionTrait>(db: &C) -> Result<i32, AppError> {
    let max: Option<i32> = speaker::Entity::find()
        .select_only()
        .column_as(speaker::Column::Position.max(), "max_pos")
        .into_tuple::<Option<i32>>()
        .one(db)
        .await?
        .flatten();
    max.unwrap_or(-1)
        .checked_add(1)
        .ok_or_else(|| AppError::Validation("Position overflow".into()))
}
