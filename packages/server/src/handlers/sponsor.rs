use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::sponsor;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::shared::non_blank;
use crate::models::sponsor::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Sponsors",
    operation_id = "listSponsors",
    summary = "List sponsors in display order",
    responses(
        (status = 200, description = "Sponsors", body = Vec<SponsorResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_sponsors(
    State(state): State<AppState>,
) -> Result<Json<Vec<SponsorResponse>>, AppError> {
    let sponsors = sponsor::Entity::find()
        .order_by_asc(sponsor::Column::Position)
        .order_by_asc(sponsor::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(sponsors.into_iter().map(SponsorResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Sponsors",
    operation_id = "createSponsor",
    summary = "Add a sponsor",
    request_body = CreateSponsorRequest,
    responses(
        (status = 201, description = "Sponsor created", body = SponsorResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.id()))]
pub async fn create_sponsor(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSponsorRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_sponsor(&payload)?;

    let position = match payload.position {
        Some(p) => p,
        None => next_position(&state.db).await?,
    };

    let now = chrono::Utc::now();
    let model = sponsor::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        logo: Set(payload.logo.trim().to_string()),
        website: Set(non_blank(payload.website)),
        tier: Set(payload.tier),
        position: Set(position),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(SponsorResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Sponsors",
    operation_id = "updateSponsor",
    summary = "Update a sponsor",
    params(("id" = i32, Path, description = "Sponsor ID")),
    request_body = UpdateSponsorRequest,
    responses(
        (status = 200, description = "Sponsor updated", body = SponsorResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Sponsor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(id, admin_id = admin.id()))]
pub async fn update_sponsor(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateSponsorRequest>,
) -> Result<Json<SponsorResponse>, AppError> {
    validate_update_sponsor(&payload)?;

    let existing = sponsor::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sponsor not found".into()))?;
    if payload == UpdateSponsorRequest::default() {
        return Ok(Json(existing.into()));
    }

    let mut active: sponsor::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(ref logo) = payload.logo {
        active.logo = Set(logo.trim().to_string());
    }
    if let Some(website) = payload.website {
        active.website = Set(non_blank(website));
    }
    if let Some(tier) = payload.tier {
        active.tier = Set(tier);
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
    tag = "Sponsors",
    operation_id = "deleteSponsor",
    summary = "Delete a sponsor",
    params(("id" = i32, Path, description = "Sponsor ID")),
    responses(
        (status = 204, description = "Sponsor deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Sponsor not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn delete_sponsor(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = sponsor::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Sponsor not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn next_position<C: ConnectionTrait>(db: &C) -> Result<i32, AppError> {
    let max_pos: Option<i32> = sponsor::Entity::find()
        .select_only()
        .column_as(sponsor::Column::Position.max(), "max_pos")
        .into_tuple::<Option<i32>>()
        .one(db)
        .await?
        .flatten();
    max_pos
        .unwrap_or(-1)
        .checked_add(1)
        .ok_or_else(|| AppError::Validation("Position overflow".into()))
}
