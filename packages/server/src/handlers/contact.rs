use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::contact;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::contact::*;
use crate::models::shared::{Pagination, non_blank, normalize_email, page_offset, page_params};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Contact",
    operation_id = "submitContact",
    summary = "Send a message to the organizers",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Message stored", body = ContactResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_contact(&payload)?;

    let now = chrono::Utc::now();
    let model = contact::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        email: Set(normalize_email(&payload.email)),
        subject: Set(non_blank(payload.subject)),
        message: Set(payload.message.trim().to_string()),
        is_resolved: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    tracing::info!(contact_id = model.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(ContactResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Contact",
    operation_id = "listContacts",
    summary = "List contact messages",
    description = "Newest first, optionally filtered by `isResolved`.",
    params(ContactListQuery),
    responses(
        (status = 200, description = "Messages", body = ContactListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_contacts(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<ContactListQuery>,
) -> Result<Json<ContactListResponse>, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let mut select = contact::Entity::find();
    if let Some(is_resolved) = query.is_resolved {
        select = select.filter(contact::Column::IsResolved.eq(is_resolved));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let rows = select
        .order_by_desc(contact::Column::CreatedAt)
        .order_by_desc(contact::Column::Id)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    Ok(Json(ContactListResponse {
        data: rows.into_iter().map(ContactResponse::from).collect(),
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    put,
    path = "/{id}/resolve",
    tag = "Contact",
    operation_id = "resolveContact",
    summary = "Mark a contact message as resolved",
    params(("id" = i32, Path, description = "Contact message ID")),
    responses(
        (status = 200, description = "Message resolved", body = ContactResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Message not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn resolve_contact(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ContactResponse>, AppError> {
    let existing = contact::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Contact message not found".into()))?;
    if existing.is_resolved {
        return Ok(Json(existing.into()));
    }

    let mut active: contact::ActiveModel = existing.into();
    active.is_resolved = Set(true);
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&state.db).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Contact",
    operation_id = "deleteContact",
    summary = "Delete a contact message",
    params(("id" = i32, Path, description = "Contact message ID")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Message not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn delete_contact(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = contact::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Contact message not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
