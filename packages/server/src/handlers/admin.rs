use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use common::AdminRole;
use sea_orm::*;
use tracing::instrument;

use crate::entity::admin;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::auth::{AdminResponse, CreateAdminRequest, validate_create_admin};
use crate::models::shared::normalize_email;
use crate::state::AppState;
use crate::utils::hash::hash_password_blocking;

#[utoipa::path(
    get,
    path = "/admins",
    tag = "Admins",
    operation_id = "listAdmins",
    summary = "List back-office accounts",
    description = "Superadmin only.",
    responses(
        (status = 200, description = "Admins", body = Vec<AdminResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(admin_id = admin.id()))]
pub async fn list_admins(
    admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminResponse>>, AppError> {
    admin.require_superadmin()?;

    let admins = admin::Entity::find()
        .order_by_asc(admin::Column::Id)
        .all(&state.db)
        .await?;
    Ok(Json(admins.into_iter().map(AdminResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/admins",
    tag = "Admins",
    operation_id = "createAdmin",
    summary = "Create a back-office account",
    description = "Superadmin only. `role` defaults to `admin`.",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin created", body = AdminResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 409, description = "Email already in use (EMAIL_TAKEN)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.id(), email = %payload.email))]
pub async fn create_admin(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError> {
    admin.require_superadmin()?;
    validate_create_admin(&payload)?;

    let hash = hash_password_blocking(payload.password).await?;
    let now = chrono::Utc::now();
    let new_admin = admin::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        email: Set(normalize_email(&payload.email)),
        password: Set(hash),
        role: Set(payload.role.unwrap_or(AdminRole::Admin)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_admin
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailTaken,
            _ => AppError::from(e),
        })?;

    tracing::info!(new_admin_id = model.id, role = %model.role, "Admin created");
    Ok((StatusCode::CREATED, Json(AdminResponse::from(model))))
}
