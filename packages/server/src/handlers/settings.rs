use axum::{Json, extract::State};
use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use tracing::instrument;

use crate::entity::site_settings::{self, SETTINGS_ID};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::settings::*;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Settings",
    operation_id = "getSettings",
    summary = "Get site settings",
    description = "Returns built-in defaults until the settings are saved for the first time.",
    responses(
        (status = 200, description = "Site settings", body = SettingsResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SettingsResponse>, AppError> {
    Ok(Json(current_settings(&state.db).await?))
}

#[utoipa::path(
    put,
    path = "/",
    tag = "Settings",
    operation_id = "updateSettings",
    summary = "Update site settings",
    description = "Only the fields present in the payload change. The settings row is created on first save.",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = SettingsResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(admin_id = admin.id()))]
pub async fn update_settings(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateSettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    validate_update_settings(&payload)?;

    let txn = state.db.begin().await?;
    let merged = current_settings_for_update(&txn).await?.merge(payload);
    let row = site_settings::ActiveModel {
        id: Set(SETTINGS_ID),
        site_name: Set(merged.site_name),
        tagline: Set(merged.tagline),
        about_text: Set(merged.about_text),
        contact_email: Set(merged.contact_email),
        contact_phone: Set(merged.contact_phone),
        venue: Set(merged.venue),
        event_start_date: Set(merged.event_start_date),
        event_end_date: Set(merged.event_end_date),
        registration_open: Set(merged.registration_open),
        updated_at: Set(chrono::Utc::now()),
    };

    site_settings::Entity::insert(row)
        .on_conflict(
            OnConflict::column(site_settings::Column::Id)
                .update_columns([
                    site_settings::Column::SiteName,
                    site_settings::Column::Tagline,
                    site_settings::Column::AboutText,
                    site_settings::Column::ContactEmail,
                    site_settings::Column::ContactPhone,
                    site_settings::Column::Venue,
                    site_settings::Column::EventStartDate,
                    site_settings::Column::EventEndDate,
                    site_settings::Column::RegistrationOpen,
                    site_settings::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(&txn)
        .await?;

    let saved = site_settings::Entity::find_by_id(SETTINGS_ID)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::Internal("Settings row missing after upsert".into()))?;
    txn.commit().await?;

    tracing::info!("Site settings updated");
    Ok(Json(saved.into()))
}

async fn current_settings<C: ConnectionTrait>(db: &C) -> Result<SettingsResponse, AppError> {
    Ok(site_settings::Entity::find_by_id(SETTINGS_ID)
        .one(db)
        .await?
        .map(SettingsResponse::from)
        .unwrap_or_default())
}

async fn current_settings_for_update(
    txn: &DatabaseTransaction,
) -> Result<SettingsResponse, AppError> {
    use sea_orm::sea_query::LockType;
    Ok(site_settings::Entity::find_by_id(SETTINGS_ID)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .map(SettingsResponse::from)
        .unwrap_or_default())
}
