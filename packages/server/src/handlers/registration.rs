use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{PaymentStatus, RegistrationStatus};
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, registration};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::registration::*;
use crate::models::shared::{Pagination, escape_like, page_offset, page_params};
use crate::state::AppState;
use crate::utils::filename::{timestamped_name, upload_nonce};

/// Directory under the upload root that holds payment screenshots.
pub const PAYMENT_PROOF_CATEGORY: &str = "payments";

/// A payment screenshot received with a portal registration, already checked
/// to be an image.
pub struct PaymentProof {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Create one registration. Shared by the public form and the student portal.
///
/// The event is resolved before the request is validated, so an unknown event
/// is reported as 404 whatever else is wrong with the request.
/// The event lookup, duplicate check and insert run in one transaction, and
/// the unique index on `(event_id, email)` turns a lost race into the same
/// `AlreadyRegistered` error as the explicit check. A stored payment proof is
/// removed again if the row cannot be persisted.
pub(crate) async fn submit_registration(
    state: &AppState,
    request: CreateRegistrationRequest,
    student_id: Option<i32>,
    proof: Option<PaymentProof>,
) -> Result<CreateRegistrationResponse, AppError> {
    let txn = state.db.begin().await?;

    let event = event::Entity::find_by_id(request.event_id)
        .lock_shared()
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))?;

    if !event.is_active {
        return Err(AppError::Validation(
            "Event is not open for registration".into(),
        ));
    }

    let new = request.validate()?;

    let duplicates = registration::Entity::find()
        .filter(registration::Column::EventId.eq(event.id))
        .filter(registration::Column::Email.eq(new.email.as_str()))
        .count(&txn)
        .await?;
    if duplicates > 0 {
        return Err(AppError::AlreadyRegistered);
    }

    let payment_proof = match proof {
        Some(proof) => Some(store_payment_proof(state, &proof).await?),
        None => None,
    };

    let team_members = serde_json::to_value(&new.team_members)
        .map_err(|e| AppError::Internal(format!("Team member serialization error: {e}")))?;
    let now = chrono::Utc::now();
    let active = registration::ActiveModel {
        event_id: Set(event.id),
        student_id: Set(student_id),
        name: Set(new.name),
        email: Set(new.email),
        phone: Set(new.phone),
        college: Set(new.college),
        department: Set(new.department),
        year: Set(new.year),
        team_name: Set(new.team_name),
        team_members: Set(team_members),
        transaction_id: Set(new.transaction_id),
        payment_proof: Set(payment_proof.clone()),
        payment_status: Set(PaymentStatus::initial_for_fee(event.registration_fee)),
        registration_status: Set(RegistrationStatus::Pending),
        additional_info: Set(new.additional_info),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = match persist_registration(txn, active).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(ref path) = payment_proof {
                discard_upload(state, path).await;
            }
            return Err(e);
        }
    };

    tracing::info!(
        registration_id = model.id,
        event_id = event.id,
        student_id = ?student_id,
        payment_status = %model.payment_status,
        "Registration created"
    );

    Ok(CreateRegistrationResponse {
        success: true,
        registration: RegistrationSummary {
            id: model.id,
            event: event.title,
            registration_status: model.registration_status,
            payment_status: model.payment_status,
        },
    })
}

async fn persist_registration(
    txn: DatabaseTransaction,
    active: registration::ActiveModel,
) -> Result<registration::Model, AppError> {
    let model = active.insert(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            tracing::debug!("Duplicate registration caught by unique index");
            AppError::AlreadyRegistered
        }
        _ => AppError::from(e),
    })?;
    txn.commit().await?;
    Ok(model)
}

async fn store_payment_proof(state: &AppState, proof: &PaymentProof) -> Result<String, AppError> {
    let name = timestamped_name(
        &proof.filename,
        chrono::Utc::now().timestamp_millis(),
        &upload_nonce(),
    )
    .map_err(|e| AppError::Validation(e.message().into()))?;
    let stored = state
        .uploads
        .put(PAYMENT_PROOF_CATEGORY, &name, &proof.data)
        .await?;
    Ok(stored.public_path)
}

/// Best-effort removal of an uploaded file; failures are only logged.
pub(crate) async fn discard_upload(state: &AppState, public_path: &str) {
    if let Err(e) = state.uploads.delete(public_path).await {
        tracing::warn!(path = public_path, error = %e, "Failed to remove upload");
    }
}

/// Load the embedded event views for a set of event ids.
pub(crate) async fn event_briefs<C: ConnectionTrait>(
    db: &C,
    ids: impl IntoIterator<Item = i32>,
) -> Result<HashMap<i32, EventBrief>, AppError> {
    let mut ids: Vec<i32> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let events = event::Entity::find()
        .filter(event::Column::Id.is_in(ids))
        .all(db)
        .await?;
    Ok(events
        .into_iter()
        .map(|e| (e.id, EventBrief::from(e)))
        .collect())
}

/// Attach event views to registration rows, preserving order.
pub(crate) async fn with_events<C: ConnectionTrait>(
    db: &C,
    rows: Vec<registration::Model>,
) -> Result<Vec<RegistrationResponse>, AppError> {
    let events = event_briefs(db, rows.iter().map(|r| r.event_id)).await?;
    Ok(rows
        .into_iter()
        .map(|r| {
            let brief = events.get(&r.event_id).cloned();
            RegistrationResponse::new(r, brief)
        })
        .collect())
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Registrations",
    operation_id = "createRegistration",
    summary = "Register for an event",
    description = "Public registration form without a payment screenshot. Free events are marked `completed` for payment immediately; paid events start as `pending`. A second registration with the same event and email is rejected with `ALREADY_REGISTERED`.",
    request_body = CreateRegistrationRequest,
    responses(
        (status = 201, description = "Registration created", body = CreateRegistrationResponse),
        (status = 400, description = "Validation error or duplicate (VALIDATION_ERROR, ALREADY_REGISTERED)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(event_id = payload.event_id))]
pub async fn create_registration(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRegistrationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = submit_registration(&state, payload, None, None).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Registrations",
    operation_id = "listRegistrations",
    summary = "List registrations with filters and pagination",
    description = "Returns registrations newest first, each with its event embedded. Filters: `eventId`, `registrationStatus`, `paymentStatus`, and `search` (case-insensitive substring of name or email).",
    params(RegistrationListQuery),
    responses(
        (status = 200, description = "Registrations", body = RegistrationListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_registrations(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<RegistrationListQuery>,
) -> Result<Json<RegistrationListResponse>, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let mut select = registration::Entity::find();
    if let Some(event_id) = query.event_id {
        select = select.filter(registration::Column::EventId.eq(event_id));
    }
    if let Some(status) = query.registration_status {
        select = select.filter(registration::Column::RegistrationStatus.eq(status));
    }
    if let Some(status) = query.payment_status {
        select = select.filter(registration::Column::PaymentStatus.eq(status));
    }
    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            let pattern = format!("%{}%", term.to_lowercase());
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(registration::Column::Name)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::col(registration::Column::Email)
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let rows = select
        .order_by_desc(registration::Column::CreatedAt)
        .order_by_desc(registration::Column::Id)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    Ok(Json(RegistrationListResponse {
        data: with_events(&state.db, rows).await?,
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Registrations",
    operation_id = "getRegistration",
    summary = "Get a registration by ID",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration details", body = RegistrationResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin), fields(id))]
pub async fn get_registration(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<RegistrationResponse>, AppError> {
    let model = find_registration(&state.db, id).await?;
    Ok(Json(registration_view(&state.db, model).await?))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Registrations",
    operation_id = "updateRegistrationStatus",
    summary = "Update registration and payment status",
    description = "Overwrites `registrationStatus` and/or `paymentStatus` with the given values. Any status may be set from any other. Absent fields are left unchanged, and `updatedAt` only moves when a value actually changes.",
    params(("id" = i32, Path, description = "Registration ID")),
    request_body = UpdateRegistrationStatusRequest,
    responses(
        (status = 200, description = "Registration updated", body = RegistrationResponse),
        (status = 400, description = "Unknown status value (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(id, admin_id = admin.id()))]
pub async fn update_registration_status(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateRegistrationStatusRequest>,
) -> Result<Json<RegistrationResponse>, AppError> {
    if payload == UpdateRegistrationStatusRequest::default() {
        let existing = find_registration(&state.db, id).await?;
        return Ok(Json(registration_view(&state.db, existing).await?));
    }

    let txn = state.db.begin().await?;
    let existing = find_registration_for_update(&txn, id).await?;

    let mut active: registration::ActiveModel = existing.clone().into();
    let mut changed = false;
    if let Some(status) = payload.registration_status
        && status != existing.registration_status
    {
        active.registration_status = Set(status);
        changed = true;
    }
    if let Some(status) = payload.payment_status
        && status != existing.payment_status
    {
        active.payment_status = Set(status);
        changed = true;
    }

    let model = if changed {
        active.updated_at = Set(chrono::Utc::now());
        active.update(&txn).await?
    } else {
        existing
    };
    txn.commit().await?;

    if changed {
        tracing::info!(
            registration_id = model.id,
            registration_status = %model.registration_status,
            payment_status = %model.payment_status,
            "Registration status updated"
        );
    }

    Ok(Json(registration_view(&state.db, model).await?))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Registrations",
    operation_id = "deleteRegistration",
    summary = "Delete a registration",
    description = "Permanently deletes a registration and its payment screenshot, if any.",
    params(("id" = i32, Path, description = "Registration ID")),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Registration not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn delete_registration(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_registration_for_update(&txn, id).await?;
    registration::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    if let Some(ref path) = existing.payment_proof {
        discard_upload(&state, path).await;
    }

    tracing::info!(registration_id = id, "Registration deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn registration_view<C: ConnectionTrait>(
    db: &C,
    model: registration::Model,
) -> Result<RegistrationResponse, AppError> {
    let brief = event::Entity::find_by_id(model.event_id)
        .one(db)
        .await?
        .map(EventBrief::from);
    Ok(RegistrationResponse::new(model, brief))
}

async fn find_registration<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<registration::Model, AppError> {
    registration::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Registration not found".into()))
}

async fn find_registration_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<registration::Model, AppError> {
    use sea_orm::sea_query::LockType;
    registration::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Registration not found".into()))
}
