use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{event, registration, schedule};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::handlers::registration::discard_upload;
use crate::models::event::*;
use crate::models::shared::{escape_like, non_blank};
use crate::state::AppState;

fn to_json_list(items: Vec<String>) -> serde_json::Value {
    serde_json::Value::Array(items.into_iter().map(serde_json::Value::String).collect())
}

fn filtered(query: &EventListQuery) -> Select<event::Entity> {
    let mut select = event::Entity::find();
    if let Some(event_type) = query.event_type {
        select = select.filter(event::Column::EventType.eq(event_type));
    }
    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(event::Column::Title)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }
    select
        .order_by_asc(event::Column::EventDate)
        .order_by_asc(event::Column::Id)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Events",
    operation_id = "listEvents",
    summary = "List active events",
    description = "Returns every active event, soonest first. Optional `eventType` and `search` (case-insensitive title match) filters.",
    params(EventListQuery),
    responses(
        (status = 200, description = "Active events", body = EventListResponse),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = filtered(&query)
        .filter(event::Column::IsActive.eq(true))
        .all(&state.db)
        .await?;

    Ok(Json(EventListResponse {
        data: events.into_iter().map(EventResponse::from).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Events",
    operation_id = "getEvent",
    summary = "Get an active event by ID",
    description = "Inactive events are reported as not found.",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = EventResponse),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EventResponse>, AppError> {
    let model = find_event(&state.db, id).await?;
    if !model.is_active {
        return Err(AppError::NotFound("Event not found".into()));
    }
    Ok(Json(model.into()))
}

#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    operation_id = "listAllEvents",
    summary = "List all events, including inactive ones",
    params(EventListQuery),
    responses(
        (status = 200, description = "All events", body = EventListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_all_events(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<EventListQuery>,
) -> Result<Json<EventListResponse>, AppError> {
    let events = filtered(&query).all(&state.db).await?;
    Ok(Json(EventListResponse {
        data: events.into_iter().map(EventResponse::from).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Events",
    operation_id = "createEvent",
    summary = "Create an event",
    description = "Requires `1 <= teamSize.min <= teamSize.max`, a non-negative fee and capacity. New events are active unless `isActive` is false.",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(title = %payload.title, admin_id = admin.id()))]
pub async fn create_event(
    admin: AuthAdmin,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_event(&payload)?;

    let now = chrono::Utc::now();
    let new_event = event::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        image: Set(non_blank(payload.image)),
        event_type: Set(payload.event_type),
        capacity: Set(payload.capacity),
        registration_fee: Set(payload.registration_fee),
        prizes: Set(to_json_list(payload.prizes)),
        requirements: Set(to_json_list(payload.requirements)),
        is_team_event: Set(payload.is_team_event),
        team_size_min: Set(payload.team_size.min),
        team_size_max: Set(payload.team_size.max),
        is_active: Set(payload.is_active.unwrap_or(true)),
        venue: Set(non_blank(payload.venue)),
        event_date: Set(payload.event_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = new_event.insert(&state.db).await?;
    tracing::info!(event_id = model.id, "Event created");

    Ok((StatusCode::CREATED, Json(EventResponse::from(model))))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Events",
    operation_id = "updateEvent",
    summary = "Update an event",
    description = "Partially updates an event using PATCH semantics. An empty payload returns the current resource unchanged.",
    params(("id" = i32, Path, description = "Event ID")),
    request_body = UpdateEventRequest,
    responses(
        (status = 200, description = "Event updated", body = EventResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(id, admin_id = admin.id()))]
pub async fn update_event(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateEventRequest>,
) -> Result<Json<EventResponse>, AppError> {
    validate_update_event(&payload)?;

    if payload == UpdateEventRequest::default() {
        let existing = find_event(&state.db, id).await?;
        return Ok(Json(existing.into()));
    }

    let txn = state.db.begin().await?;
    let existing = find_event_for_update(&txn, id).await?;
    let mut active: event::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(image) = payload.image {
        active.image = Set(non_blank(image));
    }
    if let Some(event_type) = payload.event_type {
        active.event_type = Set(event_type);
    }
    if let Some(capacity) = payload.capacity {
        active.capacity = Set(capacity);
    }
    if let Some(fee) = payload.registration_fee {
        active.registration_fee = Set(fee);
    }
    if let Some(prizes) = payload.prizes {
        active.prizes = Set(to_json_list(prizes));
    }
    if let Some(requirements) = payload.requirements {
        active.requirements = Set(to_json_list(requirements));
    }
    if let Some(is_team_event) = payload.is_team_event {
        active.is_team_event = Set(is_team_event);
    }
    if let Some(size) = payload.team_size {
        active.team_size_min = Set(size.min);
        active.team_size_max = Set(size.max);
    }
    if let Some(is_active) = payload.is_active {
        active.is_active = Set(is_active);
    }
    if let Some(venue) = payload.venue {
        active.venue = Set(non_blank(venue));
    }
    if let Some(event_date) = payload.event_date {
        active.event_date = Set(event_date);
    }
    active.updated_at = Set(chrono::Utc::now());

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Events",
    operation_id = "deleteEvent",
    summary = "Delete an event",
    description = "Permanently deletes an event together with its registrations and schedule entries. Payment screenshots of the removed registrations are deleted as well.",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn delete_event(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;
    find_event_for_update(&txn, id).await?;

    let proofs: Vec<Option<String>> = registration::Entity::find()
        .select_only()
        .column(registration::Column::PaymentProof)
        .filter(registration::Column::EventId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;

    let removed = registration::Entity::delete_many()
        .filter(registration::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    schedule::Entity::delete_many()
        .filter(schedule::Column::EventId.eq(id))
        .exec(&txn)
        .await?;
    event::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    for path in proofs.into_iter().flatten() {
        discard_upload(&state, &path).await;
    }

    tracing::info!(
        event_id = id,
        registrations = removed.rows_affected,
        "Event deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn find_event<C: ConnectionTrait>(db: &C, id: i32) -> Result<event::Model, AppError> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
}

async fn find_event_for_update(
    txn: &DatabaseTransaction,
    id: i32,
) -> Result<event::Model, AppError> {
    use sea_orm::sea_query::LockType;
    event::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Event not found".into()))
}
