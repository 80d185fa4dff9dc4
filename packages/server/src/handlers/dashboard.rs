use axum::{Json, extract::State};
use common::{PaymentStatus, RegistrationStatus};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{contact, event, registration, speaker, sponsor, student};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::handlers::registration::with_events;
use crate::models::dashboard::*;
use crate::state::AppState;

/// Number of registrations shown in the "recent" panel.
const RECENT_REGISTRATIONS: u64 = 5;

#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    operation_id = "getDashboard",
    summary = "Aggregate statistics for the back-office dashboard",
    description = "Entity counts, the five newest registrations, registrations per event (highest first), and registrations grouped by payment and registration status. Each grouping sums to `counts.registrations`.",
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin))]
pub async fn get_dashboard(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AppError> {
    // One snapshot so the groupings agree with the totals.
    let txn = state
        .db
        .begin_with_config(Some(IsolationLevel::RepeatableRead), Some(AccessMode::ReadOnly))
        .await?;

    let counts = DashboardCounts {
        events: event::Entity::find().count(&txn).await?,
        registrations: registration::Entity::find().count(&txn).await?,
        students: student::Entity::find().count(&txn).await?,
        speakers: speaker::Entity::find().count(&txn).await?,
        sponsors: sponsor::Entity::find().count(&txn).await?,
        contacts: contact::Entity::find().count(&txn).await?,
        unresolved_contacts: contact::Entity::find()
            .filter(contact::Column::IsResolved.eq(false))
            .count(&txn)
            .await?,
    };

    let recent = registration::Entity::find()
        .order_by_desc(registration::Column::CreatedAt)
        .order_by_desc(registration::Column::Id)
        .limit(RECENT_REGISTRATIONS)
        .all(&txn)
        .await?;
    let recent_registrations = with_events(&txn, recent).await?;

    let per_event: Vec<(i32, i64)> = registration::Entity::find()
        .select_only()
        .column(registration::Column::EventId)
        .column_as(registration::Column::Id.count(), "count")
        .group_by(registration::Column::EventId)
        .into_tuple()
        .all(&txn)
        .await?;
    let titles: std::collections::HashMap<i32, String> = event::Entity::find()
        .select_only()
        .column(event::Column::Id)
        .column(event::Column::Title)
        .filter(event::Column::Id.is_in(per_event.iter().map(|(id, _)| *id)))
        .into_tuple::<(i32, String)>()
        .all(&txn)
        .await?
        .into_iter()
        .collect();
    let mut event_registrations: Vec<EventRegistrationCount> = per_event
        .into_iter()
        .map(|(event_id, count)| EventRegistrationCount {
            event_id,
            title: titles.get(&event_id).cloned().unwrap_or_default(),
            count: count as u64,
        })
        .collect();
    event_registrations.sort_by(|a, b| b.count.cmp(&a.count).then(a.event_id.cmp(&b.event_id)));

    let payment_stats = registration::Entity::find()
        .select_only()
        .column(registration::Column::PaymentStatus)
        .column_as(registration::Column::Id.count(), "count")
        .group_by(registration::Column::PaymentStatus)
        .into_tuple::<(PaymentStatus, i64)>()
        .all(&txn)
        .await?
        .into_iter()
        .map(|(status, count)| PaymentStatusCount {
            status,
            count: count as u64,
        })
        .collect();

    let registration_stats = registration::Entity::find()
        .select_only()
        .column(registration::Column::RegistrationStatus)
        .column_as(registration::Column::Id.count(), "count")
        .group_by(registration::Column::RegistrationStatus)
        .into_tuple::<(RegistrationStatus, i64)>()
        .all(&txn)
        .await?
        .into_iter()
        .map(|(status, count)| RegistrationStatusCount {
            status,
            count: count as u64,
        })
        .collect();

    txn.commit().await?;

    Ok(Json(DashboardResponse {
        counts,
        recent_registrations,
        event_registrations,
        payment_stats,
        registration_stats,
    }))
}
