use common::AdminRole;
use sea_orm::*;
use sea_orm::sea_query::{Index, IndexCreateStatement, PostgresQueryBuilder};
use tracing::info;

use crate::config::AuthConfig;
use crate::entity::{admin, registration};
use crate::models::shared::normalize_email;
use crate::utils::hash::hash_password_blocking;

/// Name of the unique index backing the one-registration-per-email rule.
pub const REGISTRATION_EVENT_EMAIL_INDEX: &str = "idx_registration_event_email";

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync only handles single-column indexes, so composite
/// ones are created manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Duplicate detection for registrations must not depend on the
    // application-level check alone.
    let unique = Index::create()
        .if_not_exists()
        .unique()
        .name(REGISTRATION_EVENT_EMAIL_INDEX)
        .table(registration::Entity)
        .col(registration::Column::EventId)
        .col(registration::Column::Email)
        .to_owned();
    create_index(db, REGISTRATION_EVENT_EMAIL_INDEX, unique).await?;

    // Admin listing: filter by status, newest first.
    let listing = Index::create()
        .if_not_exists()
        .name("idx_registration_status_created")
        .table(registration::Entity)
        .col(registration::Column::RegistrationStatus)
        .col(registration::Column::CreatedAt)
        .to_owned();
    if let Err(e) = create_index(db, "idx_registration_status_created", listing).await {
        tracing::warn!(
            "Failed to create index idx_registration_status_created: {}",
            e
        );
    }

    Ok(())
}

async fn create_index(
    db: &DatabaseConnection,
    name: &str,
    stmt: IndexCreateStatement,
) -> Result<(), DbErr> {
    db.execute_unprepared(&stmt.to_string(PostgresQueryBuilder))
        .await?;
    info!("Ensured index {} exists", name);
    Ok(())
}

/// Create the configured superadmin when the admin table is empty.
///
/// Returns `true` if an account was created.
pub async fn bootstrap_admin(db: &DatabaseConnection, auth: &AuthConfig) -> anyhow::Result<bool> {
    let Some(ref bootstrap) = auth.bootstrap_admin else {
        return Ok(false);
    };

    if admin::Entity::find().count(db).await? > 0 {
        return Ok(false);
    }

    let password = hash_password_blocking(bootstrap.password.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap admin password: {e:?}"))?;

    let now = chrono::Utc::now();
    let email = normalize_email(&bootstrap.email);
    admin::ActiveModel {
        name: Set(bootstrap.name.trim().to_string()),
        email: Set(email.clone()),
        password: Set(password),
        role: Set(AdminRole::Superadmin),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(email = %email, "Created bootstrap superadmin");
    Ok(true)
}
