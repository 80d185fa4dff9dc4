use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::EntityTrait;

use crate::entity::{admin, student};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{self, AdminClaims, StudentClaims, TokenClaims};

/// Pull the bearer token out of the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::TokenMissing)?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::TokenInvalid)
}

fn decode_claims<C: TokenClaims>(parts: &Parts, state: &AppState) -> Result<C, AppError> {
    let token = bearer_token(parts)?;
    jwt::verify::<C>(token, &state.config.auth.jwt_secret).map_err(|e| {
        tracing::debug!("Rejected {} token: {}", C::AUDIENCE, e);
        AppError::TokenInvalid
    })
}

/// Authenticated back-office admin.
///
/// Add this as a handler parameter to require an admin token. The admin row
/// is re-loaded on every request, so deleted admins lose access immediately.
/// Role checks happen via `require_superadmin()` in the handler body.
pub struct AuthAdmin(pub admin::Model);

impl AuthAdmin {
    pub fn id(&self) -> i32 {
        self.0.id
    }

    /// Returns `Ok(())` if the admin is a superadmin, `Err(PermissionDenied)` otherwise.
    pub fn require_superadmin(&self) -> Result<(), AppError> {
        if self.0.role.is_superadmin() {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims: AdminClaims = decode_claims(parts, state)?;

        let admin = admin::Entity::find_by_id(claims.uid)
            .one(&state.db)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        Ok(AuthAdmin(admin))
    }
}

/// Authenticated portal student.
pub struct AuthStudent(pub student::Model);

impl AuthStudent {
    pub fn id(&self) -> i32 {
        self.0.id
    }
}

impl FromRequestParts<AppState> for AuthStudent {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims: StudentClaims = decode_claims(parts, state)?;

        let student = student::Entity::find_by_id(claims.uid)
            .one(&state.db)
            .await?
            .ok_or(AppError::TokenInvalid)?;

        Ok(AuthStudent(student))
    }
}
