use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{admin, student};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::auth::*;
use crate::models::shared::normalize_email;
use crate::state::AppState;
use crate::utils::hash::{hash_password_blocking, verify_password_blocking};
use crate::utils::jwt::{self, AdminClaims, StudentClaims};

#[utoipa::path(
    post,
    path = "/login",
    tag = "Admin Auth",
    operation_id = "adminLogin",
    summary = "Log in as an admin",
    description = "Returns a bearer token that is accepted by admin routes only.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AdminLoginResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let admin = admin::Entity::find()
        .filter(admin::Column::Email.eq(normalize_email(&payload.email)))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password_blocking(payload.password, admin.password.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let claims = AdminClaims::new(
        admin.id,
        &admin.email,
        admin.role,
        state.config.auth.token_ttl_hours,
    );
    let token = jwt::sign(&claims, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    tracing::info!(admin_id = admin.id, "Admin logged in");
    Ok(Json(AdminLoginResponse {
        token,
        admin: admin.into(),
    }))
}

#[utoipa::path(
    get,
    path = "/me",
    tag = "Admin Auth",
    operation_id = "adminMe",
    summary = "Get the current admin",
    responses(
        (status = 200, description = "Current admin", body = AdminResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin), fields(admin_id = admin.id()))]
pub async fn admin_me(admin: AuthAdmin) -> Json<AdminResponse> {
    Json(admin.0.into())
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "Student Auth",
    operation_id = "registerStudent",
    summary = "Create a student account",
    description = "Creates a student account and returns a bearer token accepted by student routes only. Emails are matched case-insensitively.",
    request_body = StudentRegisterRequest,
    responses(
        (status = 201, description = "Student created", body = StudentAuthResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 409, description = "Email already registered (EMAIL_TAKEN)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn register_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<StudentRegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let year = validate_student_register(&payload)?;
    let email = normalize_email(&payload.email);

    let taken = student::Entity::find()
        .filter(student::Column::Email.eq(email.as_str()))
        .count(&state.db)
        .await?;
    if taken > 0 {
        return Err(AppError::EmailTaken);
    }

    let hash = hash_password_blocking(payload.password).await?;

    let now = chrono::Utc::now();
    let new_student = student::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        email: Set(email),
        password: Set(hash),
        phone: Set(payload.phone.trim().to_string()),
        college: Set(payload.college.trim().to_string()),
        department: Set(payload.department.trim().to_string()),
        year: Set(year),
        profile_picture: Set(None),
        is_verified: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let student = new_student
        .insert(&state.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                tracing::debug!("Student signup race: unique constraint caught on insert");
                AppError::EmailTaken
            }
            _ => AppError::from(e),
        })?;

    let token = student_token(&state, &student)?;
    tracing::info!(student_id = student.id, "Student registered");

    Ok((
        StatusCode::CREATED,
        Json(StudentAuthResponse {
            success: true,
            token,
            student: student.into(),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Student Auth",
    operation_id = "loginStudent",
    summary = "Log in as a student",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = StudentAuthResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Invalid credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login_student(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<StudentAuthResponse>, AppError> {
    validate_login_request(&payload)?;

    let student = student::Entity::find()
        .filter(student::Column::Email.eq(normalize_email(&payload.email)))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password_blocking(payload.password, student.password.clone()).await? {
        return Err(AppError::InvalidCredentials);
    }

    let token = student_token(&state, &student)?;
    Ok(Json(StudentAuthResponse {
        success: true,
        token,
        student: student.into(),
    }))
}

fn student_token(state: &AppState, student: &student::Model) -> Result<String, AppError> {
    let claims = StudentClaims::new(
        student.id,
        &student.email,
        state.config.auth.token_ttl_hours,
    );
    jwt::sign(&claims, &state.config.auth.jwt_secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))
}
