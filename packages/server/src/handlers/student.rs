use axum::Json;
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{registration, student};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::{AuthAdmin, AuthStudent};
use crate::extractors::json::AppJson;
use crate::handlers::registration::{PaymentProof, submit_registration, with_events};
use crate::models::auth::*;
use crate::models::registration::{
    CreateRegistrationRequest, CreateRegistrationResponse, RegisteredEventsResponse,
    TeamMembersInput,
};
use crate::models::shared::{Pagination, escape_like, page_offset, page_params};
use crate::models::student::*;
use crate::state::AppState;
use crate::utils::filename::ensure_image;
use crate::utils::hash::hash_password_blocking;

/// Multipart field carrying the payment screenshot.
const PAYMENT_SCREENSHOT_FIELD: &str = "paymentScreenshot";

/// Body limit layer for the portal registration route (6MB).
pub fn portal_registration_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(6 * 1024 * 1024)
}

fn multipart_error(e: MultipartError) -> AppError {
    match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
        _ => AppError::Validation(format!("Multipart error: {e}")),
    }
}

#[utoipa::path(
    get,
    path = "/profile",
    tag = "Student Portal",
    operation_id = "getStudentProfile",
    summary = "Get the current student's profile",
    description = "Includes the ids of the student's registrations and of the events they registered for, newest first.",
    responses(
        (status = 200, description = "Profile", body = StudentProfileEnvelope),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(student_id = auth.id()))]
pub async fn get_profile(
    auth: AuthStudent,
    State(state): State<AppState>,
) -> Result<Json<StudentProfileEnvelope>, AppError> {
    Ok(Json(profile_envelope(&state.db, auth.0).await?))
}

#[utoipa::path(
    patch,
    path = "/profile",
    tag = "Student Portal",
    operation_id = "updateStudentProfile",
    summary = "Update the current student's profile",
    description = "PATCH semantics. Email cannot be changed. A new `password` replaces the stored hash.",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = StudentProfileEnvelope),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, payload), fields(student_id = auth.id()))]
pub async fn update_profile(
    auth: AuthStudent,
    State(state): State<AppState>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Json<StudentProfileEnvelope>, AppError> {
    let year = validate_update_profile(&payload)?;

    let current = auth.0;
    let mut active: student::ActiveModel = current.clone().into();
    let mut changed = false;

    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
        changed = true;
    }
    if let Some(ref phone) = payload.phone {
        active.phone = Set(phone.trim().to_string());
        changed = true;
    }
    if let Some(ref college) = payload.college {
        active.college = Set(college.trim().to_string());
        changed = true;
    }
    if let Some(ref department) = payload.department {
        active.department = Set(department.trim().to_string());
        changed = true;
    }
    if let Some(year) = year {
        active.year = Set(year);
        changed = true;
    }
    if let Some(picture) = patch_url(payload.profile_picture) {
        active.profile_picture = Set(picture);
        changed = true;
    }
    if let Some(password) = payload.password {
        active.password = Set(hash_password_blocking(password).await?);
        changed = true;
    }

    let model = if changed {
        active.updated_at = Set(chrono::Utc::now());
        active.update(&state.db).await?
    } else {
        current
    };

    Ok(Json(profile_envelope(&state.db, model).await?))
}

#[utoipa::path(
    post,
    path = "/events/register",
    tag = "Student Portal",
    operation_id = "registerForEvent",
    summary = "Register for an event with an optional payment screenshot",
    description = "Multipart form with text fields `eventId`, `name`, `email`, `phone`, `college`, `department`, `year`, and optional `teamName`, `teamMembers` (JSON-encoded array of {name, email, phone, college}), `transactionId`, `additionalInfo`. An optional `paymentScreenshot` file must be an image of at most 5 MB; it is stored under `uploads/payments/`. The registration is linked to the calling student. Body limit: 6 MB.",
    request_body(content_type = "multipart/form-data", description = "Registration fields and optional payment screenshot"),
    responses(
        (status = 201, description = "Registration created", body = CreateRegistrationResponse),
        (status = 400, description = "Validation error or duplicate (VALIDATION_ERROR, ALREADY_REGISTERED)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Event not found (NOT_FOUND)", body = ErrorBody),
        (status = 413, description = "Body too large (PAYLOAD_TOO_LARGE)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth, multipart), fields(student_id = auth.id()))]
pub async fn register_for_event(
    auth: AuthStudent,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = PortalForm::default();
    let mut proof: Option<PaymentProof> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == PAYMENT_SCREENSHOT_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_owned);
            let data = field.bytes().await.map_err(multipart_error)?;
            // Browsers send an empty part when no file was chosen.
            if filename.is_empty() && data.is_empty() {
                continue;
            }
            ensure_image(content_type.as_deref(), &filename)
                .map_err(|e| AppError::Validation(e.message().into()))?;
            let limit = state.config.uploads.max_payment_proof_size;
            if data.len() as u64 > limit {
                return Err(AppError::Validation(format!(
                    "File is too large (max {} MB)",
                    limit / (1024 * 1024)
                )));
            }
            proof = Some(PaymentProof {
                filename,
                data: data.to_vec(),
            });
            continue;
        }

        let value = field.text().await.map_err(multipart_error)?;
        form.set(&name, value);
    }

    let request = form.into_request()?;
    let created = submit_registration(&state, request, Some(auth.id()), proof).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Text fields of the portal registration form.
#[derive(Default)]
struct PortalForm {
    event_id: Option<String>,
    name: String,
    email: String,
    phone: String,
    college: String,
    department: String,
    year: String,
    team_name: Option<String>,
    team_members: Option<String>,
    transaction_id: Option<String>,
    additional_info: Option<String>,
}

impl PortalForm {
    fn set(&mut self, field: &str, value: String) {
        match field {
            "eventId" => self.event_id = Some(value),
            "name" => self.name = value,
            "email" => self.email = value,
            "phone" => self.phone = value,
            "college" => self.college = value,
            "department" => self.department = value,
            "year" => self.year = value,
            "teamName" => self.team_name = Some(value),
            "teamMembers" => self.team_members = Some(value),
            "transactionId" => self.transaction_id = Some(value),
            "additionalInfo" => self.additional_info = Some(value),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    fn into_request(self) -> Result<CreateRegistrationRequest, AppError> {
        let event_id = self
            .event_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Validation("eventId is required".into()))?
            .parse::<i32>()
            .map_err(|_| AppError::Validation("eventId must be an integer".into()))?;

        Ok(CreateRegistrationRequest {
            event_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            college: self.college,
            department: self.department,
            year: self.year,
            team_name: self.team_name,
            team_members: self.team_members.map(TeamMembersInput::Serialized),
            transaction_id: self.transaction_id,
            additional_info: self.additional_info,
        })
    }
}

#[utoipa::path(
    get,
    path = "/events/registered",
    tag = "Student Portal",
    operation_id = "listRegisteredEvents",
    summary = "List the current student's registrations",
    description = "Registrations made through the portal by this student, newest first, each with its event embedded.",
    responses(
        (status = 200, description = "Registrations", body = RegisteredEventsResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth), fields(student_id = auth.id()))]
pub async fn registered_events(
    auth: AuthStudent,
    State(state): State<AppState>,
) -> Result<Json<RegisteredEventsResponse>, AppError> {
    let rows = registration::Entity::find()
        .filter(registration::Column::StudentId.eq(auth.id()))
        .order_by_desc(registration::Column::CreatedAt)
        .order_by_desc(registration::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(RegisteredEventsResponse {
        success: true,
        registrations: with_events(&state.db, rows).await?,
    }))
}

async fn profile_envelope<C: ConnectionTrait>(
    db: &C,
    student: student::Model,
) -> Result<StudentProfileEnvelope, AppError> {
    let links: Vec<(i32, i32)> = registration::Entity::find()
        .select_only()
        .column(registration::Column::Id)
        .column(registration::Column::EventId)
        .filter(registration::Column::StudentId.eq(student.id))
        .order_by_desc(registration::Column::CreatedAt)
        .order_by_desc(registration::Column::Id)
        .into_tuple()
        .all(db)
        .await?;

    let (registrations, registered_events): (Vec<i32>, Vec<i32>) = links.into_iter().unzip();
    Ok(StudentProfileEnvelope {
        success: true,
        student: StudentProfileResponse {
            student: student.into(),
            registrations,
            registered_events,
        },
    })
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    operation_id = "listStudents",
    summary = "List student accounts",
    description = "Newest first. Optional `isVerified` filter and `search` (case-insensitive substring of name, email or college).",
    params(StudentListQuery),
    responses(
        (status = 200, description = "Students", body = StudentListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, _admin, query))]
pub async fn list_students(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<StudentListResponse>, AppError> {
    let (page, per_page) = page_params(query.page, query.per_page);

    let mut select = student::Entity::find();
    if let Some(is_verified) = query.is_verified {
        select = select.filter(student::Column::IsVerified.eq(is_verified));
    }
    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            let pattern = format!("%{}%", term.to_lowercase());
            let mut any = Condition::any();
            for column in [
                student::Column::Name,
                student::Column::Email,
                student::Column::College,
            ] {
                any = any.add(
                    Expr::expr(Func::lower(Expr::col(column)))
                        .like(LikeExpr::new(pattern.clone()).escape('\\')),
                );
            }
            select = select.filter(any);
        }
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;

    let students = select
        .order_by_desc(student::Column::CreatedAt)
        .order_by_desc(student::Column::Id)
        .offset(Some(page_offset(page, per_page)))
        .limit(Some(per_page))
        .all(&state.db)
        .await?;

    Ok(Json(StudentListResponse {
        data: students.into_iter().map(StudentResponse::from).collect(),
        pagination: Pagination::new(page, per_page, total),
    }))
}

#[utoipa::path(
    put,
    path = "/students/{id}/verify",
    tag = "Students",
    operation_id = "verifyStudent",
    summary = "Set a student's verified flag",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = VerifyStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = StudentResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin, payload), fields(id, admin_id = admin.id()))]
pub async fn verify_student(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<VerifyStudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    let existing = find_student(&state.db, id).await?;
    if existing.is_verified == payload.is_verified {
        return Ok(Json(existing.into()));
    }

    let mut active: student::ActiveModel = existing.into();
    active.is_verified = Set(payload.is_verified);
    active.updated_at = Set(chrono::Utc::now());
    let model = active.update(&state.db).await?;

    tracing::info!(student_id = id, is_verified = model.is_verified, "Student verification changed");
    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "Students",
    operation_id = "deleteStudent",
    summary = "Delete a student account",
    description = "The student's registrations are kept and unlinked from the account.",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Student not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, admin), fields(id, admin_id = admin.id()))]
pub async fn delete_student(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    use sea_orm::sea_query::LockType;

    let txn = state.db.begin().await?;
    student::Entity::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))?;

    registration::Entity::update_many()
        .col_expr(
            registration::Column::StudentId,
            Expr::value(Option::<i32>::None),
        )
        .filter(registration::Column::StudentId.eq(id))
        .exec(&txn)
        .await?;
    student::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    tracing::info!(student_id = id, "Student deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_student<C: ConnectionTrait>(db: &C, id: i32) -> Result<student::Model, AppError> {
    student::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Student not found".into()))
}
