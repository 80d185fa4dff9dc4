use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::*;
use crate::state::AppState;

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/events", event_routes())
        .nest("/registration", registration_routes())
        .nest("/students", student_routes())
        .nest("/admin", admin_routes())
        .nest("/speakers", speaker_routes())
        .nest("/sponsors", sponsor_routes())
        .nest("/schedule", schedule_routes())
        .nest("/contact", contact_routes())
        .nest("/settings", settings_routes())
}

fn event_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(event::list_events, event::create_event))
        .routes(routes!(
            event::get_event,
            event::update_event,
            event::delete_event
        ))
}

fn registration_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            registration::create_registration,
            registration::list_registrations
        ))
        .routes(routes!(
            registration::get_registration,
            registration::update_registration_status,
            registration::delete_registration
        ))
}

fn student_routes() -> OpenApiRouter<AppState> {
    let portal = OpenApiRouter::new()
        .routes(routes!(auth::register_student))
        .routes(routes!(auth::login_student))
        .routes(routes!(student::get_profile, student::update_profile))
        .routes(routes!(student::registered_events));

    let upload = OpenApiRouter::new()
        .routes(routes!(student::register_for_event))
        .layer(student::portal_registration_body_limit());

    portal.merge(upload)
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(auth::admin_login))
        .routes(routes!(auth::admin_me))
        .routes(routes!(admin::list_admins, admin::create_admin))
        .routes(routes!(dashboard::get_dashboard))
        .routes(routes!(event::list_all_events))
        .routes(routes!(student::list_students))
        .routes(routes!(student::verify_student))
        .routes(routes!(student::delete_student))
}

fn speaker_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(speaker::list_speakers, speaker::create_speaker))
        .routes(routes!(speaker::update_speaker, speaker::delete_speaker))
}

fn sponsor_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(sponsor::list_sponsors, sponsor::create_sponsor))
        .routes(routes!(sponsor::update_sponsor, sponsor::delete_sponsor))
}

fn schedule_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(schedule::list_schedule, schedule::create_schedule))
        .routes(routes!(schedule::update_schedule, schedule::delete_schedule))
}

fn contact_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(contact::submit_contact, contact::list_contacts))
        .routes(routes!(contact::resolve_contact))
        .routes(routes!(contact::delete_contact))
}

fn settings_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(settings::get_settings, settings::update_settings))
}
