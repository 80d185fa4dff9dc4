use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::json;

use techshethra::entity::{registration, schedule};

use crate::common::{TestApp, file_part, portal_form, routes};

mod catalogue {
    use super::*;

    #[tokio::test]
    async fn created_event_is_listed_with_defaults() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::EVENTS,
                &json!({
                    "title": "Code Sprint",
                    "description": "Three hours of competitive programming",
                    "eventType": "competition",
                    "capacity": 120,
                    "prizes": ["5000", "3000"],
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["registrationFee"], 0.0);
        assert_eq!(res.body["isActive"], true);
        assert_eq!(res.body["isTeamEvent"], false);
        assert_eq!(res.body["teamSize"], json!({"min": 1, "max": 1}));
        assert_eq!(res.body["prizes"], json!(["5000", "3000"]));
        assert_eq!(res.body["requirements"], json!([]));

        let list = app.get_without_token(routes::EVENTS).await;
        assert_eq!(list.status, 200);
        let data = list.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["title"], "Code Sprint");
    }

    #[tokio::test]
    async fn inactive_events_are_hidden_from_the_public() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;
        let id = app.create_event(&token, "Hidden", 0.0).await;

        let res = app
            .patch_with_token(&routes::event(id), &json!({"isActive": false}), &token)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        let list = app.get_without_token(routes::EVENTS).await;
        assert_eq!(list.body["data"].as_array().unwrap().len(), 0);

        let single = app.get_without_token(&routes::event(id)).await;
        assert_eq!(single.status, 404);

        let admin_list = app.get_with_token(routes::ADMIN_EVENTS, &token).await;
        assert_eq!(admin_list.status, 200);
        assert_eq!(admin_list.body["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_can_filter_by_type_and_search() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;
        app.create_event(&token, "Code Sprint", 0.0).await;
        let res = app
            .post_with_token(
                routes::EVENTS,
                &json!({
                    "title": "Rust Workshop",
                    "description": "Hands-on",
                    "eventType": "workshop",
                    "capacity": 40,
                }),
                &token,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let by_type = app
            .get_without_token(&format!("{}?eventType=workshop", routes::EVENTS))
            .await;
        let data = by_type.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["title"], "Rust Workshop");

        let by_search = app
            .get_without_token(&format!("{}?search=sprint", routes::EVENTS))
            .await;
        let data = by_search.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["title"], "Code Sprint");
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn team_size_min_above_max_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::EVENTS,
                &json!({
                    "title": "Hackathon",
                    "description": "24 hours",
                    "eventType": "hackathon",
                    "capacity": 50,
                    "isTeamEvent": true,
                    "teamSize": {"min": 4, "max": 2},
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn negative_fee_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::EVENTS,
                &json!({
                    "title": "Quiz",
                    "description": "Trivia",
                    "eventType": "competition",
                    "capacity": 50,
                    "registrationFee": -10.0,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn unknown_event_type_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::EVENTS,
                &json!({
                    "title": "Party",
                    "description": "Not a thing",
                    "eventType": "party",
                    "capacity": 50,
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn creating_without_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::EVENTS,
                &json!({
                    "title": "Quiz",
                    "description": "Trivia",
                    "eventType": "competition",
                    "capacity": 50,
                }),
            )
            .await;

        assert_eq!(res.status, 401);
    }
}

mod updates {
    use super::*;

    #[tokio::test]
    async fn patch_changes_only_given_fields() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;
        let id = app.create_event(&token, "Code Sprint", 100.0).await;

        let res = app
            .patch_with_token(
                &routes::event(id),
                &json!({"venue": "Hall A", "capacity": 200}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["title"], "Code Sprint");
        assert_eq!(res.body["registrationFee"], 100.0);
        assert_eq!(res.body["venue"], "Hall A");
        assert_eq!(res.body["capacity"], 200);

        let cleared = app
            .patch_with_token(&routes::event(id), &json!({"venue": null}), &token)
            .await;
        assert_eq!(cleared.status, 200, "{}", cleared.text);
        assert!(cleared.body["venue"].is_null());
    }

    #[tokio::test]
    async fn patching_missing_event_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .patch_with_token(&routes::event(9999), &json!({"capacity": 1}), &token)
            .await;

        assert_eq!(res.status, 404);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_an_event_removes_its_registrations_schedule_and_uploads() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;
        let event_id = app.create_event(&token, "Code Sprint", 100.0).await;
        let (_, student) = app.create_student("asha@college.edu").await;

        let form = portal_form(event_id, "asha@college.edu").part(
            "paymentScreenshot",
            file_part("proof.png", "image/png", vec![0x89, b'P', b'N', b'G']),
        );
        let reg = app
            .multipart_with_token(routes::STUDENT_EVENT_REGISTER, form, &student)
            .await;
        assert_eq!(reg.status, 201, "{}", reg.text);
        assert_eq!(app.stored_payment_proofs(), 1);

        let slot = app
            .post_with_token(
                routes::SCHEDULE,
                &json!({
                    "eventId": event_id,
                    "title": "Round 1",
                    "startTime": "2026-03-01T09:00:00Z",
                    "endTime": "2026-03-01T11:00:00Z",
                }),
                &token,
            )
            .await;
        assert_eq!(slot.status, 201, "{}", slot.text);

        let res = app.delete_with_token(&routes::event(event_id), &token).await;
        assert_eq!(res.status, 204, "{}", res.text);

        let remaining = registration::Entity::find()
            .filter(registration::Column::EventId.eq(event_id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        let slots = schedule::Entity::find()
            .filter(schedule::Column::EventId.eq(event_id))
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(slots, 0);
        assert_eq!(app.stored_payment_proofs(), 0);

        let gone = app.get_without_token(&routes::event(event_id)).await;
        assert_eq!(gone.status, 404);
    }
}
