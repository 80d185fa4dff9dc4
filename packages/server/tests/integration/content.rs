use serde_json::json;

use crate::common::{TestApp, routes};

mod speakers {
    use super::*;

    fn speaker(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "designation": "Staff Engineer",
            "organization": "Acme",
            "bio": "Builds compilers.",
        })
    }

    #[tokio::test]
    async fn speakers_are_appended_in_display_order() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let first = app.post_with_token(routes::SPEAKERS, &speaker("Ada"), &token).await;
        let second = app.post_with_token(routes::SPEAKERS, &speaker("Grace"), &token).await;
        assert_eq!(first.status, 201, "{}", first.text);
        assert_eq!(second.status, 201, "{}", second.text);
        assert_eq!(first.body["position"], 0);
        assert_eq!(second.body["position"], 1);

        let moved = app
            .patch_with_token(&routes::speaker(first.id()), &json!({"position": 5}), &token)
            .await;
        assert_eq!(moved.status, 200, "{}", moved.text);
        assert_eq!(moved.body["position"], 5);
        assert_eq!(moved.body["designation"], "Staff Engineer");

        let list = app.get_without_token(routes::SPEAKERS).await;
        assert_eq!(list.status, 200);
        let names: Vec<&str> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["Grace", "Ada"]);
    }

    #[tokio::test]
    async fn negative_position_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;
        let created = app.post_with_token(routes::SPEAKERS, &speaker("Ada"), &token).await;

        let res = app
            .patch_with_token(&routes::speaker(created.id()), &json!({"position": -1}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "Position must not be negative");
    }

    #[tokio::test]
    async fn speaker_changes_require_an_admin() {
        let app = TestApp::spawn().await;

        let res = app.post_without_token(routes::SPEAKERS, &speaker("Ada")).await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn deleting_a_speaker_twice_returns_404() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;
        let created = app.post_with_token(routes::SPEAKERS, &speaker("Ada"), &token).await;

        let first = app.delete_with_token(&routes::speaker(created.id()), &token).await;
        let second = app.delete_with_token(&routes::speaker(created.id()), &token).await;

        assert_eq!(first.status, 204);
        assert_eq!(second.status, 404);
    }
}

mod sponsors {
    use super::*;

    #[tokio::test]
    async fn sponsor_crud_round_trip() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let created = app
            .post_with_token(
                routes::SPONSORS,
                &json!({"name": "Acme", "logo": "https://cdn.example.com/acme.svg", "tier": "gold"}),
                &token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert_eq!(created.body["tier"], "gold");
        assert!(created.body["website"].is_null());

        let updated = app
            .patch_with_token(
                &routes::sponsor(created.id()),
                &json!({"tier": "title", "website": "https://acme.example.com"}),
                &token,
            )
            .await;
        assert_eq!(updated.status, 200, "{}", updated.text);
        assert_eq!(updated.body["tier"], "title");
        assert_eq!(updated.body["name"], "Acme");

        let list = app.get_without_token(routes::SPONSORS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);

        let deleted = app.delete_with_token(&routes::sponsor(created.id()), &token).await;
        assert_eq!(deleted.status, 204);
    }

    #[tokio::test]
    async fn unknown_tier_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::SPONSORS,
                &json!({"name": "Acme", "logo": "logo.svg", "tier": "platinum"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod schedule {
    use super::*;

    #[tokio::test]
    async fn slots_are_listed_chronologically() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        for (title, start, end) in [
            ("Lunch", "2026-03-01T12:00:00Z", "2026-03-01T13:00:00Z"),
            ("Opening", "2026-03-01T09:00:00Z", "2026-03-01T09:30:00Z"),
        ] {
            let res = app
                .post_with_token(
                    routes::SCHEDULE,
                    &json!({"title": title, "startTime": start, "endTime": end}),
                    &token,
                )
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let list = app.get_without_token(routes::SCHEDULE).await;
        let titles: Vec<&str> = list
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, ["Opening", "Lunch"]);
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::SCHEDULE,
                &json!({
                    "title": "Backwards",
                    "startTime": "2026-03-01T12:00:00Z",
                    "endTime": "2026-03-01T11:00:00Z",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "endTime must be after startTime");
    }

    #[tokio::test]
    async fn patch_validates_against_stored_times() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;
        let created = app
            .post_with_token(
                routes::SCHEDULE,
                &json!({
                    "title": "Keynote",
                    "startTime": "2026-03-01T10:00:00Z",
                    "endTime": "2026-03-01T11:00:00Z",
                }),
                &token,
            )
            .await;
        assert_eq!(created.status, 201, "{}", created.text);

        let res = app
            .patch_with_token(
                &routes::schedule(created.id()),
                &json!({"startTime": "2026-03-01T11:30:00Z"}),
                &token,
            )
            .await;
        assert_eq!(res.status, 400);

        let ok = app
            .patch_with_token(
                &routes::schedule(created.id()),
                &json!({"endTime": "2026-03-01T12:00:00Z", "venue": "Main Hall"}),
                &token,
            )
            .await;
        assert_eq!(ok.status, 200, "{}", ok.text);
        assert_eq!(ok.body["venue"], "Main Hall");
        assert_eq!(ok.body["title"], "Keynote");
    }

    #[tokio::test]
    async fn slot_for_missing_event_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app
            .post_with_token(
                routes::SCHEDULE,
                &json!({
                    "eventId": 777,
                    "title": "Ghost",
                    "startTime": "2026-03-01T10:00:00Z",
                    "endTime": "2026-03-01T11:00:00Z",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod contact {
    use super::*;

    #[tokio::test]
    async fn message_lifecycle() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let sent = app
            .post_without_token(
                routes::CONTACT,
                &json!({
                    "name": "Visitor",
                    "email": "Visitor@Example.com",
                    "subject": "Accommodation",
                    "message": "Is there a hostel?",
                }),
            )
            .await;
        assert_eq!(sent.status, 201, "{}", sent.text);
        assert_eq!(sent.body["email"], "visitor@example.com");
        assert_eq!(sent.body["isResolved"], false);

        let open = app
            .get_with_token(&format!("{}?isResolved=false", routes::CONTACT), &token)
            .await;
        assert_eq!(open.status, 200, "{}", open.text);
        assert_eq!(open.body["pagination"]["total"], 1);

        let resolved = app
            .put_with_token(&routes::contact_resolve(sent.id()), &json!({}), &token)
            .await;
        assert_eq!(resolved.status, 200, "{}", resolved.text);
        assert_eq!(resolved.body["isResolved"], true);

        let open = app
            .get_with_token(&format!("{}?isResolved=false", routes::CONTACT), &token)
            .await;
        assert_eq!(open.body["pagination"]["total"], 0);

        let deleted = app.delete_with_token(&routes::contact(sent.id()), &token).await;
        assert_eq!(deleted.status, 204);
    }

    #[tokio::test]
    async fn listing_messages_requires_an_admin() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::CONTACT).await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::CONTACT,
                &json!({"name": "Visitor", "email": "v@example.com", "message": "   "}),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod settings {
    use super::*;

    #[tokio::test]
    async fn defaults_are_served_before_first_save() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::SETTINGS).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["siteName"], "TechShethra");
        assert_eq!(res.body["registrationOpen"], true);
        assert!(res.body["updatedAt"].is_null());
    }

    #[tokio::test]
    async fn updates_merge_and_persist() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let first = app
            .put_with_token(
                routes::SETTINGS,
                &json!({"tagline": "Build. Break. Learn.", "registrationOpen": false}),
                &token,
            )
            .await;
        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(first.body["siteName"], "TechShethra");
        assert!(first.body["updatedAt"].is_string());

        let second = app
            .put_with_token(routes::SETTINGS, &json!({"venue": "Main Campus"}), &token)
            .await;
        assert_eq!(second.status, 200, "{}", second.text);

        let res = app.get_without_token(routes::SETTINGS).await;
        assert_eq!(res.body["tagline"], "Build. Break. Learn.");
        assert_eq!(res.body["registrationOpen"], false);
        assert_eq!(res.body["venue"], "Main Campus");
    }

    #[tokio::test]
    async fn updating_settings_requires_an_admin() {
        let app = TestApp::spawn().await;

        let res = app.put_with_token(routes::SETTINGS, &json!({}), "bogus").await;

        assert_eq!(res.status, 401);
    }
}
