use sea_orm::EntityTrait;
use serde_json::json;

use techshethra::entity::registration;

use crate::common::{TestApp, portal_form, routes};

mod admin_accounts {
    use super::*;

    #[tokio::test]
    async fn superadmin_can_create_and_list_admins() {
        let app = TestApp::spawn().await;
        let root = app.root_token().await;

        let res = app
            .post_with_token(
                routes::ADMIN_ADMINS,
                &json!({"name": "Staff", "email": "Staff@TechShethra.test", "password": "staffpassword"}),
                &root,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["email"], "staff@techshethra.test");
        assert_eq!(res.body["role"], "admin");

        let list = app.get_with_token(routes::ADMIN_ADMINS, &root).await;
        assert_eq!(list.status, 200, "{}", list.text);
        assert_eq!(list.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn duplicate_admin_email_is_rejected() {
        let app = TestApp::spawn().await;
        let root = app.root_token().await;
        let body = json!({"name": "Staff", "email": "staff@techshethra.test", "password": "staffpassword"});

        let first = app.post_with_token(routes::ADMIN_ADMINS, &body, &root).await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app.post_with_token(routes::ADMIN_ADMINS, &body, &root).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn plain_admin_cannot_manage_admins() {
        let app = TestApp::spawn().await;
        let staff = app.create_admin("staff@techshethra.test").await;

        let list = app.get_with_token(routes::ADMIN_ADMINS, &staff).await;
        assert_eq!(list.status, 403);
        assert_eq!(list.body["code"], "PERMISSION_DENIED");

        let create = app
            .post_with_token(
                routes::ADMIN_ADMINS,
                &json!({"name": "Other", "email": "other@techshethra.test", "password": "otherpassword"}),
                &staff,
            )
            .await;
        assert_eq!(create.status, 403);
    }

    #[tokio::test]
    async fn plain_admin_can_still_use_the_back_office() {
        let app = TestApp::spawn().await;
        let staff = app.create_admin("staff@techshethra.test").await;

        let res = app.get_with_token(routes::ADMIN_DASHBOARD, &staff).await;

        assert_eq!(res.status, 200, "{}", res.text);
    }
}

mod students {
    use super::*;

    #[tokio::test]
    async fn list_filters_by_verification_and_search() {
        let app = TestApp::spawn().await;
        let root = app.root_token().await;
        let (asha, _) = app.create_student("asha@college.edu").await;
        app.create_student("ravi@college.edu").await;

        let verify = app
            .put_with_token(
                &routes::admin_student_verify(asha),
                &json!({"isVerified": true}),
                &root,
            )
            .await;
        assert_eq!(verify.status, 200, "{}", verify.text);
        assert_eq!(verify.body["isVerified"], true);

        let verified = app
            .get_with_token(&format!("{}?isVerified=true", routes::ADMIN_STUDENTS), &root)
            .await;
        assert_eq!(verified.status, 200, "{}", verified.text);
        let data = verified.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["id"], asha);

        let searched = app
            .get_with_token(&format!("{}?search=RAVI", routes::ADMIN_STUDENTS), &root)
            .await;
        let data = searched.body["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["email"], "ravi@college.edu");
        assert_eq!(searched.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn verifying_missing_student_returns_404() {
        let app = TestApp::spawn().await;
        let root = app.root_token().await;

        let res = app
            .put_with_token(
                &routes::admin_student_verify(9999),
                &json!({"isVerified": true}),
                &root,
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn deleting_a_student_keeps_their_registrations() {
        let app = TestApp::spawn().await;
        let root = app.root_token().await;
        let event_id = app.create_event(&root, "Code Sprint", 0.0).await;
        let (student_id, token) = app.create_student("asha@college.edu").await;

        let reg = app
            .multipart_with_token(
                routes::STUDENT_EVENT_REGISTER,
                portal_form(event_id, "asha@college.edu"),
                &token,
            )
            .await;
        assert_eq!(reg.status, 201, "{}", reg.text);
        let registration_id = reg.body["registration"]["id"].as_i64().unwrap() as i32;

        let res = app
            .delete_with_token(&routes::admin_student(student_id), &root)
            .await;
        assert_eq!(res.status, 204, "{}", res.text);

        let row = registration::Entity::find_by_id(registration_id)
            .one(&app.db)
            .await
            .unwrap()
            .expect("registration should survive the student");
        assert_eq!(row.student_id, None);

        // The deleted student's token no longer authenticates.
        let profile = app.get_with_token(routes::STUDENT_PROFILE, &token).await;
        assert_eq!(profile.status, 401);
    }
}
