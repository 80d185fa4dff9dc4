use serde_json::json;

use crate::common::{ROOT_EMAIL, ROOT_PASSWORD, TestApp, routes};

mod admin_login {
    use super::*;

    #[tokio::test]
    async fn bootstrap_superadmin_can_log_in() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::ADMIN_LOGIN,
                &json!({"email": ROOT_EMAIL, "password": ROOT_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["admin"]["email"], ROOT_EMAIL);
        assert_eq!(res.body["admin"]["role"], "superadmin");
        assert!(res.body["admin"].get("password").is_none());
    }

    #[tokio::test]
    async fn email_is_matched_case_insensitively() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::ADMIN_LOGIN,
                &json!({"email": "  ROOT@TechShethra.test ", "password": ROOT_PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::ADMIN_LOGIN,
                &json!({"email": ROOT_EMAIL, "password": "not-the-password"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn me_returns_the_calling_admin() {
        let app = TestApp::spawn().await;
        let token = app.root_token().await;

        let res = app.get_with_token(routes::ADMIN_ME, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["email"], ROOT_EMAIL);
    }

    #[tokio::test]
    async fn me_without_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ADMIN_ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod student_accounts {
    use super::*;

    fn signup(email: &str) -> serde_json::Value {
        json!({
            "name": "Asha Rao",
            "email": email,
            "password": "studentpass",
            "phone": "9999999999",
            "college": "RV College",
            "department": "CSE",
            "year": "Others",
        })
    }

    #[tokio::test]
    async fn student_can_sign_up_and_log_in() {
        let app = TestApp::spawn().await;

        let reg = app
            .post_without_token(routes::STUDENT_REGISTER, &signup("Asha@College.edu"))
            .await;
        assert_eq!(reg.status, 201, "{}", reg.text);
        assert_eq!(reg.body["success"], true);
        assert_eq!(reg.body["student"]["email"], "asha@college.edu");
        assert_eq!(reg.body["student"]["year"], "Others");
        assert_eq!(reg.body["student"]["isVerified"], false);

        let login = app
            .post_without_token(
                routes::STUDENT_LOGIN,
                &json!({"email": "asha@college.edu", "password": "studentpass"}),
            )
            .await;
        assert_eq!(login.status, 200, "{}", login.text);
        assert!(login.body["token"].is_string());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(routes::STUDENT_REGISTER, &signup("asha@college.edu"))
            .await;
        assert_eq!(first.status, 201, "{}", first.text);

        let res = app
            .post_without_token(routes::STUDENT_REGISTER, &signup("ASHA@college.edu"))
            .await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "EMAIL_TAKEN");
    }

    #[tokio::test]
    async fn unknown_year_is_rejected() {
        let app = TestApp::spawn().await;
        let mut body = signup("asha@college.edu");
        body["year"] = json!("7");

        let res = app.post_without_token(routes::STUDENT_REGISTER, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;
        let mut body = signup("asha@college.edu");
        body["password"] = json!("short");

        let res = app.post_without_token(routes::STUDENT_REGISTER, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod principals {
    use super::*;

    #[tokio::test]
    async fn student_token_is_rejected_by_admin_routes() {
        let app = TestApp::spawn().await;
        let (_, student) = app.create_student("asha@college.edu").await;

        let res = app.get_with_token(routes::ADMIN_DASHBOARD, &student).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn admin_token_is_rejected_by_student_routes() {
        let app = TestApp::spawn().await;
        let admin = app.root_token().await;

        let res = app.get_with_token(routes::STUDENT_PROFILE, &admin).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ADMIN_ME, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
