//! # User Service Module
//!
//! Account registration and the login/logout flow that opens and closes
//! sessions.
//!
//! ## Sub-modules:
//! - `register`: creates a user from the registration form.
//! - `login`: checks credentials and opens a session.
//! - `logout`: closes the caller's session.

mod login;
mod logout;
mod register;

use actix_web::web::{self, post};

/// Registers the user routes.
///
/// *   **`POST /register_now`**: form `{name, age, gender, role}`; answers with
///     the thank-you page.
/// *   **`POST /login_now`**: form `{name, role, password}`; answers with the
///     teacher or student page and sets the session cookie.
/// *   **`POST /logout`**: drops the session and clears the cookie.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register_now", post().to(register::process))
        .route("/login_now", post().to(login::process))
        .route("/logout", post().to(logout::process));
}

#[cfg(test)]
mod tests {
    use crate::session::SESSION_COOKIE;
    use crate::test_support::{login, test_app, TestContext, TEACHER_PASSWORD};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::user::Role;
    use common::responses::ErrorResponse;

    #[actix_web::test]
    async fn registration_stores_the_user_and_thanks() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/register_now")
            .set_form([("name", "Grace"), ("age", "31"), ("gender", "F"), ("role", "Teacher")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("Thank you"));

        assert_eq!(ctx.count_rows("users"), 1);
    }

    #[actix_web::test]
    async fn registration_requires_every_field() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/register_now")
            .set_form([("name", "Grace"), ("age", "31"), ("gender", " ")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "All fields are required.");

        let req = test::TestRequest::post()
            .uri("/register_now")
            .set_form([("name", "Grace"), ("age", "old"), ("gender", "F"), ("role", "Student")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/register_now")
            .set_form([("name", "Grace"), ("age", "31"), ("gender", "F"), ("role", "Admin")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        assert_eq!(ctx.count_rows("users"), 0);
    }

    #[actix_web::test]
    async fn duplicate_names_are_accepted() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/register_now")
                .set_form([("name", "Sam"), ("age", "12"), ("gender", "M"), ("role", "Student")])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }
        assert_eq!(ctx.count_rows("users"), 2);
    }

    #[actix_web::test]
    async fn registered_student_can_log_in() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/register_now")
            .set_form([("name", "Sam"), ("age", "12"), ("gender", "M"), ("role", "Student")])
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/login_now")
            .set_form([("name", "Sam"), ("role", "Student")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp
            .response()
            .cookies()
            .any(|cookie| cookie.name() == SESSION_COOKIE));
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("Student dashboard"));
    }

    #[actix_web::test]
    async fn teacher_login_requires_the_password() {
        let ctx = TestContext::new();
        ctx.add_user("Ada", Role::Teacher);
        let app = test_app!(ctx);

        let req = test::TestRequest::post()
            .uri("/login_now")
            .set_form([("name", "Ada"), ("role", "Teacher"), ("password", "guess")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        let body: ErrorResponse = test::read_body_json(resp).await;
        assert_eq!(body.error, "Incorrect password. Please try again.");

        let req = test::TestRequest::post()
            .uri("/login_now")
            .set_form([("name", "Ada"), ("role", "Teacher"), ("password", TEACHER_PASSWORD)])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(String::from_utf8_lossy(&body).contains("Teacher dashboard"));
    }

    #[actix_web::test]
    async fn unknown_or_mismatched_role_is_rejected() {
        let ctx = TestContext::new();
        ctx.add_user("Ada", Role::Teacher);
        let app = test_app!(ctx);

        for form in [
            [("name", "Nobody"), ("role", "Student")],
            [("name", "Ada"), ("role", "Student")],
            [("name", "Ada"), ("role", "Wizard")],
        ] {
            let req = test::TestRequest::post()
                .uri("/login_now")
                .set_form(form)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::FORBIDDEN);
            let body: ErrorResponse = test::read_body_json(resp).await;
            assert_eq!(body.error, "Invalid credentials. Please register.");
        }
    }

    #[actix_web::test]
    async fn logout_closes_the_session() {
        let ctx = TestContext::new();
        ctx.add_user("Ada", Role::Teacher);
        let app = test_app!(ctx);
        let cookie = login!(app, "Ada", "Teacher", TEACHER_PASSWORD);

        let req = test::TestRequest::get()
            .uri("/get_uploaded_videos?topic_index=1")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri("/logout")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/get_uploaded_videos?topic_index=1")
            .cookie(cookie)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );
    }

    #[actix_web::test]
    async fn logging_in_again_replaces_the_session() {
        let ctx = TestContext::new();
        ctx.add_user("Sam", Role::Student);
        let app = test_app!(ctx);

        let first = login!(app, "Sam", "Student", "");
        let mut current = first.clone();
        for _ in 0..10 {
            let req = test::TestRequest::post()
                .uri("/login_now")
                .cookie(current.clone())
                .set_form([("name", "Sam"), ("role", "Student")])
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            current = resp
                .response()
                .cookies()
                .find(|cookie| cookie.name() == SESSION_COOKIE)
                .map(|cookie| cookie.into_owned())
                .unwrap();
        }
        assert_eq!(ctx.state.sessions.len().await, 1);

        let req = test::TestRequest::get()
            .uri("/get_uploaded_videos?topic_index=1")
            .cookie(first)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::FORBIDDEN
        );

        let req = test::TestRequest::get()
            .uri("/get_uploaded_videos?topic_index=1")
            .cookie(current)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
