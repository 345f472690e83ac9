//! # Page Service Module
//!
//! Serves the site's HTML pages, embedded into the binary at build time, and
//! the media files stored by the video and exercise services.
//!
//! Dashboard pages are gated on the session role; callers without the right
//! role are redirected to the login page.

mod media;

use crate::session::Identity;
use actix_web::http::header;
use actix_web::web::{self, get};
use actix_web::{HttpResponse, HttpResponseBuilder};
use common::model::user::Role;
use include_dir::{include_dir, Dir};
use mime_guess::from_path;

static PAGES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/pages");

const LOGIN_PATH: &str = "/Login";

/// Pages anyone may open: `(route, file)`.
const PUBLIC_PAGES: [(&str, &str); 6] = [
    ("/", "homepage.html"),
    ("/AboutUs", "AboutUs.html"),
    ("/Register", "Register.html"),
    (LOGIN_PATH, "Login.html"),
    ("/TopicsOverview", "TopicsOverview.html"),
    ("/ThankYou", "ThankYou.html"),
];

/// Pages reserved for one role: `(route, file, role)`.
const ROLE_PAGES: [(&str, &str, Role); 3] = [
    ("/teacher_page", "teacher_page.html", Role::Teacher),
    ("/teacher_exercise_page", "teacher_exercise_page.html", Role::Teacher),
    ("/student_page", "student_page.html", Role::Student),
];

/// Registers the page and media routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    for (path, file) in PUBLIC_PAGES {
        cfg.route(path, get().to(move || async move { render(file) }));
    }
    for (path, file, role) in ROLE_PAGES {
        cfg.route(
            path,
            get().to(move |identity: Option<Identity>| async move {
                render_for_role(identity, role, file)
            }),
        );
    }
    cfg.route(
        "/exercise_images/{filename}",
        get().to(media::exercise_image),
    )
    .route("/static/uploads/{filename}", get().to(media::uploaded_video));
}

/// Responds `200 OK` with an embedded page.
pub fn render(file: &str) -> HttpResponse {
    render_with(HttpResponse::Ok(), file)
}

/// Responds with an embedded page using a prepared response builder, e.g. one
/// that already carries cookies.
pub fn render_with(mut builder: HttpResponseBuilder, file: &str) -> HttpResponse {
    match PAGES_DIR.get_file(file) {
        Some(page) => {
            let mime = from_path(file).first_or_octet_stream();
            builder
                .content_type(mime.as_ref())
                .body(page.contents().to_vec())
        }
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

fn render_for_role(identity: Option<Identity>, role: Role, file: &str) -> HttpResponse {
    match identity {
        Some(identity) if identity.role == role => render(file),
        _ => HttpResponse::Found()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{login, test_app, TestContext, TEACHER_PASSWORD};
    use actix_web::http::StatusCode;
    use actix_web::test::{call_service, TestRequest};

    #[test]
    fn every_page_is_embedded() {
        for (_, file) in PUBLIC_PAGES {
            assert!(PAGES_DIR.get_file(file).is_some(), "{} is missing", file);
        }
        for (_, file, _) in ROLE_PAGES {
            assert!(PAGES_DIR.get_file(file).is_some(), "{} is missing", file);
        }
    }

    #[actix_web::test]
    async fn public_pages_render_as_html() {
        let ctx = TestContext::new();
        let app = test_app!(ctx);

        for (path, _) in PUBLIC_PAGES {
            let req = TestRequest::get().uri(path).to_request();
            let resp = call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{}", path);
            let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap();
            assert!(content_type.to_str().unwrap().starts_with("text/html"));
        }
    }

    #[actix_web::test]
    async fn dashboards_redirect_without_matching_role() {
        let ctx = TestContext::new();
        ctx.add_user("Ada", Role::Teacher);
        let app = test_app!(ctx);

        let req = TestRequest::get().uri("/teacher_page").to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), LOGIN_PATH);

        let cookie = login!(app, "Ada", "Teacher", TEACHER_PASSWORD);

        let req = TestRequest::get()
            .uri("/teacher_exercise_page")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

        let req = TestRequest::get()
            .uri("/student_page")
            .cookie(cookie)
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
    }

    #[actix_web::test]
    async fn student_reaches_the_student_page() {
        let ctx = TestContext::new();
        ctx.add_user("Sam", Role::Student);
        let app = test_app!(ctx);
        let cookie = login!(app, "Sam", "Student", "");

        let req = TestRequest::get()
            .uri("/student_page")
            .cookie(cookie.clone())
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::OK);

        let req = TestRequest::get()
            .uri("/teacher_page")
            .cookie(cookie)
            .to_request();
        assert_eq!(call_service(&app, req).await.status(), StatusCode::FOUND);
    }
}
