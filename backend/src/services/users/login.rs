use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::services::pages;
use crate::session::{session_cookie, Identity, SessionToken};
use crate::state::AppState;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};
use common::model::user::{Role, User};
use common::requests::LoginForm;
use log::{info, warn};
use rusqlite::{params, OptionalExtension};

const FAILURE: &str = "An error occurred during login.";

/// Handler for `POST /login_now`.
///
/// Looks the user up by name and role; teachers must also present the shared
/// teacher password. A successful login replaces the session the request
/// arrived with, if any, and answers with the dashboard page of the user's
/// role.
pub async fn process(
    state: web::Data<AppState>,
    req: HttpRequest,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();

    let user = find_user(&state.db, &form.name, &form.role)
        .map_err(|e| e.into_api("Error during login", FAILURE))?
        .ok_or(ApiError::Forbidden("Invalid credentials. Please register."))?;

    if user.role == Role::Teacher {
        let password = form.password.as_deref().unwrap_or_default();
        if !state.teacher_credential.verify(password) {
            warn!("Rejected teacher login for user {}", user.user_id);
            return Err(ApiError::Forbidden("Incorrect password. Please try again."));
        }
    }

    let previous = req.extensions().get::<SessionToken>().cloned();
    if let Some(SessionToken(previous)) = previous {
        state.sessions.remove(&previous).await;
    }

    let token = state
        .sessions
        .create(Identity {
            user_id: user.user_id,
            name: user.name.clone(),
            role: user.role,
        })
        .await;
    let cookie = session_cookie(&state.cookie_key, &token).ok_or(ApiError::Internal(FAILURE))?;

    info!(
        "User {} logged in as {} ({} open sessions)",
        user.user_id,
        user.role,
        state.sessions.len().await
    );
    let page = match user.role {
        Role::Teacher => "teacher_page.html",
        Role::Student => "student_page.html",
    };
    let mut response = HttpResponse::Ok();
    response.cookie(cookie);
    Ok(pages::render_with(response, page))
}

/// Finds the earliest registered user with exactly this name and role.
fn find_user(db: &Database, name: &str, role: &str) -> Result<Option<User>, ServiceError> {
    let Ok(role) = role.parse::<Role>() else {
        return Ok(None);
    };

    let conn = db.open()?;
    let user = conn
        .query_row(
            "SELECT UserID, Name, Age, Gender FROM users
             WHERE Name = ?1 AND Role = ?2
             ORDER BY UserID LIMIT 1",
            params![name, role.as_str()],
            |row| {
                Ok(User {
                    user_id: row.get(0)?,
                    name: row.get(1)?,
                    age: row.get(2)?,
                    gender: row.get(3)?,
                    role,
                })
            },
        )
        .optional()?;
    Ok(user)
}
