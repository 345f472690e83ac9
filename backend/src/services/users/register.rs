use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::services::pages;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::user::Role;
use common::requests::RegisterForm;
use log::info;
use rusqlite::params;

const FAILURE: &str = "An error occurred during registration.";

/// A validated registration.
#[derive(Debug, PartialEq, Eq)]
struct NewUser {
    name: String,
    age: i64,
    gender: String,
    role: Role,
}

/// Handler for `POST /register_now`.
pub async fn process(
    state: web::Data<AppState>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, ApiError> {
    let user = validate(form.into_inner()).map_err(|e| e.into_api("Registration", FAILURE))?;
    let user_id =
        insert_user(&state.db, &user).map_err(|e| e.into_api("Error during registration", FAILURE))?;

    info!("Registered {} '{}' as user {}", user.role, user.name, user_id);
    Ok(pages::render("ThankYou.html"))
}

fn validate(form: RegisterForm) -> Result<NewUser, ServiceError> {
    let fields = [&form.name, &form.age, &form.gender, &form.role];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ServiceError::Invalid("All fields are required.".to_string()));
    }

    let age = form
        .age
        .trim()
        .parse::<i64>()
        .map_err(|_| ServiceError::Invalid("Age must be a whole number.".to_string()))?;
    let role = form
        .role
        .parse::<Role>()
        .map_err(|_| ServiceError::Invalid("Role must be Teacher or Student.".to_string()))?;

    Ok(NewUser {
        name: form.name.trim().to_string(),
        age,
        gender: form.gender.trim().to_string(),
        role,
    })
}

fn insert_user(db: &Database, user: &NewUser) -> Result<i64, ServiceError> {
    let conn = db.open()?;
    conn.execute(
        "INSERT INTO users (Name, Age, Gender, Role) VALUES (?1, ?2, ?3, ?4)",
        params![user.name, user.age, user.gender, user.role.as_str()],
    )?;
    Ok(conn.last_insert_rowid())
}
