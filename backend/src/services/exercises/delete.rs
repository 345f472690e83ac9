use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::session::Identity;
use crate::state::AppState;
use crate::storage::remove_if_exists;
use actix_web::{web, HttpResponse};
use common::requests::DeleteExerciseRequest;
use common::responses::MessageResponse;
use log::{error, info};
use rusqlite::{params, OptionalExtension};

/// Handler for `POST /delete_exercise`.
pub async fn process(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<DeleteExerciseRequest>,
) -> Result<HttpResponse, ApiError> {
    let deleted = delete_exercise(&state.db, identity.user_id, body.exercise_id).map_err(|e| {
        e.into_api(
            "Error deleting exercise",
            "An error occurred while deleting the exercise.",
        )
    })?;

    if deleted {
        info!(
            "User {} deleted exercise {}",
            identity.user_id, body.exercise_id
        );
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("Exercise deleted successfully.")))
}

/// Deletes an exercise owned by `user_id` together with its image.
///
/// The image is removed best effort: a failure is logged and the row is
/// deleted anyway. Returns whether an exercise was deleted.
fn delete_exercise(db: &Database, user_id: i64, exercise_id: i64) -> Result<bool, ServiceError> {
    let conn = db.open()?;
    let image: Option<String> = conn
        .query_row(
            "SELECT QuestionImage FROM exercises WHERE ExerciseID = ?1 AND UserID = ?2",
            params![exercise_id, user_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(image) = image else {
        return Ok(false);
    };

    if !image.is_empty() {
        if let Err(e) = remove_if_exists(&image) {
            error!("Error deleting exercise image {}: {}", image, e);
        }
    }

    conn.execute(
        "DELETE FROM exercises WHERE ExerciseID = ?1 AND UserID = ?2",
        params![exercise_id, user_id],
    )?;
    Ok(true)
}
