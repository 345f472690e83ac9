use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::session::Identity;
use crate::state::AppState;
use crate::storage::{
    decode_data_uri, exercise_image_destination, image_extension, path_string, remove_if_exists,
};
use actix_web::{web, HttpResponse};
use common::model::exercise::{CorrectOption, OPTION_COUNT};
use common::requests::SaveExerciseRequest;
use common::responses::SaveExerciseResponse;
use log::{error, info};
use rusqlite::params;
use std::fs;
use std::path::Path;

/// Handler for `POST /save_exercise`.
///
/// Image failures are reported with their actual message; every other
/// internal failure gets the generic one.
pub async fn process(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<SaveExerciseRequest>,
) -> Result<HttpResponse, ApiError> {
    let exercise_id = save_exercise(
        &state.db,
        &state.exercise_image_dir,
        identity.user_id,
        &body,
    )
    .map_err(|e| {
        e.into_api(
            "Error saving exercise",
            "An error occurred while saving the exercise.",
        )
    })?;

    info!(
        "User {} saved exercise {} for topic {}",
        identity.user_id, exercise_id, body.topic_index
    );
    Ok(HttpResponse::Ok().json(SaveExerciseResponse {
        success: true,
        message: "Exercise saved successfully".to_string(),
    }))
}

fn validate(request: &SaveExerciseRequest) -> Result<(), ServiceError> {
    if request.options.len() != OPTION_COUNT {
        return Err(ServiceError::Invalid(format!(
            "Exactly {} options are required",
            OPTION_COUNT
        )));
    }
    if let CorrectOption::Index(index) = request.correct_option {
        if !(0..OPTION_COUNT as i64).contains(&index) {
            return Err(ServiceError::Invalid(format!(
                "correct_option must be between 0 and {}",
                OPTION_COUNT - 1
            )));
        }
    }
    Ok(())
}

fn save_exercise(
    db: &Database,
    image_dir: &Path,
    user_id: i64,
    request: &SaveExerciseRequest,
) -> Result<i64, ServiceError> {
    validate(request)?;

    let image = request
        .question_image
        .as_deref()
        .map(str::trim)
        .filter(|uri| !uri.is_empty());
    let image_path = match image {
        Some(uri) => store_question_image(image_dir, user_id, uri)?,
        None => String::new(),
    };

    let conn = db.open()?;
    let options = &request.options;
    let inserted = conn.execute(
        "INSERT INTO exercises
         (UserID, TopicIndex, Question, QuestionImage, Option1, Option2, Option3, Option4, CorrectOption)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            user_id,
            request.topic_index,
            request.question,
            image_path,
            options[0],
            options[1],
            options[2],
            options[3],
            request.correct_option.to_string(),
        ],
    );

    if let Err(e) = inserted {
        if !image_path.is_empty() {
            if let Err(cleanup) = remove_if_exists(&image_path) {
                error!("Error removing orphaned image {}: {}", image_path, cleanup);
            }
        }
        return Err(e.into());
    }
    Ok(conn.last_insert_rowid())
}

/// Decodes the data URI and writes it to a new file. Returns the stored path.
fn store_question_image(image_dir: &Path, user_id: i64, uri: &str) -> Result<String, ServiceError> {
    let image = decode_data_uri(uri)
        .map_err(|e| ServiceError::Image(format!("Failed to save image: {}", e)))?;

    let path =
        exercise_image_destination(image_dir, user_id, image_extension(image.mime.as_deref()));
    fs::write(&path, &image.bytes)
        .map_err(|e| ServiceError::Image(format!("Failed to save image: {}", e)))?;
    Ok(path_string(&path))
}
