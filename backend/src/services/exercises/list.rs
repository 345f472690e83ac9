use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::session::Identity;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::exercise::{CorrectOption, Exercise};
use common::requests::TopicQuery;
use common::responses::ExercisesResponse;
use rusqlite::{params, Row};

/// Columns read by [`exercise_from_row`], in order.
pub(super) const EXERCISE_COLUMNS: &str = "e.ExerciseID, e.Question, e.QuestionImage, \
     e.Option1, e.Option2, e.Option3, e.Option4, e.CorrectOption";

/// Maps the leading [`EXERCISE_COLUMNS`] of a row.
pub(super) fn exercise_from_row(row: &Row<'_>) -> rusqlite::Result<Exercise> {
    Ok(Exercise {
        exercise_id: row.get(0)?,
        question: row.get(1)?,
        question_image: row.get(2)?,
        options: vec![row.get(3)?, row.get(4)?, row.get(5)?, row.get(6)?],
        correct_option: CorrectOption::from_stored(row.get(7)?),
    })
}

/// Handler for `GET /get_exercises`: the caller's own exercises for a topic.
pub async fn process(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<TopicQuery>,
) -> Result<HttpResponse, ApiError> {
    let exercises = list_exercises(&state.db, identity.user_id, query.topic_index).map_err(|e| {
        e.into_api(
            "Error fetching exercises",
            "An error occurred while fetching exercises.",
        )
    })?;
    Ok(HttpResponse::Ok().json(ExercisesResponse { exercises }))
}

fn list_exercises(
    db: &Database,
    user_id: i64,
    topic_index: i64,
) -> Result<Vec<Exercise>, ServiceError> {
    let conn = db.open()?;
    let exercises = conn
        .prepare(&format!(
            "SELECT {} FROM exercises e
             WHERE e.UserID = ?1 AND e.TopicIndex = ?2
             ORDER BY e.ExerciseID",
            EXERCISE_COLUMNS
        ))?
        .query_map(params![user_id, topic_index], exercise_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(exercises)
}
