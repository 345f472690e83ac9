use super::list::{exercise_from_row, EXERCISE_COLUMNS};
use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::exercise::TopicExercise;
use common::requests::TopicQuery;
use common::responses::TopicExercisesResponse;
use rusqlite::params;

/// Handler for `GET /get_topic_exercises`.
///
/// Public: every exercise any teacher wrote for the topic, with the teacher's
/// name attached.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<TopicQuery>,
) -> Result<HttpResponse, ApiError> {
    let exercises = topic_exercises(&state.db, query.topic_index).map_err(|e| {
        e.into_api(
            "Error fetching topic exercises",
            "An error occurred while fetching exercises.",
        )
    })?;
    Ok(HttpResponse::Ok().json(TopicExercisesResponse { exercises }))
}

fn topic_exercises(db: &Database, topic_index: i64) -> Result<Vec<TopicExercise>, ServiceError> {
    let conn = db.open()?;
    let exercises = conn
        .prepare(&format!(
            "SELECT {}, u.Name FROM exercises e
             JOIN users u ON e.UserID = u.UserID
             WHERE u.Role = 'Teacher' AND e.TopicIndex = ?1
             ORDER BY e.ExerciseID",
            EXERCISE_COLUMNS
        ))?
        .query_map(params![topic_index], |row| {
            Ok(TopicExercise {
                exercise: exercise_from_row(row)?,
                teacher_name: row.get(8)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(exercises)
}
