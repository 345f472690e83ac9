use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::session::Identity;
use crate::state::AppState;
use crate::storage::remove_if_exists;
use actix_web::{web, HttpResponse};
use common::requests::TopicForm;
use common::responses::MessageResponse;
use log::{error, info};
use rusqlite::params;

/// Handler for `POST /delete_all`: removes all of the caller's videos for a topic.
pub async fn process(
    identity: Identity,
    state: web::Data<AppState>,
    form: web::Form<TopicForm>,
) -> Result<HttpResponse, ApiError> {
    let removed = delete_topic_videos(&state.db, identity.user_id, form.topic_index).map_err(|e| {
        e.into_api(
            "Error in delete_all",
            "An error occurred while deleting files.",
        )
    })?;

    info!(
        "User {} removed {} videos from topic {}",
        identity.user_id, removed, form.topic_index
    );
    Ok(HttpResponse::Ok().json(MessageResponse::new("All files deleted")))
}

/// Deletes the rows of one user's topic and, best effort, their files.
///
/// A file that cannot be removed is logged and left behind; the rows are
/// deleted regardless. Returns the number of rows removed.
fn delete_topic_videos(
    db: &Database,
    user_id: i64,
    topic_index: i64,
) -> Result<usize, ServiceError> {
    let conn = db.open()?;
    let paths = conn
        .prepare("SELECT FilePath FROM videos WHERE UserID = ?1 AND TopicIndex = ?2")?
        .query_map(params![user_id, topic_index], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for path in &paths {
        if let Err(e) = remove_if_exists(path) {
            error!("Error deleting file {}: {}", path, e);
        }
    }

    let removed = conn.execute(
        "DELETE FROM videos WHERE UserID = ?1 AND TopicIndex = ?2",
        params![user_id, topic_index],
    )?;
    Ok(removed)
}
