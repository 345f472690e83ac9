use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::session::Identity;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::requests::TopicQuery;
use common::responses::FileUrlsResponse;
use rusqlite::params;

/// Handler for `GET /get_uploaded_videos`: the caller's own videos for a topic.
pub async fn process(
    identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<TopicQuery>,
) -> Result<HttpResponse, ApiError> {
    let file_urls = list_videos(&state.db, identity.user_id, query.topic_index).map_err(|e| {
        e.into_api(
            "Error fetching videos",
            "An error occurred while fetching videos.",
        )
    })?;
    Ok(HttpResponse::Ok().json(FileUrlsResponse { file_urls }))
}

fn list_videos(
    db: &Database,
    user_id: i64,
    topic_index: i64,
) -> Result<Vec<String>, ServiceError> {
    let conn = db.open()?;
    let paths = conn
        .prepare(
            "SELECT FilePath FROM videos
             WHERE UserID = ?1 AND TopicIndex = ?2
             ORDER BY VideoID",
        )?
        .query_map(params![user_id, topic_index], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(paths)
}
