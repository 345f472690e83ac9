use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::video::TopicVideo;
use common::requests::TopicQuery;
use common::responses::TopicVideosResponse;
use rusqlite::params;

/// Handler for `GET /get_topic_videos`.
///
/// Public: lists the videos every teacher published for a topic, newest
/// first, with the teacher's name.
pub async fn process(
    state: web::Data<AppState>,
    query: web::Query<TopicQuery>,
) -> Result<HttpResponse, ApiError> {
    let videos = topic_videos(&state.db, query.topic_index).map_err(|e| {
        e.into_api(
            "Error fetching topic videos",
            "An error occurred while fetching videos.",
        )
    })?;
    Ok(HttpResponse::Ok().json(TopicVideosResponse { videos }))
}

fn topic_videos(db: &Database, topic_index: i64) -> Result<Vec<TopicVideo>, ServiceError> {
    let conn = db.open()?;
    let videos = conn
        .prepare(
            "SELECT v.FilePath, u.Name
             FROM videos v
             JOIN users u ON v.UserID = u.UserID
             WHERE u.Role = 'Teacher' AND v.TopicIndex = ?1
             ORDER BY v.UploadDate DESC, v.VideoID DESC",
        )?
        .query_map(params![topic_index], |row| {
            let name: String = row.get(1)?;
            Ok(TopicVideo {
                file_url: row.get(0)?,
                teacher_name: if name.trim().is_empty() {
                    "Teacher".to_string()
                } else {
                    name
                },
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(videos)
}
