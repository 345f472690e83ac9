use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::session::Identity;
use crate::state::AppState;
use crate::storage::remove_if_exists;
use actix_web::{web, HttpResponse};
use common::requests::DeleteVideoRequest;
use common::responses::MessageResponse;
use log::{info, warn};
use rusqlite::{params, OptionalExtension};

/// Handler for `POST /delete`: removes one of the caller's videos by path.
///
/// The file is removed before the row; if that fails the row stays and the
/// caller gets a `500`.
pub async fn process(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<DeleteVideoRequest>,
) -> Result<HttpResponse, ApiError> {
    let deleted = delete_video(&state.db, identity.user_id, &body.url).map_err(|e| match e {
        e @ ServiceError::Io(_) => e.into_api("Error deleting file", "Failed to delete file"),
        e => e.into_api("Error in delete", "An error occurred while deleting the file."),
    })?;

    if deleted {
        info!("User {} deleted video {}", identity.user_id, body.url);
    }
    Ok(HttpResponse::Ok().json(MessageResponse::new("File deleted")))
}

/// Deletes the video stored at `url` if it belongs to `user_id`.
///
/// Paths the user does not own are left untouched on disk and in the
/// database. Returns whether a video was deleted.
fn delete_video(db: &Database, user_id: i64, url: &str) -> Result<bool, ServiceError> {
    let conn = db.open()?;
    let owned: Option<String> = conn
        .query_row(
            "SELECT FilePath FROM videos WHERE FilePath = ?1 AND UserID = ?2",
            params![url, user_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(path) = owned else {
        warn!("User {} asked to delete unknown video {}", user_id, url);
        return Ok(false);
    };

    remove_if_exists(&path)?;
    conn.execute(
        "DELETE FROM videos WHERE FilePath = ?1 AND UserID = ?2",
        params![path, user_id],
    )?;
    Ok(true)
}
