//! # Video Upload Service
//!
//! Handles `POST /upload`, a `multipart/form-data` request carrying a
//! `topic_index` field and one or more `file` fields.
//!
//! ## Workflow
//!
//! 1.  **Receive**: every `file` part with a video extension (mp4, avi, mov,
//!     mkv) is streamed into a temporary file inside the upload directory.
//!     Other files are ignored. The topic index may arrive before or after
//!     the files.
//!
//! 2.  **Record**: for each staged file a row is inserted into `videos`. The
//!     table is unique on `(UserID, TopicIndex, FileName)`, so a second upload
//!     of the same name for the same topic inserts nothing and the staged file
//!     is dropped.
//!
//! 3.  **Commit**: a recorded file is renamed to its final, timestamped path.
//!     Each file is committed on its own; if the rename fails the row is
//!     removed again and the request fails.
//!
//! The response lists the paths stored by this request only.

use crate::db::Database;
use crate::error::{ApiError, ServiceError};
use crate::session::Identity;
use crate::state::AppState;
use crate::storage::{is_allowed_video, path_string, sanitize_filename, video_destination};
use actix_multipart::Multipart;
use actix_web::http::header::ContentDisposition;
use actix_web::{web, HttpResponse};
use chrono::Local;
use common::responses::FileUrlsResponse;
use futures_util::StreamExt;
use log::info;
use rusqlite::params;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const FAILURE: &str = "An error occurred while uploading videos.";

/// A received video waiting to be recorded.
struct StagedVideo {
    filename: String,
    file: NamedTempFile,
}

#[derive(Default)]
struct ReceivedUpload {
    topic_index: Option<i64>,
    saw_file_part: bool,
    videos: Vec<StagedVideo>,
}

/// Handler for `POST /upload`.
pub async fn process(
    identity: Identity,
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = receive_upload(payload, &state.upload_dir)
        .await
        .map_err(|e| e.into_api("Error receiving videos", FAILURE))?;

    if !upload.saw_file_part {
        return Err(ApiError::BadRequest("No file part".to_string()));
    }
    let topic_index = upload
        .topic_index
        .ok_or_else(|| ApiError::BadRequest("Topic index is required".to_string()))?;

    let file_urls = store_videos(
        &state.db,
        &state.upload_dir,
        identity.user_id,
        topic_index,
        upload.videos,
    )
    .map_err(|e| e.into_api("Error saving video to database", FAILURE))?;

    info!(
        "User {} uploaded {} videos to topic {}",
        identity.user_id,
        file_urls.len(),
        topic_index
    );
    Ok(HttpResponse::Ok().json(FileUrlsResponse { file_urls }))
}

/// The client's file name, preferring the RFC 5987 `filename*` form.
fn client_filename(cd: &ContentDisposition) -> Option<String> {
    cd.get_filename_ext()
        .map(|ext| String::from_utf8_lossy(&ext.value).into_owned())
        .or_else(|| cd.get_filename().map(str::to_string))
}

/// Reads the multipart stream, staging accepted videos in `staging_dir`.
async fn receive_upload(
    mut payload: Multipart,
    staging_dir: &Path,
) -> Result<ReceivedUpload, ServiceError> {
    let mut upload = ReceivedUpload::default();

    while let Some(item) = payload.next().await {
        let mut field = item?;
        let field_name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match field_name.as_deref() {
            Some("file") => {
                upload.saw_file_part = true;
                let original = field
                    .content_disposition()
                    .and_then(client_filename)
                    .unwrap_or_default();

                if !is_allowed_video(&original) {
                    info!("Ignoring upload '{}': not a video file", original);
                    continue;
                }
                let filename = sanitize_filename(&original)?;
                if filename.is_empty() {
                    info!("Ignoring upload '{}': no usable file name", original);
                    continue;
                }

                let mut file = NamedTempFile::new_in(staging_dir)?;
                while let Some(chunk) = field.next().await {
                    file.write_all(&chunk?)?;
                }
                file.flush()?;
                upload.videos.push(StagedVideo { filename, file });
            }

            Some("topic_index") => {
                let mut bytes = Vec::new();
                while let Some(chunk) = field.next().await {
                    bytes.extend_from_slice(&chunk?);
                }
                let text = String::from_utf8_lossy(&bytes);
                let index = text.trim().parse::<i64>().map_err(|_| {
                    ServiceError::Invalid(format!("Invalid topic index '{}'", text.trim()))
                })?;
                upload.topic_index = Some(index);
            }

            _ => {}
        }
    }

    Ok(upload)
}

/// Records and commits the staged videos, skipping names already stored for
/// this user and topic. Returns the paths of the newly stored files.
fn store_videos(
    db: &Database,
    upload_dir: &Path,
    user_id: i64,
    topic_index: i64,
    videos: Vec<StagedVideo>,
) -> Result<Vec<String>, ServiceError> {
    let conn = db.open()?;
    let mut stored = Vec::with_capacity(videos.len());

    for video in videos {
        let destination = video_destination(upload_dir, &video.filename);
        let file_path = path_string(&destination);

        let inserted = conn.execute(
            "INSERT INTO videos (UserID, TopicIndex, FileName, FilePath, UploadDate)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT (UserID, TopicIndex, FileName) DO NOTHING",
            params![
                user_id,
                topic_index,
                video.filename,
                file_path,
                Local::now().naive_local()
            ],
        )?;
        if inserted == 0 {
            info!(
                "Skipping duplicate upload '{}' for user {} topic {}",
                video.filename, user_id, topic_index
            );
            continue;
        }

        if let Err(e) = video.file.persist(&destination) {
            conn.execute(
                "DELETE FROM videos WHERE FilePath = ?1",
                params![file_path],
            )?;
            return Err(e.error.into());
        }
        stored.push(file_path);
    }

    Ok(stored)
}
