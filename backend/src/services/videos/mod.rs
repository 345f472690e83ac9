//! # Video Service Module
//!
//! Teachers upload lecture videos per topic; students browse what all teachers
//! published for a topic.
//!
//! ## Sub-modules:
//! - `upload`: stores uploaded files and their metadata.
//! - `list`: the caller's own videos for a topic.
//! - `delete`: removes one of the caller's videos.
//! - `delete_all`: removes all of the caller's videos for a topic.
//! - `topic`: the public, cross-teacher listing for a topic.

mod delete;
mod delete_all;
mod list;
mod topic;
mod upload;

use actix_web::web::{self, get, post};

/// Registers the video routes.
///
/// *   **`POST /upload`** (session): multipart `file` parts plus `topic_index`;
///     returns `{"file_urls": [...]}` with the newly stored paths.
/// *   **`POST /delete_all`** (session): form `{topic_index}`.
/// *   **`POST /delete`** (session): JSON `{url}`.
/// *   **`GET /get_uploaded_videos?topic_index=`** (session).
/// *   **`GET /get_topic_videos?topic_index=`** (public): returns
///     `{"videos": [{"file_url", "teacher_name"}]}`, newest first.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/upload", post().to(upload::process))
        .route("/delete_all", post().to(delete_all::process))
        .route("/delete", post().to(delete::process))
        .route("/get_uploaded_videos", get().to(list::process))
        .route("/get_topic_videos", get().to(topic::process));
}
