//! # Exercise Service Module
//!
//! Multiple-choice exercises: four options, one correct answer and an
//! optional question image, scoped to a topic.
//!
//! ## Sub-modules:
//! - `save`: creates an exercise, storing its image if one is embedded.
//! - `list`: the caller's own exercises for a topic.
//! - `delete`: removes one of the caller's exercises and its image.
//! - `topic`: the public listing of all teachers' exercises for a topic.

mod delete;
mod list;
mod save;
mod topic;

use actix_web::web::{self, get, post};

/// Registers the exercise routes.
///
/// *   **`POST /save_exercise`** (session): JSON `{topic_index, question,
///     options[4], correct_option, question_image?}`.
/// *   **`GET /get_exercises?topic_index=`** (session).
/// *   **`POST /delete_exercise`** (session): JSON `{exercise_id}`.
/// *   **`GET /get_topic_exercises?topic_index=`** (public).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/save_exercise", post().to(save::process))
        .route("/get_exercises", get().to(list::process))
        .route("/delete_exercise", post().to(delete::process))
        .route("/get_topic_exercises", get().to(topic::process));
}
