//! HTTP endpoints, grouped by the part of the platform they serve.
//!
//! - `users`: registration, login and logout.
//! - `videos`: upload, listing and deletion of topic videos.
//! - `exercises`: authoring and listing of multiple-choice exercises.
//! - `pages`: the HTML pages and stored media files.

pub mod exercises;
pub mod pages;
pub mod users;
pub mod videos;

use crate::error::ApiError;
use actix_web::web;

/// Largest accepted JSON body; exercise images travel inline as base64.
const JSON_LIMIT: usize = 10 * 1024 * 1024;

/// Registers every route together with the payload configs that turn
/// malformed bodies into JSON `400` responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(JSON_LIMIT)
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::FormConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .configure(users::configure_routes)
    .configure(videos::configure_routes)
    .configure(exercises::configure_routes)
    .configure(pages::configure_routes);
}
