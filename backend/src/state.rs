use crate::config::{Config, ConfigError};
use crate::credentials::TeacherCredential;
use crate::db::Database;
use crate::session::SessionStore;
use actix_web::cookie::Key;
use std::path::PathBuf;

/// Everything a handler needs, shared across workers as `web::Data<AppState>`.
pub struct AppState {
    pub db: Database,
    pub sessions: SessionStore,
    pub cookie_key: Key,
    pub teacher_credential: TeacherCredential,
    pub upload_dir: PathBuf,
    pub exercise_image_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let teacher_credential = TeacherCredential::from_phc(&config.teacher_password_hash)
            .map_err(|e| ConfigError::Invalid {
                name: "TEACHER_PASSWORD_HASH",
                reason: e.to_string(),
            })?;

        Ok(Self {
            db: Database::new(&config.database_path),
            sessions: SessionStore::new(),
            cookie_key: Key::derive_from(config.secret_key.as_bytes()),
            teacher_credential,
            upload_dir: config.upload_dir.clone(),
            exercise_image_dir: config.exercise_image_dir.clone(),
        })
    }
}
