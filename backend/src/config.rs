//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present, so a
//! development setup only needs that file. Every value has a default except
//! the two secrets, which must be provided.

use std::env;
use std::path::PathBuf;

/// Minimum amount of key material accepted for signing session cookies.
pub const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Directory videos are stored in. Uploads are always served under the
    /// fixed `/static/uploads/` route, so the returned file URLs only resolve
    /// in a browser while this keeps its default relative value.
    pub upload_dir: PathBuf,
    pub exercise_image_dir: PathBuf,
    /// Master key material for signing the session cookie.
    pub secret_key: String,
    /// Argon2 PHC string of the shared teacher password.
    pub teacher_password_hash: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |name: &str, default: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = var_or("PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid {
                name: "PORT",
                reason: e.to_string(),
            })?;

        let secret_key = lookup("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?;
        if secret_key.len() < MIN_SECRET_KEY_LEN {
            return Err(ConfigError::Invalid {
                name: "SECRET_KEY",
                reason: format!("must be at least {} bytes long", MIN_SECRET_KEY_LEN),
            });
        }

        let teacher_password_hash = lookup("TEACHER_PASSWORD_HASH")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("TEACHER_PASSWORD_HASH"))?;

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port,
            database_path: PathBuf::from(var_or("DATABASE_PATH", "classroom.sqlite")),
            upload_dir: PathBuf::from(var_or("UPLOAD_FOLDER", "static/uploads")),
            exercise_image_dir: PathBuf::from(var_or(
                "EXERCISE_IMAGE_FOLDER",
                "static/exercise_images",
            )),
            secret_key,
            teacher_password_hash: teacher_password_hash.trim().to_string(),
        })
    }
}
