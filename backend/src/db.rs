//! SQLite access.
//!
//! Handlers open a fresh connection per request through [`Database::open`] and
//! let it drop at the end of the handler, so the connection is released on
//! every exit path.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS users (
    UserID INTEGER PRIMARY KEY AUTOINCREMENT,
    Name   TEXT    NOT NULL,
    Age    INTEGER NOT NULL,
    Gender TEXT    NOT NULL,
    Role   TEXT    NOT NULL CHECK (Role IN ('Teacher', 'Student'))
);

CREATE TABLE IF NOT EXISTS videos (
    VideoID    INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID     INTEGER NOT NULL REFERENCES users (UserID),
    TopicIndex INTEGER NOT NULL,
    FileName   TEXT    NOT NULL,
    FilePath   TEXT    NOT NULL UNIQUE,
    UploadDate TEXT    NOT NULL,
    UNIQUE (UserID, TopicIndex, FileName)
);

CREATE TABLE IF NOT EXISTS exercises (
    ExerciseID    INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID        INTEGER NOT NULL REFERENCES users (UserID),
    TopicIndex    INTEGER NOT NULL,
    Question      TEXT    NOT NULL,
    QuestionImage TEXT    NOT NULL DEFAULT '',
    Option1       TEXT    NOT NULL,
    Option2       TEXT    NOT NULL,
    Option3       TEXT    NOT NULL,
    Option4       TEXT    NOT NULL,
    CorrectOption TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS videos_topic ON videos (TopicIndex);
CREATE INDEX IF NOT EXISTS exercises_topic ON exercises (TopicIndex);
";

#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection with foreign keys enforced.
    pub fn open(&self) -> rusqlite::Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    /// Creates the tables if they do not exist yet.
    pub fn init_schema(&self) -> rusqlite::Result<()> {
        self.open()?.execute_batch(SCHEMA)
    }
}
