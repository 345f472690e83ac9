//! Shared fixtures for the handler tests: a throwaway database and storage
//! directories, plus helpers to log in and build upload requests.

use crate::config::Config;
use crate::credentials::hash_for_tests;
use crate::state::AppState;
use crate::storage::path_string;
use actix_web::cookie::Cookie;
use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::web;
use common::model::user::Role;
use rusqlite::params;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const TEACHER_PASSWORD: &str = "chalkboard";
const BOUNDARY: &str = "----classroom-test-boundary";

pub struct TestContext {
    dir: TempDir,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            database_path: dir.path().join("test.sqlite"),
            upload_dir: dir.path().join("uploads"),
            exercise_image_dir: dir.path().join("exercise_images"),
            secret_key: "0123456789abcdef0123456789abcdef".to_string(),
            teacher_password_hash: hash_for_tests(TEACHER_PASSWORD),
        };

        let state = AppState::from_config(&config).unwrap();
        fs::create_dir_all(&state.upload_dir).unwrap();
        fs::create_dir_all(&state.exercise_image_dir).unwrap();
        state.db.init_schema().unwrap();

        Self {
            dir,
            state: web::Data::new(state),
        }
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.state.upload_dir.clone()
    }

    pub fn image_dir(&self) -> PathBuf {
        self.state.exercise_image_dir.clone()
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_user(&self, name: &str, role: Role) -> i64 {
        let conn = self.state.db.open().unwrap();
        conn.execute(
            "INSERT INTO users (Name, Age, Gender, Role) VALUES (?1, 30, 'F', ?2)",
            params![name, role.as_str()],
        )
        .unwrap();
        conn.last_insert_rowid()
    }

    pub fn insert_video(&self, user_id: i64, topic_index: i64, path: &Path) {
        self.insert_video_at(user_id, topic_index, path, "2024-01-01 00:00:00");
    }

    pub fn insert_video_at(&self, user_id: i64, topic_index: i64, path: &Path, uploaded: &str) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.state
            .db
            .open()
            .unwrap()
            .execute(
                "INSERT INTO videos (UserID, TopicIndex, FileName, FilePath, UploadDate)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![user_id, topic_index, file_name, path_string(path), uploaded],
            )
            .unwrap();
    }

    pub fn count_rows(&self, table: &str) -> i64 {
        self.state
            .db
            .open()
            .unwrap()
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .unwrap()
    }

    /// Number of regular files in the upload directory.
    pub fn stored_videos(&self) -> usize {
        count_files(&self.state.upload_dir)
    }

    pub fn stored_images(&self) -> usize {
        count_files(&self.state.exercise_image_dir)
    }
}

fn count_files(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .count()
}

/// Builds a `POST /upload` request with an optional session cookie, an
/// optional `topic_index` part and one `file` part per `(name, content)`.
/// Non-ASCII names are sent in the `filename*` form.
pub fn upload_request(
    cookie: Option<&Cookie<'static>>,
    topic_index: Option<&str>,
    files: &[(&str, &str)],
) -> TestRequest {
    let mut body = Vec::new();
    for (name, content) in files {
        let filename = if name.is_ascii() {
            format!("filename=\"{name}\"")
        } else {
            format!("filename*=UTF-8''{}", percent_encode(name))
        };
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; {filename}\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some(topic_index) = topic_index {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"topic_index\"\r\n\r\n{topic_index}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut request = TestRequest::post()
        .uri("/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body);
    if let Some(cookie) = cookie {
        request = request.cookie(cookie.clone());
    }
    request
}

fn percent_encode(value: &str) -> String {
    value
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'_' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect()
}

/// Initialises the full application around a [`TestContext`].
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::from_fn(
                    crate::session::resolve_session,
                ))
                .app_data($ctx.state.clone())
                .configure(crate::services::configure),
        )
        .await
    };
}

/// Logs in through `POST /login_now` and returns the session cookie.
macro_rules! login {
    ($app:expr, $name:expr, $role:expr, $password:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri("/login_now")
            .set_form([("name", $name), ("role", $role), ("password", $password)])
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        resp.response()
            .cookies()
            .find(|cookie| cookie.name() == crate::session::SESSION_COOKIE)
            .map(|cookie| cookie.into_owned())
            .expect("login sets the session cookie")
    }};
}

pub(crate) use login;
pub(crate) use test_app;
