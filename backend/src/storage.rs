//! Local file storage for uploaded videos and exercise images.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Local;
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

const ALLOWED_VIDEO_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];
const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];
const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

/// Characters a stored file name may not contain.
const UNSAFE_FILENAME_CHARS: &str = r"[^A-Za-z0-9_.-]";

/// Reduces a client supplied file name to a safe, flat ASCII name.
///
/// Letters are folded to ASCII through NFKD decomposition, directory
/// components are dropped, whitespace runs become `_`, anything outside
/// `[A-Za-z0-9_.-]` is removed and leading/trailing `.`/`_` are stripped.
/// The result may be empty.
pub fn sanitize_filename(name: &str) -> Result<String, regex::Error> {
    let unsafe_chars = Regex::new(UNSAFE_FILENAME_CHARS)?;

    let folded: String = name.nfkd().filter(char::is_ascii).collect();
    let flat = folded.replace(['/', '\\'], " ");
    let joined = flat.split_whitespace().collect::<Vec<_>>().join("_");
    let kept = unsafe_chars.replace_all(&joined, "");
    Ok(kept.trim_matches(|c| c == '.' || c == '_').to_string())
}

fn extension(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}

pub fn is_allowed_video(name: &str) -> bool {
    extension(name).is_some_and(|ext| ALLOWED_VIDEO_EXTENSIONS.contains(&ext.as_str()))
}

/// File extension for an image of the given media type.
pub fn image_extension(mime: Option<&str>) -> &'static str {
    let subtype = mime
        .and_then(|m| m.strip_prefix("image/"))
        .map(|s| s.to_ascii_lowercase());

    match subtype.as_deref() {
        Some(sub) => ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .copied()
            .find(|ext| *ext == sub)
            .unwrap_or(DEFAULT_IMAGE_EXTENSION),
        None => DEFAULT_IMAGE_EXTENSION,
    }
}

/// A decoded `data:` URI.
#[derive(Debug, PartialEq, Eq)]
pub struct DataUri {
    pub mime: Option<String>,
    pub bytes: Vec<u8>,
}

/// Decodes `data:<mime>;base64,<payload>`.
pub fn decode_data_uri(uri: &str) -> Result<DataUri, String> {
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| "image is not a data URI".to_string())?;

    let mime = header
        .strip_prefix("data:")
        .and_then(|rest| rest.split(';').next())
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(compact.as_bytes())
        .map_err(|e| format!("invalid base64 image data: {}", e))?;

    if bytes.is_empty() {
        return Err("image data is empty".to_string());
    }

    Ok(DataUri { mime, bytes })
}

/// Second-resolution local timestamp used to prefix stored files.
pub fn timestamp() -> String {
    Local::now().format("%Y%m%d%H%M%S").to_string()
}

/// Destination of a newly uploaded video.
///
/// The random segment keeps concurrent uploads of the same name within one
/// second apart; the name still ends with the sanitized original.
pub fn video_destination(upload_dir: &Path, filename: &str) -> PathBuf {
    let token = Uuid::new_v4().simple().to_string();
    upload_dir.join(format!("{}_{}_{}", timestamp(), &token[..8], filename))
}

/// Destination of an exercise image for `user_id`.
pub fn exercise_image_destination(image_dir: &Path, user_id: i64, ext: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d%H%M%S%3f");
    image_dir.join(format!("exercise_{}_{}.{}", user_id, stamp, ext))
}

/// Removes a file, treating an already missing file as success.
///
/// Returns whether something was removed.
pub fn remove_if_exists(path: impl AsRef<Path>) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

pub fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
