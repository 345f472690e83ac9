use crate::state::AppState;
use actix_files::NamedFile;
use actix_web::{error, web, HttpRequest, HttpResponse};
use std::path::Path;

/// Handler for `GET /exercise_images/{filename}`.
pub async fn exercise_image(
    req: HttpRequest,
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    serve_stored(&req, &state.exercise_image_dir, &filename)
}

/// Handler for `GET /static/uploads/{filename}`.
///
/// The route is fixed; files are read from the configured upload directory.
pub async fn uploaded_video(
    req: HttpRequest,
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> actix_web::Result<HttpResponse> {
    serve_stored(&req, &state.upload_dir, &filename)
}

/// Serves a file stored directly inside `dir`. Anything that could escape the
/// directory is answered with `404`.
fn serve_stored(req: &HttpRequest, dir: &Path, filename: &str) -> actix_web::Result<HttpResponse> {
    if !is_flat_name(filename) {
        return Err(error::ErrorNotFound("Not Found"));
    }
    let file = NamedFile::open(dir.join(filename)).map_err(|_| error::ErrorNotFound("Not Found"))?;
    Ok(file.into_response(req))
}

fn is_flat_name(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.starts_with('.')
        && !filename.contains(['/', '\\'])
        && !filename.contains("..")
}
