//! Upload form handler
//!
//! Serves the HTML form that posts to `/write`. The file is read on every
//! request, so it can be edited while the server runs.

use hyper::StatusCode;
use std::path::Path;
use tokio::fs;

use crate::config::AppState;
use crate::http::{self, HttpResponse};
use crate::logger;

#[utoipa::path(
    get,
    path = "/UploadForm.html",
    tag = "form",
    responses(
        (status = 200, description = "Upload form", body = String, content_type = "text/html"),
        (status = 404, description = "Form file not found", body = String, content_type = "text/plain")
    )
)]
pub async fn serve_upload_form(state: &AppState) -> HttpResponse {
    let form_path = Path::new(&state.config.storage.form_path);
    match fs::read(form_path).await {
        Ok(content) => http::build_html_response(content),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                logger::log_warning(&format!(
                    "Failed to read upload form '{}': {e}",
                    form_path.display()
                ));
            }
            http::build_text_response(StatusCode::NOT_FOUND, "Form not found")
        }
    }
}
