//! API documentation handlers
//!
//! Swagger UI is served from the assets bundled into the binary, so `/docs`
//! works without network access. Its asset links are relative, which is why
//! the page itself lives at `/docs/`.

use hyper::body::Bytes;
use hyper::StatusCode;
use std::borrow::Cow;
use std::sync::Arc;

use crate::config::AppState;
use crate::http::{self, HttpResponse};
use crate::logger;

pub const DOCS_ROOT: &str = "/docs/";

/// Serve one Swagger UI asset; an empty `file` is the index page
pub fn serve_swagger_ui(state: &AppState, file: &str) -> HttpResponse {
    let file = if file.is_empty() { "index.html" } else { file };
    match utoipa_swagger_ui::serve(file, Arc::clone(&state.swagger_config)) {
        Ok(Some(asset)) => {
            let bytes = match asset.bytes {
                Cow::Borrowed(b) => Bytes::from_static(b),
                Cow::Owned(v) => Bytes::from(v),
            };
            http::build_asset_response(bytes, &asset.content_type)
        }
        Ok(None) => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to serve Swagger UI asset '{file}': {e}"));
            http::build_500_response()
        }
    }
}

pub fn redirect_to_docs_root() -> HttpResponse {
    http::build_redirect_response(StatusCode::MOVED_PERMANENTLY, DOCS_ROOT)
}

pub fn serve_openapi_json(state: &AppState) -> HttpResponse {
    http::build_raw_json_response(&state.openapi_json)
}
