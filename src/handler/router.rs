//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches method + path, checks
//! body size, and dispatches to the note, form and docs handlers.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_LENGTH, CONTENT_TYPE, SERVER};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::handler::{docs, form, notes};
use crate::http::{self, BodyError, HttpResponse};
use crate::logger;

const READ_ONLY_METHODS: &str = "GET, HEAD, OPTIONS";
const NOTE_METHODS: &str = "GET, HEAD, PUT, DELETE, OPTIONS";
const WRITE_METHODS: &str = "POST, OPTIONS";

/// Routes known to the service
#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    Notes,
    Note(String),
    Write,
    UploadForm,
    /// `/docs` without the trailing slash
    DocsRedirect,
    /// A Swagger UI file under `/docs/`; empty for the index page
    DocsAsset(String),
    OpenApiJson,
}

impl Route {
    /// Match a request path; `None` means 404
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/notes" => Some(Self::Notes),
            "/write" => Some(Self::Write),
            "/UploadForm.html" => Some(Self::UploadForm),
            "/docs" => Some(Self::DocsRedirect),
            "/docs/openapi.json" => Some(Self::OpenApiJson),
            _ => {
                if let Some(file) = path.strip_prefix(docs::DOCS_ROOT) {
                    return Some(Self::DocsAsset(file.to_string()));
                }
                let raw = path.strip_prefix("/notes/")?;
                if raw.is_empty() || raw.contains('/') {
                    return None;
                }
                let name = urlencoding::decode(raw).ok()?;
                Some(Self::Note(name.into_owned()))
            }
        }
    }

    /// Value of the `Allow` header for this route
    pub const fn allowed_methods(&self) -> &'static str {
        match self {
            Self::Note(_) => NOTE_METHODS,
            Self::Write => WRITE_METHODS,
            Self::Notes
            | Self::UploadForm
            | Self::DocsRedirect
            | Self::DocsAsset(_)
            | Self::OpenApiJson => READ_ONLY_METHODS,
        }
    }
}

/// Main entry point for HTTP request handling
///
/// Generic over the body so tests can drive it with in-memory bodies.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<HttpResponse, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let is_head = *req.method() == Method::HEAD;
    let response = route_request(req, &state).await;
    Ok(finalize_response(response, &state, is_head))
}

async fn route_request<B>(req: Request<B>, state: &AppState) -> HttpResponse
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let Some(route) = Route::from_path(req.uri().path()) else {
        return http::build_404_response();
    };

    if *req.method() == Method::OPTIONS {
        return http::build_options_response(route.allowed_methods(), state.config.http.enable_cors);
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return resp;
    }

    let method = req.method().clone();
    match (method, route) {
        (Method::GET | Method::HEAD, Route::Notes) => notes::list_notes(state).await,
        (Method::GET | Method::HEAD, Route::Note(name)) => notes::get_note(state, &name).await,
        (Method::PUT, Route::Note(name)) => match read_request_body(req, state).await {
            Ok(body) => notes::update_note(state, &name, &body).await,
            Err(resp) => resp,
        },
        (Method::DELETE, Route::Note(name)) => notes::delete_note(state, &name).await,
        (Method::POST, Route::Write) => {
            let content_type = req
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string);
            match read_request_body(req, state).await {
                Ok(body) => notes::create_note(state, &body, content_type.as_deref()).await,
                Err(resp) => resp,
            }
        }
        (Method::GET | Method::HEAD, Route::UploadForm) => form::serve_upload_form(state).await,
        (Method::GET | Method::HEAD, Route::DocsRedirect) => docs::redirect_to_docs_root(),
        (Method::GET | Method::HEAD, Route::DocsAsset(file)) => docs::serve_swagger_ui(state, &file),
        (Method::GET | Method::HEAD, Route::OpenApiJson) => docs::serve_openapi_json(state),
        (method, route) => {
            logger::log_warning(&format!("Method not allowed: {method} {}", req.uri().path()));
            http::build_405_response(route.allowed_methods())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<HttpResponse> {
    let content_length = req.headers().get(CONTENT_LENGTH)?;
    match content_length.to_str().ok()?.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(http::build_413_response())
        }
        _ => None,
    }
}

async fn read_request_body<B>(req: Request<B>, state: &AppState) -> Result<Bytes, HttpResponse>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    http::read_body(req.into_body(), state.config.http.max_body_size)
        .await
        .map_err(|e| {
            logger::log_warning(&e.to_string());
            match e {
                BodyError::TooLarge { .. } => http::build_413_response(),
                BodyError::Read(_) => http::build_text_response(
                    hyper::StatusCode::BAD_REQUEST,
                    "Bad Request",
                ),
            }
        })
}

/// Headers every response carries; HEAD responses lose their body
fn finalize_response(response: HttpResponse, state: &AppState, is_head: bool) -> HttpResponse {
    let (mut parts, body) = response.into_parts();

    if let Ok(value) = HeaderValue::from_str(&state.config.http.server_name) {
        parts.headers.insert(SERVER, value);
    }
    if state.config.http.enable_cors {
        parts
            .headers
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }

    if !is_head {
        return Response::from_parts(parts, body);
    }

    if let Some(len) = body.size_hint().exact() {
        parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
    }
    Response::from_parts(parts, Full::new(Bytes::new()))
}
