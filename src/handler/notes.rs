//! Note handlers
//!
//! One function per note operation. Each performs a single store call and
//! turns the outcome into a plain-text or JSON response.

use hyper::StatusCode;

use crate::config::AppState;
use crate::error::NoteError;
use crate::http::{self, HttpResponse};
use crate::store::{CreateNoteRequest, Note};

/// List every note with its content
#[utoipa::path(
    get,
    path = "/notes",
    tag = "notes",
    responses(
        (status = 200, description = "All notes in the cache directory", body = [Note]),
        (status = 500, description = "Cache directory could not be read", body = String, content_type = "text/plain")
    )
)]
pub async fn list_notes(state: &AppState) -> HttpResponse {
    match state.store.list().await {
        Ok(notes) => http::build_json_response(StatusCode::OK, &notes),
        Err(e) => http::build_error_response(&e),
    }
}

/// Raw content of one note
#[utoipa::path(
    get,
    path = "/notes/{name}",
    tag = "notes",
    params(("name" = String, Path, description = "Note name")),
    responses(
        (status = 200, description = "Note content", body = String, content_type = "text/plain"),
        (status = 404, description = "No such note", body = String, content_type = "text/plain")
    )
)]
pub async fn get_note(state: &AppState, name: &str) -> HttpResponse {
    match state.store.read(name).await {
        Ok(content) => http::build_note_response(content),
        Err(e) => http::build_error_response(&e),
    }
}

/// Create a note from a JSON or url-encoded form body
#[utoipa::path(
    post,
    path = "/write",
    tag = "notes",
    request_body(
        content = CreateNoteRequest,
        content_type = "application/json",
        description = "Also accepted as application/x-www-form-urlencoded"
    ),
    responses(
        (status = 201, description = "Note created", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing note name or content, or note already exists", body = String, content_type = "text/plain")
    )
)]
pub async fn create_note(state: &AppState, body: &[u8], content_type: Option<&str>) -> HttpResponse {
    let request = CreateNoteRequest::parse(body, content_type);
    let Some((name, note)) = request.fields() else {
        return http::build_error_response(&NoteError::MissingFields);
    };

    match state.store.create(name, note).await {
        Ok(()) => http::build_text_response(StatusCode::CREATED, "Note created"),
        Err(e) => http::build_error_response(&e),
    }
}

/// Replace a note's content with the raw request body
#[utoipa::path(
    put,
    path = "/notes/{name}",
    tag = "notes",
    params(("name" = String, Path, description = "Note name")),
    request_body(content = String, content_type = "text/plain"),
    responses(
        (status = 200, description = "Note updated", body = String, content_type = "text/plain"),
        (status = 404, description = "No such note", body = String, content_type = "text/plain")
    )
)]
pub async fn update_note(state: &AppState, name: &str, body: &[u8]) -> HttpResponse {
    match state.store.update(name, body).await {
        Ok(()) => http::build_text_response(StatusCode::OK, "Note updated"),
        Err(e) => http::build_error_response(&e),
    }
}

#[utoipa::path(
    delete,
    path = "/notes/{name}",
    tag = "notes",
    params(("name" = String, Path, description = "Note name")),
    responses(
        (status = 200, description = "Note deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "No such note", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_note(state: &AppState, name: &str) -> HttpResponse {
    match state.store.delete(name).await {
        Ok(()) => http::build_text_response(StatusCode::OK, "Note deleted"),
        Err(e) => http::build_error_response(&e),
    }
}
