//! OpenAPI document for the HTTP surface
//!
//! Paths and schemas come from the `#[utoipa::path]` and `ToSchema`
//! annotations on the handlers and note types.

use utoipa::openapi::server::Server;
use utoipa::OpenApi;

use crate::handler::{form, notes};
use crate::logger;
use crate::store::{CreateNoteRequest, Note};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Notes API",
        version = "1.0.0",
        description = "Plain-text notes stored as files in a cache directory"
    ),
    paths(
        notes::list_notes,
        notes::get_note,
        notes::create_note,
        notes::update_note,
        notes::delete_note,
        form::serve_upload_form,
    ),
    components(schemas(Note, CreateNoteRequest)),
    tags(
        (name = "notes", description = "Note CRUD"),
        (name = "form", description = "HTML upload form")
    )
)]
pub struct ApiDoc;

/// Where Swagger UI fetches the document from
pub const OPENAPI_JSON_PATH: &str = "/docs/openapi.json";

pub fn swagger_config() -> utoipa_swagger_ui::Config<'static> {
    utoipa_swagger_ui::Config::new([OPENAPI_JSON_PATH])
        .try_it_out_enabled(true)
        .filter(true)
        .display_request_duration(true)
}

/// Pretty JSON of the document, advertising `server_url`
pub fn render_json(server_url: &str) -> String {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(server_url)]);
    doc.to_pretty_json().unwrap_or_else(|e| {
        logger::log_error(&format!("Failed to render OpenAPI document: {e}"));
        "{}".to_string()
    })
}
