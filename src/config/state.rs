// Application state module
// Everything a request handler needs, injected per server instance

use std::sync::Arc;

use super::types::Config;
use crate::openapi;
use crate::store::NoteStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: NoteStore,
    /// Rendered once at startup, served at `/docs/openapi.json`
    pub openapi_json: String,
    /// Swagger UI settings, pointed at the document above
    pub swagger_config: Arc<utoipa_swagger_ui::Config<'static>>,
}

impl AppState {
    pub fn new(config: Config, store: NoteStore) -> Self {
        let openapi_json = openapi::render_json(&config.public_url());
        Self {
            config,
            store,
            openapi_json,
            swagger_config: Arc::new(openapi::swagger_config()),
        }
    }

    /// Open the configured cache directory and build the state around it
    pub async fn open(config: Config) -> std::io::Result<Self> {
        let store = NoteStore::open(&config.storage.cache_dir).await?;
        Ok(Self::new(config, store))
    }
}
