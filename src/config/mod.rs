// Configuration module entry point
// Layers defaults, an optional config file, NOTES_* environment variables
// and command-line overrides into one Config

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StorageConfig,
};

use crate::cli::Cli;

impl Config {
    /// Load configuration from the specified file path (extension optional)
    ///
    /// A missing file is not an error. Values given on the command line win
    /// over everything else.
    pub fn load_from(config_path: &str, cli: &Cli) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("NOTES")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.host", cli.host.clone())?
            .set_override_option("server.port", cli.port.map(i64::from))?
            .set_override_option("storage.cache_dir", cli.cache.clone())?
            .set_override_option("storage.form_path", cli.form.clone())?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = match self.server.host.as_str() {
            "localhost" => "127.0.0.1",
            other => other,
        };
        format!("{host}:{}", self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Base URL advertised in the API documentation
    pub fn public_url(&self) -> String {
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "::" => "localhost",
            other => other,
        };
        format!("http://{host}:{}", self.server.port)
    }
}
