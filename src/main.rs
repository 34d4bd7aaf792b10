use clap::Parser;
use std::sync::Arc;
use tokio::sync::Notify;

use notes_server::cli::Cli;
use notes_server::config::{AppState, Config};
use notes_server::{logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = Config::load_from(&cli.config, &cli)?;

    logger::init(&cfg).map_err(|e| format!("Failed to open log files: {e}"))?;

    // Worker threads default to the number of CPU cores
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;

    let cache_dir = cfg.storage.cache_dir.clone();
    let state = AppState::open(cfg)
        .await
        .map_err(|e| format!("Failed to create cache directory '{cache_dir}': {e}"))?;
    let state = Arc::new(state);

    let listener =
        server::create_listener(addr).map_err(|e| format!("Failed to bind {addr}: {e}"))?;
    logger::log_server_start(&addr, &state.config);

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown));

    server::start_server_loop(listener, state, shutdown).await?;
    Ok(())
}
