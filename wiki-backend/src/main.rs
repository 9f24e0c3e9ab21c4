use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod forms;
mod pages;
mod wiki;

use config::Config;
use wiki::EntryStore;

pub struct AppState {
    /// Flat-file entry storage, shared by every worker
    pub store: Arc<EntryStore>,
    pub config: Config,
    /// Server start time for uptime calculation
    pub started_at: std::time::Instant,
}

/// Copy the bundled seed entries into a store that has none yet
fn seed_empty_store(store: &EntryStore, config: &Config) {
    match store.list_entries() {
        Ok(titles) if titles.is_empty() => {
            if let Err(e) = store.seed_entries(&config.seed_dir) {
                log::warn!("Failed to seed entries from {:?}: {}", config.seed_dir, e);
            }
        }
        Ok(titles) => log::info!("Found {} existing entries", titles.len()),
        Err(e) => log::warn!("Failed to list entries: {}", e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    log::info!("Wiki backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let port = config.port;
    let bind_address = config.bind_address.clone();

    log::info!("Using entries directory {:?}", config.entries_dir);
    let store = EntryStore::new(config.entries_dir.clone()).map_err(|e| {
        log::error!("Failed to open entries directory {:?}: {}", config.entries_dir, e);
        std::io::Error::other(e.to_string())
    })?;
    seed_empty_store(&store, &config);
    let store = Arc::new(store);

    let static_dir = config.static_dir.clone();
    if static_dir.is_dir() {
        log::info!("Serving static files from {:?}", static_dir);
    } else {
        log::warn!("Static directory {:?} not found, pages will be unstyled", static_dir);
    }

    let started_at = std::time::Instant::now();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                store: Arc::clone(&store),
                config: config.clone(),
                started_at,
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::entries::config)
            .configure(controllers::wiki::config);

        if static_dir.is_dir() {
            app = app.service(Files::new("/static", static_dir.clone()));
        }

        app
    })
    .bind((bind_address.as_str(), port))?
    .run();

    log::info!("Listening on http://{}:{}", bind_address, port);

    let server_handle = server.handle();

    // Spawn Ctrl+C handler
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
