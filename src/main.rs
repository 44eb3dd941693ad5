use std::sync::Arc;

use tracing::info;

use itemshelf::web::WebServer;
use itemshelf::{BlobStore, Config, Database};

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {e}");
        std::process::exit(1);
    }

    // Initialize logging
    if let Err(e) = itemshelf::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        itemshelf::logging::init_console_only(&config.logging.level);
    }

    info!("itemshelf - file attachment item service");

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to open database {}: {}", config.database.path, e);
            std::process::exit(1);
        }
    };
    info!("Database opened at {}", config.database.path);

    let storage = match BlobStore::new(&config.storage.uploads_path) {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!(
                "Failed to initialize blob storage at {}: {}",
                config.storage.uploads_path,
                e
            );
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, Arc::new(db), storage) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
