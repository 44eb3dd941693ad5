//! Web server for itemshelf.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::storage::BlobStore;
use crate::{Result, ShelfError};

use super::handlers::{AppState, SharedDatabase};
use super::router::create_app;

/// Web server for the item API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// Full configuration, needed to build the router layers.
    config: Config,
}

impl WebServer {
    /// Create a new web server.
    pub fn new(config: &Config, db: SharedDatabase, storage: BlobStore) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                ShelfError::Config(format!(
                    "invalid server address {}:{}: {}",
                    config.server.host, config.server.port, e
                ))
            })?;

        Ok(Self {
            addr,
            app_state: Arc::new(AppState::new(db, storage)),
            config: config.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn bind(&self) -> std::io::Result<TcpListener> {
        let listener = TcpListener::bind(self.addr).await?;
        tracing::info!("Web server listening on http://{}", listener.local_addr()?);
        tracing::info!(
            "Serving uploads from {} at {}",
            self.app_state.storage.root().display(),
            self.config.storage.public_path
        );
        Ok(listener)
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let listener = self.bind().await?;
        let router = create_app(self.app_state, &self.config);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let listener = self.bind().await?;
        let local_addr = listener.local_addr()?;
        let router = create_app(self.app_state, &self.config);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn create_test_config() -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0; // Use random port
        config
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let dir = tempfile::tempdir().unwrap();
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();
        let storage = BlobStore::new(dir.path()).unwrap();

        let server = WebServer::new(&config, Arc::new(db), storage).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_invalid_host() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = create_test_config();
        config.server.host = "not a host".to_string();
        let db = Database::open_in_memory().await.unwrap();
        let storage = BlobStore::new(dir.path()).unwrap();

        let result = WebServer::new(&config, Arc::new(db), storage);
        assert!(matches!(result, Err(ShelfError::Config(_))));
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = create_test_config();
        let db = Database::open_in_memory().await.unwrap();
        let storage = BlobStore::new(dir.path()).unwrap();

        let server = WebServer::new(&config, Arc::new(db), storage).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        let client = reqwest::Client::new();
        let resp = client
            .get(format!("http://{}/health", addr))
            .send()
            .await
            .unwrap();

        assert!(resp.status().is_success());
        assert_eq!(resp.text().await.unwrap(), "OK");

        let resp = client
            .get(format!("http://{}/items", addr))
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
        assert_eq!(resp.text().await.unwrap(), "[]");
    }
}
