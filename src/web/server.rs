//! Web server for the tattoo API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::config::Config;
use crate::tattoo::TattooModel;
use crate::upload::UploadGate;
use crate::{Result, TattooError};

use super::handlers::AppState;
use super::middleware::JwtState;
use super::router::{
    create_health_router, create_router, create_static_router, create_swagger_router,
};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// JWT state.
    jwt_state: Arc<JwtState>,
    /// Server configuration.
    config: Config,
}

impl WebServer {
    /// Create a new web server around an injected record model.
    pub fn new(config: &Config, model: Arc<dyn TattooModel>) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| TattooError::Config(format!("invalid server address: {e}")))?;

        let upload_gate = UploadGate::new(config.uploads.upload_config());
        let app_state = AppState::new(model, upload_gate);
        let jwt_state = Arc::new(JwtState::new(&config.auth.jwt_secret));

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            jwt_state,
            config: config.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Assemble the full application router.
    pub fn into_router(self) -> Router {
        let mut router = create_router(self.app_state, self.jwt_state, &self.config.server)
            .merge(create_health_router())
            .merge(create_swagger_router());

        // Add static file serving if enabled
        if self.config.uploads.serve_static {
            let uploads_dir = PathBuf::from(&self.config.uploads.destination_dir);
            router = router.merge(create_static_router(&uploads_dir));
        }

        // Add gzip compression layer
        router.layer(CompressionLayer::new())
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let addr = self.addr;
        let router = self.into_router();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let addr = self.addr;
        let router = self.into_router();

        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}
