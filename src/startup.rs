//! Application startup and lifecycle management.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use secrecy::{ExposeSecret, Secret};
use sha2::{Digest, Sha512};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::Key, Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Settings;
use crate::handlers::{
    app::health_check,
    chat::{accept_cookies, chat_page, submit_chat},
    workout::generate_workout,
};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::AppState;

/// Derive the session-cookie signing key from the configured secret, or
/// generate an ephemeral one when no secret is set.
pub fn session_key(secret: Option<&Secret<String>>) -> Key {
    match secret {
        Some(secret) => {
            let digest = Sha512::digest(secret.expose_secret().as_bytes());
            Key::from(digest.as_slice())
        }
        None => {
            tracing::warn!(
                "server.session_secret is not set; using an ephemeral signing key, \
                 sessions will not survive a restart"
            );
            Key::generate()
        }
    }
}

pub fn build_router(state: AppState, session_key: Key) -> Router {
    // Session setup
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_signed(session_key)
        .with_secure(false) // the cookie must also work over plain HTTP (tests, proxied deployments)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(24)));

    Router::new()
        .route("/", get(chat_page).post(submit_chat))
        .route("/accept_cookies", post(accept_cookies))
        .route("/api/generate_workout", post(generate_workout))
        .route("/health", get(health_check))
        .layer(session_layer)
        // CORS is wide open, matching the browser widget's same-page use
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    tls: Option<RustlsConfig>,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let gemini_config = GeminiConfig {
            api_key: settings.gemini.api_key.expose_secret().clone(),
            model: settings.gemini.model.clone(),
            api_base: settings.gemini.api_base.clone(),
        };
        let text_provider: Arc<dyn TextProvider> = Arc::new(GeminiTextProvider::new(gemini_config));

        tracing::info!(
            model = %settings.gemini.model,
            "Initialized Gemini text provider"
        );

        let state = AppState::new(
            text_provider,
            Duration::from_secs(settings.gemini.generation_timeout_secs),
        );

        let router = build_router(state, session_key(settings.server.session_secret.as_ref()));

        // Port 0 binds a random port, used by the integration tests.
        let addr = format!("{}:{}", settings.server.host, settings.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind listener to {}", addr))?;
        let port = listener.local_addr()?.port();

        let tls = match &settings.server.tls {
            Some(tls) => Some(
                RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
                    .await
                    .with_context(|| {
                        format!(
                            "Failed to load TLS certificate from {} / {}",
                            tls.cert_path, tls.key_path
                        )
                    })?,
            ),
            None => None,
        };

        Ok(Self {
            port,
            listener,
            router,
            tls,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        match self.tls {
            Some(tls) => {
                tracing::info!("Serving HTTPS on port {}", self.port);
                let listener = self.listener.into_std()?;
                axum_server::from_tcp_rustls(listener, tls)
                    .serve(self.router.into_make_service())
                    .await?;
            }
            None => {
                tracing::info!("Serving HTTP on port {}", self.port);
                axum::serve(self.listener, self.router).await?;
            }
        }

        Ok(())
    }
}
