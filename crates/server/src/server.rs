use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post, put},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use api_types::MessageResponse;
use engine::Engine;

use crate::{auth, currency, summary, transactions};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Everything that changes between deployments of the HTTP surface.
#[derive(Clone, Debug)]
pub struct ServerOptions {
    /// Origins allowed to call the API from a browser (with credentials).
    pub allowed_origins: Vec<String>,
    /// Address `run` binds to.
    pub bind: String,
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            bind: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl ServerOptions {
    pub fn address(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn cors(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {origin:?}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

async fn health() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "API is working!".to_string(),
    })
}

/// Assembles the application without binding any socket.
pub fn router(engine: Engine, options: &ServerOptions) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    let api = Router::new()
        .route("/test", get(health))
        .route(
            "/tasks",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/tasks/{id}",
            put(transactions::update).delete(transactions::delete),
        )
        .route("/sum", post(summary::sum))
        .route("/currency/convert", post(currency::convert))
        .route("/auth/login", post(auth::login))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(cors(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received ctrl+c signal."),
        _ = terminate => tracing::debug!("Received terminate signal."),
    }
}

/// Binds `options.bind:options.port` and serves until a shutdown signal.
pub async fn run(engine: Engine, options: ServerOptions) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(options.address()).await?;
    run_with_listener(engine, &options, listener).await
}

pub async fn run_with_listener(
    engine: Engine,
    options: &ServerOptions,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine, options))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

pub fn spawn_with_listener(
    engine: Engine,
    options: ServerOptions,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, &options, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
