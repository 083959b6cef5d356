use super::shutdown::{ShutdownCoordinator, coordinated_shutdown, shutdown_signal};
use crate::errors::handlers::not_found;
use crate::http::security::security_headers;
use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::env;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

/// Creates and runs an Axum application server with graceful shutdown.
///
/// **WARNING**: This does NOT clean up resources (database connections, etc.)
/// on shutdown. Use `create_production_app` with a cleanup routine instead.
///
/// # Arguments
///
/// * `app` - The Axum router to serve
/// * `config` - Server configuration (host and port)
///
/// # Example
///
/// ```rust,ignore
/// let config = ServerConfig::new("0.0.0.0".to_string(), 3000);
/// create_app(app, config).await?;
/// ```
pub async fn create_app(app: Router, config: ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    info!("Server listening on {}", config.address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Builds the allowed-origin list from the `CORS_ALLOWED_ORIGIN` environment
/// variable (comma-separated). The variable is required: refusing to guess
/// origins keeps a misconfigured deployment from silently accepting all.
fn cors_allowed_origins() -> std::io::Result<AllowOrigin> {
    let raw = env::var("CORS_ALLOWED_ORIGIN").map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN environment variable is required",
        )
    })?;

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|origin| {
            origin.parse::<HeaderValue>().map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid CORS origin '{}': {}", origin, e),
                )
            })
        })
        .collect::<std::io::Result<Vec<_>>>()?;

    if origins.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN must contain at least one origin",
        ));
    }

    Ok(AllowOrigin::list(origins))
}

/// Creates a router with standard middleware and API documentation endpoints.
///
/// Includes:
/// - Swagger UI at `/swagger-ui`
/// - Redoc at `/redoc`
/// - RapiDoc at `/rapidoc`
/// - Scalar at `/scalar`
/// - OpenAPI JSON at `/api-docs/openapi.json`
/// - Request tracing, security headers, CORS and response compression
/// - A JSON 404 fallback
///
/// The API routes are nested under `/api`.
pub fn create_router<T: OpenApi>(apis: Router) -> std::io::Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(cors_allowed_origins()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new());

    Ok(router)
}

/// Creates and runs a production-ready Axum server with coordinated shutdown.
///
/// On SIGTERM/SIGINT this stops accepting connections, lets in-flight requests
/// finish, then runs the provided `cleanup` routine bounded by
/// `cleanup_timeout`.
///
/// # Example
///
/// ```rust,ignore
/// create_production_app(app, &config, Duration::from_secs(30), async move {
///     drop(state.mongo_client);
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    app: Router,
    config: &ServerConfig,
    cleanup_timeout: Duration,
    cleanup: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();

    let cleanup_coordinator = coordinator.clone();
    let cleanup_handle = tokio::spawn(async move {
        cleanup_coordinator.wait_for_signal().await;
        info!("Running cleanup (timeout: {:?})", cleanup_timeout);
        if tokio::time::timeout(cleanup_timeout, cleanup).await.is_err() {
            tracing::warn!("Cleanup did not finish within {:?}", cleanup_timeout);
        } else {
            info!("Cleanup complete");
        }
    });

    let listener = tokio::net::TcpListener::bind(config.address()).await?;
    info!("Server listening on {}", config.address());

    axum::serve(listener, app)
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await?;

    cleanup_handle.await.ok();
    info!("Server stopped");
    Ok(())
}
