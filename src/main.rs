mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, error, middleware};
use crate::features::comments::{routes as comments_routes, CommentService, PgCommentRepository};
use crate::features::health::routes as health_routes;
use crate::features::videos::{
    routes as videos_routes, PgVideoRepository, UploadSettings, VideoLifecycleService,
    VideoRepository, VideoService,
};
use crate::modules::video_provider::{MuxClient, VideoProvider};
use axum::extract::DefaultBodyLimit;
use axum::{middleware::from_fn_with_state, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Database pool and schema
    let pool = database::connect_and_migrate(&config.database).await?;

    // Mux client
    let mux_client = MuxClient::new(&config.mux)
        .map_err(|e| anyhow::anyhow!("Failed to create Mux client: {}", e))?;
    if config.mux.verify_on_startup {
        mux_client
            .verify_credentials()
            .await
            .map_err(|e| anyhow::anyhow!("Mux credential check failed: {}", e))?;
        tracing::info!("Mux credentials verified");
    }
    let provider: Arc<dyn VideoProvider> = Arc::new(mux_client);
    tracing::info!(
        "Mux client initialized (api={}, test_assets={}, webhook_signatures={})",
        config.mux.api_base_url,
        config.mux.test_assets,
        config.mux.webhook_secret.is_some()
    );

    // Repositories and services
    let video_repository: Arc<dyn VideoRepository> =
        Arc::new(PgVideoRepository::new(pool.clone()));
    let comment_repository = Arc::new(PgCommentRepository::new(pool.clone()));

    let lifecycle_service = Arc::new(VideoLifecycleService::new(
        Arc::clone(&video_repository),
        provider,
        UploadSettings {
            cors_origin: config.app.upload_cors_origin(),
            test_assets: config.mux.test_assets,
        },
    ));
    let video_service = Arc::new(VideoService::new(Arc::clone(&video_repository)));
    let comment_service = Arc::new(CommentService::new(
        comment_repository,
        Arc::clone(&video_repository),
    ));
    tracing::info!("Video and comment services initialized");

    // Build application router with dynamic swagger config
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn_with_state(
                Arc::new(credentials),
                middleware::swagger_basic_auth,
            ))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let webhook_secret = config.mux.webhook_secret.as_deref().map(Arc::<str>::from);

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes(
            video_service,
            lifecycle_service,
            comment_service,
            webhook_secret,
        ))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);
    tracing::info!("Webhook endpoint: http://{}/webhooks/mux", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Every API route plus the JSON 404 fallback
fn api_routes(
    video_service: Arc<VideoService>,
    lifecycle_service: Arc<VideoLifecycleService>,
    comment_service: Arc<CommentService>,
    webhook_secret: Option<Arc<str>>,
) -> Router {
    Router::new()
        .merge(health_routes::routes())
        .merge(videos_routes::routes(
            video_service,
            lifecycle_service,
            webhook_secret,
        ))
        .merge(comments_routes::routes(comment_service))
        .fallback(error::route_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::comments::repositories::InMemoryCommentRepository;
    use crate::features::videos::repositories::InMemoryVideoRepository;
    use crate::shared::test_helpers::FakeProvider;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server() -> TestServer {
        let videos: Arc<dyn VideoRepository> = Arc::new(InMemoryVideoRepository::new());
        let lifecycle = Arc::new(VideoLifecycleService::new(
            Arc::clone(&videos),
            Arc::new(FakeProvider::new()),
            UploadSettings {
                cors_origin: "*".to_string(),
                test_assets: false,
            },
        ));
        let router = api_routes(
            Arc::new(VideoService::new(Arc::clone(&videos))),
            lifecycle,
            Arc::new(CommentService::new(
                Arc::new(InMemoryCommentRepository::new()),
                videos,
            )),
            None,
        );
        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = server().get("/nope").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_upload_then_comment() {
        let server = server();

        let body: Value = server
            .post("/create-upload")
            .json(&json!({ "title": "Demo" }))
            .await
            .json();
        let id = body["data"]["videoId"].as_str().unwrap().to_string();

        let response = server
            .post(&format!("/videos/{}/comments", id))
            .json(&json!({ "content": "First!", "author": { "name": "Ana", "id": "u1" } }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);

        let body: Value = server.get("/health").await.json();
        assert_eq!(body["status"], "OK");
    }
}
