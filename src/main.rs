mod core;
mod features;
mod shared;

use crate::core::config::Config;
use crate::core::{database, middleware};
use crate::features::auth::password::hash_password;
use crate::features::auth::{AuthService, PgUserStore};
use crate::features::pages::{routes as pages_routes, PageState};
use crate::features::reports::{routes as reports_routes, PgReportStore, ReportService};
use crate::features::weather::WeatherService;
use crate::shared::templates::TemplateEngine;
use axum::Router;
use std::io::BufRead;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // `amptier-core hash-password` prints a hash for the users.pass column
    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        return print_password_hash();
    }

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
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

/// Read one password from stdin and print its encoded hash
fn print_password_hash() -> anyhow::Result<()> {
    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        anyhow::bail!("No password given on stdin");
    }

    let encoded = hash_password(password).map_err(|e| anyhow::anyhow!(e))?;
    println!("{}", encoded);
    Ok(())
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
        "System info: tokio_worker_threads={}, pid={}",
        worker_threads,
        std::process::id()
    );
    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!(
        "Database connection pool created for {}@{}:{}/{}",
        config.database.user,
        config.database.host,
        config.database.port,
        config.database.name
    );

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    let templates = Arc::new(
        TemplateEngine::from_dir(&config.app.template_dir)
            .map_err(|e| anyhow::anyhow!("Failed to initialize templates: {}", e))?,
    );
    tracing::info!("Templates loaded from {}", config.app.template_dir);

    // Initialize Report Service
    let report_service = Arc::new(ReportService::new(
        Arc::new(PgReportStore::new(pool.clone())),
        config.reports.default_location.clone(),
    ));
    tracing::info!("Report service initialized");

    // Initialize Auth Service
    let auth_service = Arc::new(AuthService::new(Arc::new(PgUserStore::new(pool.clone()))));
    tracing::info!("Auth service initialized");

    // Initialize Weather Service
    let weather_service = Arc::new(
        WeatherService::new(config.weather.clone())
            .map_err(|e| anyhow::anyhow!("Failed to initialize weather client: {}", e))?,
    );
    tracing::info!("Weather service initialized for {}", config.weather.city);

    let page_state = PageState {
        report_service: Arc::clone(&report_service),
        auth_service,
        weather_service,
        templates,
    };

    // Simple health check endpoint
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(pages_routes(page_state))
        .merge(reports_routes(
            report_service,
            config.app.max_request_body_size,
        ))
        .merge(health_route)
        .layer(
            ServiceBuilder::new()
                // Generate X-Request-Id using UUID v7 (or use client-provided one)
                .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(middleware::MakeSpanWithRequestId)
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                // Propagate X-Request-Id to response headers
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

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
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
