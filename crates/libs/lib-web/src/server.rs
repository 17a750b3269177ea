//! # Server Setup
//!
//! Shared state, router construction, and HTTP server startup.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use axum::{
    extract::FromRef,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    routing::{delete, get, post},
    Router,
};
use lib_auth::{TokenIssuer, TokenVerifier};
use lib_core::{create_pool, migrate, Config, DbPool};
use lib_utils::get_env_opt;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes.
///
/// Built once at startup. The signing secret lives only inside the issuer and
/// verifier.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: DbPool, config: &Config) -> Self {
        let secret = config.jwt_secret.as_deref();

        Self {
            db,
            issuer: Arc::new(TokenIssuer::new(secret)),
            verifier: Arc::new(TokenVerifier::new(secret)),
        }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(state: &AppState) -> Self {
        state.issuer.clone()
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    /// Defaults, with `BIND_ADDRESS` taken from the environment when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(bind_address) = get_env_opt("BIND_ADDRESS") {
            config.bind_address = bind_address;
        }
        config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// Reads the process environment as is; the binary loads `.env` first.
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration validation fails
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = get_env_opt("LOG_LEVEL")
        .unwrap_or_else(|| "info".to_string())
        .to_lowercase();

    let filter = tracing_subscriber::EnvFilter::try_new(&log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    info!("SKILLBOARD SERVER STARTING");
    info!("Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env();
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;

    if app_config.jwt_secret.is_none() {
        error!("JWT_SECRET is not set: every login will fail with a configuration error until it is");
    }

    ensure_sqlite_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!("Running database migrations...");
    migrate(&pool).await?;
    info!("Migrations complete");

    let state = AppState::new(pool, &app_config);
    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!("SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_sqlite_dir(database_url: &str) -> std::io::Result<()> {
    let Some(db_path) = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
    else {
        return Ok(());
    };

    if db_path.starts_with(":memory:") {
        return Ok(());
    }

    let db_path = db_path.split('?').next().unwrap_or(db_path);
    if let Some(parent) = std::path::Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }

    Ok(())
}

/// Create the application router with all routes and layers.
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let user_routes = Router::new()
        .route(
            "/profile",
            get(handlers::user::get_profile).put(handlers::user::update_profile),
        )
        .route(
            "/skills",
            get(handlers::user::list_skills).post(handlers::user::add_skill),
        )
        .route(
            "/skills/stats",
            get(handlers::user::skill_stats).delete(handlers::user::remove_stats_skill),
        )
        .route("/skills/{skill_name}", delete(handlers::user::remove_skill))
        .route("/all", get(handlers::user::list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .nest("/api/user", user_routes)
        .route("/health", get(|| async { "OK" }))
        .fallback(|| async { (StatusCode::NOT_FOUND, "Route not found") })
        .with_state(state)
        .layer(middleware::from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
        // Outermost so the stamp exists before logging and the span see the request.
        .layer(middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST   /api/auth/register");
    info!("   • POST   /api/auth/login");
    info!(" USER (Authorization: Bearer <token>):");
    info!("   • GET    /api/user/profile");
    info!("   • PUT    /api/user/profile");
    info!("   • GET    /api/user/skills");
    info!("   • POST   /api/user/skills");
    info!("   • DELETE /api/user/skills/{{skill_name}}");
    info!("   • GET    /api/user/skills/stats");
    info!("   • GET    /api/user/all");
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup
