use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::access::LessonAccessResolver;
use crate::catalog::{LessonCatalog, SqliteCatalog};
use crate::config::{AccessConfig, StorageConfig};
use crate::errors::AppError;
use crate::jwt::{JwtConfig, UserSessionVerifier};
use crate::routes::{auth, health, lessons, storage};
use crate::storage::{LocalObjectStore, SIGNED_OBJECT_PATH};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt: Arc<JwtConfig>,
    pub storage: Arc<LocalObjectStore>,
    pub catalog: Arc<dyn LessonCatalog>,
    pub resolver: Arc<LessonAccessResolver>,
}

impl AppState {
    /// Wires the resolver to the SQLite catalog, the local object store and
    /// the JWT session verifier backed by the `users` table.
    pub fn new(pool: SqlitePool, jwt: JwtConfig, storage: StorageConfig, access: AccessConfig) -> Self {
        let jwt = Arc::new(jwt);
        let storage = Arc::new(LocalObjectStore::new(storage));
        let catalog: Arc<dyn LessonCatalog> = Arc::new(SqliteCatalog::new(pool.clone()));
        let sessions = Arc::new(UserSessionVerifier::new(jwt.clone(), pool.clone()));
        let resolver = LessonAccessResolver::new(sessions, catalog.clone(), storage.clone(), access);

        Self {
            pool,
            jwt,
            storage,
            catalog,
            resolver: Arc::new(resolver),
        }
    }
}

pub async fn create_app(pool: SqlitePool) -> Result<Router, AppError> {
    let state = AppState::new(
        pool,
        JwtConfig::from_env()?,
        StorageConfig::from_env()?,
        AccessConfig::from_env()?,
    );

    Ok(router(state))
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/me", get(auth::me));

    let lesson_routes = Router::new().route("/:id/video-url", get(lessons::lesson_video_url));

    Router::new()
        .route("/api/health", get(health::health))
        .nest("/auth", auth_routes)
        .nest("/lessons", lesson_routes)
        .route("/functions/get-video-url", post(lessons::get_video_url))
        .route(&format!("{SIGNED_OBJECT_PATH}/:object_id"), get(storage::download_signed_object))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
