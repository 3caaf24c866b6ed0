//! # Graph Widget Backend
//!
//! Server side of the graph dashboard widget.
//!
//! ## Architecture
//!
//! ```text
//! Browser (Yew widget)
//!     ↓
//! IO Layer (REST API, admin page shell)
//!     ↓
//! Domain Layer (data windows, activation, widget registration)
//!     ↓
//! Storage Layer (SQLite option table)
//! ```
//!
//! `initialize_backend` wires the layers into an [`AppState`]; `create_router`
//! mounts the endpoints, the static `build/` directory, tracing and CORS.

pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::Result;
use axum::{http::Method, Router};
use shared::REST_NAMESPACE;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::BackendConfig;
use crate::domain::{
    activate, load_seed, AssetManifest, DataSourceMode, DataWindowService, GraphDashboardWidget,
    OptionRecordSource, RecordSource, ScriptAsset,
};
use crate::storage::{DbConnection, OptionStorage, SqliteOptionRepository};

/// Main application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub data_window: DataWindowService,
    pub plugin: Arc<GraphDashboardWidget>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &BackendConfig) -> Result<AppState> {
    info!("Setting up database at {}", config.database_url);
    let db_conn = DbConnection::new(&config.database_url).await?;
    let store: Arc<dyn OptionStorage> = Arc::new(SqliteOptionRepository::new(db_conn));

    if config.activate_on_start {
        activate(store.as_ref()).await?;
    }

    info!("Setting up record source ({:?})", config.data_source);
    let source: Arc<dyn RecordSource> = match config.data_source {
        DataSourceMode::Snapshot => Arc::new(load_seed(store.as_ref()).await?),
        DataSourceMode::Live => Arc::new(OptionRecordSource::new(store.clone())),
    };
    let data_window = DataWindowService::new(source, config.reference_date);

    info!("Registering dashboard widget");
    let manifest = AssetManifest::load(&config.plugin_dir)?;
    let script = ScriptAsset::new(&config.plugin_base_path(), manifest);
    let plugin = Arc::new(GraphDashboardWidget::new(script));

    Ok(AppState {
        data_window,
        plugin,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &BackendConfig) -> Result<Router> {
    // CORS setup so the trunk dev server can call the API
    let cors = CorsLayer::new()
        .allow_origin(config.cors_origin()?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(io::rest::data_apis::router())
        .merge(io::rest::logging_apis::router());

    let build_dir = config.plugin_dir.join("build");
    let build_path = format!("{}build", config.plugin_base_path());
    info!("Serving {} from {}", build_path, build_dir.display());

    Ok(Router::new()
        .nest(REST_NAMESPACE, api_routes)
        .nest("/wp-admin", io::rest::dashboard_apis::router())
        .nest_service(&build_path, ServeDir::new(build_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
