//! # Expense Tracker Backend
//!
//! Personal expense tracking service: record expenses, query them, and view
//! aggregated spending over a window of days.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (use cases, entity, aggregation)
//!     ↓
//! Storage Layer (ExpenseStore: JSON file or SQLite)
//! ```
//!
//! The storage adapter is chosen from [`config::AppConfig`] at startup and
//! handed to the use cases as an `Arc<dyn ExpenseStore>`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::{AppConfig, StorageKind};
use crate::domain::use_cases::{
    CreateExpenseUseCase, DeleteExpenseUseCase, GetAllExpensesUseCase, GetDashboardDataUseCase,
    GetExpenseByIdUseCase, GetFilteredExpensesUseCase, UpdateExpenseUseCase,
};
use crate::storage::{ExpenseStore, JsonExpenseStore, SqliteExpenseStore};

/// Name and version reported by `GET /` and `GET /health`
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            name: "Expense Tracker".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Main application state that holds all use cases
#[derive(Clone)]
pub struct AppState {
    pub create_expense: CreateExpenseUseCase,
    pub get_expense_by_id: GetExpenseByIdUseCase,
    pub get_all_expenses: GetAllExpensesUseCase,
    pub get_filtered_expenses: GetFilteredExpensesUseCase,
    pub update_expense: UpdateExpenseUseCase,
    pub delete_expense: DeleteExpenseUseCase,
    pub get_dashboard_data: GetDashboardDataUseCase,
    pub app_info: AppInfo,
}

impl AppState {
    pub fn new(store: Arc<dyn ExpenseStore>, app_info: AppInfo) -> Self {
        Self {
            create_expense: CreateExpenseUseCase::new(store.clone()),
            get_expense_by_id: GetExpenseByIdUseCase::new(store.clone()),
            get_all_expenses: GetAllExpensesUseCase::new(store.clone()),
            get_filtered_expenses: GetFilteredExpensesUseCase::new(store.clone()),
            update_expense: UpdateExpenseUseCase::new(store.clone()),
            delete_expense: DeleteExpenseUseCase::new(store.clone()),
            get_dashboard_data: GetDashboardDataUseCase::new(store),
            app_info,
        }
    }
}

/// Open the store selected by `config`
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn ExpenseStore>> {
    match config.storage {
        StorageKind::Json => {
            info!("Using JSON store at {}", config.data_file_path.display());
            let store = JsonExpenseStore::new(&config.data_file_path).with_context(|| {
                format!("failed to open {}", config.data_file_path.display())
            })?;
            Ok(Arc::new(store))
        }
        StorageKind::Sqlite => {
            info!("Using SQLite store at {}", config.database_url);
            ensure_sqlite_parent_dir(&config.database_url)?;
            let store = SqliteExpenseStore::connect(&config.database_url)
                .await
                .with_context(|| format!("failed to connect to {}", config.database_url))?;
            Ok(Arc::new(store))
        }
    }
}

/// Initialize the backend with all required use cases
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage");
    let store = open_store(config).await?;

    info!("Setting up application state");
    Ok(AppState::new(
        store,
        AppInfo {
            name: config.app_name.clone(),
            version: config.app_version.clone(),
        },
    ))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, cors_origins: &[String]) -> Router {
    let api_routes = Router::new()
        .route(
            "/expenses",
            get(io::list_expenses).post(io::create_expense),
        )
        .route(
            "/expenses/:expense_id",
            get(io::get_expense)
                .put(io::update_expense)
                .delete(io::delete_expense),
        )
        .route("/dashboard", get(io::get_dashboard));

    Router::new()
        .route("/", get(io::root))
        .route("/health", get(io::health))
        .nest("/api", api_routes)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(allowed)
}

/// `sqlite://` URLs point at a file whose directory must already exist
fn ensure_sqlite_parent_dir(url: &str) -> Result<()> {
    let Some(rest) = url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let file = rest.split('?').next().unwrap_or(rest);
    if file.is_empty() || file == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router(env: &TestEnvironment) -> Router {
        let state = AppState::new(env.shared_store(), AppInfo::default());
        create_router(state, &["http://localhost:5173".to_string()])
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_routes() {
        let env = TestEnvironment::new().unwrap();
        let app = test_router(&env);

        let response = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["app"], "Expense Tracker");

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["status"], "running");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body.get("docs").is_none());
    }

    #[tokio::test]
    async fn test_expense_lifecycle_over_http() {
        let env = TestEnvironment::new().unwrap();
        let app = test_router(&env);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/expenses",
                serde_json::json!({
                    "amount": 25.5,
                    "category": " comida ",
                    "payment_method": "cash",
                    "description": "Almuerzo"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["category"], "Comida");
        assert_eq!(created["formatted_amount"], "$25.50");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/expenses/1",
                serde_json::json!({ "amount": 30.0 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["amount"], 30.0);

        let response = app
            .clone()
            .oneshot(
                Request::get("/api/expenses?category=COMIDA")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["total"], 1);

        let response = app
            .clone()
            .oneshot(
                Request::delete("/api/expenses/1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(Request::get("/api/expenses/1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["detail"], "Expense not found");
    }

    #[tokio::test]
    async fn test_dashboard_route_rejects_out_of_range_days() {
        let env = TestEnvironment::new().unwrap();
        let app = test_router(&env);

        let response = app
            .oneshot(
                Request::get("/api/dashboard?days=0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_open_store_for_each_backend() {
        let env = TestEnvironment::new().unwrap();
        let mut config = AppConfig {
            data_file_path: env.base_directory().join("nested/expenses.json"),
            ..Default::default()
        };
        let store = open_store(&config).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());

        config.storage = StorageKind::Sqlite;
        config.database_url = format!(
            "sqlite://{}",
            env.base_directory().join("db/expenses.db").display()
        );
        let store = open_store(&config).await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());
    }
}
