/*!
ggpick REST API Server

Serves the dashboard state over HTTP so a browser front-end can draw the five
selectors, the plot and the error/warning areas.

## Usage

```bash
ggpick-rest --host 127.0.0.1 --port 3335
```

## Endpoints

- `GET /api/v1/dashboard` - Current selectors, plot (Vega-Lite), error and warning
- `POST /api/v1/select` - Bind a column to a slot (`{"slot": "x", "column": "mpg"}`)
- `POST /api/v1/reset` - Clear every slot
- `GET /api/v1/columns` - Dataset columns and labels
- `GET /api/v1/health` - Health check
- `GET /api/v1/version` - Version information
*/

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ggpick::reader::{BuiltinReader, Reader};
use ggpick::session::{Control, Session};
use ggpick::writer::VegaLiteWriter;
use ggpick::{Aesthetic, Column, DataFrame, GgpickError, ScatterPlot, VERSION};

/// CLI arguments for the REST API server
#[derive(Parser)]
#[command(name = "ggpick-rest")]
#[command(about = "ggpick REST API Server")]
#[command(version = VERSION)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind to
    #[arg(long, default_value = "3335")]
    port: u16,

    /// CORS allowed origins (comma-separated)
    #[arg(long, default_value = "*")]
    cors_origin: String,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    /// The one dashboard session; each request applies one event under the lock
    session: Arc<Mutex<Session>>,
}

impl AppState {
    fn lock(&self) -> Result<MutexGuard<'_, Session>, GgpickError> {
        self.session.lock().map_err(|e| {
            GgpickError::InternalError(format!("Session unavailable (mutex poisoned): {}", e))
        })
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for /api/v1/select endpoint
#[derive(Debug, Deserialize)]
struct SelectRequest {
    /// Slot to change
    slot: Aesthetic,
    /// New column, or null to unset the slot
    #[serde(default)]
    column: Option<Column>,
}

/// Successful API response
#[derive(Debug, Serialize)]
struct ApiSuccess<T> {
    status: String,
    data: T,
}

/// Error API response
#[derive(Debug, Serialize)]
struct ApiError {
    status: String,
    error: ErrorDetails,
}

#[derive(Debug, Serialize)]
struct ErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
}

/// Everything the dashboard displays
#[derive(Debug, Serialize)]
struct DashboardView {
    controls: Vec<Control>,
    /// Vega-Lite specification, present once all slots are bound and rendering succeeded
    plot: Option<serde_json::Value>,
    error: Option<String>,
    warning: Option<String>,
}

#[derive(Debug, Serialize)]
struct ColumnInfo {
    name: &'static str,
    label: &'static str,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Version response
#[derive(Debug, Serialize)]
struct VersionResponse {
    version: String,
    features: Vec<String>,
}

// ============================================================================
// Error Handling
// ============================================================================

/// Custom error type for API responses
struct ApiErrorResponse {
    status: StatusCode,
    error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let json = Json(self.error);
        (self.status, json).into_response()
    }
}

impl From<GgpickError> for ApiErrorResponse {
    fn from(err: GgpickError) -> Self {
        let (status, error_type) = match &err {
            GgpickError::InvalidSelection(_) => (StatusCode::BAD_REQUEST, "InvalidSelection"),
            GgpickError::HiddenSlot(_) => (StatusCode::BAD_REQUEST, "HiddenSlot"),
            GgpickError::ParseError(_) => (StatusCode::BAD_REQUEST, "ParseError"),
            GgpickError::DataError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DataError"),
            GgpickError::RenderError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RenderError"),
            GgpickError::WriterError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "WriterError"),
            GgpickError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "InternalError"),
        };

        ApiErrorResponse {
            status,
            error: ApiError {
                status: "error".to_string(),
                error: ErrorDetails {
                    message: err.to_string(),
                    error_type: error_type.to_string(),
                },
            },
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn dashboard_view(session: &Session) -> DashboardView {
    build_view(session, |plot, data| VegaLiteWriter::new().to_value(plot, data))
}

/// Snapshot the session for display; writer failures land in the error area
fn build_view<F>(session: &Session, write: F) -> DashboardView
where
    F: FnOnce(&ScatterPlot, &DataFrame) -> ggpick::Result<serde_json::Value>,
{
    let mut error = session.error().map(str::to_string);
    let plot = session
        .plot()
        .and_then(|plot| match write(plot, session.data()) {
            Ok(spec) => Some(spec),
            Err(e) => {
                tracing::warn!("Failed to write plot: {}", e);
                error = Some(e.to_string());
                None
            }
        });

    DashboardView {
        controls: session.controls(),
        plot,
        error,
        warning: session.warning().map(str::to_string),
    }
}

fn success<T>(data: T) -> Json<ApiSuccess<T>> {
    Json(ApiSuccess {
        status: "success".to_string(),
        data,
    })
}

// ============================================================================
// Handler Functions
// ============================================================================

/// GET /api/v1/dashboard - Current dashboard state
async fn dashboard_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<DashboardView>>, ApiErrorResponse> {
    let session = state.lock()?;
    Ok(success(dashboard_view(&session)))
}

/// POST /api/v1/select - Bind (or unset) one slot
async fn select_handler(
    State(state): State<AppState>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<ApiSuccess<DashboardView>>, ApiErrorResponse> {
    info!(
        "Selecting {} for {}",
        request.column.map(|c| c.name()).unwrap_or("(unset)"),
        request.slot
    );

    let mut session = state.lock()?;
    session.select(request.slot, request.column)?;
    Ok(success(dashboard_view(&session)))
}

/// POST /api/v1/reset - Clear every slot
async fn reset_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiSuccess<DashboardView>>, ApiErrorResponse> {
    info!("Resetting dashboard");
    let mut session = state.lock()?;
    session.reset()?;
    Ok(success(dashboard_view(&session)))
}

/// GET /api/v1/columns - Dataset columns and labels
async fn columns_handler() -> Json<ApiSuccess<Vec<ColumnInfo>>> {
    success(
        Column::ALL
            .iter()
            .map(|c| ColumnInfo {
                name: c.name(),
                label: c.label(),
            })
            .collect(),
    )
}

/// GET /api/v1/health - Health check
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: VERSION.to_string(),
    })
}

/// GET /api/v1/version - Version information
async fn version_handler() -> Json<VersionResponse> {
    let mut features = Vec::new();

    #[cfg(feature = "vegalite")]
    features.push("vegalite".to_string());

    Json(VersionResponse {
        version: VERSION.to_string(),
        features,
    })
}

/// Root handler
async fn root_handler() -> &'static str {
    "ggpick REST API Server - See /api/v1/health for status"
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/api/v1/dashboard", get(dashboard_handler))
        .route("/api/v1/select", post(select_handler))
        .route("/api/v1/reset", post(reset_handler))
        .route("/api/v1/columns", get(columns_handler))
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/version", get(version_handler))
        .with_state(state)
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ggpick_rest=info,ggpick=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    info!("Loading built-in dataset");
    let data = BuiltinReader::new().read()?;
    let state = AppState {
        session: Arc::new(Mutex::new(Session::new(data))),
    };

    // Configure CORS
    let cors = if cli.cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    } else {
        let origins: Vec<_> = cli
            .cors_origin
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(vec![header::CONTENT_TYPE])
    };

    let app = build_router(state)
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;

    info!("Starting ggpick REST API server on {}", addr);
    info!("API documentation:");
    info!("  GET  /api/v1/dashboard - Current dashboard state");
    info!("  POST /api/v1/select    - Bind a column to a slot");
    info!("  POST /api/v1/reset     - Clear every slot");
    info!("  GET  /api/v1/columns   - Dataset columns");
    info!("  GET  /api/v1/health    - Health check");
    info!("  GET  /api/v1/version   - Version info");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let data = BuiltinReader::new().read().unwrap();
        build_router(AppState {
            session: Arc::new(Mutex::new(Session::new(data))),
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null))
    }

    async fn select(app: &Router, slot: &str, column: &str) -> (StatusCode, serde_json::Value) {
        let body = format!(r#"{{"slot": "{}", "column": "{}"}}"#, slot, column);
        send(app, "POST", "/api/v1/select", Some(&body)).await
    }

    // ========================================================================
    // Dashboard Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_initial_dashboard() {
        let app = create_test_app();
        let (status, json) = send(&app, "GET", "/api/v1/dashboard", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "success");
        let controls = json["data"]["controls"].as_array().unwrap();
        assert_eq!(controls.len(), 5);
        assert_eq!(controls[0]["slot"], "x");
        assert_eq!(controls[0]["visible"], true);
        assert_eq!(controls[0]["options"].as_array().unwrap().len(), 12);
        assert!(controls[0]["options"][0].is_null());
        assert_eq!(controls[1]["visible"], false);
        assert!(json["data"]["plot"].is_null());
        assert!(json["data"]["error"].is_null());
        assert!(json["data"]["warning"].is_null());
    }

    #[tokio::test]
    async fn test_select_narrows_next_slot() {
        let app = create_test_app();
        let (status, json) = select(&app, "x", "mpg").await;

        assert_eq!(status, StatusCode::OK);
        let controls = &json["data"]["controls"];
        assert_eq!(controls[0]["selected"], "mpg");
        assert_eq!(controls[1]["visible"], true);
        let options = controls[1]["options"].as_array().unwrap();
        assert_eq!(options.len(), 11);
        assert!(!options.contains(&serde_json::json!("mpg")));
    }

    #[tokio::test]
    async fn test_full_selection_returns_plot() {
        let app = create_test_app();
        for (slot, column) in [
            ("x", "mpg"),
            ("y", "hp"),
            ("color", "wt"),
            ("size", "am"),
            ("shape", "gear"),
        ] {
            let (status, _) = select(&app, slot, column).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, json) = send(&app, "GET", "/api/v1/dashboard", None).await;
        assert_eq!(status, StatusCode::OK);
        let plot = &json["data"]["plot"];
        assert!(plot["$schema"].as_str().unwrap().contains("vega-lite"));
        assert_eq!(plot["encoding"]["x"]["title"], "Miles Per Gallon");
        assert_eq!(plot["encoding"]["shape"]["title"], "Number of Gears");
        assert!(json["data"]["error"].is_null());
        assert!(json["data"]["warning"].is_null());
    }

    #[tokio::test]
    async fn test_duplicate_selection_rejected() {
        let app = create_test_app();
        select(&app, "x", "mpg").await;
        let (status, json) = select(&app, "y", "mpg").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"]["type"], "InvalidSelection");

        // State is unchanged
        let (_, json) = send(&app, "GET", "/api/v1/dashboard", None).await;
        assert_eq!(json["data"]["controls"][0]["selected"], "mpg");
        assert!(json["data"]["controls"][1]["selected"].is_null());
    }

    #[tokio::test]
    async fn test_hidden_slot_rejected() {
        let app = create_test_app();
        let (status, json) = select(&app, "shape", "gear").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["type"], "HiddenSlot");
    }

    #[tokio::test]
    async fn test_unset_and_reset() {
        let app = create_test_app();
        select(&app, "x", "mpg").await;
        select(&app, "y", "hp").await;

        let (status, json) = send(
            &app,
            "POST",
            "/api/v1/select",
            Some(r#"{"slot": "x", "column": null}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["controls"][0]["selected"].is_null());
        assert_eq!(json["data"]["controls"][1]["visible"], false);

        select(&app, "x", "cyl").await;
        let (status, json) = send(&app, "POST", "/api/v1/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["data"]["controls"][0]["selected"].is_null());
    }

    #[tokio::test]
    async fn test_shape_warning_surfaces() {
        let app = create_test_app();
        for (slot, column) in [
            ("x", "hp"),
            ("y", "wt"),
            ("color", "am"),
            ("size", "gear"),
            ("shape", "mpg"),
        ] {
            select(&app, slot, column).await;
        }

        let (_, json) = send(&app, "GET", "/api/v1/dashboard", None).await;
        assert!(json["data"]["plot"].is_object());
        assert!(json["data"]["warning"].as_str().unwrap().contains("shape palette"));
    }

    #[test]
    fn test_writer_failure_lands_in_error() {
        let mut session = Session::new(BuiltinReader::new().read().unwrap());
        for (slot, column) in [
            (Aesthetic::X, Column::Mpg),
            (Aesthetic::Y, Column::Hp),
            (Aesthetic::Color, Column::Wt),
            (Aesthetic::Size, Column::Am),
            (Aesthetic::Shape, Column::Gear),
        ] {
            session.select(slot, Some(column)).unwrap();
        }
        assert!(session.plot().is_some());

        let view = build_view(&session, |_, _| {
            Err(GgpickError::WriterError("no encoding for shape".to_string()))
        });
        assert!(view.plot.is_none());
        assert_eq!(
            view.error.as_deref(),
            Some("Output generation error: no encoding for shape")
        );
        assert!(view.warning.is_none());
        assert_eq!(view.controls.len(), 5);

        let view = dashboard_view(&session);
        assert!(view.plot.is_some());
        assert!(view.error.is_none());
    }

    // ========================================================================
    // Utility Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_columns_endpoint() {
        let app = create_test_app();
        let (status, json) = send(&app, "GET", "/api/v1/columns", None).await;

        assert_eq!(status, StatusCode::OK);
        let columns = json["data"].as_array().unwrap();
        assert_eq!(columns.len(), 11);
        assert_eq!(columns[0]["name"], "mpg");
        assert_eq!(columns[0]["label"], "Miles Per Gallon");
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_str = String::from_utf8_lossy(&body);
        assert!(body_str.contains("ggpick"));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();
        let (status, json) = send(&app, "GET", "/api/v1/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert!(json["version"].is_string());
    }

    #[tokio::test]
    async fn test_version_endpoint() {
        let app = create_test_app();
        let (status, json) = send(&app, "GET", "/api/v1/version", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["version"].is_string());
        assert!(json["features"].is_array());
    }
}
