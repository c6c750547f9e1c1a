use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use entity::employees;
use platform_api::{ApiError, ErrorBody};
use platform_db::DbPool;
use products_employees::{EmployeeInput, EmployeeService, is_valid_employee_input};
use serde::Serialize;
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub service: EmployeeService,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Arc<AppConfig>) -> Self {
        Self {
            service: EmployeeService::new(pool.clone()),
            pool,
            config,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "employee server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/employees",
            get(get_all_employees).post(create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(get_employee_by_id)
                .put(update_employee)
                .delete(delete_employee),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), MakeRequestUuid))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Employee Backend Service is running"
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_ok = state.pool.ping().await.is_ok();
    Json(HealthResponse {
        ok: db_ok,
        db_ok,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    db_ok: bool,
    version: &'static str,
}

async fn create_employee(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<employees::Model>)> {
    let input = validated_input(body)?;
    let employee = state.service.create_employee(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn get_all_employees(
    State(state): State<AppState>,
) -> HttpResult<Json<Vec<employees::Model>>> {
    let employees = state.service.get_all_employees().await?;
    Ok(Json(employees))
}

async fn get_employee_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<Json<employees::Model>> {
    let id = parse_id(&id)?;
    let employee = state.service.get_employee_by_id(id).await?;
    Ok(Json(employee))
}

async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> HttpResult<Json<employees::Model>> {
    // Shape check first: a bad payload is a 400 even when the id is bad too.
    let input = validated_input(body)?;
    let id = parse_id(&id)?;
    let employee = state.service.update_employee(id, input).await?;
    Ok(Json(employee))
}

async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HttpResult<StatusCode> {
    let id = parse_id(&id)?;
    state.service.delete_employee(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Full-shape check shared by create and update. A missing or unparsable
/// body degrades to JSON null, which the validator rejects.
fn validated_input(body: Result<Json<Value>, JsonRejection>) -> HttpResult<EmployeeInput> {
    let data = body.map(|Json(value)| value).unwrap_or(Value::Null);
    if !is_valid_employee_input(&data) {
        return Err(ApiError::InvalidInput("employee payload failed shape check".into()).into());
    }
    serde_json::from_value(data).map_err(|err| ApiError::InvalidInput(err.to_string()).into())
}

/// Route captures stay raw strings: a segment that does not parse as an id
/// can never match a stored record, so it takes the not-found path rather
/// than a routing-level 400.
fn parse_id(raw: &str) -> Result<i32, HttpError> {
    raw.parse::<i32>().map_err(|_| ApiError::NotFound.into())
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound => Self::new(StatusCode::NOT_FOUND, "Employee not found"),
            ApiError::InvalidInput(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid employee data")
            }
            // Store-level failures carry no dedicated mapping; the error
            // text goes out with the host default 500.
            ApiError::Internal(source) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: source.to_string(),
            },
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            (self.status, Json(ErrorBody::new(self.message))).into_response()
        } else {
            (self.status, self.message).into_response()
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
