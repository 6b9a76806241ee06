//! HTTP server for the task API.
//!
//! This module provides the axum-based HTTP server that exposes the REST
//! endpoints for the `tasks` resource.

use axum::{
    Json, Router,
    extract::{FromRequest, Path, Request, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use std::net::{IpAddr, SocketAddr};
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::service::TaskService;
use crate::types::{NewTask, Task, TaskPatch};

/// JSON body extractor that reports binding failures as structured
/// [`ApiError`] responses instead of axum's plain-text rejection, so a
/// missing required field carries the same `{code, message, field}` body
/// as every other error.
struct ApiJson<T>(T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

/// Health check response.
#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /tasks - list every task.
async fn list_tasks(State(service): State<TaskService>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(service.get_all_tasks()?))
}

/// POST /tasks - create a task. `title` is required; a body missing it is
/// rejected with 422 by the extractor before this handler runs.
async fn create_task(
    State(service): State<TaskService>,
    ApiJson(new_task): ApiJson<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = service.create_new_task(new_task.title, new_task.description)?;
    info!(task_id = task.id, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /tasks/{id} - fetch a single task, 404 when absent.
async fn get_task(
    State(service): State<TaskService>,
    Path(task_id): Path<i64>,
) -> ApiResult<Json<Task>> {
    Ok(Json(service.get_task_by_id(task_id)?))
}

/// PUT /tasks/{id} - sparse update; omitted fields keep their stored values.
async fn update_task(
    State(service): State<TaskService>,
    Path(task_id): Path<i64>,
    ApiJson(patch): ApiJson<TaskPatch>,
) -> ApiResult<Json<Task>> {
    let task = service.update_existing_task(task_id, &patch)?;
    info!(task_id, "Task updated");
    Ok(Json(task))
}

/// DELETE /tasks/{id} - hard delete, 204 on success, 404 when absent.
async fn delete_task(
    State(service): State<TaskService>,
    Path(task_id): Path<i64>,
) -> ApiResult<StatusCode> {
    service.delete_task(task_id)?;
    info!(task_id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Build the router with all routes.
pub fn build_router(service: TaskService) -> Router {
    // Permissive CORS; the API carries no credentials
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{task_id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Start the HTTP server on the specified host and port.
///
/// The default CLI host is loopback; pass `0.0.0.0` to listen on all
/// interfaces. Returns a oneshot sender that can be used to signal
/// shutdown, and the actual address the server is bound to.
pub async fn start_server(
    service: TaskService,
    host: IpAddr,
    port: u16,
) -> anyhow::Result<(oneshot::Sender<()>, SocketAddr)> {
    let app = build_router(service);

    let addr = SocketAddr::new(host, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Task API listening on http://{}", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Task API shutting down");
            })
            .await
        {
            tracing::error!("Server error: {}", e);
        }
    });

    Ok((shutdown_tx, bound_addr))
}
