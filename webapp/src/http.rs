use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
    routing::get,
};
use platform_api::{ApiError, ApiResult, EmployeeInput, EmployeeView, ErrorBody};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    client::{ClientError, EmployeeClient},
    config::CustomProperties,
};

#[derive(Clone)]
pub struct AppState {
    pub client: EmployeeClient,
    pub properties: Arc<CustomProperties>,
}

impl AppState {
    pub fn new(properties: Arc<CustomProperties>) -> Self {
        Self {
            client: EmployeeClient::new(&properties),
            properties,
        }
    }
}

pub async fn serve(host: IpAddr, port: u16, state: AppState) -> anyhow::Result<()> {
    let addr = SocketAddr::from((host, port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, api_url = state.properties.api_url(), "webapp listening");
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(platform_api::shutdown_signal())
        .await
        .context("HTTP server error")
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/employees", get(list).post(create))
        .route("/employees/{id}", get(show).put(update).delete(remove))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn upstream(err: ClientError) -> ApiError {
    match err {
        ClientError::Status { status, .. } if status == StatusCode::NOT_FOUND => ApiError::NotFound,
        ClientError::Status { status, body } if status == StatusCode::BAD_REQUEST => {
            ApiError::InvalidInput(upstream_message(body))
        }
        other => {
            tracing::warn!(error = %other, "employee api call failed");
            ApiError::Upstream(other.to_string())
        }
    }
}

/// Pull the message out of an API error body so it is not nested as raw JSON.
fn upstream_message(body: String) -> String {
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(error) => match error.message.strip_prefix("bad request: ") {
            Some(detail) => detail.to_string(),
            None => error.message,
        },
        Err(_) => body,
    }
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    api_url: String,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        api_url: state.properties.api_url().to_string(),
    })
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeView>>> {
    Ok(Json(state.client.list().await.map_err(upstream)?))
}

async fn show(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let Path(id) = path?;
    let employee = state.client.get(id).await.map_err(upstream)?;
    employee.map(Json).ok_or(ApiError::NotFound)
}

async fn create(
    State(state): State<AppState>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<EmployeeView>)> {
    let Json(input) = body?;
    let created = state.client.save(None, &input).await.map_err(upstream)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
    body: Result<Json<EmployeeInput>, JsonRejection>,
) -> ApiResult<Json<EmployeeView>> {
    let Path(id) = path?;
    let Json(input) = body?;
    Ok(Json(state.client.save(Some(id), &input).await.map_err(upstream)?))
}

async fn remove(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    if state.client.delete(id).await.map_err(upstream)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn router(api_url: &str) -> Router {
        build_router(AppState::new(Arc::new(CustomProperties::new(api_url))))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_echoes_configured_api_url() {
        let (status, body) = get_json(router("http://api.test:9000"), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true, "api_url": "http://api.test:9000"}));
    }

    #[tokio::test]
    async fn unparsable_id_is_rejected_before_forwarding() {
        let (status, body) = get_json(router("http://127.0.0.1:1"), "/employees/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], json!("INVALID_INPUT"));
    }

    #[test]
    fn upstream_bad_request_keeps_only_the_message() {
        let err = upstream(ClientError::Status {
            status: StatusCode::BAD_REQUEST,
            body: json!({"code": "INVALID_INPUT", "message": "bad request: missing field"})
                .to_string(),
        });
        match err {
            ApiError::InvalidInput(message) => assert_eq!(message, "missing field"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn non_json_upstream_body_is_forwarded_as_is() {
        assert_eq!(upstream_message("plain text".into()), "plain text");
    }

    #[tokio::test]
    async fn unreachable_api_is_bad_gateway() {
        let (status, body) = get_json(router("http://127.0.0.1:1"), "/employees").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], json!("UPSTREAM"));
    }
}
