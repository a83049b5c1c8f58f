use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use employee_api::{AppConfig, AppState};
use http_body_util::BodyExt;
use platform_db::DatabaseSettings;
use serde_json::{Value, json};
use suite_tests::migrated_pool;
use tokio::net::TcpListener;
use tower::ServiceExt;
use webapp::{CustomProperties, http};

async fn webapp_over_live_api() -> Result<Router> {
    let pool = migrated_pool().await?;
    let config = Arc::new(AppConfig {
        database: DatabaseSettings::new("sqlite::memory:"),
        cors_allowed_origins: Vec::new(),
    });
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(employee_api::http::serve_on(
        listener,
        AppState::new(pool, config),
    ));
    let properties = Arc::new(CustomProperties::new(format!("http://{addr}")));
    Ok(http::build_router(http::AppState::new(properties)))
}

async fn send(router: &Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}

fn with_json(method: &str, uri: &str, body: Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))?)
}

fn bare(method: &str, uri: &str) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())?)
}

#[tokio::test]
async fn forwards_the_employee_lifecycle() -> Result<()> {
    let router = webapp_over_live_api().await?;

    let (status, created) = send(
        &router,
        with_json(
            "POST",
            "/employees",
            json!({"firstName": "Jane", "lastName": "Doe", "mail": "jane@x.com", "password": "p"}),
        )?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
    let member = format!("/employees/{}", created["id"]);

    let (status, shown) = send(&router, bare("GET", &member)?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shown, created);

    let (status, listed) = send(&router, bare("GET", "/employees")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(listed.as_array().is_some_and(|all| all.contains(&created)));

    let (status, updated) = send(
        &router,
        with_json("PUT", &member, json!({"firstName": "Janet", "mail": "janet@x.com"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["firstName"], json!("Janet"));

    let (status, _) = send(&router, bare("DELETE", &member)?).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, bare("GET", &member)?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));
    Ok(())
}

#[tokio::test]
async fn missing_employees_pass_through_as_404() -> Result<()> {
    let router = webapp_over_live_api().await?;

    let (status, _) = send(&router, bare("DELETE", "/employees/4242")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &router,
        with_json("PUT", "/employees/4242", json!({"firstName": "Nobody"}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));
    Ok(())
}
