//! Health endpoint and router behavior.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use code_fixer_agent::config::AppConfig;
use code_fixer_agent::http::HttpServer;
use code_fixer_agent::{Logger, Shutdown};

mod common;

fn server_for(url: &str) -> HttpServer {
    let config = AppConfig {
        sonarqube_url: url.to_string(),
        ..AppConfig::default()
    };
    HttpServer::new(config, Logger)
}

async fn body_json(body: Body) -> Value {
    let bytes = to_bytes(body, 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_fixed_fields() {
    let server = server_for("http://sonar.internal:9000");

    let response = server
        .router()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response.into_body()).await,
        json!({
            "status": "OK",
            "service": "Code Fixer Agent",
            "sonarqube_url": "http://sonar.internal:9000",
        })
    );
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let server = server_for("http://localhost:9000");

    let response = server
        .router()
        .oneshot(Request::get("/api/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response.into_body()).await, json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let server = server_for("http://localhost:9000");

    let response = server
        .router()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/health")
                .header(header::ORIGIN, "https://dashboard.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://dashboard.example.com"
    );
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_health_served_until_shutdown() {
    // SonarQube is unreachable here; once started, the endpoint does not care.
    let sonarqube = common::refused_address().await;
    let server = server_for(&format!("http://{}", sonarqube));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = common::direct_client();
    for _ in 0..3 {
        let res = client
            .get(format!("http://{}/api/health", addr))
            .send()
            .await
            .expect("agent unreachable");
        assert_eq!(res.status(), 200);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["status"], "OK");
    }

    drop(client);
    shutdown.trigger();
    let result = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
        .await
        .expect("server did not stop");
    assert!(result.unwrap().is_ok());
}
