//! Readiness probe behavior against a live local server

use std::time::Duration;

use axum::routing::get;
use axum::Router;

use carmarket_e2e::server::wait_for_app;
use carmarket_e2e::VerifyError;

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn probe_succeeds_against_responding_app() {
    let base_url = spawn(Router::new().route("/", get(|| async { "ok" }))).await;
    wait_for_app(&base_url, Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn probe_accepts_any_http_status() {
    // No routes at all: every request 404s, which still proves the
    // server is listening.
    let base_url = spawn(Router::new()).await;
    wait_for_app(&base_url, Duration::from_secs(5)).await.unwrap();
}

#[tokio::test]
async fn probe_reports_attempts_when_nothing_listens() {
    let err = wait_for_app("http://127.0.0.1:9", Duration::from_millis(600))
        .await
        .unwrap_err();
    match err {
        VerifyError::AppUnreachable { attempts, .. } => assert!(attempts >= 1),
        other => panic!("unexpected error: {}", other),
    }
}
