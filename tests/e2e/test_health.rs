use crate::helpers::{self, TestClient};
use hyper::StatusCode;

#[tokio::test]
async fn test_health_returns_ok() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/health").await.unwrap();
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_health_ready_reports_counts() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/health/ready").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["audio_files"], 2);
    assert!(body["voices"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_health_ready_unavailable_without_audio() {
    let base_url = helpers::spawn_app_without_audio().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/health/ready").await.unwrap();
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body.as_ref().unwrap()["status"], "not_ready");
}
