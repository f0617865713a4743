use crate::helpers::{self, TestClient};
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use voicebox_backend::controllers::audio::AudioUrlResponse;

#[tokio::test]
async fn test_lookup_returns_url_for_known_language() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/api/audio?language=english").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body: AudioUrlResponse = response.json().unwrap();
    assert_eq!(body.url, "https://example.com/english-audio.mp3");

    let response = client.get("/api/audio?language=arabic").await.unwrap();
    response.assert_status(StatusCode::OK);
    let body: AudioUrlResponse = response.json().unwrap();
    assert_eq!(body.url, "https://example.com/arabic-audio.mp3");
}

#[tokio::test]
async fn test_lookup_is_case_insensitive() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/api/audio?language=English").await.unwrap();
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn test_lookup_rejects_missing_language() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/api/audio").await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid or missing language parameter");
}

#[tokio::test]
async fn test_lookup_rejects_unknown_language() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/api/audio?language=klingon").await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid or missing language parameter");
}

#[tokio::test]
async fn test_list_returns_every_entry() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/api/audio/all").await.unwrap();
    response.assert_status(StatusCode::OK);

    let entries = response.body.as_ref().unwrap().as_array().unwrap().clone();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["language"], "english");
    assert!(entries[0]["url"].as_str().unwrap().ends_with("english-audio.mp3"));
    assert!(entries[0].get("created_at").is_some());
}

#[tokio::test]
async fn test_voices_listing() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/api/voices").await.unwrap();
    response.assert_status(StatusCode::OK);

    let voices = response.body.as_ref().unwrap().as_array().unwrap().clone();
    assert!(!voices.is_empty());
    assert!(voices[0].get("identifier").is_some());
    assert!(voices[0].get("language_tag").is_some());
    assert!(voices[0].get("is_default").is_some());
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let base_url = helpers::spawn_app().await;
    let client = TestClient::new(&base_url);

    let response = client.get("/api/audio?language=english").await.unwrap();
    response.assert_header_exists("x-request-id");
}
