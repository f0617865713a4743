// Full-stack playback scenarios: a PlaybackController driving the real
// LookupAudioSource against an in-process instance of the audio lookup API.

use crate::helpers;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use voicebox_backend::domain::playback::{PlaybackController, PlaybackState, Utterance};
use voicebox_backend::domain::voice::Language;
use voicebox_backend::infrastructure::sources::LookupAudioSource;

#[tokio::test]
async fn test_play_through_lookup_endpoint() {
    let base_url = helpers::spawn_app().await;
    let source = Arc::new(
        LookupAudioSource::new(base_url).with_playback_duration(Duration::from_millis(50)),
    );
    let controller = PlaybackController::new(source);
    let mut states = controller.state_watch();

    let utterance = Utterance::new("Hello world", Language::English, "en-joanna").unwrap();
    controller.request_play(utterance).unwrap();
    assert_eq!(controller.state(), PlaybackState::Generating);

    states
        .wait_for(|s| *s == PlaybackState::Playing)
        .await
        .unwrap();

    // the clip runs to its natural end
    states
        .wait_for(|s| *s == PlaybackState::Idle)
        .await
        .unwrap();

    let artifact = controller.request_download().unwrap();
    assert_eq!(artifact.url, "https://example.com/english-audio.mp3");
    assert_eq!(artifact.suggested_filename, "audio-english.mp3");
}

#[tokio::test]
async fn test_lookup_rejection_surfaces_the_server_message() {
    // an empty lookup table rejects every language the way an unsupported
    // one is rejected
    let base_url = helpers::spawn_app_without_audio().await;
    let source = Arc::new(LookupAudioSource::new(base_url));
    let controller = PlaybackController::new(source);
    let mut states = controller.state_watch();

    let utterance = Utterance::new("Hello world", Language::English, "en-joanna").unwrap();
    controller.request_play(utterance).unwrap();

    let state = states
        .wait_for(|s| matches!(s, PlaybackState::Error(_)))
        .await
        .unwrap()
        .clone();
    assert_eq!(
        state,
        PlaybackState::Error("Invalid or missing language parameter".to_string())
    );

    controller.dismiss_error();
    assert_eq!(controller.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn test_unreachable_endpoint_surfaces_error() {
    // nothing listens here
    let source = Arc::new(LookupAudioSource::new("http://127.0.0.1:1"));
    let controller = PlaybackController::new(source);
    let mut states = controller.state_watch();

    let utterance = Utterance::new("Hello world", Language::English, "en-joanna").unwrap();
    controller.request_play(utterance).unwrap();

    let state = states
        .wait_for(|s| matches!(s, PlaybackState::Error(_)))
        .await
        .unwrap()
        .clone();
    assert!(matches!(state, PlaybackState::Error(_)));
    assert_eq!(controller.state(), state);
}

#[tokio::test]
async fn test_toggle_stops_a_long_clip() {
    let base_url = helpers::spawn_app().await;
    let source = Arc::new(
        LookupAudioSource::new(base_url).with_playback_duration(Duration::from_secs(30)),
    );
    let controller = PlaybackController::new(source);
    let mut states = controller.state_watch();

    let utterance = Utterance::new("Hello world", Language::English, "en-joanna").unwrap();
    controller.request_play(utterance.clone()).unwrap();
    states
        .wait_for(|s| *s == PlaybackState::Playing)
        .await
        .unwrap();

    // pressing play on the sounding utterance stops it
    controller.request_play(utterance).unwrap();
    assert_eq!(controller.state(), PlaybackState::Idle);

    // stop stays a no-op afterwards
    controller.request_stop();
    assert_eq!(controller.state(), PlaybackState::Idle);
}
