use playback::{
    MemoryOutput, OutputEvent, PlaybackError, PlaybackSlot, SpeechClient, Speaker, MPEG,
};
use std::sync::Arc;

use mock_speech_server::spawn_mock_speech;

fn speaker(url: &str) -> Speaker<MemoryOutput> {
    let slot = Arc::new(PlaybackSlot::new(MemoryOutput::new()));
    Speaker::new(SpeechClient::new(url), slot)
}

#[tokio::test]
async fn posts_rachel_and_plays_response() {
    let (url, bodies, shutdown) = spawn_mock_speech().await;
    let speaker = speaker(&url);

    let loaded = speaker.speak("Hello").await.unwrap();

    let body = bodies.lock().unwrap()[0].clone();
    assert_eq!(body, serde_json::json!({ "voice": "Rachel", "message": "Hello" }));
    let out = speaker.slot().lock();
    let playing = out.now_playing().unwrap();
    assert_eq!(&playing.bytes[..], b"audio:Hello");
    assert_eq!(playing.mime, MPEG);
    assert_eq!(playing.object_url(), loaded);
    drop(out);
    assert_eq!(speaker.slot().current(), Some(loaded));
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn second_speak_replaces_first() {
    let (url, _bodies, shutdown) = spawn_mock_speech().await;
    let speaker = speaker(&url);

    let first = speaker.speak("one").await.unwrap();
    let second = speaker.speak("two").await.unwrap();

    let out = speaker.slot().lock();
    assert_eq!(&out.now_playing().unwrap().bytes[..], b"audio:two");
    assert_eq!(
        out.events(),
        &[
            OutputEvent::Loaded(first.clone()),
            OutputEvent::Played(first),
            OutputEvent::Loaded(second.clone()),
            OutputEvent::Played(second),
        ]
    );
    drop(out);
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn late_response_overwrites_earlier_playback() {
    let (url, bodies, shutdown) = spawn_mock_speech().await;
    let speaker = speaker(&url);

    let (slow, fast) = tokio::join!(speaker.speak("slow"), speaker.speak("fast"));
    let slow = slow.unwrap();
    let fast = fast.unwrap();

    assert_eq!(bodies.lock().unwrap().len(), 2);
    let out = speaker.slot().lock();
    let playing = out.now_playing().unwrap();
    assert_eq!(&playing.bytes[..], b"audio:slow");
    assert_eq!(out.events().last(), Some(&OutputEvent::Played(slow)));
    assert!(out.events().contains(&OutputEvent::Loaded(fast)));
    drop(out);
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn failed_request_leaves_output_untouched() {
    let (url, _bodies, shutdown) = spawn_mock_speech().await;
    let speaker = speaker(&url);

    let err = speaker.speak("fail").await.unwrap_err();

    match err {
        PlaybackError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "audio:fail");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(speaker.slot().lock().events().is_empty());
    let _ = shutdown.send(()).await;
}

#[tokio::test]
async fn custom_voice_is_sent() {
    let (url, bodies, shutdown) = spawn_mock_speech().await;
    let speaker = speaker(&url).with_voice("Adam");

    speaker.speak("hey").await.unwrap();

    assert_eq!(bodies.lock().unwrap()[0]["voice"], "Adam");
    let _ = shutdown.send(()).await;
}
