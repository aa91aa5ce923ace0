use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dubline_client::{API_KEY_HEADER, ClientError, SpeechClient};
use dubline_core::domain::job::{JobStatus, StatusReport};
use dubline_core::dto::speech::{SpeechToSpeechOptions, TextToSpeechRequest};
use dubline_core::dto::voice::CreatePreviewsRequest;
use mockito::Matcher;
use serde_json::json;

const API_KEY: &str = "test_key";

fn client_for(server: &mockito::ServerGuard) -> SpeechClient {
    SpeechClient::new(server.url(), API_KEY)
}

fn form_field(name: &str, value: &str) -> Matcher {
    Matcher::Regex(format!("name=\"{}\"\r\n\r\n{}\r\n", name, value))
}

#[tokio::test]
async fn test_submit_dubbing_sends_multipart_form() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/dubbing")
        .match_header(API_KEY_HEADER, API_KEY)
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="nicole.mp3""#.to_string()),
            Matcher::Regex("Content-Type: audio/mpeg".to_string()),
            form_field("target_lang", "es"),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"dubbing_id": "dub-123", "expected_duration_sec": 12.5}).to_string())
        .create_async()
        .await;

    let response = client_for(&server)
        .submit_dubbing(b"ID3 audio".to_vec(), "nicole.mp3", "es")
        .await
        .unwrap();

    assert_eq!(response.dubbing_id, "dub-123");
    assert_eq!(response.expected_duration_sec, Some(12.5));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_dubbing_reports_dubbed_as_complete() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/dubbing/dub-123")
        .match_header(API_KEY_HEADER, API_KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "dubbing_id": "dub-123",
                "name": "nicole",
                "status": "dubbed",
                "target_languages": ["es"],
                "error": null
            })
            .to_string(),
        )
        .create_async()
        .await;

    let metadata = client_for(&server).get_dubbing("dub-123").await.unwrap();
    assert_eq!(metadata.target_languages, vec!["es".to_string()]);

    let report = StatusReport::from(metadata);
    assert_eq!(report.status, JobStatus::Complete);
    assert_eq!(report.reason, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_dubbed_audio_returns_bytes() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/dubbing/dub-123/audio/es")
        .match_header(API_KEY_HEADER, API_KEY)
        .with_status(200)
        .with_header("content-type", "audio/mpeg")
        .with_body(b"dubbed audio".as_slice())
        .create_async()
        .await;

    let audio = client_for(&server)
        .get_dubbed_audio("dub-123", "es")
        .await
        .unwrap();

    assert_eq!(audio, b"dubbed audio");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_to_speech_sends_json_and_output_format() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/text-to-speech/voice-1")
        .match_header(API_KEY_HEADER, API_KEY)
        .match_query(Matcher::UrlEncoded(
            "output_format".to_string(),
            "mp3_44100_128".to_string(),
        ))
        .match_body(Matcher::PartialJson(json!({
            "text": "Hello there",
            "model_id": "eleven_multilingual_v2"
        })))
        .with_status(200)
        .with_body(b"speech".as_slice())
        .create_async()
        .await;

    let audio = client_for(&server)
        .text_to_speech("voice-1", TextToSpeechRequest::new("Hello there"))
        .await
        .unwrap();

    assert_eq!(audio, b"speech");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_speech_to_speech_sends_audio_and_model() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/speech-to-speech/voice-1")
        .match_header(API_KEY_HEADER, API_KEY)
        .match_query(Matcher::UrlEncoded(
            "output_format".to_string(),
            "mp3_44100_128".to_string(),
        ))
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="audio"; filename="clip.wav""#.to_string()),
            form_field("model_id", "eleven_multilingual_sts_v2"),
        ]))
        .with_status(200)
        .with_body(b"converted".as_slice())
        .create_async()
        .await;

    let audio = client_for(&server)
        .speech_to_speech(
            "voice-1",
            b"RIFF".to_vec(),
            "clip.wav",
            SpeechToSpeechOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(audio, b"converted");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_isolate_audio_uploads_audio_field() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1/audio-isolation")
        .match_header(API_KEY_HEADER, API_KEY)
        .match_body(Matcher::Regex(
            r#"name="audio"; filename="fin.mp3""#.to_string(),
        ))
        .with_status(200)
        .with_body(b"isolated".as_slice())
        .create_async()
        .await;

    let audio = client_for(&server)
        .isolate_audio(b"ID3".to_vec(), "fin.mp3")
        .await
        .unwrap();

    assert_eq!(audio, b"isolated");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_find_voice_by_name() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/v1/voices")
        .match_header(API_KEY_HEADER, API_KEY)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "voices": [
                    {"voice_id": "21m00Tcm4TlvDq8ikWAM", "name": "Rachel", "category": "premade"},
                    {"voice_id": "JBFqnCBsd6RMkjVDRZzb", "name": "George"}
                ]
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);

    let george = client.find_voice("george").await.unwrap().unwrap();
    assert_eq!(george.voice_id, "JBFqnCBsd6RMkjVDRZzb");

    assert!(client.find_voice("Nobody").await.unwrap().is_none());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_voice_previews_decodes_audio() {
    let mut server = mockito::Server::new_async().await;
    let text = "a".repeat(100);

    let mock = server
        .mock("POST", "/v1/text-to-voice/create-previews")
        .match_header(API_KEY_HEADER, API_KEY)
        .match_body(Matcher::PartialJson(json!({
            "voice_description": "A sassy squeaky mouse"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "previews": [{
                    "audio_base_64": STANDARD.encode(b"preview audio"),
                    "generated_voice_id": "gen-1",
                    "media_type": "audio/mpeg",
                    "duration_secs": 6.2
                }],
                "text": text
            })
            .to_string(),
        )
        .create_async()
        .await;

    let previews = client_for(&server)
        .create_voice_previews(CreatePreviewsRequest {
            voice_description: "A sassy squeaky mouse".to_string(),
            text,
        })
        .await
        .unwrap();

    assert_eq!(previews.len(), 1);
    assert_eq!(previews[0].audio, b"preview audio");
    assert_eq!(previews[0].generated_voice_id, "gen-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unavailable_service_is_transient() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/v1/dubbing/dub-123")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let err = client_for(&server).get_dubbing("dub-123").await.unwrap_err();

    assert!(matches!(err, ClientError::ApiError { status: 503, .. }));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unknown_dubbing_is_not_transient() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/v1/dubbing/missing")
        .with_status(404)
        .with_body("dubbing not found")
        .create_async()
        .await;

    let err = client_for(&server).get_dubbing("missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert!(!err.is_transient());
}
