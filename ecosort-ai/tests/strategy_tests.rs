//! Remote Strategy Integration Tests
//!
//! Drives the Hugging Face and OpenAI strategies against local mock
//! servers to check request shape and every parse boundary.

mod helpers;

use axum::http::StatusCode;
use ecosort_ai::strategies::{HuggingFaceClassifier, OpenAiVisionClassifier};
use ecosort_ai::types::{ClassificationStrategy, ImageSource, StrategyError};
use ecosort_common::WasteCategory;
use helpers::*;

const OPENAI_PATH: &str = "/v1/chat/completions";

fn png_source() -> ImageSource {
    ImageSource::from_bytes(solid_png(2, 2, BLACK), Some("image/png".to_string()))
}

async fn huggingface_against(
    status: StatusCode,
    body: &str,
) -> (MockUpstream, HuggingFaceClassifier) {
    let upstream = MockUpstream::start(&hf_path(), status, body).await;
    let settings = settings_for(&upstream.base_url, "http://127.0.0.1:1/unused");
    let classifier = HuggingFaceClassifier::new("hf_test".to_string(), &settings).unwrap();
    (upstream, classifier)
}

async fn openai_against(status: StatusCode, body: &str) -> (MockUpstream, OpenAiVisionClassifier) {
    let upstream = MockUpstream::start(OPENAI_PATH, status, body).await;
    let settings = settings_for("http://127.0.0.1:1", &upstream.url(OPENAI_PATH));
    let classifier = OpenAiVisionClassifier::new("sk-test".to_string(), &settings).unwrap();
    (upstream, classifier)
}

// ============================================================================
// Hugging Face
// ============================================================================

#[tokio::test]
async fn huggingface_success_maps_top_label() {
    let (upstream, classifier) = huggingface_against(
        StatusCode::OK,
        r#"[{"label": "water bottle", "score": 0.91}, {"label": "banana", "score": 0.04}]"#,
    )
    .await;

    let source = png_source();
    let result = classifier.attempt_classify(&source).await.unwrap();
    assert_eq!(result.item_label, "Plastic Bottle");
    assert_eq!(result.category, WasteCategory::Recyclable);
    assert_eq!(result.confidence, 91);

    let requests = upstream.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer hf_test"));
    let ImageSource::Bytes { data, .. } = &source else {
        unreachable!()
    };
    assert_eq!(&requests[0].body, data, "raw image bytes are posted");
}

#[tokio::test]
async fn huggingface_low_score_is_floored() {
    let (_upstream, classifier) =
        huggingface_against(StatusCode::OK, r#"[{"label": "banana", "score": 0.50}]"#).await;

    let result = classifier.attempt_classify(&png_source()).await.unwrap();
    assert_eq!(result.item_label, "Plant Material");
    assert_eq!(result.confidence, 75);
}

#[tokio::test]
async fn huggingface_data_url_is_decoded_before_upload() {
    let (upstream, classifier) =
        huggingface_against(StatusCode::OK, r#"[{"label": "aa battery", "score": 0.8}]"#).await;

    let source = ImageSource::from_url("data:image/png;base64,AQID");
    let result = classifier.attempt_classify(&source).await.unwrap();
    assert_eq!(result.item_label, "Battery");
    assert_eq!(upstream.requests()[0].body, vec![1, 2, 3]);
}

#[tokio::test]
async fn huggingface_error_status_is_unavailable() {
    let (_upstream, classifier) = huggingface_against(
        StatusCode::SERVICE_UNAVAILABLE,
        r#"{"error": "Model is currently loading"}"#,
    )
    .await;

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::Api(_)), "got {:?}", err);
}

#[tokio::test]
async fn huggingface_empty_list_is_unavailable() {
    let (_upstream, classifier) = huggingface_against(StatusCode::OK, "[]").await;

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::EmptyResponse(_)));
}

#[tokio::test]
async fn huggingface_malformed_body_is_unavailable() {
    let (_upstream, classifier) =
        huggingface_against(StatusCode::OK, r#"{"labels": ["bottle"]}"#).await;

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::Parse(_)));
}

#[tokio::test]
async fn huggingface_connection_refused_is_network_error() {
    let base = closed_port_url().await;
    let settings = settings_for(&base, "http://127.0.0.1:1/unused");
    let classifier = HuggingFaceClassifier::new("hf_test".to_string(), &settings).unwrap();

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::Network(_)));
}

// ============================================================================
// OpenAI
// ============================================================================

#[tokio::test]
async fn openai_success_uses_category_guidance() {
    let (upstream, classifier) = openai_against(
        StatusCode::OK,
        &chat_completion(r#"{"type": "hazardous", "item": "AA Battery", "confidence": 92}"#),
    )
    .await;

    let result = classifier.attempt_classify(&png_source()).await.unwrap();
    assert_eq!(result.category, WasteCategory::Hazardous);
    assert_eq!(result.item_label, "AA Battery");
    assert_eq!(result.confidence, 92);
    assert_eq!(result.instructions.len(), 4);
    assert_eq!(
        result.impact_statement,
        "Proper disposal prevents environmental contamination!",
    );

    let request = &upstream.requests()[0];
    assert_eq!(request.authorization.as_deref(), Some("Bearer sk-test"));
    let body = request.json();
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["max_tokens"], 150);
    let content = &body["messages"][0]["content"];
    assert_eq!(content[0]["type"], "text");
    assert!(content[1]["image_url"]["url"]
        .as_str()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[tokio::test]
async fn openai_fenced_json_is_accepted() {
    let (_upstream, classifier) = openai_against(
        StatusCode::OK,
        &chat_completion(
            "```json\n{\"type\": \"biodegradable\", \"item\": \"Banana Peel\", \"confidence\": 88}\n```",
        ),
    )
    .await;

    let result = classifier.attempt_classify(&png_source()).await.unwrap();
    assert_eq!(result.category, WasteCategory::Biodegradable);
    assert_eq!(result.item_label, "Banana Peel");
}

#[tokio::test]
async fn openai_remote_url_is_passed_through() {
    let (upstream, classifier) = openai_against(
        StatusCode::OK,
        &chat_completion(r#"{"type": "recyclable", "item": "Glass Jar", "confidence": 80}"#),
    )
    .await;

    classifier
        .attempt_classify(&ImageSource::from_url("https://example.com/jar.jpg"))
        .await
        .unwrap();

    let body = upstream.requests()[0].json();
    assert_eq!(
        body["messages"][0]["content"][1]["image_url"]["url"],
        "https://example.com/jar.jpg"
    );
}

#[tokio::test]
async fn openai_unknown_type_is_unavailable() {
    let (_upstream, classifier) = openai_against(
        StatusCode::OK,
        &chat_completion(r#"{"type": "compost", "item": "Peel", "confidence": 90}"#),
    )
    .await;

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::Parse(_)));
}

#[tokio::test]
async fn openai_prose_reply_is_unavailable() {
    let reply = chat_completion("This looks like a bottle.");
    let (_upstream, classifier) = openai_against(StatusCode::OK, &reply).await;

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::Parse(_)));
}

#[tokio::test]
async fn openai_no_choices_is_unavailable() {
    let (_upstream, classifier) = openai_against(StatusCode::OK, r#"{"choices": []}"#).await;

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::EmptyResponse(_)));
}

#[tokio::test]
async fn openai_error_status_is_unavailable() {
    let (_upstream, classifier) = openai_against(
        StatusCode::UNAUTHORIZED,
        r#"{"error": {"message": "Incorrect API key provided"}}"#,
    )
    .await;

    let err = classifier.attempt_classify(&png_source()).await.unwrap_err();
    assert!(matches!(err, StrategyError::Api(_)));
}
