//! Router-level tests over an in-memory store and a mock completion backend.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use studyhall_core::{MockBackend, MockReply, Normalizer, Store};
use studyhall_web::{AppState, app};
use tower::ServiceExt;

fn test_app(reply: MockReply) -> Router {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(reply));
    let normalizer = Normalizer::new(backend, "test-model");
    app(Arc::new(AppState::new(store, normalizer)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed(method: &str, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("x-user-id", "alice")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap()
}

#[tokio::test]
async fn health_needs_no_identity() {
    let app = test_app(MockReply::Text("unused".into()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_identity_is_unauthorized() {
    let app = test_app(MockReply::Text("unused".into()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/notes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn quiz_generation_round_trip() {
    let app = test_app(MockReply::Structured(json!({
        "questions": [{
            "question": "What do plants absorb?",
            "options": ["Light", "Sound", "Heat", "Wind"],
            "correct_answer": 0,
            "explanation": "Chlorophyll absorbs light."
        }]
    })));

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/quizzes",
            Body::from(json!({ "topic": "Photosynthesis", "count": 1 }).to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let quiz = body_json(response).await;
    assert_eq!(quiz["topic"], "Photosynthesis");
    assert_eq!(quiz["total_questions"], 1);
    let id = quiz["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            &format!("/api/quizzes/{id}/complete"),
            Body::from(json!({ "answers": [0] }).to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let graded = body_json(response).await;
    assert_eq!(graded["score"], 1);
    assert_eq!(graded["completed"], true);

    let response = app
        .oneshot(authed("GET", "/api/quizzes", Body::empty()))
        .await
        .unwrap();
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn artifacts_are_invisible_across_owners() {
    let app = test_app(MockReply::Structured(json!({
        "questions": []
    })));

    let response = app
        .clone()
        .oneshot(authed(
            "POST",
            "/api/quizzes",
            Body::from(json!({ "topic": "Cells" }).to_string()),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/quizzes/{id}"))
                .header("x-user-id", "bob")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_resource_is_not_found() {
    let app = test_app(MockReply::Text("unused".into()));
    let response = app
        .oneshot(authed("GET", "/api/notes/nope", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn unsupported_upload_is_rejected_with_415() {
    let app = test_app(MockReply::Text("unused".into()));

    let boundary = "X-TEST-BOUNDARY";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"title\"\r\n\r\n\
         My notes\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"notes.txt\"\r\n\
         Content-Type: text/plain\r\n\r\n\
         just some plain text\r\n\
         --{boundary}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/notes")
                .header("x-user-id", "alice")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn pasted_text_creates_a_note() {
    let app = test_app(MockReply::Structured(json!({
        "summary": "Light becomes sugar.",
        "keywords": ["chloroplast"],
        "mindmap": "- photosynthesis"
    })));

    let boundary = "X-TEST-BOUNDARY";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"title\"\r\n\r\n\
         Photosynthesis\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"text\"\r\n\r\n\
         Plants absorb light and turn it into sugar.\r\n\
         --{boundary}--\r\n"
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/notes")
                .header("x-user-id", "alice")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let note = body_json(response).await;
    assert_eq!(note["title"], "Photosynthesis");
    assert_eq!(note["summary"], "Light becomes sugar.");
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let app = test_app(MockReply::Upstream {
        status: 500,
        message: "boom".into(),
    });
    let response = app
        .oneshot(authed(
            "POST",
            "/api/quizzes",
            Body::from(json!({ "topic": "Anything" }).to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
