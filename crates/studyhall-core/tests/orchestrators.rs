//! End-to-end orchestrator scenarios over an in-memory store and a mock
//! completion backend.

use std::io::Write;
use std::sync::Arc;

use serde_json::json;
use studyhall_core::{
    DocumentSource, Error, ExtractError, MockBackend, MockReply, Normalizer, Store, StoreError,
    UserContext, chat, notes, planner, quizzes,
};

fn ctx(user: &str) -> UserContext {
    UserContext::new(user).unwrap()
}

fn normalizer_with(backend: Arc<MockBackend>) -> Normalizer {
    Normalizer::new(backend, "test-model")
}

fn five_questions() -> serde_json::Value {
    json!({
        "questions": (0..5).map(|i| json!({
            "question": format!("Question {i}?"),
            "options": ["a", "b", "c", "d"],
            "correct_answer": 1,
            "explanation": "because"
        })).collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn quiz_generation_and_grading_scenario() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(MockReply::Structured(five_questions())));
    let normalizer = normalizer_with(backend);
    let alice = ctx("alice");

    let quiz = quizzes::generate_quiz(&alice, &store, &normalizer, "Photosynthesis", Some(5))
        .await
        .unwrap();
    assert_eq!(quiz.total_questions, 5);
    assert!(!quiz.completed);

    // Correct answer is always index 1; answer three right, two wrong.
    let answers = [1, 1, 1, 0, 0];
    let done = quizzes::complete_quiz(&alice, &store, &quiz.id, &answers).unwrap();
    assert_eq!(done.score, Some(3));
    assert_eq!(done.total_questions, 5);
    assert!(done.completed);
}

#[tokio::test]
async fn unsupported_upload_never_reaches_the_network() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(MockReply::Text("unused".into())));
    let normalizer = normalizer_with(backend.clone());
    let alice = ctx("alice");

    let source = DocumentSource::Upload {
        filename: "notes.txt".into(),
        data: b"a plain text file".to_vec(),
    };
    let err = notes::create_note(&alice, &store, &normalizer, "My notes", source)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Extract(ExtractError::UnsupportedFormat(_))
    ));
    assert_eq!(backend.call_count(), 0, "no completion call should happen");
    assert!(notes::list_notes(&alice, &store).unwrap().is_empty());
}

#[tokio::test]
async fn note_round_trip_keeps_title_and_derived_fields() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(MockReply::Structured(json!({
        "summary": "Light becomes sugar.",
        "keywords": ["chloroplast"],
        "mindmap": "- photosynthesis"
    }))));
    let normalizer = normalizer_with(backend);
    let alice = ctx("alice");

    let created = notes::create_note(
        &alice,
        &store,
        &normalizer,
        "Photosynthesis",
        DocumentSource::Text("Plants absorb light...".into()),
    )
    .await
    .unwrap();

    let read = notes::get_note(&alice, &store, &created.id).unwrap();
    assert_eq!(read.title, "Photosynthesis");
    assert!(!read.summary.is_empty());
    assert!(!read.keywords.is_empty());
}

#[tokio::test]
async fn docx_upload_flows_through_extraction() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(MockReply::Structured(json!({
        "summary": "s", "keywords": ["k"], "mindmap": ""
    }))));
    let normalizer = normalizer_with(backend.clone());
    let alice = ctx("alice");

    let xml = r#"<?xml version="1.0"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body><w:p><w:r><w:t>Enzymes lower activation energy.</w:t></w:r></w:p></w:body>
</w:document>"#;
    let mut data = Vec::new();
    {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(&mut data));
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    let note = notes::create_note(
        &alice,
        &store,
        &normalizer,
        "Enzymes",
        DocumentSource::Upload {
            filename: "enzymes.docx".into(),
            data,
        },
    )
    .await
    .unwrap();

    assert!(note.content.contains("activation energy"));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn deleting_is_isolated_per_owner() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(MockReply::Structured(json!({
        "summary": "s", "keywords": [], "mindmap": ""
    }))));
    let normalizer = normalizer_with(backend);
    let alice = ctx("alice");
    let bob = ctx("bob");

    let a = notes::create_note(
        &alice,
        &store,
        &normalizer,
        "alice note",
        DocumentSource::Text("x".into()),
    )
    .await
    .unwrap();
    let b = notes::create_note(
        &bob,
        &store,
        &normalizer,
        "bob note",
        DocumentSource::Text("x".into()),
    )
    .await
    .unwrap();

    notes::delete_note(&alice, &store, &a.id).unwrap();
    assert!(notes::list_notes(&alice, &store).unwrap().is_empty());

    // Bob's artifact is untouched, and Alice can't delete it.
    assert_eq!(notes::list_notes(&bob, &store).unwrap().len(), 1);
    assert!(matches!(
        notes::delete_note(&alice, &store, &b.id),
        Err(Error::Store(StoreError::NotFound(_)))
    ));
}

#[tokio::test]
async fn plan_generation_persists_ordered_tasks() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(MockReply::Structured(json!({
        "tasks": [
            {"title": "Skim syllabus", "detail": ""},
            {"title": "Read chapter 1", "detail": "take notes"},
            {"title": "Practice problems", "detail": ""}
        ]
    }))));
    let normalizer = normalizer_with(backend);
    let alice = ctx("alice");

    let result = planner::generate_plan(&alice, &store, &normalizer, "Pass biology", None)
        .await
        .unwrap();
    assert_eq!(result.tasks.len(), 3);
    assert_eq!(result.tasks[0].title, "Skim syllabus");

    let toggled = planner::set_task_completed(&alice, &store, &result.tasks[1].id, true).unwrap();
    assert!(toggled.completed);
}

#[tokio::test]
async fn chat_session_accumulates_turns() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::with_sequence(vec![
        MockReply::Text("Osmosis is diffusion of water.".into()),
        MockReply::Text("Across a semi-permeable membrane.".into()),
    ]));
    let normalizer = normalizer_with(backend);
    let alice = ctx("alice");

    let session = chat::send_message(&alice, &store, &normalizer, None, "What is osmosis?")
        .await
        .unwrap();
    assert_eq!(session.title, "What is osmosis?");
    assert_eq!(session.messages.as_array().unwrap().len(), 2);

    let session = chat::send_message(
        &alice,
        &store,
        &normalizer,
        Some(&session.id),
        "Through what?",
    )
    .await
    .unwrap();
    let turns = session.messages.as_array().unwrap();
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[3]["content"], "Across a semi-permeable membrane.");
}

#[tokio::test]
async fn upstream_failure_persists_nothing() {
    let store = Store::in_memory().unwrap();
    let backend = Arc::new(MockBackend::new(MockReply::Upstream {
        status: 500,
        message: "boom".into(),
    }));
    let normalizer = normalizer_with(backend);
    let alice = ctx("alice");

    let err = quizzes::generate_quiz(&alice, &store, &normalizer, "Topic", None)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Ai(_)));
    assert!(quizzes::list_quizzes(&alice, &store).unwrap().is_empty());
}
