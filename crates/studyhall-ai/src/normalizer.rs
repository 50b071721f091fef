//! Typed normalization of completion-service output.
//!
//! Each study task declares a response schema; whatever comes back is mapped
//! into a typed result at this boundary. A structured response with a missing
//! or mistyped field degrades to that field's placeholder value only; other
//! fields keep what the service produced. Free text in place of a structured
//! response degrades to a whole-result placeholder. Neither case is an error:
//! callers treat absent fields as "not generated".

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::AiError;
use crate::backend::{ChatMessage, CompletionBackend, CompletionOutcome, CompletionRequest, ToolSchema};

/// AI-derived fields for a note.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NoteInsights {
    pub summary: String,
    pub keywords: Vec<String>,
    pub mindmap: String,
}

/// One generated quiz question. `correct_answer` indexes into `options`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
}

/// AI-derived analysis of a past exam paper.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaperAnalysis {
    pub topics: Vec<String>,
    pub predictions: Vec<String>,
    pub analysis: String,
}

/// One task in a generated study plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlannedTask {
    pub title: String,
    pub detail: String,
}

/// Client-side normalizer: one completion request per call, validated into
/// a typed result for the invoking feature.
#[derive(Clone)]
pub struct Normalizer {
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl Normalizer {
    pub fn new(backend: Arc<dyn CompletionBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    async fn request(
        &self,
        messages: Vec<ChatMessage>,
        tool: Option<ToolSchema>,
    ) -> Result<CompletionOutcome, AiError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            tool,
        };
        self.backend.complete(&request).await
    }

    /// Summarize study text into summary, keywords, and a mindmap outline.
    pub async fn process_note(&self, title: &str, text: &str) -> Result<NoteInsights, AiError> {
        let messages = vec![
            ChatMessage::system(
                "You are a study assistant. Summarize the student's material faithfully \
                 and extract the key terms. The mindmap is a markdown outline of the \
                 material's structure.",
            ),
            ChatMessage::user(format!("Title: {title}\n\n{text}")),
        ];
        let tool = ToolSchema {
            name: "record_note_insights".into(),
            description: "Record the summary, keywords, and mindmap for a study note".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "summary": { "type": "string" },
                    "keywords": { "type": "array", "items": { "type": "string" } },
                    "mindmap": { "type": "string" }
                },
                "required": ["summary", "keywords"]
            }),
        };

        match self.request(messages, Some(tool)).await? {
            CompletionOutcome::Structured(v) => Ok(NoteInsights {
                summary: str_field(&v, "summary"),
                keywords: str_list(&v, "keywords"),
                mindmap: str_field(&v, "mindmap"),
            }),
            CompletionOutcome::Text(_) => {
                warn!(task = "note", "service ignored the response schema; using placeholders");
                Ok(NoteInsights::default())
            }
        }
    }

    /// Generate multiple-choice quiz questions for a topic.
    pub async fn generate_quiz(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<Vec<QuizQuestion>, AiError> {
        let messages = vec![
            ChatMessage::system(
                "You are a study assistant writing multiple-choice quizzes. Each question \
                 has exactly four options and one correct answer.",
            ),
            ChatMessage::user(format!("Write {count} questions on the topic: {topic}")),
        ];
        let tool = ToolSchema {
            name: "record_quiz_questions".into(),
            description: "Record the generated quiz questions".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "questions": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "question": { "type": "string" },
                                "options": { "type": "array", "items": { "type": "string" } },
                                "correct_answer": { "type": "integer" },
                                "explanation": { "type": "string" }
                            },
                            "required": ["question", "options", "correct_answer"]
                        }
                    }
                },
                "required": ["questions"]
            }),
        };

        match self.request(messages, Some(tool)).await? {
            CompletionOutcome::Structured(v) => Ok(parse_questions(&v)),
            CompletionOutcome::Text(_) => {
                warn!(task = "quiz", "service ignored the response schema; no questions generated");
                Ok(Vec::new())
            }
        }
    }

    /// Analyze a past exam paper: recurring topics, likely future questions,
    /// and a free-text analysis.
    pub async fn analyze_paper(&self, title: &str, text: &str) -> Result<PaperAnalysis, AiError> {
        let messages = vec![
            ChatMessage::system(
                "You are a study assistant analyzing past exam papers. Identify recurring \
                 topics and predict what is likely to be asked next.",
            ),
            ChatMessage::user(format!("Paper: {title}\n\n{text}")),
        ];
        let tool = ToolSchema {
            name: "record_paper_analysis".into(),
            description: "Record topics, predictions, and analysis for a past paper".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "topics": { "type": "array", "items": { "type": "string" } },
                    "predictions": { "type": "array", "items": { "type": "string" } },
                    "analysis": { "type": "string" }
                },
                "required": ["topics", "analysis"]
            }),
        };

        match self.request(messages, Some(tool)).await? {
            CompletionOutcome::Structured(v) => Ok(PaperAnalysis {
                topics: str_list(&v, "topics"),
                predictions: str_list(&v, "predictions"),
                analysis: str_field(&v, "analysis"),
            }),
            CompletionOutcome::Text(_) => {
                warn!(task = "paper", "service ignored the response schema; using placeholders");
                Ok(PaperAnalysis::default())
            }
        }
    }

    /// Break a study goal into an ordered list of tasks over `days` days.
    pub async fn generate_plan(
        &self,
        goal: &str,
        days: u32,
    ) -> Result<Vec<PlannedTask>, AiError> {
        let messages = vec![
            ChatMessage::system(
                "You are a study assistant building study plans. Produce concrete, \
                 ordered tasks a student can check off.",
            ),
            ChatMessage::user(format!("Goal: {goal}\nTime available: {days} days")),
        ];
        let tool = ToolSchema {
            name: "record_study_plan".into(),
            description: "Record the ordered tasks of a study plan".into(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "tasks": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "title": { "type": "string" },
                                "detail": { "type": "string" }
                            },
                            "required": ["title"]
                        }
                    }
                },
                "required": ["tasks"]
            }),
        };

        match self.request(messages, Some(tool)).await? {
            CompletionOutcome::Structured(v) => Ok(parse_tasks(&v)),
            CompletionOutcome::Text(_) => {
                warn!(task = "plan", "service ignored the response schema; no tasks generated");
                Ok(Vec::new())
            }
        }
    }

    /// One conversational tutor turn: prior history plus the new message.
    /// Chat is the one task that wants free text, so no schema is forced.
    pub async fn chat_reply(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AiError> {
        let mut messages = vec![ChatMessage::system(
            "You are a patient tutor. Answer the student's question directly and \
             explain the reasoning.",
        )];
        messages.extend_from_slice(history);
        messages.push(ChatMessage::user(message));

        match self.request(messages, None).await? {
            CompletionOutcome::Text(reply) => Ok(reply),
            CompletionOutcome::Structured(v) => {
                // Some providers wrap even free text; take a reply field if present.
                Ok(str_field(&v, "reply"))
            }
        }
    }
}

/// A missing or mistyped string field degrades to "".
fn str_field(v: &Value, key: &str) -> String {
    v[key].as_str().unwrap_or_default().trim().to_string()
}

/// A missing or mistyped array field degrades to []. Non-string entries are
/// dropped rather than stringified.
fn str_list(v: &Value, key: &str) -> Vec<String> {
    v[key]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|item| item.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn parse_questions(v: &Value) -> Vec<QuizQuestion> {
    let items = v["questions"].as_array().cloned().unwrap_or_default();
    items
        .iter()
        .filter_map(|item| {
            let question = str_field(item, "question");
            if question.is_empty() {
                // A question with no text can't be salvaged; drop it rather
                // than invent one.
                return None;
            }
            let options = str_list(item, "options");
            if options.len() < 2 {
                return None;
            }
            let correct_answer = item["correct_answer"]
                .as_u64()
                .map(|i| i as usize)
                .unwrap_or(0)
                .min(options.len() - 1);
            Some(QuizQuestion {
                question,
                options,
                correct_answer,
                explanation: str_field(item, "explanation"),
            })
        })
        .collect()
}

fn parse_tasks(v: &Value) -> Vec<PlannedTask> {
    let items = v["tasks"].as_array().cloned().unwrap_or_default();
    items
        .iter()
        .filter_map(|item| {
            // Accept either {title, detail} objects or bare strings.
            let (title, detail) = if let Some(s) = item.as_str() {
                (s.trim().to_string(), String::new())
            } else {
                (str_field(item, "title"), str_field(item, "detail"))
            };
            if title.is_empty() {
                return None;
            }
            Some(PlannedTask { title, detail })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockBackend, MockReply};

    fn normalizer(reply: MockReply) -> Normalizer {
        Normalizer::new(Arc::new(MockBackend::new(reply)), "test-model")
    }

    #[tokio::test]
    async fn note_missing_field_degrades_only_that_field() {
        // keywords absent: summary must survive, keywords become empty.
        let n = normalizer(MockReply::Structured(json!({
            "summary": "Plants turn light into sugar.",
            "mindmap": "- photosynthesis\n  - light reactions"
        })));
        let insights = n.process_note("Photosynthesis", "...").await.unwrap();
        assert_eq!(insights.summary, "Plants turn light into sugar.");
        assert!(insights.keywords.is_empty());
        assert!(insights.mindmap.starts_with("- photosynthesis"));
    }

    #[tokio::test]
    async fn note_mistyped_field_degrades_only_that_field() {
        let n = normalizer(MockReply::Structured(json!({
            "summary": 42,
            "keywords": ["chlorophyll", "stroma"],
        })));
        let insights = n.process_note("t", "x").await.unwrap();
        assert_eq!(insights.summary, "");
        assert_eq!(insights.keywords, vec!["chlorophyll", "stroma"]);
    }

    #[tokio::test]
    async fn free_text_note_response_becomes_placeholder() {
        let n = normalizer(MockReply::Text("Sure! Here's a summary: ...".into()));
        let insights = n.process_note("t", "x").await.unwrap();
        assert_eq!(insights, NoteInsights::default());
    }

    #[tokio::test]
    async fn quiz_questions_are_parsed_and_clamped() {
        let n = normalizer(MockReply::Structured(json!({
            "questions": [
                {
                    "question": "What pigment absorbs light?",
                    "options": ["Chlorophyll", "Keratin", "Insulin", "Myosin"],
                    "correct_answer": 0,
                    "explanation": "Chlorophyll absorbs red and blue light."
                },
                {
                    "question": "Out-of-range index gets clamped",
                    "options": ["a", "b"],
                    "correct_answer": 9
                },
                { "question": "", "options": ["x", "y"], "correct_answer": 0 },
                { "question": "too few options", "options": ["only"], "correct_answer": 0 }
            ]
        })));
        let questions = n.generate_quiz("Photosynthesis", 5).await.unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].correct_answer, 0);
        assert_eq!(questions[1].correct_answer, 1);
        assert_eq!(questions[1].explanation, "");
    }

    #[tokio::test]
    async fn upstream_error_propagates_with_status() {
        let n = normalizer(MockReply::Upstream {
            status: 429,
            message: "quota".into(),
        });
        let err = n.generate_quiz("t", 5).await.unwrap_err();
        match err {
            AiError::Upstream { status, .. } => assert_eq!(status, 429),
            other => panic!("expected upstream error, got {other}"),
        }
    }

    #[tokio::test]
    async fn plan_accepts_objects_and_bare_strings() {
        let n = normalizer(MockReply::Structured(json!({
            "tasks": [
                { "title": "Read chapter 3", "detail": "Focus on diagrams" },
                "Review flashcards",
                { "detail": "no title, dropped" }
            ]
        })));
        let tasks = n.generate_plan("Pass biology", 7).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title, "Read chapter 3");
        assert_eq!(tasks[1].title, "Review flashcards");
    }

    #[tokio::test]
    async fn chat_returns_free_text_verbatim() {
        let n = normalizer(MockReply::Text("Mitosis produces two identical cells.".into()));
        let reply = n
            .chat_reply(&[ChatMessage::user("earlier question")], "What is mitosis?")
            .await
            .unwrap();
        assert_eq!(reply, "Mitosis produces two identical cells.");
    }
}
