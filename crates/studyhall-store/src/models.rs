use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user profile row. One per identity; created on first sight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub owner_id: String,
    pub display_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub content: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub mindmap: String,
    pub created_at: String,
}

/// Partial update for a note: only supplied fields overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub summary: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub mindmap: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub owner_id: String,
    pub topic: String,
    /// Generated questions as stored JSON (shape owned by the AI layer).
    pub questions: Value,
    pub score: Option<i64>,
    pub total_questions: i64,
    pub completed: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastPaper {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub topics: Vec<String>,
    pub predictions: Vec<String>,
    pub analysis: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    pub id: String,
    pub owner_id: String,
    pub goal: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyTask {
    pub id: String,
    pub owner_id: String,
    pub plan_id: String,
    pub title: String,
    pub detail: String,
    pub completed: bool,
    pub position: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    /// Conversation turns as stored JSON (role/content pairs).
    pub messages: Value,
    pub created_at: String,
    pub updated_at: String,
}
