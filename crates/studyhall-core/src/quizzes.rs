//! Quizzes: topic in, multiple-choice questions out, graded on completion.

use serde_json::Value;
use studyhall_ai::{Normalizer, QuizQuestion};
use studyhall_store::{Quiz, Store};
use tracing::info;

use crate::{Error, UserContext, require_nonempty};

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const MAX_QUESTION_COUNT: usize = 20;

/// Generate a quiz for a topic. A degraded AI response (no usable questions)
/// still persists the quiz row; the caller sees an empty question list
/// rather than an error.
pub async fn generate_quiz(
    ctx: &UserContext,
    store: &Store,
    normalizer: &Normalizer,
    topic: &str,
    count: Option<usize>,
) -> Result<Quiz, Error> {
    let topic = require_nonempty(topic, "quiz topic")?;
    let count = count.unwrap_or(DEFAULT_QUESTION_COUNT).clamp(1, MAX_QUESTION_COUNT);

    let questions = normalizer.generate_quiz(&topic, count).await?;
    info!(user = %ctx.user_id, topic = %topic, generated = questions.len(), "quiz generated");

    let total = questions.len() as i64;
    let payload = serde_json::to_value(&questions).unwrap_or_else(|_| Value::Array(Vec::new()));
    Ok(store.create_quiz(&ctx.user_id, &topic, &payload, total)?)
}

/// Grade a completed attempt against the stored correct-answer indices and
/// persist score, total, and the completed flag.
pub fn complete_quiz(
    ctx: &UserContext,
    store: &Store,
    quiz_id: &str,
    answers: &[usize],
) -> Result<Quiz, Error> {
    let quiz = store.get_quiz(&ctx.user_id, quiz_id)?;
    let questions: Vec<QuizQuestion> =
        serde_json::from_value(quiz.questions.clone()).unwrap_or_default();

    if answers.len() != questions.len() {
        return Err(Error::InvalidInput(format!(
            "expected {} answers, got {}",
            questions.len(),
            answers.len()
        )));
    }

    let score = questions
        .iter()
        .zip(answers)
        .filter(|(q, a)| q.correct_answer == **a)
        .count() as i64;

    Ok(store.complete_quiz(&ctx.user_id, quiz_id, score)?)
}

pub fn list_quizzes(ctx: &UserContext, store: &Store) -> Result<Vec<Quiz>, Error> {
    Ok(store.list_quizzes(&ctx.user_id)?)
}

pub fn get_quiz(ctx: &UserContext, store: &Store, id: &str) -> Result<Quiz, Error> {
    Ok(store.get_quiz(&ctx.user_id, id)?)
}

pub fn delete_quiz(ctx: &UserContext, store: &Store, id: &str) -> Result<(), Error> {
    Ok(store.delete_quiz(&ctx.user_id, id)?)
}
