use rusqlite::{Row, params};
use serde_json::Value;

use crate::models::Quiz;
use crate::{Store, StoreError, new_id, to_json};

fn quiz_from_row(row: &Row<'_>) -> rusqlite::Result<Quiz> {
    let questions: String = row.get(3)?;
    let completed: i64 = row.get(6)?;
    Ok(Quiz {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        topic: row.get(2)?,
        questions: serde_json::from_str(&questions).unwrap_or(Value::Array(vec![])),
        score: row.get(4)?,
        total_questions: row.get(5)?,
        completed: completed != 0,
        created_at: row.get(7)?,
    })
}

const QUIZ_COLUMNS: &str =
    "id, owner_id, topic, questions, score, total_questions, completed, created_at";

impl Store {
    pub fn create_quiz(
        &self,
        owner_id: &str,
        topic: &str,
        questions: &Value,
        total_questions: i64,
    ) -> Result<Quiz, StoreError> {
        let conn = self.conn();
        let id = new_id();
        conn.execute(
            "INSERT INTO quizzes (id, owner_id, topic, questions, total_questions)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, owner_id, topic, to_json(questions), total_questions],
        )?;
        let quiz = conn.query_row(
            &format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = ?1"),
            params![id],
            quiz_from_row,
        )?;
        Ok(quiz)
    }

    pub fn list_quizzes(&self, owner_id: &str) -> Result<Vec<Quiz>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {QUIZ_COLUMNS} FROM quizzes WHERE owner_id = ?1
             ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt.query_map(params![owner_id], quiz_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    pub fn get_quiz(&self, owner_id: &str, id: &str) -> Result<Quiz, StoreError> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {QUIZ_COLUMNS} FROM quizzes WHERE id = ?1 AND owner_id = ?2"),
            params![id, owner_id],
            quiz_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound("quiz"),
            other => StoreError::Sqlite(other),
        })
    }

    /// Record the result of a completed attempt.
    pub fn complete_quiz(
        &self,
        owner_id: &str,
        id: &str,
        score: i64,
    ) -> Result<Quiz, StoreError> {
        {
            let conn = self.conn();
            let changed = conn.execute(
                "UPDATE quizzes SET score = ?1, completed = 1 WHERE id = ?2 AND owner_id = ?3",
                params![score, id, owner_id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("quiz"));
            }
        }
        self.get_quiz(owner_id, id)
    }

    pub fn delete_quiz(&self, owner_id: &str, id: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "DELETE FROM quizzes WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("quiz"));
        }
        Ok(())
    }
}
