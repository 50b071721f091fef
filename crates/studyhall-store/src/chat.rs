use rusqlite::{Row, params};
use serde_json::Value;

use crate::models::ChatSession;
use crate::{Store, StoreError, new_id, to_json};

fn session_from_row(row: &Row<'_>) -> rusqlite::Result<ChatSession> {
    let messages: String = row.get(3)?;
    Ok(ChatSession {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        messages: serde_json::from_str(&messages).unwrap_or(Value::Array(vec![])),
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

const SESSION_COLUMNS: &str = "id, owner_id, title, messages, created_at, updated_at";

impl Store {
    pub fn create_chat_session(
        &self,
        owner_id: &str,
        title: &str,
        messages: &Value,
    ) -> Result<ChatSession, StoreError> {
        let conn = self.conn();
        let id = new_id();
        conn.execute(
            "INSERT INTO chat_sessions (id, owner_id, title, messages) VALUES (?1, ?2, ?3, ?4)",
            params![id, owner_id, title, to_json(messages)],
        )?;
        let session = conn.query_row(
            &format!("SELECT {SESSION_COLUMNS} FROM chat_sessions WHERE id = ?1"),
            params![id],
            session_from_row,
        )?;
        Ok(session)
    }

    /// Sessions for one owner, most recently active first.
    pub fn list_chat_sessions(&self, owner_id: &str) -> Result<Vec<ChatSession>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {SESSION_COLUMNS} FROM chat_sessions WHERE owner_id = ?1
             ORDER BY updated_at DESC, rowid DESC"
        ))?;
        let rows = stmt.query_map(params![owner_id], session_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    pub fn get_chat_session(&self, owner_id: &str, id: &str) -> Result<ChatSession, StoreError> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {SESSION_COLUMNS} FROM chat_sessions WHERE id = ?1 AND owner_id = ?2"),
            params![id, owner_id],
            session_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound("chat session"),
            other => StoreError::Sqlite(other),
        })
    }

    /// Replace the whole transcript (last-write-wins) and touch updated_at.
    pub fn update_chat_messages(
        &self,
        owner_id: &str,
        id: &str,
        messages: &Value,
    ) -> Result<ChatSession, StoreError> {
        {
            let conn = self.conn();
            let changed = conn.execute(
                "UPDATE chat_sessions SET messages = ?1, updated_at = datetime('now')
                 WHERE id = ?2 AND owner_id = ?3",
                params![to_json(messages), id, owner_id],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("chat session"));
            }
        }
        self.get_chat_session(owner_id, id)
    }

    pub fn delete_chat_session(&self, owner_id: &str, id: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "DELETE FROM chat_sessions WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("chat session"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transcript_append_round_trip() {
        let s = Store::in_memory().unwrap();
        let start = json!([{"role": "user", "content": "hi"}]);
        let session = s.create_chat_session("alice", "hi", &start).unwrap();

        let extended = json!([
            {"role": "user", "content": "hi"},
            {"role": "assistant", "content": "hello!"}
        ]);
        let updated = s
            .update_chat_messages("alice", &session.id, &extended)
            .unwrap();
        assert_eq!(updated.messages.as_array().unwrap().len(), 2);
    }

    #[test]
    fn sessions_are_owner_scoped() {
        let s = Store::in_memory().unwrap();
        let session = s
            .create_chat_session("alice", "t", &json!([]))
            .unwrap();
        assert!(matches!(
            s.get_chat_session("bob", &session.id),
            Err(StoreError::NotFound(_))
        ));
    }
}
