use rusqlite::{Row, params};

use crate::models::{Note, NoteUpdate};
use crate::{Store, StoreError, from_json, new_id, to_json};

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    let keywords: String = row.get(5)?;
    Ok(Note {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        content: row.get(3)?,
        summary: row.get(4)?,
        keywords: from_json(&keywords),
        mindmap: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const NOTE_COLUMNS: &str = "id, owner_id, title, content, summary, keywords, mindmap, created_at";

impl Store {
    pub fn create_note(
        &self,
        owner_id: &str,
        title: &str,
        content: &str,
        summary: &str,
        keywords: &[String],
        mindmap: &str,
    ) -> Result<Note, StoreError> {
        let conn = self.conn();
        let id = new_id();
        conn.execute(
            "INSERT INTO notes (id, owner_id, title, content, summary, keywords, mindmap)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![id, owner_id, title, content, summary, to_json(&keywords), mindmap],
        )?;
        let note = conn.query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1"),
            params![id],
            note_from_row,
        )?;
        Ok(note)
    }

    /// Notes for one owner, newest first.
    pub fn list_notes(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE owner_id = ?1
             ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt.query_map(params![owner_id], note_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    pub fn get_note(&self, owner_id: &str, id: &str) -> Result<Note, StoreError> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1 AND owner_id = ?2"),
            params![id, owner_id],
            note_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound("note"),
            other => StoreError::Sqlite(other),
        })
    }

    /// Partial update: NULL parameters keep the existing column value.
    /// Concurrent updates are last-write-wins; there is no version check.
    pub fn update_note(
        &self,
        owner_id: &str,
        id: &str,
        update: &NoteUpdate,
    ) -> Result<Note, StoreError> {
        {
            let conn = self.conn();
            let keywords_json = update.keywords.as_ref().map(to_json);
            let changed = conn.execute(
                "UPDATE notes SET
                     title    = COALESCE(?1, title),
                     content  = COALESCE(?2, content),
                     summary  = COALESCE(?3, summary),
                     keywords = COALESCE(?4, keywords),
                     mindmap  = COALESCE(?5, mindmap)
                 WHERE id = ?6 AND owner_id = ?7",
                params![
                    update.title,
                    update.content,
                    update.summary,
                    keywords_json,
                    update.mindmap,
                    id,
                    owner_id
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound("note"));
            }
        }
        self.get_note(owner_id, id)
    }

    /// Hard delete; irreversible. Another owner's note is reported not found.
    pub fn delete_note(&self, owner_id: &str, id: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "DELETE FROM notes WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("note"));
        }
        Ok(())
    }
}
