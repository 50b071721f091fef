use rusqlite::{Row, params};

use crate::models::PastPaper;
use crate::{Store, StoreError, from_json, new_id, to_json};

fn paper_from_row(row: &Row<'_>) -> rusqlite::Result<PastPaper> {
    let topics: String = row.get(3)?;
    let predictions: String = row.get(4)?;
    Ok(PastPaper {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        title: row.get(2)?,
        topics: from_json(&topics),
        predictions: from_json(&predictions),
        analysis: row.get(5)?,
        created_at: row.get(6)?,
    })
}

const PAPER_COLUMNS: &str = "id, owner_id, title, topics, predictions, analysis, created_at";

impl Store {
    pub fn create_paper(
        &self,
        owner_id: &str,
        title: &str,
        topics: &[String],
        predictions: &[String],
        analysis: &str,
    ) -> Result<PastPaper, StoreError> {
        let conn = self.conn();
        let id = new_id();
        conn.execute(
            "INSERT INTO past_papers (id, owner_id, title, topics, predictions, analysis)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id,
                owner_id,
                title,
                to_json(&topics),
                to_json(&predictions),
                analysis
            ],
        )?;
        let paper = conn.query_row(
            &format!("SELECT {PAPER_COLUMNS} FROM past_papers WHERE id = ?1"),
            params![id],
            paper_from_row,
        )?;
        Ok(paper)
    }

    pub fn list_papers(&self, owner_id: &str) -> Result<Vec<PastPaper>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {PAPER_COLUMNS} FROM past_papers WHERE owner_id = ?1
             ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt.query_map(params![owner_id], paper_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    pub fn get_paper(&self, owner_id: &str, id: &str) -> Result<PastPaper, StoreError> {
        let conn = self.conn();
        conn.query_row(
            &format!("SELECT {PAPER_COLUMNS} FROM past_papers WHERE id = ?1 AND owner_id = ?2"),
            params![id, owner_id],
            paper_from_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound("past paper"),
            other => StoreError::Sqlite(other),
        })
    }

    pub fn delete_paper(&self, owner_id: &str, id: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "DELETE FROM past_papers WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("past paper"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_round_trip() {
        let s = Store::in_memory().unwrap();
        let topics = vec!["thermodynamics".to_string()];
        let predictions = vec!["entropy question likely".to_string()];
        let paper = s
            .create_paper("alice", "Physics 2023", &topics, &predictions, "analysis text")
            .unwrap();
        let read = s.get_paper("alice", &paper.id).unwrap();
        assert_eq!(read.topics, topics);
        assert_eq!(read.predictions, predictions);
        assert_eq!(read.analysis, "analysis text");
    }

    #[test]
    fn delete_does_not_touch_other_owners() {
        let s = Store::in_memory().unwrap();
        let a = s.create_paper("alice", "p", &[], &[], "").unwrap();
        s.create_paper("bob", "p", &[], &[], "").unwrap();

        s.delete_paper("alice", &a.id).unwrap();
        assert!(s.list_papers("alice").unwrap().is_empty());
        assert_eq!(s.list_papers("bob").unwrap().len(), 1);
    }
}
