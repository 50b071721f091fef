use rusqlite::{Row, params};

use crate::models::{StudyPlan, StudyTask};
use crate::{Store, StoreError, new_id};

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<StudyPlan> {
    Ok(StudyPlan {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        goal: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<StudyTask> {
    let completed: i64 = row.get(5)?;
    Ok(StudyTask {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        plan_id: row.get(2)?,
        title: row.get(3)?,
        detail: row.get(4)?,
        completed: completed != 0,
        position: row.get(6)?,
        created_at: row.get(7)?,
    })
}

const TASK_COLUMNS: &str =
    "id, owner_id, plan_id, title, detail, completed, position, created_at";

impl Store {
    /// Create a plan with its tasks in one transaction, positions preserved.
    pub fn create_plan(
        &self,
        owner_id: &str,
        goal: &str,
        tasks: &[(String, String)],
    ) -> Result<StudyPlan, StoreError> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let plan_id = new_id();
        tx.execute(
            "INSERT INTO study_plans (id, owner_id, goal) VALUES (?1, ?2, ?3)",
            params![plan_id, owner_id, goal],
        )?;
        for (position, (title, detail)) in tasks.iter().enumerate() {
            tx.execute(
                "INSERT INTO study_tasks (id, owner_id, plan_id, title, detail, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![new_id(), owner_id, plan_id, title, detail, position as i64],
            )?;
        }
        tx.commit()?;

        let plan = conn.query_row(
            "SELECT id, owner_id, goal, created_at FROM study_plans WHERE id = ?1",
            params![plan_id],
            plan_from_row,
        )?;
        Ok(plan)
    }

    pub fn list_plans(&self, owner_id: &str) -> Result<Vec<StudyPlan>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, owner_id, goal, created_at FROM study_plans
             WHERE owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![owner_id], plan_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Tasks for a plan in plan order (oldest/first position first).
    pub fn plan_tasks(&self, owner_id: &str, plan_id: &str) -> Result<Vec<StudyTask>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM study_tasks
             WHERE plan_id = ?1 AND owner_id = ?2 ORDER BY position ASC"
        ))?;
        let rows = stmt.query_map(params![plan_id, owner_id], task_from_row)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    pub fn set_task_completed(
        &self,
        owner_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<StudyTask, StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "UPDATE study_tasks SET completed = ?1 WHERE id = ?2 AND owner_id = ?3",
            params![completed as i64, task_id, owner_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("study task"));
        }
        let task = conn.query_row(
            &format!("SELECT {TASK_COLUMNS} FROM study_tasks WHERE id = ?1"),
            params![task_id],
            task_from_row,
        )?;
        Ok(task)
    }

    /// Hard delete; tasks cascade with the plan.
    pub fn delete_plan(&self, owner_id: &str, id: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        let changed = conn.execute(
            "DELETE FROM study_plans WHERE id = ?1 AND owner_id = ?2",
            params![id, owner_id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("study plan"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasks_keep_plan_order() {
        let s = Store::in_memory().unwrap();
        let tasks = vec![
            ("Read chapter 1".to_string(), String::new()),
            ("Do exercises".to_string(), "odd numbers".to_string()),
            ("Review".to_string(), String::new()),
        ];
        let plan = s.create_plan("alice", "Pass algebra", &tasks).unwrap();
        let stored = s.plan_tasks("alice", &plan.id).unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].title, "Read chapter 1");
        assert_eq!(stored[2].title, "Review");
        assert!(stored.iter().all(|t| !t.completed));
    }

    #[test]
    fn toggling_a_task_persists() {
        let s = Store::in_memory().unwrap();
        let plan = s
            .create_plan("alice", "goal", &[("t".to_string(), String::new())])
            .unwrap();
        let task = &s.plan_tasks("alice", &plan.id).unwrap()[0];
        let updated = s.set_task_completed("alice", &task.id, true).unwrap();
        assert!(updated.completed);
        let undone = s.set_task_completed("alice", &task.id, false).unwrap();
        assert!(!undone.completed);
    }

    #[test]
    fn deleting_a_plan_cascades_tasks() {
        let s = Store::in_memory().unwrap();
        let plan = s
            .create_plan("alice", "goal", &[("t".to_string(), String::new())])
            .unwrap();
        s.delete_plan("alice", &plan.id).unwrap();
        assert!(s.plan_tasks("alice", &plan.id).unwrap().is_empty());
        assert!(s.list_plans("alice").unwrap().is_empty());
    }
}
