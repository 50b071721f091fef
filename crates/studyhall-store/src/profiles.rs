use rusqlite::params;

use crate::models::Profile;
use crate::{Store, StoreError};

impl Store {
    /// Create or update the profile row for an identity. Called on first
    /// sight of a user; display name overwrite is last-write-wins.
    pub fn upsert_profile(
        &self,
        owner_id: &str,
        display_name: &str,
    ) -> Result<Profile, StoreError> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO profiles (owner_id, display_name) VALUES (?1, ?2)
             ON CONFLICT(owner_id) DO UPDATE SET display_name = excluded.display_name",
            params![owner_id, display_name],
        )?;
        let profile = conn.query_row(
            "SELECT owner_id, display_name, created_at FROM profiles WHERE owner_id = ?1",
            params![owner_id],
            |row| {
                Ok(Profile {
                    owner_id: row.get(0)?,
                    display_name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            },
        )?;
        Ok(profile)
    }

    pub fn get_profile(&self, owner_id: &str) -> Result<Profile, StoreError> {
        let conn = self.conn();
        conn.query_row(
            "SELECT owner_id, display_name, created_at FROM profiles WHERE owner_id = ?1",
            params![owner_id],
            |row| {
                Ok(Profile {
                    owner_id: row.get(0)?,
                    display_name: row.get(1)?,
                    created_at: row.get(2)?,
                })
            },
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound("profile"),
            other => StoreError::Sqlite(other),
        })
    }
}
