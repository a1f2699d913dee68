// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;

/// A string key-value store backed by SQLite.
pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Get the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from kv where key = ?;";
        let value: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set(&self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert into kv (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        self.conn.execute(sql, (key, value))?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["kv"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_get_missing() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.get("nope")?, None);
        Ok(())
    }

    #[test]
    fn test_set_and_overwrite() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.set("wordwall:a", "1")?;
        assert_eq!(db.get("wordwall:a")?, Some("1".to_string()));
        db.set("wordwall:a", "2")?;
        assert_eq!(db.get("wordwall:a")?, Some("2".to_string()));
        Ok(())
    }

    #[test]
    fn test_reopen() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("wordwall.db");
        let path = path.to_str().unwrap();
        {
            let db = Database::new(path)?;
            db.set("key", "value")?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.get("key")?, Some("value".to_string()));
        Ok(())
    }
}
