use rusqlite::{ffi, Connection, OptionalExtension, Result};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Keeps the bearer token across launches. Business data is never stored
/// locally; this is the only table.
pub struct TokenStore {
    conn: Mutex<Connection>,
}

impl TokenStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    ffi::Error::new(ffi::SQLITE_CANTOPEN),
                    Some(format!("cannot create {}: {}", dir.display(), e)),
                )
            })?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = TokenStore {
            conn: Mutex::new(conn),
        };
        store.initialize()?;
        Ok(store)
    }

    fn initialize(&self) -> Result<()> {
        let conn = self.conn();

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS session (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                token TEXT NOT NULL,
                saved_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            ",
        )?;

        Ok(())
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock cannot leave the single row half-written.
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn load(&self) -> Result<Option<String>> {
        self.conn()
            .query_row("SELECT token FROM session WHERE id = 1", [], |row| row.get(0))
            .optional()
    }

    pub fn save(&self, token: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO session (id, token, saved_at) VALUES (1, ?1, CURRENT_TIMESTAMP)
             ON CONFLICT(id) DO UPDATE SET token = excluded.token, saved_at = excluded.saved_at",
            [token],
        )?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        self.conn().execute("DELETE FROM session", [])?;
        Ok(())
    }
}
