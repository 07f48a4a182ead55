//! SQLite adapter: Implementation of ProfileStore.
//!
//! Stores each user document as a JSON blob keyed by user id, the same
//! shape a managed document database would hold.
//!
//! # Mutex Behavior
//!
//! The connection and the subscriber list are each behind a `Mutex`. A
//! poisoned lock surfaces as `StorageError::LockPoisoned` instead of a panic.
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection};

use crate::domain::UserDocument;
use crate::ports::{ProfileStore, ProfileUpdate};

/// Error type for storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// SQLite document store.
pub struct SqliteProfileStore {
    conn: Mutex<Connection>,
    subscribers: Mutex<Vec<Sender<ProfileUpdate>>>,
}

impl SqliteProfileStore {
    /// Open (or create) a store at the given database path.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or initialized.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Create an in-memory SQLite database (for testing).
    ///
    /// # Errors
    /// Returns error if database cannot be created.
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StorageError> {
        let store = Self {
            conn: Mutex::new(conn),
            subscribers: Mutex::new(Vec::new()),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<(), StorageError> {
        let conn = self.conn()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS users (
                user_id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StorageError> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    /// Number of stored user documents.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    pub fn count_users(&self) -> Result<usize, StorageError> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Deliver an update, dropping subscribers whose receiver is gone.
    fn publish(&self, update: ProfileUpdate) {
        match self.subscribers.lock() {
            Ok(mut subscribers) => {
                subscribers.retain(|tx| tx.send(update.clone()).is_ok());
            }
            Err(_) => tracing::warn!("Subscriber list lock poisoned, update not delivered"),
        }
    }
}

impl ProfileStore for SqliteProfileStore {
    type Error = StorageError;

    fn load(&self, user_id: &str) -> Result<Option<UserDocument>, Self::Error> {
        let conn = self.conn()?;

        let result = conn.query_row(
            "SELECT document FROM users WHERE user_id = ?1",
            params![user_id],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(document) => Ok(Some(serde_json::from_str(&document)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, document: &UserDocument) -> Result<(), Self::Error> {
        let json = serde_json::to_string(document)?;
        {
            let conn = self.conn()?;
            conn.execute(
                r"
                INSERT INTO users (user_id, document, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(user_id) DO UPDATE SET
                    document = excluded.document,
                    updated_at = excluded.updated_at
                ",
                params![document.email, json, chrono::Utc::now().to_rfc3339()],
            )?;
        }

        tracing::debug!(
            history_len = document.profile.health_score_history.len(),
            "Saved user document"
        );
        self.publish(ProfileUpdate::Saved {
            user_id: document.email.clone(),
            profile: document.profile.clone(),
        });
        Ok(())
    }

    fn remove(&self, user_id: &str) -> Result<(), Self::Error> {
        let deleted = {
            let conn = self.conn()?;
            conn.execute("DELETE FROM users WHERE user_id = ?1", params![user_id])?
        };

        if deleted > 0 {
            tracing::info!("Removed user document");
            self.publish(ProfileUpdate::Removed {
                user_id: user_id.to_string(),
            });
        }
        Ok(())
    }

    fn subscribe(&self) -> Receiver<ProfileUpdate> {
        let (tx, rx) = mpsc::channel();
        match self.subscribers.lock() {
            Ok(mut subscribers) => subscribers.push(tx),
            Err(_) => tracing::warn!("Subscriber list lock poisoned, subscription is inert"),
        }
        rx
    }
}
