//! Profile store port: Trait for user document persistence.
//!
//! This trait abstracts the document backend (SQLite locally, a managed
//! document database elsewhere) from the application logic. Every consumer
//! gets the store injected instead of sharing ambient profile state.

use std::sync::mpsc::Receiver;

use crate::domain::{ProfileRecord, UserDocument};

/// Change notification delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileUpdate {
    /// A user document was written
    Saved {
        user_id: String,
        profile: ProfileRecord,
    },
    /// A user document was deleted
    Removed { user_id: String },
}

/// Trait for user document storage.
///
/// Documents are keyed by user id (the account email). A `save` replaces
/// the whole document atomically.
pub trait ProfileStore: Send + Sync {
    /// Error type for storage operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load a user document.
    ///
    /// # Returns
    /// `None` if the user has no stored document.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn load(&self, user_id: &str) -> Result<Option<UserDocument>, Self::Error>;

    /// Create or replace a user document and notify subscribers.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn save(&self, document: &UserDocument) -> Result<(), Self::Error>;

    /// Delete a user document and notify subscribers.
    ///
    /// Deleting a missing document is not an error.
    ///
    /// # Errors
    /// Returns error if storage operation fails.
    fn remove(&self, user_id: &str) -> Result<(), Self::Error>;

    /// Receive every subsequent `ProfileUpdate`.
    ///
    /// Dropping the receiver unsubscribes.
    fn subscribe(&self) -> Receiver<ProfileUpdate>;
}
