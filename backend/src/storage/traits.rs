//! # Storage Traits
//!
//! Defines the option storage abstraction so the domain layer can run
//! against SQLite in production and anything else in tests.

use async_trait::async_trait;

use crate::error::StorageError;

/// Named string values, overwritten as a whole on update
#[async_trait]
pub trait OptionStorage: Send + Sync {
    /// Retrieve an option value, `None` when it was never written
    async fn get_option(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Store an option value, replacing any previous one
    async fn update_option(&self, name: &str, value: &str) -> Result<(), StorageError>;

    /// Remove an option. Returns true if it existed
    async fn delete_option(&self, name: &str) -> Result<bool, StorageError>;

    /// Names of all stored options
    async fn list_options(&self) -> Result<Vec<String>, StorageError>;
}
